//! Readers for the two instance formats and for stored plans.
//!
//! The readers only check the shape of the files; whether the numbers form a consistent
//! instance is decided by [`rnmp_core::instance::Instance::validate`] when solving.
pub mod json;
pub mod text;

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("the file ended while reading {0}")]
    UnexpectedEnd(&'static str),

    #[error("line {line}: expected {expected}")]
    MissingToken { line: usize, expected: &'static str },

    #[error("line {line}: '{token}' is not a valid {expected}")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },

    #[error("line {line}: '{entry}' is not a '<from>:<to>:<cost>' entry")]
    InvalidCostEntry { line: usize, entry: String },

    #[error("line {line}: the interval [{from}, {to}) is outside the horizon {horizon}")]
    CostOutsideHorizon {
        line: usize,
        from: usize,
        to: usize,
        horizon: usize,
    },

    #[error("line {line}: unknown line tag '{tag}'")]
    UnknownTag { line: usize, tag: String },

    #[error("line {line}: unexpected trailing token '{token}'")]
    TrailingToken { line: usize, token: String },

    #[error("invalid JSON instance: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whitespace separated tokens of one line, together with its (1-based) line number for
/// error reporting.
#[derive(Debug)]
pub(crate) struct Tokens<'a> {
    line: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(line: usize, content: &'a str) -> Self {
        Tokens {
            line,
            tokens: content.split_whitespace(),
        }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn next_token(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::MissingToken {
            line: self.line,
            expected,
        })
    }

    pub(crate) fn next_number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        let token = self.next_token(expected)?;
        parse_number(self.line, token, expected)
    }

    pub(crate) fn remaining(&mut self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.by_ref()
    }

    pub(crate) fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) => Err(ParseError::TrailingToken {
                line: self.line,
                token: token.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

pub(crate) fn parse_number<T: FromStr>(
    line: usize,
    token: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_owned(),
        expected,
    })
}
