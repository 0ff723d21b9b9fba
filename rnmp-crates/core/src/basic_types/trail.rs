use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::rnmp_assert_simple;

/// An undo log split into checkpoints.
///
/// Every narrowing of a domain (or write to a trailed integer) pushes one entry holding what is
/// needed to revert it. Taking a checkpoint marks the current length; synchronising to an earlier
/// checkpoint hands back every entry above that mark, newest first, so the owner can restore
/// the old state.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// At index i is the length of the trail at the moment checkpoint i + 1 was taken.
    checkpoint_delimiters: Vec<usize>,
    entries: Vec<T>,
}

// Implemented by hand so that `T` does not need to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            checkpoint_delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.checkpoint_delimiters.push(self.entries.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.checkpoint_delimiters.len()
    }

    /// Removes every entry recorded after `new_checkpoint` was taken and returns them in reverse
    /// order of insertion.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        rnmp_assert_simple!(
            new_checkpoint <= self.get_checkpoint(),
            "cannot synchronise to checkpoint {new_checkpoint} from checkpoint {}",
            self.get_checkpoint()
        );

        let new_len = if new_checkpoint == self.get_checkpoint() {
            self.entries.len()
        } else {
            self.checkpoint_delimiters[new_checkpoint]
        };

        self.checkpoint_delimiters.truncate(new_checkpoint);
        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}
