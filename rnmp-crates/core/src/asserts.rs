//! Leveled assertions. The level is chosen at compile time; running the solver with the
//! `debug-checks` feature (or in unit tests) enables the more expensive checks.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const RNMP_ASSERT_LEVEL_DEFINITION: u8 = RNMP_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const RNMP_ASSERT_LEVEL_DEFINITION: u8 = RNMP_ASSERT_MODERATE;

pub const RNMP_ASSERT_SIMPLE: u8 = 1;
pub const RNMP_ASSERT_MODERATE: u8 = 2;
pub const RNMP_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! rnmp_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::RNMP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::RNMP_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! rnmp_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::RNMP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::RNMP_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! rnmp_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::RNMP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::RNMP_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! rnmp_assert_eq_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::RNMP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::RNMP_ASSERT_MODERATE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! rnmp_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::RNMP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::RNMP_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
