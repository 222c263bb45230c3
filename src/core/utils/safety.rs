//! Zero-Cost Safety Macros
//!
//! Debug checks in dev, raw speed in prod.
//!
//! In Debug mode: bounds-checked access and invariant assertions (panic with useful errors)
//! In Release mode: unchecked access, invariant checks compiled out
//!
//! Usage:
//! ```rust
//! use tilestep_engine::{fast, invariant};
//!
//! let cells = vec![0, 0, 7, 0];
//! let idx = 2;
//! assert_eq!(*fast!(cells, [idx]), 7);
//!
//! let mass = 1.0f32;
//! invariant!(mass >= 0.0, "negative mass {}", mass);
//! ```

/// Bounds-checked read/write in debug, unchecked in release.
///
/// Only use this where the index was already validated by the caller
/// (e.g. after an `in_bounds` test).
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

/// Programming-error check: panics in debug builds, no-op in release.
///
/// Never used for conditions that can legitimately happen at runtime
/// (out-of-range grid access, stale handles); those have defined results.
#[macro_export]
macro_rules! invariant {
    ($cond:expr $(,)?) => {
        debug_assert!($cond, "engine invariant violated: {}", stringify!($cond));
    };
    ($cond:expr, $($arg:tt)+) => {
        debug_assert!($cond, $($arg)+);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_fast_read() {
        let arr = vec![1, 2, 3, 4, 5];
        let val = *fast!(arr, [2]);
        assert_eq!(val, 3);
    }

    #[test]
    fn test_fast_write() {
        let mut arr = vec![1, 2, 3, 4, 5];
        fast!(arr, [2] = 100);
        assert_eq!(arr[2], 100);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_fast_bounds_check_debug() {
        let arr = vec![1, 2, 3];
        let _ = *fast!(arr, [10]);
    }

    #[test]
    fn invariant_passes_when_true() {
        invariant!(1 + 1 == 2);
        invariant!(true, "message {}", 1);
    }

    #[test]
    #[should_panic(expected = "solid")]
    #[cfg(debug_assertions)]
    fn invariant_panics_in_debug() {
        invariant!(false, "solid entity must collide");
    }
}
