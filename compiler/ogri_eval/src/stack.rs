//! Native stack growth for deeply nested trees.
//!
//! Evaluation recurses once per tree level and once per language-level call,
//! so a program can exhaust the native stack long before the configured
//! call-depth ceiling is reached. `Interpreter::eval` runs every node through
//! [`ensure_sufficient_stack`]. On wasm32 the closure is called directly.

/// Grow when fewer than this many bytes of stack remain.
const GROW_THRESHOLD: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `work`, first moving to a new stack segment if the current one is
/// nearly full.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(work: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(GROW_THRESHOLD, SEGMENT_SIZE, work)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(work: impl FnOnce() -> R) -> R {
    work()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn nesting(levels: u64) -> u64 {
        ensure_sufficient_stack(|| {
            if levels == 0 {
                0
            } else {
                nesting(levels - 1) + 1
            }
        })
    }

    #[test]
    fn deep_nesting_completes() {
        assert_eq!(nesting(200_000), 200_000);
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let result: Result<(), String> = ensure_sufficient_stack(|| Err("bad".to_string()));
        assert_eq!(result, Err("bad".to_string()));
    }
}
