//! Run configuration.

use ogri_eval::{
    SharedInputHandler, SharedPrintHandler, DEFAULT_MAX_CALL_DEPTH,
    DEFAULT_MAX_INTERPOLATION_LEN,
};
use ogri_runtime::{HashSeed, DEFAULT_TABLE_CAPACITY};

/// Knobs for [`run_with`](crate::run_with).
///
/// Unset handlers fall back to stdout and stdin; an unset seed is drawn
/// at random for each run.
#[derive(Clone)]
pub struct RunOptions {
    pub print_handler: Option<SharedPrintHandler>,
    pub input_handler: Option<SharedInputHandler>,
    /// `None` disables the recursion ceiling.
    pub max_call_depth: Option<usize>,
    pub max_interpolation_len: usize,
    pub hash_seed: Option<HashSeed>,
    pub scope_capacity: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            print_handler: None,
            input_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            max_interpolation_len: DEFAULT_MAX_INTERPOLATION_LEN,
            hash_seed: None,
            scope_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }
}

impl RunOptions {
    /// Write program output to `handler`.
    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Read `listen` input from `handler`.
    #[must_use]
    pub fn with_input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_hash_seed(mut self, seed: HashSeed) -> Self {
        self.hash_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }
}
