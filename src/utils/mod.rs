//! Various unsorted helpers: parallel loops and progress reporting.

pub use self::progress::{ProgressCallback, CALLBACK_INTERVAL};

pub(crate) use self::progress::CancelToken;

pub(crate) mod parallel;
mod progress;
