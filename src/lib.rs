//! Wall-clock stopwatch helper.
//!
//! ```no_run
//! let start = stopwatch_helper::begin("load-test");
//! // ... work ...
//! stopwatch_helper::finish(start);
//! ```
//!
//! prints
//!
//! ```text
//! Start (load-test): 1700000000000
//! End: 1700000000500
//! Elapsed time in milliseconds: 500
//! -------END-------
//!
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod logger;
pub mod stopwatch;

pub use crate::clock::{Clock, ElapsedMillis, ManualClock, SystemClock, Timestamp};
pub use crate::config::LoggingConfig;
pub use crate::error::{Result, StopwatchError};
pub use crate::logger::{init_logging, init_logging_with};
pub use crate::stopwatch::{Stopwatch, begin, finish, measure};
