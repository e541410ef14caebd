//! Pure ledger computations plus the session that ties them to a record store.
//!
//! Nothing under `services` performs I/O; [`session::Session`] is the only
//! place that reads from or writes to a [`crate::storage::RecordStore`].

pub mod services;
pub mod session;
pub mod time;
pub mod utils;

pub use session::Session;
pub use time::{Clock, FixedClock, SystemClock};
