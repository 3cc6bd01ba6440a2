//! Background data refresh.
//!
//! Each window owns one [`RefreshScheduler`] running on its own thread. The
//! scheduler evaluates the window's fetchers every refresh period and
//! publishes results into the window's [`crate::store::SharedStore`].

pub mod errors;
pub mod handle;
pub mod operations;

pub use errors::SchedulerError;
pub use handle::SchedulerHandle;
pub use operations::{CycleReport, RefreshScheduler};
