//! Shared helpers for formatting, time math, and input validation.

pub mod format_utils;
pub mod time_utils;
pub mod validation_utils;

pub use format_utils::group_thousands;
pub use time_utils::{relative_time, relative_time_now, Period};
pub use validation_utils::is_valid_email;
