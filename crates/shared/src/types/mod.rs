//! Common types used across the application.

pub mod amount;
pub mod id;
pub mod month;

pub use amount::format_amount;
pub use id::*;
pub use month::{Month, ParseMonthError};
