//! Expiry date evaluation shared by item and certificate dates.
//!
//! Everything here is pure: "today" is always passed in by the caller.

mod parse;
mod status;

pub use parse::{days_remaining, format_date, parse_date, DateError};
pub use status::{
    classify, ExpiryKind, ExpiryReading, ExpiryStatus, EXPIRED_AT_OR_BELOW_DAYS,
    NEAR_EXPIRY_WINDOW_DAYS,
};
