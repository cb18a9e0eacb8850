//! Formatting Utilities
//!
//! Pure functions turning raw values into display strings: durations,
//! relative timestamps, escaped HTML and severity badges.

mod html;
mod locale;
mod time;

pub use html::{escape_html, severity_badges};
pub use locale::{Locale, Messages};
pub use time::{format_duration, format_relative, parse_timestamp};
