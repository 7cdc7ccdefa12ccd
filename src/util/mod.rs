pub mod date_diff;

pub use date_diff::{date_diff, DateDiff};
