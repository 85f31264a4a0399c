//! Command-line argument parsing and handling.

pub mod contact;
pub mod data;
pub mod definition;
pub mod export;
pub mod locale;
pub mod translate;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, process_args};
pub use utils::determine_log_level;
