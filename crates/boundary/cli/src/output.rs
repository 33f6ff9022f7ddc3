//! Output formatting utilities

use colored::*;
use serde::Serialize;

use crate::error::CliResult;

/// Print one value as a single JSON line on stdout
pub fn print_json_line<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an informational message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a dimmed placeholder for empty results
pub fn print_empty(message: &str) {
    println!("{}", message.dimmed());
}
