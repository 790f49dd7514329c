//! Validate selector strings

use super::CliError;
use crate::is_query_string_valid;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The selector formula to validate
    pub selector: String,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    /// Brackets are balanced
    Valid,
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if is_query_string_valid(&options.selector) {
        Ok(CheckResult::Valid)
    } else {
        Err(CliError::InvalidSelector)
    }
}
