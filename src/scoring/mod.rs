//! Set score validation and match outcome resolution
//!
//! This module gates result entry: each set is checked against the league's
//! scoring variant before the sets are turned into a winner and bonus flag.

pub mod outcome;
pub mod validator;

// Re-export commonly used types
pub use outcome::{build_result, check_result, resolve_outcome, validate_pairs, Outcome};
pub use validator::{
    set_errors, validate_entry, validate_set, validate_set_message, SetKind, SetScoreError,
};
