//! Error handling for codec operations
//!
//! This module re-exports the error types used throughout the crate. Errors are
//! derived with thiserror; the malformed-payload family can be told apart with
//! [`LzsError::is_format_error`].

pub use crate::common::LzsError;
pub use crate::common::Result;
