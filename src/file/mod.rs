//! Input/output file plumbing for the signature engine.

pub mod operations;
pub mod validation;

pub use operations::{available_space, create_output, open_input};
pub use validation::{validate_block_size, validate_input};
