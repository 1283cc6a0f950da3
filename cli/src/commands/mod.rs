//! CLI command implementations

mod object;

pub use object::{get_command, put_command};
