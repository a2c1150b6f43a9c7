//! CLI command implementations

pub mod check;
pub mod convert;
pub mod generate;
pub mod show;

pub use check::check_command;
pub use convert::convert_command;
pub use generate::{generate_command, parse_factory, GenerateArgs};
pub use show::show_command;
