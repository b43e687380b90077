pub mod commands;

pub use commands::{Cli, Commands, query_suggestions, run};
