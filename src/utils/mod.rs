pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{APP_NAME, get_config_file, get_log_file};
pub use paths::{
    default_bookmarks_path, default_history_path, format_path_with_tilde, validate_file_size,
};
pub use terminal::strip_ansi_codes;
