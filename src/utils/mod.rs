pub(crate) mod fs;
pub(crate) mod output;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use fs::{file_size, shorten_path};
pub use output::Output;
pub use terminal::{set_terminal_title, terminal_confirm};
