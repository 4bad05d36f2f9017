pub mod config_io;
pub mod discovery;
pub mod log;
pub mod watcher;
