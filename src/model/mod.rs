pub mod config;
pub mod metadata;
pub mod track;

pub use config::*;
pub use metadata::*;
pub use track::*;
