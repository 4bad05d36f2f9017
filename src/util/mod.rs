pub mod unicode;
pub mod viewport;
