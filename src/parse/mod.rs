pub mod metadata_parser;
pub mod plan_parser;

pub use metadata_parser::{MetadataError, parse_metadata};
pub use plan_parser::{PlanLine, classify_line, parse_plan};
