pub mod params;
pub mod validated_json;

pub use params::{path_config, query_config};
pub use validated_json::{Validate, ValidatedJson};
