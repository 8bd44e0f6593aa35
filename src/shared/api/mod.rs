mod json_config;
mod patch_field;
mod response;

pub use json_config::{custom_json_config, custom_query_config};
pub use patch_field::PatchField;
pub use response::{ApiError, ApiResponse};
