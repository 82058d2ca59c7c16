pub mod file_format;
pub mod log_setup;
pub mod parallel;

pub use file_format::{
    deserialize, serialize, FileExtensionError, FileFormatResult, SerdeFormat, SerdeFormatError,
    SerdeFormatResult,
};
