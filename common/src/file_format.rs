use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn get_file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|os_str| os_str.to_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerdeFormat {
    Yaml,
    Json,
}

impl SerdeFormat {
    pub fn all_formats_for_testing() -> [Self; 2] {
        [Self::Yaml, Self::Json]
    }

    pub fn from_path(path: &Path) -> FileFormatResult<Self> {
        let ext = get_file_extension(path).ok_or(FileExtensionError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }
}

/// Serializes `value` into text, always terminated with a single `\n`.
pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> SerdeFormatResult<String> {
    let mut text = match format {
        SerdeFormat::Yaml => serde_yml::to_string(value)?,
        SerdeFormat::Json => serde_json::to_string_pretty(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: SerdeFormat,
) -> SerdeFormatResult<T> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        SerdeFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        gain: f32,
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SerdeFormat::from_path(Path::new("a.yaml")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("dir/a.YML")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("a.json")).unwrap(),
            SerdeFormat::Json
        );
    }

    #[test]
    fn missing_extension_is_error() {
        assert!(matches!(
            SerdeFormat::from_path(Path::new("config")),
            Err(FileExtensionError::MissingFileExtension)
        ));
    }

    #[test]
    fn unsupported_extension_is_error() {
        let err = SerdeFormat::from_path(Path::new("config.lua")).unwrap_err();
        assert!(matches!(err, FileExtensionError::UnsupportedFileExtension(_)));
        assert!(err.to_string().contains("config.lua"));
    }

    #[test]
    fn serialized_text_ends_with_newline() {
        let value = Sample {
            name: "a".to_string(),
            gain: 0.5,
        };
        for format in SerdeFormat::all_formats_for_testing() {
            let text = serialize(&value, format).unwrap();
            assert!(text.ends_with('\n'), "{format:?}");
            assert!(!text.ends_with("\n\n"), "{format:?}");
        }
    }

    #[test]
    fn deserialize_reads_every_format() {
        let value = Sample {
            name: "bank".to_string(),
            gain: 0.25,
        };
        for format in SerdeFormat::all_formats_for_testing() {
            let text = serialize(&value, format).unwrap();
            let parsed: Sample = deserialize(&text, format).unwrap();
            assert_eq!(parsed, value, "{format:?}");
        }
    }

    #[test]
    fn malformed_input_reports_format() {
        let result: SerdeFormatResult<Sample> = deserialize("{ not json", SerdeFormat::Json);
        assert!(matches!(result, Err(SerdeFormatError::Json(_))));
    }
}
