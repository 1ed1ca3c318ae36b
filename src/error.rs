use thiserror::Error;

#[derive(Error, Debug)]
pub enum CiteLinesError {
    #[error("Failed to read source {path}: {message}")]
    SourceRead { path: String, message: String },

    #[error("Unknown target field: {field}")]
    UnknownField { field: String },

    #[error("Invalid classification code: {value}")]
    FilterValue { value: String },

    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("An extraction run is already in progress")]
    ConcurrentRunRejected,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CiteLinesError {
    fn user_message(&self) -> String {
        match self {
            CiteLinesError::SourceRead { path, message } => {
                format!("Could not read {}: {}", path, message)
            }
            CiteLinesError::UnknownField { field } => {
                format!("Unknown target field: {}", field)
            }
            CiteLinesError::FilterValue { value } => {
                format!("Classification code is not a number: {}", value)
            }
            CiteLinesError::OutputWrite { path, source } => {
                format!("Could not write {}: {}", path, source)
            }
            CiteLinesError::ConcurrentRunRejected => {
                "An extraction run is already in progress".to_string()
            }
            CiteLinesError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CiteLinesError::SourceRead { .. } => Some(
                "Check that the file exists, is readable, and is a spreadsheet in a supported \
                 format (xlsx, xlsm, xls, ods, csv)."
                    .to_string(),
            ),
            CiteLinesError::UnknownField { .. } => Some(format!(
                "Valid field names are: {}",
                crate::schema::Field::ALL
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            CiteLinesError::FilterValue { .. } => Some(
                "Classification codes must be whole numbers, e.g. --codes 1,2,5.".to_string(),
            ),
            CiteLinesError::OutputWrite { .. } => Some(
                "Ensure the destination directory exists and you have write permission."
                    .to_string(),
            ),
            CiteLinesError::ConcurrentRunRejected => Some(
                "Wait for the current run to finish and start the extraction again.".to_string(),
            ),
            CiteLinesError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CiteLinesError {
    fn from(error: toml::de::Error) -> Self {
        CiteLinesError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CiteLinesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = CiteLinesError::UnknownField {
            field: "publisher".to_string(),
        };
        assert!(error.user_message().contains("publisher"));
        assert!(error.suggestion().unwrap().contains("classification_code"));
    }

    #[test]
    fn test_filter_value_suggestion() {
        let error = CiteLinesError::FilterValue {
            value: "abc".to_string(),
        };
        assert!(error.user_message().contains("abc"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let error = CiteLinesError::from(toml_error);
        assert!(matches!(error, CiteLinesError::Config { .. }));
    }
}
