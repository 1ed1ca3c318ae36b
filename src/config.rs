use crate::error::{CiteLinesError, Result};
use crate::extractor::ExtractionSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Directory scanned for catalog files when `files` is empty.
    pub directory: PathBuf,
    /// Explicit file names, joined to `directory`. Empty means "scan".
    pub files: Vec<String>,
    /// Extensions the directory scan accepts.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    pub target_fields: Vec<String>,
    pub accepted_codes: Vec<CodeValue>,
    pub output_file: PathBuf,
}

/// Accepted-code values arrive as TOML integers from the config file but as
/// strings from the CLI; both normalize to the same representation inside
/// the extractor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CodeValue {
    Number(i64),
    Text(String),
}

impl CodeValue {
    pub fn as_text(&self) -> String {
        match self {
            CodeValue::Number(n) => n.to_string(),
            CodeValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            files: Vec::new(),
            extensions: vec!["xlsx".to_string()],
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            target_fields: vec!["author".to_string(), "title".to_string()],
            accepted_codes: Vec::new(),
            output_file: PathBuf::from("result.txt"),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CiteLinesError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CiteLinesError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CiteLinesError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["citelines.toml", "citelines.config.toml", ".citelines.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.input.directory = input_dir.clone();
        }

        if let Some(ref files) = cli_args.files {
            self.input.files = files.clone();
        }

        if let Some(ref extensions) = cli_args.extensions {
            self.input.extensions = extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
        }

        if let Some(ref fields) = cli_args.fields {
            self.extract.target_fields = fields.iter().map(|f| f.trim().to_string()).collect();
        }

        if let Some(ref codes) = cli_args.codes {
            self.extract.accepted_codes =
                codes.iter().map(|c| CodeValue::Text(c.clone())).collect();
        }

        if let Some(ref output) = cli_args.output {
            self.extract.output_file = output.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CiteLinesError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CiteLinesError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.target_fields.is_empty() {
            return Err(CiteLinesError::Config {
                message: "At least one target field must be specified".to_string(),
            });
        }

        if self.extract.accepted_codes.is_empty() {
            return Err(CiteLinesError::Config {
                message: "At least one accepted classification code must be specified".to_string(),
            });
        }

        if self.input.extensions.is_empty() {
            return Err(CiteLinesError::Config {
                message: "At least one input extension must be specified".to_string(),
            });
        }

        if self.extract.output_file.as_os_str().is_empty() {
            return Err(CiteLinesError::Config {
                message: "Output file must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Explicit input files, joined to the input directory. Empty means the
    /// caller should fall back to a directory scan.
    pub fn explicit_files(&self) -> Vec<PathBuf> {
        self.input
            .files
            .iter()
            .map(|name| self.input.directory.join(name))
            .collect()
    }

    pub fn extraction_spec(&self) -> ExtractionSpec {
        ExtractionSpec {
            target_fields: self.extract.target_fields.clone(),
            accepted_codes: self
                .extract
                .accepted_codes
                .iter()
                .map(CodeValue::as_text)
                .collect(),
            output_path: self.extract.output_file.clone(),
        }
    }

    pub fn create_sample_config() -> String {
        let mut sample = Self::default();
        sample.extract.accepted_codes = vec![CodeValue::Number(1)];
        toml::to_string_pretty(&sample).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub files: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
    pub codes: Option<Vec<String>>,
    pub output: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_files(mut self, files: Option<Vec<String>>) -> Self {
        self.files = files;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_codes(mut self, codes: Option<Vec<String>>) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.extract.accepted_codes = vec![CodeValue::Number(1)];
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.extensions, vec!["xlsx"]);
        assert_eq!(config.extract.output_file, PathBuf::from("result.txt"));
        assert!(config.input.files.is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.extract.target_fields.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.extract.accepted_codes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = valid_config();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.extract.accepted_codes, config.extract.accepted_codes);
        assert_eq!(loaded.extract.target_fields, config.extract.target_fields);
    }

    #[test]
    fn test_codes_parse_as_integers_or_strings() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"
[input]
directory = "catalog"
files = []
extensions = ["xlsx", "csv"]

[extract]
target_fields = ["author", "title"]
accepted_codes = [1, "2"]
output_file = "out.txt"
"#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.extract.accepted_codes,
            vec![CodeValue::Number(1), CodeValue::Text("2".to_string())]
        );

        let spec = config.extraction_spec();
        assert_eq!(spec.accepted_codes, vec!["1", "2"]);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = valid_config();

        let overrides = CliOverrides::new()
            .with_fields(Some(vec!["title".to_string()]))
            .with_codes(Some(vec!["5".to_string()]))
            .with_output(Some(PathBuf::from("other.txt")));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.extract.target_fields, vec!["title"]);
        assert_eq!(
            config.extract.accepted_codes,
            vec![CodeValue::Text("5".to_string())]
        );
        assert_eq!(config.extract.output_file, PathBuf::from("other.txt"));
    }

    #[test]
    fn test_explicit_files_join_input_directory() {
        let mut config = valid_config();
        config.input.directory = PathBuf::from("catalog");
        config.input.files = vec!["a.xlsx".to_string(), "b.xlsx".to_string()];

        let files = config.explicit_files();
        assert_eq!(
            files,
            vec![PathBuf::from("catalog/a.xlsx"), PathBuf::from("catalog/b.xlsx")]
        );
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[input]"));
        assert!(sample.contains("[extract]"));
        assert!(sample.contains("accepted_codes"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let result = Config::load_from_file("/nonexistent/citelines.toml");
        assert!(matches!(result, Err(CiteLinesError::Config { .. })));
    }
}
