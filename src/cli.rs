use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "citelines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract citation lines from spreadsheet catalogs of papers")]
#[command(
    long_about = "CiteLines loads bibliographic records from one or more catalog \
                       spreadsheets, keeps the rows matching the given classification \
                       codes, concatenates the chosen fields per row, and writes the \
                       result as one line of text per paper."
)]
#[command(after_help = "EXAMPLES:\n  \
    citelines --codes 1 --fields author,title\n  \
    citelines --input-dir catalog --codes 1,2 --fields author,title,publication_year\n  \
    citelines 2023.xlsx 2024.xlsx --codes 5 --output survey.txt\n  \
    citelines --config my-settings.toml")]
pub struct Cli {
    /// Catalog files to load, in order, joined to the input directory.
    /// When omitted, the input directory is scanned instead.
    pub files: Vec<String>,

    /// Directory holding the catalog spreadsheets
    #[arg(short = 'd', long)]
    pub input_dir: Option<PathBuf>,

    /// Fields to concatenate, in output order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Classification codes that pass the filter (comma-separated)
    #[arg(short = 'n', long, value_delimiter = ',')]
    pub codes: Option<Vec<String>>,

    /// Output text file (overwritten on every run)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extensions accepted by the directory scan (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show the resolved extraction plan without loading or writing data
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a sample configuration file
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let files = if self.files.is_empty() {
            None
        } else {
            Some(self.files.clone())
        };

        CliOverrides::new()
            .with_input_dir(self.input_dir.clone())
            .with_files(files)
            .with_extensions(self.extensions.clone())
            .with_fields(self.fields.clone())
            .with_codes(self.codes.clone())
            .with_output(self.output.clone())
    }

    pub fn should_use_colors(&self) -> bool {
        !self.quiet && console::Term::stdout().features().colors_supported()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeValue;

    #[test]
    fn test_parse_basic_invocation() {
        let cli = Cli::try_parse_from([
            "citelines",
            "--codes",
            "1,2",
            "--fields",
            "author,title",
            "--output",
            "out.txt",
        ])
        .unwrap();

        assert_eq!(cli.codes, Some(vec!["1".to_string(), "2".to_string()]));
        assert_eq!(
            cli.fields,
            Some(vec!["author".to_string(), "title".to_string()])
        );
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_positional_files_become_overrides() {
        let cli = Cli::try_parse_from([
            "citelines",
            "a.xlsx",
            "b.xlsx",
            "--codes",
            "1",
            "--fields",
            "title",
        ])
        .unwrap();

        let overrides = cli.create_cli_overrides();
        assert_eq!(
            overrides.files,
            Some(vec!["a.xlsx".to_string(), "b.xlsx".to_string()])
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["citelines", "--quiet", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_codes_merge_as_text_values() {
        let cli =
            Cli::try_parse_from(["citelines", "--codes", "3", "--fields", "title"]).unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(
            config.extract.accepted_codes,
            vec![CodeValue::Text("3".to_string())]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verbosity_level_quiet_wins() {
        let cli = Cli::try_parse_from(["citelines", "--quiet"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::try_parse_from(["citelines", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }
}
