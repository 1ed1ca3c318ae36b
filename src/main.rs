use citelines::{Cli, CiteLines, CiteLinesError, UserFriendlyError};
use clap::Parser;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match CiteLines::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app);
    }

    match app.run() {
        Ok(report) => {
            app.output_formatter().print_run_report(&report);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CiteLinesError) -> i32 {
    match error {
        CiteLinesError::Config { .. } => 2,
        CiteLinesError::SourceRead { .. } => 3,
        CiteLinesError::UnknownField { .. } => 4,
        CiteLinesError::FilterValue { .. } => 5,
        CiteLinesError::OutputWrite { .. } => 6,
        CiteLinesError::ConcurrentRunRejected => 7,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "citelines.toml".to_string());

    match CiteLines::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  citelines --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(app: &CiteLines) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - no data will be read or written");

    let config = app.config();
    let files = match app.resolve_input_files() {
        Ok(files) => files,
        Err(e) => {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    formatter.info("Extraction plan:");
    for file in &files {
        println!("  Input: {}", file.display());
    }
    println!(
        "  Fields: {}",
        config.extract.target_fields.join(", ")
    );
    println!(
        "  Codes: {}",
        config
            .extract
            .accepted_codes
            .iter()
            .map(|c| c.as_text())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Output: {}", config.extract.output_file.display());

    formatter.success("Dry run completed");
    formatter.info("Run without --dry-run to perform the extraction");

    0
}

fn print_startup_error(error: &CiteLinesError) {
    // Basic formatter for errors raised before the app exists
    let formatter = citelines::OutputFormatter::new(citelines::OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use citelines::{CodeValue, Config, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes_are_distinct_per_error_kind() {
        let codes = [
            exit_code_for(&CiteLinesError::Config {
                message: String::new(),
            }),
            exit_code_for(&CiteLinesError::SourceRead {
                path: String::new(),
                message: String::new(),
            }),
            exit_code_for(&CiteLinesError::UnknownField {
                field: String::new(),
            }),
            exit_code_for(&CiteLinesError::FilterValue {
                value: String::new(),
            }),
            exit_code_for(&CiteLinesError::ConcurrentRunRejected),
        ];

        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "citelines",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extract]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("catalog.csv"),
            "author,title,classification_code\nX,Y,1\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.input.directory = dir.path().to_path_buf();
        config.input.extensions = vec!["csv".to_string()];
        config.extract.accepted_codes = vec![CodeValue::Number(1)];
        config.extract.output_file = dir.path().join("result.txt");

        let app = CiteLines::new(config, OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&app), 0);
        assert!(!dir.path().join("result.txt").exists());
    }

    #[test]
    fn test_dry_run_reports_missing_inputs() {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.input.directory = dir.path().to_path_buf();
        config.extract.accepted_codes = vec![CodeValue::Number(1)];

        let app = CiteLines::new(config, OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&app), 3);
    }
}
