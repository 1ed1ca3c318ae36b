pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod scanner;
pub mod schema;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, CodeValue, Config};
pub use error::{CiteLinesError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{extract, ExtractionSpec, RunReport, SpecSnapshot};
pub use scanner::SourceScanner;
pub use schema::{Field, Record, Table};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Non-blocking single-run guard. A second run requested while one is in
/// flight is rejected immediately, never queued; the caller decides whether
/// and when to try again.
pub struct RunLock {
    busy: AtomicBool,
}

impl RunLock {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn try_acquire(&self) -> Result<RunToken<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Ok(RunToken { lock: self })
        } else {
            Err(CiteLinesError::ConcurrentRunRejected)
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl Default for RunLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the lock when dropped, error paths included.
pub struct RunToken<'a> {
    lock: &'a RunLock,
}

impl Drop for RunToken<'_> {
    fn drop(&mut self) {
        self.lock.busy.store(false, Ordering::SeqCst);
    }
}

/// Main library interface: owns the configuration, the UI plumbing, and the
/// run lock, and executes the load → extract pipeline as one blocking call.
pub struct CiteLines {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    run_lock: RunLock,
}

impl CiteLines {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager =
            ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            run_lock: RunLock::new(),
        }
    }

    /// Create a CiteLines instance from parsed CLI arguments.
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Execute one extraction pipeline run: resolve inputs, load them into
    /// a table, filter and concatenate, write the output file. Blocking; a
    /// run either completes or fails, and a second run issued while this
    /// one is in flight is rejected via the run lock.
    pub fn run(&self) -> Result<RunReport> {
        let _token = self.run_lock.try_acquire()?;

        let started_at = Utc::now();
        let start = Instant::now();

        let files = self.resolve_input_files()?;
        self.output_formatter
            .start_operation(&format!("Loading {} catalog file(s)", files.len()));

        let bar = self.progress_manager.create_load_progress(files.len() as u64);
        let callback = |index: usize, path: &Path| {
            bar.set_position(index as u64);
            if let Some(name) = path.file_name() {
                bar.set_message(name.to_string_lossy().to_string());
            }
        };
        let loaded = loader::load_files(&files, Some(&callback));
        bar.finish_and_clear();
        let table = loaded?;

        self.output_formatter
            .info(&format!("Loaded {} rows", table.len()));

        let spec = self.config.extraction_spec();
        let lines_written = extractor::extract(&table, &spec)?;

        self.output_formatter.success(&format!(
            "Wrote {} line(s) to {}",
            lines_written,
            spec.output_path.display()
        ));

        Ok(RunReport {
            started_at,
            duration: start.elapsed(),
            files_loaded: files.len(),
            rows_loaded: table.len(),
            lines_written,
            output_path: spec.output_path.display().to_string(),
            spec_used: SpecSnapshot {
                input_files: files.iter().map(|p| p.display().to_string()).collect(),
                target_fields: spec.target_fields.clone(),
                accepted_codes: spec.accepted_codes.clone(),
            },
        })
    }

    /// Explicitly listed files win; otherwise the input directory is
    /// scanned. An empty scan is an error so a misconfigured directory does
    /// not silently produce an empty output file.
    pub fn resolve_input_files(&self) -> Result<Vec<PathBuf>> {
        let explicit = self.config.explicit_files();
        if !explicit.is_empty() {
            return Ok(explicit);
        }

        let scanner = SourceScanner::new(&self.config.input.extensions);
        let files = scanner.scan_directory(&self.config.input.directory)?;

        if files.is_empty() {
            return Err(CiteLinesError::SourceRead {
                path: self.config.input.directory.display().to_string(),
                message: format!(
                    "no catalog files with extension(s) {} found",
                    self.config.input.extensions.join(", ")
                ),
            });
        }

        Ok(files)
    }

    /// Generate a sample configuration file.
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(CiteLinesError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn run_lock(&self) -> &RunLock {
        &self.run_lock
    }

    pub fn handle_error(&self, error: &CiteLinesError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
