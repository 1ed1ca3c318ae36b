use crate::error::{CiteLinesError, UserFriendlyError};
use crate::extractor::RunReport;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &CiteLinesError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    println!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_run_report(&self, report: &RunReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                println!(
                    "RESULT: {} line(s) written to {} ({} rows from {} file(s), {:.2}s)",
                    report.lines_written,
                    report.output_path,
                    report.rows_loaded,
                    report.files_loaded,
                    report.duration.as_secs_f64()
                );
            }
        }
    }

    fn print_human_report(&self, report: &RunReport) {
        if self.quiet {
            return;
        }

        println!();
        if self.use_colors {
            println!("{}{}", CHECKMARK, style("Extraction complete").bold().green());
        } else {
            println!("Extraction complete");
        }
        println!("  Output file:   {}", report.output_path);
        println!("  Lines written: {}", report.lines_written);
        println!(
            "  Rows scanned:  {} (from {} file(s))",
            report.rows_loaded, report.files_loaded
        );
        println!("  Duration:      {:.2}s", report.duration.as_secs_f64());

        if self.verbose_level > 0 {
            println!(
                "  Fields:        {}",
                report.spec_used.target_fields.join(", ")
            );
            println!(
                "  Codes:         {}",
                report.spec_used.accepted_codes.join(", ")
            );
        }
    }

    fn print_human_message(&self, message_type: MessageType, message: &str) {
        if self.quiet && !matches!(message_type, MessageType::Error) {
            return;
        }

        if self.use_colors {
            match message_type {
                MessageType::Success => println!("{}{}", CHECKMARK, style(message).green()),
                MessageType::Error => eprintln!("{}{}", CROSS, style(message).red().bold()),
                MessageType::Warning => println!("{}", style(message).yellow()),
                MessageType::Info => println!("{}{}", INFO, message),
            }
        } else {
            match message_type {
                MessageType::Success => println!("OK: {}", message),
                MessageType::Error => eprintln!("ERROR: {}", message),
                MessageType::Warning => println!("WARNING: {}", message),
                MessageType::Info => println!("INFO: {}", message),
            }
        }
    }

    fn print_json_message(&self, kind: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": kind,
            "message": message
        }));
    }

    fn print_json_object(&self, value: &serde_json::Value) {
        println!("{}", value);
    }

    fn should_show_message(&self, required_level: u8) -> bool {
        if self.quiet {
            return false;
        }
        required_level == 0 || self.verbose_level >= required_level
    }
}
