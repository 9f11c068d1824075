// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use lrcproc::app_config::{self, Config};
use lrcproc::app_controller::{Controller, ProcessOutcome};

/// CLI Wrapper for line endings to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLineEnding {
    Crlf,
    Lf,
    Cr,
}

impl CliLineEnding {
    fn as_str(&self) -> &'static str {
        match self {
            CliLineEnding::Crlf => "\r\n",
            CliLineEnding::Lf => "\n",
            CliLineEnding::Cr => "\r",
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "lrcproc.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct FormatArgs {
    /// Input lyric file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for formatted files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Digits after the decimal point in time tags (0 to 3)
    #[arg(short, long)]
    decimal_places: Option<u32>,

    /// Spaces before timed text (negative keeps the text start as is)
    #[arg(long, allow_negative_numbers = true)]
    padding_start: Option<i32>,

    /// Spaces after timed text (negative keeps the text end as is)
    #[arg(long, allow_negative_numbers = true)]
    padding_end: Option<i32>,

    /// Milliseconds subtracted from every time tag
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<i64>,

    /// Line ending of the output
    #[arg(long, value_enum)]
    line_ending: Option<CliLineEnding>,

    /// Remove every time tag, keeping the text
    #[arg(long)]
    strip_tags: bool,

    /// Remove lines with blank text
    #[arg(long)]
    remove_empty: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Lyric file to inspect
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite lyric files with the configured formatting
    Format(FormatArgs),

    /// Print the metadata and line counts of a lyric file
    Info(InfoArgs),

    /// Generate shell completions for lrcproc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lrcproc - LRC lyric file processor
///
/// Reads LRC lyric files and writes them back with consistent time tags,
/// padding, offsets and line endings.
#[derive(Parser, Debug)]
#[command(name = "lrcproc")]
#[command(version)]
#[command(about = "LRC lyric file formatter")]
#[command(long_about = "lrcproc parses LRC lyric files and rewrites them with consistent formatting.

EXAMPLES:
    lrcproc format song.lrc                       # Write song.formatted.lrc
    lrcproc format -d 2 --line-ending lf song.lrc # Two decimals, Unix line endings
    lrcproc format --offset 250 song.lrc          # Shift all lyrics 250ms earlier
    lrcproc format --strip-tags --remove-empty /lyrics/
    lrcproc info song.lrc                         # Show metadata and line counts
    lrcproc completions bash > lrcproc.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in lrcproc.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, `format` creates
    a default one automatically and `info` uses the defaults without writing.
    Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lrcproc", &mut std::io::stdout());
            Ok(())
        }
        Commands::Format(args) => run_format(args),
        Commands::Info(args) => run_info(args),
    }
}

// Load the config file and apply the log level from the command line or the file.
// A missing file is only written out when `create_missing` is set.
fn load_config(common: &CommonArgs, create_missing: bool) -> Result<Config> {
    if let Some(cmd_log_level) = &common.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if create_missing {
        Config::load_or_create(&common.config_path)?
    } else {
        Config::load_or_default(&common.config_path)?
    };

    match &common.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_format(args: FormatArgs) -> Result<()> {
    let mut config = load_config(&args.common, true)?;

    // Override config with CLI options if provided
    if let Some(decimal_places) = args.decimal_places {
        config.format.decimal_places = decimal_places;
    }
    if let Some(padding_start) = args.padding_start {
        config.format.padding_start = padding_start;
    }
    if let Some(padding_end) = args.padding_end {
        config.format.padding_end = padding_end;
    }
    if let Some(offset) = args.offset {
        config.format.offset_ms = offset;
    }
    if let Some(line_ending) = &args.line_ending {
        config.format.line_ending = line_ending.as_str().to_string();
    }
    config.processing.strip_tags |= args.strip_tags;
    config.processing.remove_empty |= args.remove_empty;

    let controller = Controller::with_config(config)?;
    let output_dir = args.output_dir.as_deref();

    if args.input_path.is_file() {
        if let ProcessOutcome::Skipped(path) = controller.run(&args.input_path, output_dir, args.force_overwrite)? {
            info!("Nothing written, {:?} already exists", path);
        }
    } else if args.input_path.is_dir() {
        let summary = controller.run_folder(&args.input_path, output_dir, args.force_overwrite)?;
        if summary.errors > 0 {
            return Err(anyhow!("{} file(s) could not be processed", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
    let config = load_config(&args.common, false)?;
    let controller = Controller::with_config(config)?;

    let summary = controller.describe(&args.input_file)?;
    print!("{}", summary);

    Ok(())
}
