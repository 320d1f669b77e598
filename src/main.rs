use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use subaward_reviewer::report::ReportFormat;
use subaward_reviewer::review::{self, ReviewOptions};
use subaward_reviewer::{Result, ReviewError};
use tracing_subscriber::EnvFilter;

const BANNER: &str = "  ***  Welcome to the Subaward Budget Reviewer  ***";
const FOLDER_PROMPT: &str = "Please enter the path to the folder containing the Subaward Budgets: ";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    match run(cli.into_options()) {
        Ok(()) => {}
        Err(error) if error.is_input_error() => println!("{error}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn run(options: ReviewOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();

    if options.format == ReportFormat::Text {
        writeln!(stdout, "{BANNER}")?;
    }

    let folder = match &options.folder {
        Some(folder) => review::resolve_folder(&folder.to_string_lossy())?,
        None => {
            write!(stdout, "{FOLDER_PROMPT}")?;
            stdout.flush()?;
            review::resolve_folder(&read_line(&mut input)?)?
        }
    };

    review::review_folder(&folder, &options, &mut stdout)?;

    if options.should_pause() {
        stdout.flush()?;
        read_line(&mut input)?;
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| ReviewError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Total the subaward lines of a folder of budget workbooks."
)]
struct Cli {
    /// Folder containing the subaward budgets. Prompted for when omitted.
    folder: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit without waiting for Enter once the report is printed.
    #[arg(long)]
    no_pause: bool,

    /// Do not list each budget and its subawards while reading.
    #[arg(short, long)]
    quiet: bool,

    /// Log debug detail to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    fn into_options(self) -> ReviewOptions {
        ReviewOptions {
            folder: self.folder,
            format: self.format.into(),
            show_progress: !self.quiet,
            pause: !self.no_pause,
        }
    }
}
