//! uigf2xlsx CLI - Convert a UIGF v2 export into an Excel workbook
//!
//! ```bash
//! uigf2xlsx uigf.json                      # writes output.xlsx
//! uigf2xlsx uigf.json -o wishes.xlsx
//! uigf2xlsx uigf.json --format json -o -   # JSON tables to stdout
//! RUST_LOG=uigf2xlsx=debug uigf2xlsx uigf.json
//! ```

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use uigf2xlsx::{ConverterBuilder, OutputFormat, UigfToXlsxError};

#[derive(Parser)]
#[command(name = "uigf2xlsx")]
#[command(about = "Convert a UIGF v2 wish history export into an Excel workbook", long_about = None)]
struct Cli {
    /// Input UIGF JSON file
    input: PathBuf,

    /// Output file, or "-" for stdout (default: output.xlsx / output.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Xlsx)]
    format: Format,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Xlsx,
    Json,
}

impl Format {
    fn output_format(self) -> OutputFormat {
        match self {
            Format::Xlsx => OutputFormat::Xlsx,
            Format::Json => OutputFormat::Json,
        }
    }

    fn default_output(self) -> PathBuf {
        match self {
            Format::Xlsx => PathBuf::from("output.xlsx"),
            Format::Json => PathBuf::from("output.json"),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.format.default_output());
    let use_stdout = output_path.as_os_str() == "-";

    match convert(&cli, &output_path, use_stdout) {
        Ok(()) => {
            if !use_stdout {
                println!(
                    "Conversion completed: {} -> {}",
                    cli.input.display(),
                    output_path.display()
                );
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn convert(cli: &Cli, output_path: &Path, use_stdout: bool) -> Result<(), UigfToXlsxError> {
    let converter = ConverterBuilder::new()
        .with_output_format(cli.format.output_format())
        .build()?;

    let input = BufReader::new(File::open(&cli.input)?);
    tracing::info!(input = %cli.input.display(), "converting");

    // 変換が成功してから出力先を作成する（失敗時に空ファイルを残さない）
    let bytes = converter.convert_to_bytes(input)?;

    if use_stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&bytes)?;
        handle.flush()?;
    } else {
        let mut output = File::create(output_path)?;
        output.write_all(&bytes)?;
    }

    Ok(())
}

fn handle_error(error: UigfToXlsxError) {
    match error {
        UigfToXlsxError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        UigfToXlsxError::Utf8(_) | UigfToXlsxError::Json(_) => {
            eprintln!("Parse Error: {}", error);
            eprintln!("The file is not a valid UIGF JSON document.");
        }
        UigfToXlsxError::UnsupportedLocale(_) => {
            eprintln!("{}", error);
            eprintln!("Only exports with info.lang = \"zh-cn\" are supported.");
        }
        UigfToXlsxError::UnsupportedFormatVersion(_) => {
            eprintln!("{}", error);
            eprintln!("Only UIGF v2.x exports are supported.");
        }
        UigfToXlsxError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        UigfToXlsxError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file exceeds the input limits.");
        }
        other => {
            eprintln!("Conversion Error: {}", other);
        }
    }
}
