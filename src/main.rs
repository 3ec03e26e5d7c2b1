use clap::Parser;
use gamaray::OutputFormat;
use gamaray::cli;
use gamaray::core::config::{self, EnvOverrides, GamarayConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use url::Url;

#[derive(Parser)]
#[command(name = "gamaray", about = "Parse Gamaray action descriptors")]
struct Args {
    /// Descriptors to parse, e.g. "webpage: https://example.com". Reads stdin lines if none.
    descriptors: Vec<String>,

    /// Resolve relative payloads against this URL
    #[arg(short, long, value_parser = Url::parse)]
    base_url: Option<Url>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Exit with status 1 if any descriptor fails to parse
    #[arg(long)]
    strict: bool,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    if let Some(path) = &args.log_file {
        let log_config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build();

        if let Ok(log_file) = File::create(path) {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
    }

    log::info!("Gamaray starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("gamaray: {e}; using defaults");
        GamarayConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &EnvOverrides::from_env(),
        args.base_url.as_ref(),
        args.format,
    );

    let mut stdout = io::stdout().lock();
    let summary = if args.descriptors.is_empty() {
        cli::run_lines(io::stdin().lock(), &resolved, &mut stdout)?
    } else {
        cli::run(&args.descriptors, &resolved, &mut stdout)?
    };

    Ok(ExitCode::from(cli::exit_code(&summary, args.strict)))
}
