use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::error;

use wget::env::EnvConfig;
use wget::logging::{init_logging, stdout_supports_color, LogDestination, BACKGROUND_LOG_FILE};
use wget::mirror::{mirror, FilterEngine, MirrorOptions};
use wget::network::{download_batch, download_file, DownloadRequest, RateLimit, Session};
use wget::utils::parse_url;
use wget::{WgetOptions, WgetResult};

/// Download files from the web
#[derive(Parser, Debug)]
#[command(name = "wget", version, about)]
struct Cli {
    /// URL to download (or to mirror with --mirror)
    url: Option<String>,

    /// Write all output to "wget-log"
    #[arg(short = 'B', long)]
    background: bool,

    /// Save the file under this name
    #[arg(short = 'O', long, value_name = "NAME")]
    rename: Option<String>,

    /// Directory to save into; also overrides the mirror root
    #[arg(short = 'P', long, value_name = "DIR")]
    destination: Option<String>,

    /// Download speed limit, e.g. 200k or 2M
    #[arg(long, value_name = "RATE")]
    rate_limit: Option<String>,

    /// Download every URL listed in this file
    #[arg(short = 'i', long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Mirror the page at URL and its stylesheets, scripts and images
    #[arg(long)]
    mirror: bool,

    /// Comma-separated URL suffixes to skip while mirroring
    #[arg(short = 'R', long, value_name = "LIST")]
    reject: Option<String>,

    /// Comma-separated path prefixes to skip while mirroring
    #[arg(short = 'X', long, value_name = "LIST")]
    exclude: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    timeout: Option<u64>,

    /// User-Agent header to send
    #[arg(short = 'u', long, value_name = "UA")]
    user_agent: Option<String>,

    /// Only report warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.url.is_none() && cli.input_file.is_none() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "Please provide a url or a file",
            )
            .exit();
    }
    if cli.mirror && cli.url.is_none() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "--mirror needs a url")
            .exit();
    }

    let env = match EnvConfig::from_env() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let destination = if cli.background {
        println!("Output will be written to \"{BACKGROUND_LOG_FILE}\".");
        LogDestination::background()
    } else {
        LogDestination::Stdout
    };
    let level = if cli.quiet { "warn" } else { env.log_level.as_str() };
    if let Err(e) = init_logging(&destination, level, stdout_supports_color(env.no_color)) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let options = WgetOptions {
        timeout: cli.timeout.map(Duration::from_secs).unwrap_or(env.timeout),
        connect_timeout: env.connect_timeout,
        user_agent: cli.user_agent.clone().unwrap_or(env.user_agent),
    };

    match run(&cli, options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected mode; `Ok(false)` means some downloads failed
fn run(cli: &Cli, options: WgetOptions) -> WgetResult<bool> {
    let session = Session::new(options)?;

    if cli.mirror {
        let Some(target) = cli.url.as_deref() else {
            return Ok(false);
        };
        let url = parse_url(target)?;
        let mirror_options = MirrorOptions {
            destination: cli.destination.clone(),
            filter: FilterEngine::from_lists(cli.exclude.as_deref(), cli.reject.as_deref()),
        };
        mirror(&session, &url, &mirror_options)?;
        return Ok(true);
    }

    let request = DownloadRequest {
        rename: cli.rename.clone(),
        destination: cli.destination.clone(),
        rate_limit: cli
            .rate_limit
            .as_deref()
            .map(RateLimit::parse)
            .unwrap_or_default(),
    };

    if let Some(input_file) = &cli.input_file {
        let summary = download_batch(&session, input_file, &request)?;
        return Ok(summary.all_succeeded());
    }

    match cli.url.as_deref() {
        // The failure itself is already logged by the downloader
        Some(target) => Ok(download_file(&session, target, &request).is_ok()),
        None => Ok(false),
    }
}
