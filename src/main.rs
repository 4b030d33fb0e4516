//! CLI entry point for boxtree

use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use boxtree::client::{DEFAULT_API_BASE, DEFAULT_TOKEN_URL};
use boxtree::tree::{DEFAULT_FIELDS, DEFAULT_PAGE_SIZE};
use boxtree::{
    BoxClient, ClientConfig, JsonLinesPrinter, JwtAppConfig, OutputConfig, PathPrinter, Result,
    TreeWalker, WalkerConfig,
};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "boxtree")]
#[command(about = "List every file and folder under a Box folder as a JWT app service account")]
#[command(version)]
struct Args {
    /// Path to the JWT app configuration JSON file
    config: PathBuf,

    /// ID of the folder to list (0 is the root of the account)
    #[arg(default_value = "0")]
    folder_id: String,

    /// Number of items requested per listing call
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    page_size: usize,

    /// Item fields to request, comma separated ("type" is always added)
    #[arg(long = "fields", value_delimiter = ',', default_values = DEFAULT_FIELDS.iter().copied())]
    fields: Vec<String>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Print one JSON object per item instead of the listing
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Timeout for each HTTP request (e.g., 30s, 2m)
    #[arg(long = "timeout", value_name = "DURATION")]
    timeout: Option<String>,

    /// Skip printing the authenticated user
    #[arg(long = "no-user-info")]
    no_user_info: bool,

    /// Base URL of the content API
    #[arg(long = "api-base", value_name = "URL", default_value = DEFAULT_API_BASE, hide = true)]
    api_base: String,

    /// URL of the token endpoint
    #[arg(long = "token-url", value_name = "URL", default_value = DEFAULT_TOKEN_URL, hide = true)]
    token_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Parse a duration string like "30s", "2m" into a Duration.
fn parse_duration_string(s: &str) -> std::result::Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

fn parse_page_size(s: &str) -> std::result::Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if size == 0 {
        return Err("page size must be at least 1".to_string());
    }
    Ok(size)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boxtree={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let timeout = args.timeout.as_ref().map(|s| {
        parse_duration_string(s).unwrap_or_else(|e| {
            eprintln!("boxtree: invalid --timeout duration '{}': {}", s, e);
            process::exit(1);
        })
    });

    let client_config = ClientConfig {
        api_base: args.api_base.clone(),
        token_url: args.token_url.clone(),
        timeout,
    };
    let walker_config = WalkerConfig {
        page_size: args.page_size,
        fields: args.fields.clone(),
        max_depth: args.level,
    };
    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        ..Default::default()
    };

    if let Err(e) = run(&args, &client_config, walker_config, &output_config) {
        debug!(kind = ?e.kind(), "exiting on error");
        eprintln!("boxtree: {}", e);
        process::exit(1);
    }
}

fn run(
    args: &Args,
    client_config: &ClientConfig,
    walker_config: WalkerConfig,
    output_config: &OutputConfig,
) -> Result<()> {
    // Fails on a bad config file before any network activity.
    let app = JwtAppConfig::from_file(&args.config)?;

    eprintln!("Authenticating...");
    let client = BoxClient::authenticate(&app, client_config)?;
    let walker = TreeWalker::new(walker_config);

    if args.json {
        let root = client.get_folder(&args.folder_id, &walker.config().request_fields())?;
        let mut printer = JsonLinesPrinter::new(BufWriter::new(io::stdout().lock()));
        walker.walk(&client, root, &mut printer)?;
        printer.into_inner().flush()?;
        return Ok(());
    }

    let mut printer = PathPrinter::stdout(output_config);
    if !args.no_user_info {
        let user = client.current_user()?;
        printer.user(&user)?;
    }

    let root = client.get_folder(&args.folder_id, &walker.config().request_fields())?;
    printer.header()?;
    let summary = walker.walk(&client, root, &mut printer)?;
    printer.summary(&summary)?;
    Ok(())
}
