//! pushline - send a push notification through APNs from the command line.
//!
//! # Commands
//!
//! - `pushline send [--type TYPE] <PAYLOAD | --file PATH>` - Send a raw JSON payload
//! - `pushline message <TEXT>` - Send a plain text alert with the default sound
//! - `pushline types` - List the supported push types
//!
//! Settings come from `--config`, a `.env` file and `PUSHLINE_*` variables;
//! command-line flags win.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pushline_apns::{Client, NotificationType, Response, Server};
use pushline_config::PushSettings;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod error;

use error::{CliError, CliResult};

/// pushline - APNs push notifications from the shell
#[derive(Parser)]
#[command(name = "pushline")]
#[command(version)]
#[command(about = "Send a push notification through Apple's remote notification gateway")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML, JSON or .env)
    #[arg(short, long, global = true, env = "PUSHLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Target device token
    #[arg(long, global = true)]
    device_token: Option<String>,

    /// Provider authentication token (JWT)
    #[arg(long, global = true)]
    auth_token: Option<String>,

    /// App bundle ID, sent as apns-topic
    #[arg(long, global = true)]
    bundle_id: Option<String>,

    /// Gateway environment (production or development)
    #[arg(short, long, global = true)]
    environment: Option<Server>,

    /// Send to this base URL instead of Apple's gateway
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a raw JSON payload
    Send(SendArgs),

    /// Send a plain text alert with the default sound
    #[command(alias = "msg")]
    Message {
        /// Alert text
        text: String,
    },

    /// List supported push types
    Types,
}

#[derive(Args)]
struct SendArgs {
    /// Push type (apns-push-type header)
    #[arg(short = 't', long = "type", default_value_t = NotificationType::Alert)]
    push_type: NotificationType,

    /// JSON payload
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    payload: Option<String>,

    /// Read the JSON payload from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl SendArgs {
    fn read_payload(&self) -> CliResult<String> {
        match (&self.payload, &self.file) {
            (Some(payload), _) => Ok(payload.clone()),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| CliError::Payload {
                path: path.display().to_string(),
                source,
            }),
            (None, None) => Ok(String::new()),
        }
    }
}

impl Cli {
    /// Settings supplied as flags, applied over file and environment.
    fn overrides(&self) -> Value {
        let mut map = Map::new();
        let mut set = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value));
            }
        };

        set("device_token", self.device_token.clone());
        set("authorization_token", self.auth_token.clone());
        set("bundle_id", self.bundle_id.clone());
        set("environment", self.environment.map(|e| e.as_str().to_string()));

        if let Some(url) = &self.base_url {
            let mut http = Map::new();
            http.insert("base_url".to_string(), Value::String(url.clone()));
            map.insert("http".to_string(), Value::Object(http));
        }

        Value::Object(map)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Types => {
            print_types();
            Ok(())
        }
        Commands::Send(args) => {
            let payload = args.read_payload()?;
            let client = connect(&cli)?;
            let response = client.send(payload, args.push_type).await?;
            print_response(&response);
            Ok(())
        }
        Commands::Message { text } => {
            let client = connect(&cli)?;
            let response = client.send_message(text).await?;
            print_response(&response);
            Ok(())
        }
    }
}

fn connect(cli: &Cli) -> CliResult<Client> {
    let settings = PushSettings::load_with(cli.config.as_deref(), cli.overrides())?;
    let client = settings.build_client()?;
    debug!(environment = %client.server(), base_url = %client.base_url(), "Client ready");
    Ok(client)
}

fn print_types() {
    for push_type in NotificationType::ALL {
        match push_type.priority() {
            Some(priority) => println!(
                "{:<14}{}",
                push_type.as_str().bold(),
                format!("apns-priority: {}", priority).dimmed()
            ),
            None => println!("{}", push_type.as_str().bold()),
        }
    }
}

fn print_response(response: &Response) {
    println!(
        "{} {} {}",
        "✓".green().bold(),
        response.status(),
        response.url().as_str().dimmed()
    );
    if let Some(id) = response.apns_id() {
        println!("  {} {}", "apns-id:".dimmed(), id);
    }
    if let Some(id) = response.apns_unique_id() {
        println!("  {} {}", "apns-unique-id:".dimmed(), id);
    }
}
