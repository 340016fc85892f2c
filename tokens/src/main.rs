#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics on bad input.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokens::token::{DEFAULT_SECRET_BYTES, generate_secret};
use tokens::{Claims, TokenCodec, TokenConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tokens")]
#[command(about = "Issue and verify signed bearer tokens")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read JWT_SECRET / JWT_EXPIRES_IN from this dotenv file instead of the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a JSON object of claims and print the token
    Issue {
        /// Claims as a JSON object, e.g. '{"userId":42}'
        claims: String,
    },
    /// Verify a token and print its claims as JSON
    Verify {
        /// The token to verify
        token: String,
        /// Also print the issued-at and expiry timestamps
        #[arg(long)]
        detailed: bool,
    },
    /// Print a new random secret suitable for JWT_SECRET
    GenerateSecret {
        /// Number of random bytes
        #[arg(long, default_value_t = DEFAULT_SECRET_BYTES)]
        bytes: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let env_file = cli.env_file.as_deref();
    let codec = || {
        let config = load_config(env_file)?;
        tracing::debug!("Loaded configuration: expires_in={}", config.expires_in());
        Ok::<_, String>(TokenCodec::from_config(&config))
    };

    match cli.command {
        Commands::GenerateSecret { bytes } => generate_secret(bytes).map_err(|e| e.to_string()),
        Commands::Issue { claims } => {
            let claims = parse_claims(&claims)?;
            codec()?.issue(&claims).map_err(|e| e.to_string())
        }
        Commands::Verify { token, detailed } => {
            let codec = codec()?;
            let output = if detailed {
                let verified = codec.verify_detailed(&token).map_err(|e| e.to_string())?;
                serde_json::to_string_pretty(&verified)
            } else {
                let claims = codec.verify(&token).map_err(|e| e.to_string())?;
                serde_json::to_string_pretty(&claims)
            };
            output.map_err(|e| format!("Failed to encode claims: {e}"))
        }
    }
}

/// Load configuration from `env_file` if given, otherwise from the process
/// environment after merging in a `.env` from the working directory.
fn load_config(env_file: Option<&std::path::Path>) -> Result<TokenConfig, String> {
    let loaded = match env_file {
        Some(path) => TokenConfig::from_env_file(path),
        None => {
            if let Err(e) = dotenvy::dotenv() {
                if !e.not_found() {
                    tracing::warn!("Failed to load .env file: {e}");
                }
            }
            TokenConfig::from_env()
        }
    };

    loaded.map_err(|e| format!("Failed to load configuration: {e}"))
}

fn parse_claims(raw: &str) -> Result<Claims, String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(claims)) => Ok(claims),
        Ok(other) => Err(format!("claims must be a JSON object, got: {other}")),
        Err(e) => Err(format!("claims are not valid JSON: {e}")),
    }
}
