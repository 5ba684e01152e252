//! Airbnb OAuth command-line driver
//!
//! Exercises every library operation from a terminal:
//! authorize-url, exchange, status, refresh, revoke, hosts.
//! Credentials come from env vars or a TOML config file (see config.rs);
//! responses are printed to stdout as pretty JSON.

mod config;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airbnb_oauth::{AirbnbOAuth, generate_state};

use crate::config::Config;

const USAGE: &str = "\
Usage: airbnb-oauth-cli [--config <path>] <command> [options]

Commands:
  authorize-url --redirect <url> [--state <value>] [--scope <scope>]
  exchange      --code <authorization-code>
  status        --token <access-token>
  refresh       --token <refresh-token> [--reset]
  revoke        --token <access-token>
  hosts         [--limit <n>] [--offset <n>]

Configuration:
  AIRBNB_CLIENT_ID / AIRBNB_CLIENT_SECRET env vars, or a TOML config file
  (--config, AIRBNB_OAUTH_CONFIG) with client_id / client_secret_file.
  AIRBNB_API_HOST or api_host in the file points calls at another host.
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = find_command(&args).cloned() else {
        eprint!("{USAGE}");
        std::process::exit(2);
    };

    run(&command, &args).await
}

/// First argument that is neither a flag nor a flag's value. Every flag
/// except `--reset` takes a value.
fn find_command(args: &[String]) -> Option<&String> {
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--reset" {
            i += 1;
        } else if arg.starts_with("--") {
            i += 2;
        } else {
            return Some(arg);
        }
    }
    None
}

async fn run(command: &str, args: &[String]) -> Result<()> {
    let config_path = Config::resolve_path(flag_value(args, "--config").map(String::as_str));
    let config = Config::load(config_path.as_deref()).with_context(|| match &config_path {
        Some(p) => format!("failed to load config from {}", p.display()),
        None => "failed to load config from environment".to_string(),
    })?;

    let mut client = AirbnbOAuth::new(config.client_id, config.client_secret);
    if let Some(host) = &config.api_host {
        info!(host, "using alternative API host");
        client = client.with_api_host(host.as_str());
    }

    let response = match command {
        "authorize-url" => {
            let redirect = required(args, "--redirect")?;
            let scope = flag_value(args, "--scope").map(String::as_str);
            let state = match flag_value(args, "--state") {
                Some(state) => state.clone(),
                None => {
                    let state = generate_state();
                    info!(state, "generated state; verify it on the callback");
                    state
                }
            };
            println!("{}", client.authorize_url(redirect, Some(&state), scope));
            return Ok(());
        }
        "exchange" => {
            let code = required(args, "--code")?;
            client.get_access_token(code).await?
        }
        "status" => {
            let token = required(args, "--token")?;
            client.check_token_status(token).await?
        }
        "refresh" => {
            let token = required(args, "--token")?;
            client.refresh_token(token, has_flag(args, "--reset")).await?
        }
        "revoke" => {
            let token = required(args, "--token")?;
            client.revoke_token(token).await?
        }
        "hosts" => {
            let limit = parse_number(args, "--limit")?;
            let offset = parse_number(args, "--offset")?;
            client.retrieve_all_hosts(limit, offset).await?
        }
        other => {
            eprint!("{USAGE}");
            bail!("unknown command: {other}");
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Value of `--flag value` if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn required<'a>(args: &'a [String], flag: &str) -> Result<&'a str> {
    flag_value(args, flag)
        .map(String::as_str)
        .with_context(|| format!("{flag} is required for this command"))
}

fn parse_number(args: &[String], flag: &str) -> Result<Option<u64>> {
    flag_value(args, flag)
        .map(|v| {
            v.parse::<u64>()
                .with_context(|| format!("{flag} must be a non-negative integer, got: {v}"))
        })
        .transpose()
}
