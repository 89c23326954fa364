use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geoinput_core::error::ExitCode;
use geoinput_core::{AppConfig, SuggestionProvider};
use geoinput_geocode::{GeocodeClient, GeocodeError, lookup_coordinates};
use geoinput_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "geoinput",
    about = "Address autocomplete and geocoding in the terminal",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format.
    /// Also enabled by setting GEOINPUT_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick an address interactively (the default).
    Pick,

    /// Look up the coordinates of a free-text address.
    Lookup { address: String },

    /// Run a single autocomplete query.
    Suggest { text: String },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location.
    Path,
    /// Print the effective configuration.
    Show,
    /// Write the default configuration if no file exists.
    Init,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("GEOINPUT_JSON").as_deref() == Ok("1");
    let interactive = matches!(cli.command, None | Some(Commands::Pick));
    init_logging(interactive);

    let config = match AppConfig::load() {
        Ok(config) => {
            tracing::debug!(path = %AppConfig::config_path().display(), "config loaded");
            config
        }
        Err(e) => {
            eprintln!("Failed to load {}: {e}", AppConfig::config_path().display());
            std::process::exit(ExitCode::ConfigError as i32);
        }
    };

    match cli.command {
        None | Some(Commands::Pick) => {
            let client = open_client(&config);
            let runtime = tokio::runtime::Runtime::new()?;
            // Widget timers and requests are spawned onto this runtime.
            let _guard = runtime.enter();

            let provider: Arc<dyn SuggestionProvider> = Arc::new(client);
            let mut app = App::new(provider, config.widget.clone());
            geoinput_tui::run_picker(&mut app)?;

            match app.accepted {
                Some(candidate) => print_json(&serde_json::to_value(&candidate)?)?,
                None => std::process::exit(ExitCode::NotFound as i32),
            }
        }

        Some(Commands::Lookup { address }) => {
            let client = open_client(&config);
            let runtime = tokio::runtime::Runtime::new()?;
            let response = runtime
                .block_on(lookup_coordinates(&client, &address))
                .unwrap_or_else(|e| fail(&e));
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": response,
                    "meta": { "duration_ms": dur }
                }))?;
            } else if response.best_match().is_none() {
                eprintln!("No coordinates found for \"{address}\"");
                std::process::exit(ExitCode::NotFound as i32);
            } else {
                for (coords, candidate) in response.coordinates() {
                    println!("{:.6}, {:.6}  {}", coords.lat, coords.lon, candidate.formatted);
                }
            }
        }

        Some(Commands::Suggest { text }) => {
            let client = open_client(&config);
            let runtime = tokio::runtime::Runtime::new()?;
            let response = runtime
                .block_on(client.autocomplete(&text))
                .unwrap_or_else(|e| fail(&e));
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": response.results, "total": response.results.len(), "query": text },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if response.results.is_empty() {
                println!("No suggestions for \"{text}\".");
            } else {
                for candidate in &response.results {
                    println!("{candidate}");
                }
            }
        }

        // ── Config ─────────────────────────────────────────────────────────

        Some(Commands::Config { action }) => {
            let path = AppConfig::config_path();
            match action {
                ConfigAction::Path => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
                    } else {
                        println!("{}", path.display());
                    }
                }
                ConfigAction::Show => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":config}))?;
                    } else {
                        print!("{}", toml_string(&config)?);
                    }
                }
                ConfigAction::Init => {
                    if path.exists() {
                        eprintln!("Config already exists: {}", path.display());
                        std::process::exit(ExitCode::InvalidArgs as i32);
                    }
                    AppConfig::default().save_to(&path)?;
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
                    } else {
                        println!("Wrote default config to {}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Log filter comes from `GEOINPUT_LOG`. The picker owns the terminal, so it
/// logs to a file instead of stderr.
fn init_logging(interactive: bool) {
    let filter = EnvFilter::try_from_env("GEOINPUT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let Some(dir) = dirs::data_local_dir().map(|d| d.join("geoinput")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("geoinput.log"))
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn open_client(config: &AppConfig) -> GeocodeClient {
    GeocodeClient::from_config(&config.api, config.widget.result_limit).unwrap_or_else(|e| {
        if matches!(e, GeocodeError::MissingApiKey) {
            eprintln!(
                "No API key configured. Set `api.api_key` in {} or export {}.",
                AppConfig::config_path().display(),
                config.api.api_key_env
            );
        }
        fail(&e)
    })
}

/// Print the error and exit with the matching code.
fn fail(e: &GeocodeError) -> ! {
    tracing::warn!(error = %e, "geocoding command failed");
    eprintln!("Error: {e}");
    std::process::exit(exit_code(e) as i32);
}

fn exit_code(e: &GeocodeError) -> ExitCode {
    match e {
        GeocodeError::Http(_) => ExitCode::NetworkError,
        GeocodeError::MissingApiKey | GeocodeError::InvalidUrl(_) => ExitCode::ConfigError,
        GeocodeError::Api { .. } | GeocodeError::Parse(_) => ExitCode::GeneralError,
    }
}

fn toml_string(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
