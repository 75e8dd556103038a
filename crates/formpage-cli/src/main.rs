//! Command-line harness: drive a page definition the way a web host would.
use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use formpage::{
    Error, FormData, FormField, MemoryStore, Outcome, Page, RequestConfig, State, handle_get,
    handle_post, load_from_path, read_json,
};
use logging as logshared;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "formpage", about = "Render and submit declarative question pages", version)]
/// Command-line interface for the `formpage` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and build a page definition then exit.
    Check {
        /// Path to the page definition (.json)
        path: PathBuf,

        /// Print each component's type and field names
        #[arg(long)]
        dump: bool,
    },
    /// Print the view model for the stored state.
    Render {
        /// Path to the page definition (.json)
        path: PathBuf,

        /// Current state (JSON object)
        #[arg(long, value_name = "PATH")]
        state: Option<PathBuf>,

        /// Request overrides (JSON object)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Validate a submission and print the saved update or the redisplayed page.
    Submit {
        /// Path to the page definition (.json)
        path: PathBuf,

        /// Submitted form data (JSON object)
        #[arg(long, value_name = "PATH")]
        payload: PathBuf,

        /// Current state (JSON object)
        #[arg(long, value_name = "PATH")]
        state: Option<PathBuf>,

        /// Request overrides (JSON object)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let env_filter = logshared::env_filter_from_spec(&cli.log.spec());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    match run(&cli.command) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{}", e.pretty());
            process::exit(1);
        }
    }
}

fn run(command: &Command) -> Result<String, Error> {
    match command {
        Command::Check { path, dump } => {
            let page = load_from_path(path)?;
            info!(path = %path.display(), "definition ok");
            if *dump {
                return Ok(describe(&page));
            }
            Ok(format!("{}: ok", path.display()))
        }
        Command::Render {
            path,
            state,
            config,
        } => {
            let page = load_from_path(path)?;
            let store = MemoryStore::new(read_optional::<State>(state.as_deref())?);
            let config = read_optional::<RequestConfig>(config.as_deref())?;
            let view = handle_get(&page, &config, &store)?;
            Ok(to_json(&view))
        }
        Command::Submit {
            path,
            payload,
            state,
            config,
        } => {
            let page = load_from_path(path)?;
            let payload: FormData = read_json(payload)?;
            let mut store = MemoryStore::new(read_optional::<State>(state.as_deref())?);
            let config = read_optional::<RequestConfig>(config.as_deref())?;
            let out = match handle_post(&page, &config, &mut store, &payload)? {
                Outcome::Render(view) => json!({ "outcome": "render", "view": view }),
                Outcome::Saved(update) => {
                    debug!(keys = update.len(), "saved");
                    json!({ "outcome": "saved", "update": update, "state": store.state() })
                }
            };
            Ok(to_json(&out))
        }
    }
}

/// Read a JSON file, or the type's default when no path was given.
fn read_optional<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, Error> {
    path.map_or_else(|| Ok(T::default()), read_json)
}

fn to_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
}

fn describe(page: &Page) -> String {
    let config = RequestConfig::default();
    page.components()
        .items()
        .iter()
        .map(|c| {
            let names = c
                .as_form_field()
                .map(|f| {
                    f.form_schema_keys(&config)
                        .names()
                        .map(|n| Value::String(n.to_string()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            format!("{} {}", c.type_name(), Value::Array(names))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
