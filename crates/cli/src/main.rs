mod config;
mod error;
mod logging;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use autosave_core::{FieldName, RecordStore};

use crate::config::ServeConfig;
use crate::error::CliError;

/// Auto-saving form demo over a single in-memory record.
#[derive(Parser)]
#[command(name = "autosave", version, about = "Auto-saving form demo")]
struct Cli {
    /// Tracing filter directives (overrides RUST_LOG), e.g. `debug`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides config and AUTOSAVE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config and AUTOSAVE_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the demo page, or one field's fragment, to stdout
    Render {
        /// Render only this field (name, description, status, priority, tags, category, steps)
        #[arg(long)]
        field: Option<String>,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Serve { host, port, config } => cmd_serve(host, port, config),
        Commands::Render { field } => cmd_render(field.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut config = ServeConfig::load(config_path.as_deref())?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(serve::start_server(config))
}

fn cmd_render(field: Option<&str>) -> Result<(), CliError> {
    let store = RecordStore::demo();
    let html = match field {
        Some(name) => {
            let field: FieldName = name.parse()?;
            let record_id = store.snapshot()?.id;
            store.render_field(record_id, field)?.into_html()
        }
        None => store.render_page()?,
    };
    println!("{}", html);
    Ok(())
}
