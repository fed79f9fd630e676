use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use osm_edit::errors::Result;
use osm_edit::{xml, Client, ClientConfig};

#[derive(Parser)]
#[command(name = "osm-edit", version, about = "Read and edit OpenStreetMap data")]
struct Cli {
    /// JSON config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one element as XML.
    Find { element_type: String, id: String },
    /// Print the authenticated user.
    Whoami,
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    let client = Client::from_config(&config);

    match cli.command {
        Command::Find { element_type, id } => {
            let element = client.find_str(&element_type, &id)?;
            println!("{}", xml::write_element(&element)?);
        },
        Command::Whoami => {
            let user = client.find_user()?;
            println!("{} {}", user.id, user.display_name);
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = err.kind.to_string().as_str(), err = err.message.as_str(); "Command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        },
    }
}
