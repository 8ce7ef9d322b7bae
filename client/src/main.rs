use std::error::Error;
use std::path::PathBuf;
use clap::{Parser, Subcommand};
use clio::Input;
use skill_forecast_tools::{APP_NAME, APP_VERSION, APP_DESCRIPTION, ClientConfig, cli_print_config, cli_update_config, cli_heartbeat, cli_skill, cli_predict_fargo};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = APP_VERSION)]
#[command(about = APP_DESCRIPTION)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get or set the configuration
    Config {
        /// API endpoint, e.g. "http://127.0.0.1:5000"
        #[arg(short, long)]
        api_endpoint: Option<String>,
    },
    /// Check that the server is reachable
    Heartbeat,
    /// Estimate current and projected skill level with a weekly practice plan
    Skill {
        /// JSON file with the player stats, "-" for stdin
        #[arg(default_value = "-")]
        input: Input,

        /// Compute locally instead of asking the server
        #[arg(short, long)]
        local: bool,

        /// Input holds the raw drill sheet; bu_total is summed and a missing fargorate is predicted
        #[arg(short, long)]
        drills: bool,

        /// Rate model used with --drills --local
        #[arg(short, long, default_value = "fargo_model.json")]
        model: PathBuf,
    },
    /// Predict FargoRate from drill and tournament results
    PredictFargo {
        /// JSON file with the 14 rate features, "-" for stdin
        #[arg(default_value = "-")]
        input: Input,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let client_config: ClientConfig = if let Some(config_path) = &cli.config {
        confy::load_path(config_path)?
    } else {
        confy::load(APP_NAME, None)?
    };

    match cli.command {
        Commands::Config { api_endpoint } => {
            if api_endpoint.is_none() {
                cli_print_config(client_config)?
            } else {
                cli_update_config(client_config, cli.config, api_endpoint)?
            }
        }
        Commands::Heartbeat => {
            cli_heartbeat(client_config)?
        }
        Commands::Skill { input, local, drills, model } => {
            cli_skill(client_config, input, local, drills, model)?
        }
        Commands::PredictFargo { input } => {
            cli_predict_fargo(client_config, input)?
        }
    };

    Ok(())
}
