use std::path::Path;

use clap::Parser;
use tradelane::adapter::inbound::cli::command::{CheckCommand, ConfigCommand};
use tradelane::adapter::inbound::cli::output::{self, OutputConfig};
use tradelane::adapter::inbound::cli::{
    best_price, check, config, diagnostic, scan, Cli, Commands,
};
use tradelane::error::Result;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::configure_color(&cli.color);

    if let Err(e) = dispatch(&cli.command) {
        if output::is_json() {
            output::error(&e.to_string());
        } else {
            let report = diagnostic::report(&e, config_path(&cli.command));
            eprintln!("{report:?}");
        }
        std::process::exit(1);
    }
}

fn dispatch(command: &Commands) -> Result<()> {
    match command {
        Commands::Scan(args) => scan::execute(args),
        Commands::BestPrice(args) => best_price::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    }
}

fn config_path(command: &Commands) -> Option<&Path> {
    match command {
        Commands::Scan(args) => Some(args.config.as_path()),
        Commands::BestPrice(args) => Some(args.config.as_path()),
        Commands::Config(ConfigCommand::Show(args)) | Commands::Check(CheckCommand::Config(args)) => {
            Some(args.config.as_path())
        }
        Commands::Config(ConfigCommand::Init(_)) => None,
    }
}
