mod cli;
mod config;
mod core;
mod error;
mod render;
mod scene;
mod scheduler;
mod surface;
mod types;
mod ui;

use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(cli.log_level());
    }
    logger.init();

    let cast = match &cli.cast {
        Some(path) => scene::Cast::load(path)?,
        None => scene::Cast::sample(),
    };
    log::info!("loaded cast with {} characters", cast.characters.len());
    ui::run(&cli, &cast)
}
