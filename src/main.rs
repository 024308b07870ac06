use clap::Parser;
use log::{error, info};

use mindmate::{App, Cli, Config, JsonStore};

pub fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

#[tokio::main]
async fn main() {
    initialize_logger();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.clone());
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = match JsonStore::open(config.data_dir.clone()) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open data store: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(store, config, cli.config, cli.verbose);
    if let Err(e) = app.run(cli.command).await {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
