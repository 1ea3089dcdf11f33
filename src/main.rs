use anyhow::Result;
use clap::Parser;
use config::Config;
use log::error;

mod config;
mod constants;
mod data;
mod persistence;
mod service;
mod util;
mod web;

// MAIN
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let conf = Config::parse();

    let db = match persistence::get_db_context(&conf).await {
        Ok(db) => db,
        Err(e) => {
            error!(
                "Error creating database connection to {}: {e}",
                conf.surreal_db_connection
            );
            std::process::exit(constants::EXIT_STARTUP_FAILURE);
        }
    };

    let service_context = service::create_service_context(db);

    if let Err(e) = web::rocket_main(conf, service_context).launch().await {
        error!("Web server stopped with error: {e}");
        std::process::exit(constants::EXIT_STARTUP_FAILURE);
    }

    Ok(())
}
