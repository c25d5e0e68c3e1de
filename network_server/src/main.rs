use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use network_server::modules::{
    config::ServiceBase,
    error::NSError,
    init::{initialize, load_catalog},
    network_server::NetworkServer,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
///The LoRaWAN Network Server regional parameters service
struct Args {
    /// Path of the configuration JSON file.
    #[clap(short, long, value_parser)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), NSError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServiceBase::from_file(path).await?,
        None => {
            log::warn!("No configuration file given, using the builtin frequency plans and defaults");
            ServiceBase::default()
        }
    };
    let events = initialize(&mut config)?;
    let catalog = load_catalog(&config.frequency_plans).await?;
    let ns = Arc::new(NetworkServer::new(catalog, events, config.context_cache_size));
    log::info!("Network server ready");

    let checks = config.devices.into_iter().map(|device| {
        let ns = Arc::clone(&ns);
        tokio::spawn(async move {
            match ns.regional_context(&device) {
                Ok(context) => log::info!(
                    "{device}: frequency plan {} with band {} {}",
                    context.frequency_plan().id(),
                    context.band().region(),
                    context.band_version()
                ),
                Err(e) => log::error!("{device}: {e}"),
            }
        })
    });
    for check in checks.collect::<Vec<_>>() {
        if let Err(e) = check.await {
            log::error!("Device check panicked: {e}");
        }
    }

    log::info!("Byebye");
    Ok(())
}
