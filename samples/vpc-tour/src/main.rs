mod config;
mod scenarios;

use ibmcloud_vpc_client::{LogLevel, VpcService, VpcServiceOptions};

use config::load_settings;

#[tokio::main]
async fn main() -> Result<(), String> {
    let settings = load_settings()?;

    let service = VpcService::from_external_config(VpcServiceOptions {
        log_level: LogLevel::Information,
        ..Default::default()
    })
    .map_err(|e| e.to_string())?;

    let vpc_ids = scenarios::networking::run(&service, &settings).await?;
    scenarios::compute::run(&service, &settings, &vpc_ids).await?;

    Ok(())
}
