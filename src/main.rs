use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use jobscout::{configuration::get_configuration, services::RateGuard, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    let rate_guard = RateGuard::default();

    log::info!("Server running on http://{}", address);

    run(listener, configuration.webdriver, rate_guard)?
        .await
        .context("Server quit unexpectedly")
}
