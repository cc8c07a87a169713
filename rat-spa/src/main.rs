use clap::Parser;
use rat_nexus::Application;
use rat_spa::{ApiClient, Config, DataSource, Shell};
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    rat_spa::logging::init(&config.log_file)?;
    info!(api_url = %config.api_url, path = %config.path, "starting rat-spa");

    let source: Arc<dyn DataSource> = Arc::new(ApiClient::new(&config.api_url)?);
    let initial_path = config.path;

    Application::new().run(move |cx| {
        cx.set_root(Shell::new(source, &initial_path)?)?;
        Ok(())
    })
}
