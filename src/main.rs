use anyhow::Result;
use taskview::{config::Config, logger, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::setup_file_logging(&config)?;

    ui::run_app(config).await?;

    Ok(())
}
