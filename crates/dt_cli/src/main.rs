use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dt_fetch::DevToClient;
use tracing::debug;

mod cli;
mod logging;
mod pipeline;

use cli::Cli;
use pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.analytics_config();
    config.validate()?;
    let request = cli.report_request(&config);
    debug!("Report request: {:?}", request);

    let client = DevToClient::new(&cli.api_key, cli.fetch_config())
        .context("Failed to set up the API client")?;

    let mut stdout = std::io::stdout().lock();
    Pipeline::new(&client, request, config)
        .run(Utc::now(), &mut stdout)
        .await?;

    Ok(())
}
