use std::sync::Arc;

use anyhow::Context;
use user_manager::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config).context("failed to initialize tracing")?;

    let api = HttpUserApi::new(&config.api).context("failed to build API client")?;
    let manager = Arc::new(UserManager::new(Arc::new(api)));

    // The page still starts without the list; it shows the load error notice.
    if let Err(e) = manager.load().await {
        tracing::warn!(error = %e, "Initial load failed");
    }

    let app = router(WebState::new(manager, config.ui.clone()));
    Server::new(config).serve(app).await?;

    Ok(())
}
