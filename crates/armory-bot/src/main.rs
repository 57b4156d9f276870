//! Main entry point for Armory Bot.

use armory_bot::{init_logging, ArmoryBot, BotResult};
use armory_config::ConfigLoader;
use armory_profile::BlizzardClient;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = ConfigLoader::discover().load()?;
    let _guard = init_logging(&config.logging)?;

    info!(
        "Starting Armory Bot ({:?} fetch policy, language {})",
        config.lookup.policy, config.data.language
    );

    let gateway = BlizzardClient::from_config(&config.blizzard)?;
    let bot = ArmoryBot::new(config, Arc::new(gateway));

    if let Err(e) = bot.start().await {
        error!("Bot failed to start: {}", e);
        return Err(e);
    }

    Ok(())
}
