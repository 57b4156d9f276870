//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use armory_commands::{create_framework, Data};
use armory_config::Config;
use armory_profile::ProfileGateway;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;

/// Main bot structure.
pub struct ArmoryBot {
    config: Arc<Config>,
    gateway: Arc<dyn ProfileGateway>,
}

impl ArmoryBot {
    /// Creates a new bot instance.
    pub fn new(config: Config, gateway: Arc<dyn ProfileGateway>) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
        }
    }

    /// Application configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts the bot and runs until the gateway connection ends.
    pub async fn start(&self) -> BotResult<()> {
        let data = Data::new(self.config.clone(), self.gateway.clone())?;
        let guild_id = self.config.discord.guild_id.map(serenity::GuildId::new);

        let framework = create_framework()
            .setup(move |ctx, _ready, framework| {
                Box::pin(async move {
                    let commands = &framework.options().commands;
                    match guild_id {
                        Some(guild_id) => {
                            poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                            info!("Registered {} commands in guild {}", commands.len(), guild_id);
                        }
                        None => {
                            poise::builtins::register_globally(ctx, commands).await?;
                            info!("Registered {} commands globally", commands.len());
                        }
                    }
                    Ok(data)
                })
            })
            .build();

        let mut builder = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework);

        if let Some(application_id) = self.config.discord.application_id {
            builder = builder.application_id(serenity::ApplicationId::new(application_id));
        }

        let mut client = builder.await?;
        client.start().await?;
        Ok(())
    }
}
