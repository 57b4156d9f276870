//! Poise framework setup and command registration logic.

use crate::pvp;
use armory_common::Result as ArmoryResult;
use armory_config::Config;
use armory_i18n::{keys, Messages};
use armory_profile::{ProfileGateway, SnapshotBuilder};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Snapshot builder over the profile gateway.
    pub builder: SnapshotBuilder,
    /// Message catalog for reply text.
    pub messages: Messages,
}

impl Data {
    /// Wires the lookup pipeline for a gateway.
    pub fn new(config: Arc<Config>, gateway: Arc<dyn ProfileGateway>) -> ArmoryResult<Self> {
        let messages = Messages::new(&config.data.language)?;
        let builder = SnapshotBuilder::new(gateway, config.lookup.policy);
        Ok(Self {
            config,
            builder,
            messages,
        })
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// The command table handed to the framework.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::lookup::character_lookup(),
        crate::compare::character_compare(),
    ]
}

/// Creates a new Poise framework.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!(
                    "Executing command {} for {}",
                    ctx.command().qualified_name,
                    ctx.author().name
                );
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                info!("Executed command {}", ctx.command().qualified_name);
            })
        },
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    })
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Logged in as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } if pvp::is_pvp_menu(&component.data.custom_id) => {
            pvp::handle_component(ctx, component, data).await?;
        }
        _ => {}
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to set up framework: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(ctx.data().messages.get(keys::COMMAND_ERROR))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report command error: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
