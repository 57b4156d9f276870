//! PvP follow-up menu.
//!
//! The single-character reply carries a select menu whose custom id holds
//! the character's identity token. Selecting the PvP entry decodes that
//! token and answers with an ephemeral PvP view.

use crate::framework::{Data, Error};
use crate::reply;
use anyhow::Context as _;
use armory_common::{ArmoryError, CharacterIdentity};
use armory_i18n::keys;
use armory_profile::{Renderer, ReplyDocument};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Prefix of every PvP menu custom id.
pub const PVP_MENU_PREFIX: &str = "pvp:";

/// Value of the PvP entry in the follow-up menu.
pub const PVP_OPTION_VALUE: &str = "pvp";

/// Discord's upper bound on component custom ids.
pub const CUSTOM_ID_LIMIT: usize = 100;

/// Custom id for a character's follow-up menu.
pub fn menu_custom_id(identity: &CharacterIdentity) -> Option<String> {
    let custom_id = format!("{PVP_MENU_PREFIX}{}", identity.to_token());
    (custom_id.len() <= CUSTOM_ID_LIMIT).then_some(custom_id)
}

/// Whether a custom id belongs to a PvP menu.
pub fn is_pvp_menu(custom_id: &str) -> bool {
    custom_id.starts_with(PVP_MENU_PREFIX)
}

/// Decodes the identity carried by a PvP menu custom id.
pub fn parse_custom_id(custom_id: &str) -> armory_common::Result<CharacterIdentity> {
    let token = custom_id.strip_prefix(PVP_MENU_PREFIX).ok_or_else(|| {
        ArmoryError::invalid_input("custom_id", format!("not a PvP menu: '{custom_id}'"))
    })?;
    CharacterIdentity::from_token(token)
}

/// Builds the PvP view for a menu custom id.
pub async fn pvp_document(data: &Data, custom_id: &str) -> anyhow::Result<ReplyDocument> {
    let identity = parse_custom_id(custom_id).context("undecodable PvP menu")?;
    let snapshot = data.builder.build_pvp(&identity).await?;
    Ok(Renderer::new(&data.messages).render_pvp(&snapshot))
}

/// PvP view or the fixed failure message.
pub async fn pvp_outcome(data: &Data, custom_id: &str) -> reply::Outcome {
    match pvp_document(data, custom_id).await {
        Ok(document) => reply::Outcome::Document(document),
        Err(e) => {
            error!("PvP details failed for '{}': {:#}", custom_id, e);
            reply::Outcome::Failure(data.messages.get(keys::PVP_FAILED))
        }
    }
}

fn selected_pvp(component: &serenity::ComponentInteraction) -> bool {
    matches!(
        &component.data.kind,
        serenity::ComponentInteractionDataKind::StringSelect { values }
            if values.iter().any(|value| value == PVP_OPTION_VALUE)
    )
}

/// Answers a PvP menu selection with an ephemeral follow-up.
pub async fn handle_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    if !selected_pvp(component) {
        return Ok(());
    }

    info!(
        "PvP details requested by {} for '{}'",
        component.user.name, component.data.custom_id
    );

    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Defer(
                serenity::CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let edit = match pvp_outcome(data, &component.data.custom_id).await {
        reply::Outcome::Document(document) => {
            serenity::EditInteractionResponse::new().embed(reply::embed(&document))
        }
        reply::Outcome::Failure(message) => serenity::EditInteractionResponse::new().content(message),
    };
    component.edit_response(&ctx.http, edit).await?;

    Ok(())
}
