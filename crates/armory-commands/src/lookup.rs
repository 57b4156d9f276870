//! Single character lookup command.

use crate::framework::{Context, Data, Error};
use crate::reply::Outcome;
use anyhow::Context as _;
use armory_common::CharacterIdentity;
use armory_i18n::keys;
use armory_profile::{Renderer, ReplyDocument};
use tracing::{error, info};

/// Builds the single-character view.
pub async fn lookup_document(
    data: &Data,
    name: &str,
    realm: &str,
    region: &str,
) -> anyhow::Result<ReplyDocument> {
    let identity =
        CharacterIdentity::parse(name, realm, region).context("invalid lookup arguments")?;
    let snapshot = data.builder.build(&identity).await?;
    info!("Looked up {}", identity);
    Ok(Renderer::new(&data.messages).render_single(&snapshot))
}

/// Single-character view or the fixed failure message.
pub async fn lookup_outcome(data: &Data, name: &str, realm: &str, region: &str) -> Outcome {
    match lookup_document(data, name, realm, region).await {
        Ok(document) => Outcome::Document(document),
        Err(e) => {
            error!("Character lookup failed for {}/{}/{}: {:#}", region, realm, name, e);
            Outcome::Failure(data.messages.get(keys::LOOKUP_FAILED))
        }
    }
}

/// Get WoW character info.
#[poise::command(slash_command, rename = "character-lookup")]
pub async fn character_lookup(
    ctx: Context<'_>,
    #[description = "Character name"] name: String,
    #[description = "Realm name"] realm: String,
    #[description = "Region (e.g. eu, us)"] region: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let outcome = lookup_outcome(data, &name, &realm, &region).await;
    ctx.send(outcome.into_reply(&data.messages)).await?;

    Ok(())
}
