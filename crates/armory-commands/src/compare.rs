//! Two-character comparison command.

use crate::framework::{Context, Data, Error};
use crate::reply::Outcome;
use anyhow::Context as _;
use armory_common::CharacterIdentity;
use armory_i18n::keys;
use armory_profile::{compare_snapshots, Renderer, ReplyDocument};
use tracing::{error, info};

/// Raw arguments naming one character.
#[derive(Debug, Clone, Copy)]
pub struct CharacterArgs<'a> {
    /// Character name.
    pub name: &'a str,
    /// Realm name.
    pub realm: &'a str,
    /// Region code.
    pub region: &'a str,
}

impl CharacterArgs<'_> {
    fn identity(&self) -> armory_common::Result<CharacterIdentity> {
        CharacterIdentity::parse(self.name, self.realm, self.region)
    }
}

/// Builds the comparison view; both characters are fetched concurrently.
pub async fn compare_document(
    data: &Data,
    first: CharacterArgs<'_>,
    second: CharacterArgs<'_>,
) -> anyhow::Result<ReplyDocument> {
    let left = first.identity().context("invalid first character")?;
    let right = second.identity().context("invalid second character")?;

    let (a, b) = tokio::try_join!(data.builder.build(&left), data.builder.build(&right))?;
    info!("Compared {} with {}", left, right);

    let result = compare_snapshots(&a, &b);
    Ok(Renderer::new(&data.messages).render_comparison(&a, &b, &result))
}

/// Comparison view or the fixed failure message.
pub async fn compare_outcome(
    data: &Data,
    first: CharacterArgs<'_>,
    second: CharacterArgs<'_>,
) -> Outcome {
    match compare_document(data, first, second).await {
        Ok(document) => Outcome::Document(document),
        Err(e) => {
            error!("Character comparison failed: {:#}", e);
            Outcome::Failure(data.messages.get(keys::COMPARE_FAILED))
        }
    }
}

/// Compare two WoW characters.
#[poise::command(slash_command, rename = "character-compare")]
pub async fn character_compare(
    ctx: Context<'_>,
    #[description = "First character name"] name1: String,
    #[description = "First character realm"] realm1: String,
    #[description = "First character region (eu, us)"] region1: String,
    #[description = "Second character name"] name2: String,
    #[description = "Second character realm"] realm2: String,
    #[description = "Second character region (eu, us)"] region2: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let first = CharacterArgs {
        name: &name1,
        realm: &realm1,
        region: &region1,
    };
    let second = CharacterArgs {
        name: &name2,
        realm: &realm2,
        region: &region2,
    };

    let data = ctx.data();
    let outcome = compare_outcome(data, first, second).await;
    ctx.send(outcome.into_reply(&data.messages)).await?;

    Ok(())
}
