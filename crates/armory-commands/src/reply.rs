//! Conversion of reply documents into Discord messages.

use crate::pvp::{menu_custom_id, PVP_OPTION_VALUE};
use armory_common::CharacterIdentity;
use armory_i18n::{keys, Messages};
use armory_profile::ReplyDocument;
use poise::serenity_prelude as serenity;

/// What a command answers with: a full document or a fixed failure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rendered document.
    Document(ReplyDocument),
    /// A fixed user-facing failure message.
    Failure(String),
}

impl Outcome {
    /// Builds the poise reply, attaching the follow-up menu to documents
    /// that carry a character identity.
    pub fn into_reply(self, messages: &Messages) -> poise::CreateReply {
        match self {
            Self::Document(document) => {
                let reply = poise::CreateReply::default().embed(embed(&document));
                match document.identity.as_ref().and_then(|id| pvp_menu(id, messages)) {
                    Some(menu) => reply.components(vec![menu]),
                    None => reply,
                }
            }
            Self::Failure(message) => poise::CreateReply::default().content(message),
        }
    }
}

/// Converts a reply document into an embed.
pub fn embed(document: &ReplyDocument) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new().color(document.color);

    if let Some(title) = &document.title {
        embed = embed.title(title);
    }
    if let Some(description) = &document.description {
        embed = embed.description(description);
    }
    if let Some(author) = &document.author {
        let mut builder = serenity::CreateEmbedAuthor::new(&author.name);
        if let Some(icon_url) = &author.icon_url {
            builder = builder.icon_url(icon_url);
        }
        embed = embed.author(builder);
    }
    if let Some(thumbnail) = &document.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(footer) = &document.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }

    embed.fields(
        document
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone(), field.inline)),
    )
}

/// Select menu offering the PvP follow-up for a character.
///
/// `None` when the identity does not fit into a component custom id.
pub fn pvp_menu(identity: &CharacterIdentity, messages: &Messages) -> Option<serenity::CreateActionRow> {
    let custom_id = menu_custom_id(identity)?;
    let option = serenity::CreateSelectMenuOption::new(messages.get(keys::MENU_PVP), PVP_OPTION_VALUE)
        .description(messages.get(keys::MENU_PVP_DESCRIPTION));

    let menu = serenity::CreateSelectMenu::new(
        custom_id,
        serenity::CreateSelectMenuKind::String {
            options: vec![option],
        },
    )
    .placeholder(messages.get(keys::MENU_PLACEHOLDER));

    Some(serenity::CreateActionRow::SelectMenu(menu))
}
