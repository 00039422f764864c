//! Telegram update handlers.

use crate::command::{parse_request, RequestDefaults};
use anilist_export::Exporter;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Where users import the generated file
pub const IMPORT_URL: &str = "https://myanimelist.net/import.php";

pub const START_TEXT: &str = "Send me your AniList username, MediaType and title language in following format\n\n\
     username\n(ANIME | MANGA)\n(english | romaji | native)\n\n\
     See /help for example";

/// Usage example, naming the defaults this bot is configured with
pub fn help_text(defaults: RequestDefaults) -> String {
    format!(
        "Example:\n\nPROxZIMA\nANIME\nenglish\n\n\
         MediaType and title language is optional\nBy default MediaType = {}, title = {}",
        defaults.media_type, defaults.language
    )
}

pub const SUCCESS_TEXT: &str = "✔︎ XML successfully exported";

pub const UNSUPPORTED_TEXT: &str = "Send text message only.";

/// State shared by every handler
pub struct BotState {
    pub exporter: Exporter,
    pub defaults: RequestDefaults,
}

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "explain the request format")]
    Start,
    #[command(description = "show an example request")]
    Help,
}

/// Dispatch tree: commands first, then plain text, then everything else
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Message::filter_text().endpoint(handle_text))
        .branch(dptree::endpoint(handle_unsupported))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, START_TEXT).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, help_text(state.defaults)).await?;
            bot.send_message(
                msg.chat.id,
                format!(
                    "Go to {} and select \"MyAnimeList Import\" under \"Import to My List\".",
                    IMPORT_URL
                ),
            )
            .await?;
        }
    }

    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    text: String,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let request = match parse_request(&text, state.defaults) {
        Ok(request) => request,
        Err(e) => {
            info!(chat_id = msg.chat.id.0, error = %e, "Rejected request");
            bot.send_message(msg.chat.id, e.to_string()).await?;
            return Ok(());
        }
    };

    info!(
        chat_id = msg.chat.id.0,
        username = %request.username,
        media_type = %request.media_type,
        language = %request.language,
        "Export requested"
    );

    match state.exporter.export(&request).await {
        Ok(report) => {
            bot.send_document(msg.chat.id, InputFile::file(report.path.clone()))
                .await?;
            bot.send_message(msg.chat.id, SUCCESS_TEXT).await?;

            info!(
                chat_id = msg.chat.id.0,
                username = %report.username,
                records = report.records,
                exported_at = %report.exported_at.to_rfc3339(),
                "Export delivered"
            );
        }
        Err(e) => {
            if e.is_user_error() {
                warn!(username = %request.username, error = %e, "Export rejected by AniList");
            } else {
                error!(username = %request.username, error = %e, "Export failed");
            }
            bot.send_message(msg.chat.id, e.to_string()).await?;
        }
    }

    Ok(())
}

async fn handle_unsupported(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, UNSUPPORTED_TEXT).await?;
    Ok(())
}
