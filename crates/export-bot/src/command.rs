//! Parsing of export requests sent as chat messages.
//!
//! A request is one to three lines: the AniList username, then optionally
//! the media type and/or the title language.

use anilist_export::ExportRequest;
use shared::{MediaType, TitleLanguage};
use thiserror::Error;

/// Rejected chat input. The message is sent back to the user verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0}\nSee /help for the request format")]
    UnknownCommand(String),

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Make sure to send only 3 or less queries")]
    TooManyArguments,

    #[error("Invalid argument received : {0}")]
    InvalidArgument(String),

    #[error("Improper title language :(\n\nTry english | romaji | native")]
    ImproperTitleLanguage,

    #[error("Improper media type :(\n\nTry ANIME | MANGA")]
    ImproperMediaType,
}

/// Values used for parts of a request the user left out
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestDefaults {
    pub media_type: MediaType,
    pub language: TitleLanguage,
}

/// Parse a chat message into an export request.
pub fn parse_request(text: &str, defaults: RequestDefaults) -> Result<ExportRequest, CommandError> {
    let text = text.trim();
    if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or(text);
        return Err(CommandError::UnknownCommand(command.to_string()));
    }

    let details: Vec<&str> = text.split('\n').map(str::trim).collect();

    let mut media_type = defaults.media_type;
    let mut language = defaults.language;

    match details.as_slice() {
        [_] => {}
        [_, argument] => {
            if let Ok(parsed) = argument.parse::<MediaType>() {
                media_type = parsed;
            } else if let Ok(parsed) = argument.parse::<TitleLanguage>() {
                language = parsed;
            } else {
                return Err(CommandError::InvalidArgument(argument.to_string()));
            }
        }
        [_, kind, title] => {
            language = title
                .parse()
                .map_err(|_| CommandError::ImproperTitleLanguage)?;
            media_type = kind.parse().map_err(|_| CommandError::ImproperMediaType)?;
        }
        _ => return Err(CommandError::TooManyArguments),
    }

    let username = details[0];
    if username.is_empty() {
        return Err(CommandError::EmptyUsername);
    }

    Ok(ExportRequest {
        username: username.to_string(),
        media_type,
        language,
    })
}
