//! GraphQL documents sent to AniList.

/// Fetches every list of one media type for a user, with the fields the
/// MyAnimeList export needs.
pub const MEDIA_LIST_QUERY: &str = r#"
query ($username: String, $type: MediaType) {
    MediaListCollection(userName: $username, type: $type) {
        lists {
            name
            entries {
                media {
                    idMal
                    title {
                        english
                        romaji
                        native
                    }
                    format
                    episodes
                    volumes
                    chapters
                }
                progress
                progressVolumes
                startedAt {
                    year
                    month
                    day
                }
                completedAt {
                    year
                    month
                    day
                }
                score(format: POINT_10_DECIMAL)
                repeat
                notes
            }
        }
    }
}
"#;
