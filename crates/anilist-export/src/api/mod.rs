//! AniList GraphQL API client implementation.
//!
//! This module provides a client for fetching a user's media lists from
//! AniList, plus the response types it decodes into.

pub mod client;
pub mod query;
pub mod types;

pub use client::AniListClient;
pub use types::*;
