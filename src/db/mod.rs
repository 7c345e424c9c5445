//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: create/patch payloads for admin-managed rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the single owner of the connection pool

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod patch_impl;

pub use models::{
    DbFearGreed, DbQuote, DbRepo, DbSponsor, DbStreamInfo, DbStreamStatus, FearGreedData,
    NewsDigest, NewsStory, Placement, QuoteKind, WeatherDay, WeatherReport,
};
pub use patch::{DbPatchable, RepoCreate, SponsorCreate, SponsorPatch, SponsorUpdate};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
