use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::models::Placement;
use crate::error::OnairError;

/// Abstraction for applying a patch payload/envelope to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), OnairError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorCreate {
    pub placement: Placement,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub link_url: String,
    #[serde(default)]
    pub display_text: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    #[serde(default)]
    pub padding_class: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorPatch {
    /// `None` => do not change; `Some(v)` => update
    pub placement: Option<Placement>,
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub link_url: Option<String>,
    pub display_text: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
    pub padding_class: Option<String>,
}

impl SponsorPatch {
    pub fn is_empty(&self) -> bool {
        let SponsorPatch {
            placement,
            name,
            logo_url,
            link_url,
            display_text,
            display_order,
            is_active,
            padding_class,
        } = self;
        placement.is_none()
            && name.is_none()
            && logo_url.is_none()
            && link_url.is_none()
            && display_text.is_none()
            && display_order.is_none()
            && is_active.is_none()
            && padding_class.is_none()
    }
}

/// A patch bound to the sponsor row it targets.
#[derive(Debug, Clone)]
pub struct SponsorUpdate {
    pub id: i64,
    pub patch: SponsorPatch,
}

/// Repository row as produced by the GitHub source, before it gets an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoCreate {
    pub title: String,
    pub stars: String,
    pub star_count: i64,
    pub url: String,
}
