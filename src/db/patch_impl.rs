//! SponsorUpdate -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::patch::{DbPatchable, SponsorPatch, SponsorUpdate};
use crate::error::OnairError;

#[async_trait]
impl DbPatchable for SponsorUpdate {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), OnairError> {
        let id = self.id;
        if self.patch.is_empty() {
            return Err(OnairError::InvalidRequest(
                "No updates provided".to_string(),
            ));
        }

        let SponsorPatch {
            placement,
            name,
            logo_url,
            link_url,
            display_text,
            display_order,
            is_active,
            padding_class,
        } = self.patch.clone();

        let placement_set = placement.is_some();
        let display_order_set = display_order.is_some();
        let is_active_set = is_active.is_some();
        let updated_at = Utc::now();

        let res = sqlx::query(
            r#"
            UPDATE sponsors
            SET
                placement = COALESCE(?, placement),
                name = COALESCE(?, name),
                logo_url = COALESCE(?, logo_url),
                link_url = COALESCE(?, link_url),
                display_text = COALESCE(?, display_text),
                display_order = COALESCE(?, display_order),
                is_active = COALESCE(?, is_active),
                padding_class = COALESCE(?, padding_class),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(placement)
        .bind(name)
        .bind(logo_url)
        .bind(link_url)
        .bind(display_text)
        .bind(display_order)
        .bind(is_active)
        .bind(padding_class)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;

        let affected = res.rows_affected();
        debug!(
            id,
            affected,
            updated_at = %updated_at,
            placement_set,
            display_order_set,
            is_active_set,
            "sponsor patch applied"
        );

        if affected == 0 {
            return Err(OnairError::NotFound(format!("Sponsor {id}")));
        }

        Ok(())
    }
}
