//! PostgreSQL-backed presentation store.
//!
//! DESIGN
//! ======
//! Implements the relay store traits over two tables, `presentations` (one row
//! per presentation, broadcast fields inline) and `slides`. Every write that
//! reads before it writes runs in a transaction with the affected row locked, and
//! geometry goes through the same clamp as the editor (`Slide::apply_geometry`,
//! `NewSlide::into_slide`) before it is stored.
//!
//! ERROR HANDLING
//! ==============
//! Missing rows become `StoreError::NotFound` naming the presentation or slide;
//! SQL failures become `StoreError::Backend`. Stored enum strings or metadata
//! this build does not understand decode to their defaults instead of failing the
//! read.

use canvas::doc::{
    BackgroundType, BroadcastFields, BroadcastPatch, GeometryPatch, NewPresentation, NewSlide, Presentation,
    PresentationId, PresentationSummary, PropertiesPatch, Slide, SlideId, SlideMetadata, ViewerAnimation, ViewerSize,
};
use relay::store::{PresentationCatalog, PresentationSource, PresentationStore, StoreError};
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

#[cfg(test)]
#[path = "pg_store_test.rs"]
mod pg_store_test;

// =============================================================================
// ROWS
// =============================================================================

const PRESENTATION_COLUMNS: &str = "id, title, description, current_slide_id, is_presenting, show_slide_ring, \
     viewer_size, background_type, viewer_animation, viewer_countdown_seconds";

const SLIDE_COLUMNS: &str =
    "id, title, content, x, y, width, height, slide_order, background_color, text_color, metadata";

/// `id, title, description, current_slide_id` followed by the broadcast columns.
pub(crate) type PresentationRow =
    (Uuid, String, Option<String>, Option<Uuid>, bool, bool, String, String, String, i32);

pub(crate) type SlideRow = (
    Uuid,
    String,
    String,
    f64,
    f64,
    f64,
    f64,
    i32,
    Option<String>,
    Option<String>,
    serde_json::Value,
);

pub(crate) fn presentation_from_row(row: PresentationRow, slides: Vec<Slide>) -> Presentation {
    let (id, title, description, current_slide_id, is_presenting, show_slide_ring, size, background, animation, seconds) =
        row;
    let mut presentation = Presentation {
        id,
        title,
        description,
        current_slide_id,
        slides,
        broadcast: BroadcastFields {
            is_presenting,
            show_slide_ring,
            viewer_size: ViewerSize::from_wire(&size).unwrap_or_default(),
            background_type: BackgroundType::from_wire(&background).unwrap_or_default(),
            viewer_animation: ViewerAnimation::from_wire(&animation).unwrap_or_default(),
            viewer_countdown_seconds: u32::try_from(seconds).unwrap_or(0),
        },
    };
    presentation.sanitize();
    presentation
}

pub(crate) fn slide_from_row(row: SlideRow) -> Slide {
    let (id, title, content, x, y, width, height, order, background_color, text_color, metadata) = row;
    let mut slide = Slide {
        id,
        title,
        content,
        x,
        y,
        width,
        height,
        order,
        background_color,
        text_color,
        metadata: serde_json::from_value::<SlideMetadata>(metadata).unwrap_or_default(),
    };
    slide.sanitize();
    slide
}

pub(crate) fn countdown_column(seconds: u32) -> i32 {
    i32::try_from(seconds).unwrap_or(i32::MAX)
}

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn metadata_json(metadata: &SlideMetadata) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(metadata).map_err(|e| StoreError::Decode(e.to_string()))
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_presentation_row(
        conn: &mut PgConnection,
        id: PresentationId,
        lock: bool,
    ) -> Result<PresentationRow, StoreError> {
        let suffix = if lock { " FOR UPDATE" } else { "" };
        let sql = format!("SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = $1{suffix}");
        sqlx::query_as::<_, PresentationRow>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| StoreError::presentation_not_found(id))
    }

    async fn load_slides(conn: &mut PgConnection, presentation_id: PresentationId) -> Result<Vec<Slide>, StoreError> {
        let sql = format!(
            "SELECT {SLIDE_COLUMNS} FROM slides WHERE presentation_id = $1 ORDER BY slide_order, created_at, id"
        );
        let rows = sqlx::query_as::<_, SlideRow>(&sql)
            .bind(presentation_id)
            .fetch_all(conn)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(slide_from_row).collect())
    }

    /// Lock and load one slide. A missing presentation is reported before a missing
    /// slide.
    async fn load_slide_for_update(
        conn: &mut PgConnection,
        presentation_id: PresentationId,
        slide_id: SlideId,
    ) -> Result<Slide, StoreError> {
        Self::load_presentation_row(conn, presentation_id, false).await?;
        let sql = format!("SELECT {SLIDE_COLUMNS} FROM slides WHERE id = $1 AND presentation_id = $2 FOR UPDATE");
        sqlx::query_as::<_, SlideRow>(&sql)
            .bind(slide_id)
            .bind(presentation_id)
            .fetch_optional(conn)
            .await
            .map_err(db_error)?
            .map(slide_from_row)
            .ok_or_else(|| StoreError::slide_not_found(slide_id))
    }

    async fn insert_slide(conn: &mut PgConnection, presentation_id: PresentationId, slide: &Slide) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO slides \
             (id, presentation_id, title, content, x, y, width, height, slide_order, background_color, text_color, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(slide.id)
        .bind(presentation_id)
        .bind(&slide.title)
        .bind(&slide.content)
        .bind(slide.x)
        .bind(slide.y)
        .bind(slide.width)
        .bind(slide.height)
        .bind(slide.order)
        .bind(&slide.background_color)
        .bind(&slide.text_color)
        .bind(metadata_json(&slide.metadata)?)
        .execute(conn)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PresentationSource for PgStore {
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        let row = Self::load_presentation_row(&mut conn, id, false).await?;
        let slides = Self::load_slides(&mut conn, id).await?;
        Ok(presentation_from_row(row, slides))
    }
}

#[async_trait::async_trait]
impl PresentationStore for PgStore {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut slide = Self::load_slide_for_update(&mut tx, presentation_id, slide_id).await?;
        slide.apply_geometry(&patch);
        sqlx::query("UPDATE slides SET x = $2, y = $3, width = $4, height = $5 WHERE id = $1")
            .bind(slide.id)
            .bind(slide.x)
            .bind(slide.y)
            .bind(slide.width)
            .bind(slide.height)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;
        Ok(slide)
    }

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut slide = Self::load_slide_for_update(&mut tx, presentation_id, slide_id).await?;
        slide.apply_properties(&patch);
        sqlx::query(
            "UPDATE slides SET title = $2, content = $3, background_color = $4, text_color = $5, metadata = $6 \
             WHERE id = $1",
        )
        .bind(slide.id)
        .bind(&slide.title)
        .bind(&slide.content)
        .bind(&slide.background_color)
        .bind(&slide.text_color)
        .bind(metadata_json(&slide.metadata)?)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;
        Ok(slide)
    }

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        Self::load_presentation_row(&mut tx, presentation_id, true).await?;
        let next_order: i32 =
            sqlx::query_scalar("SELECT COALESCE(MAX(slide_order) + 1, 0) FROM slides WHERE presentation_id = $1")
                .bind(presentation_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error)?;
        let created = slide.into_slide(Uuid::new_v4(), next_order);
        Self::insert_slide(&mut tx, presentation_id, &created).await?;
        tx.commit().await.map_err(db_error)?;
        info!(%presentation_id, slide_id = %created.id, "slide created");
        Ok(created)
    }

    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        Self::load_presentation_row(&mut tx, presentation_id, true).await?;
        sqlx::query("UPDATE presentations SET current_slide_id = NULL WHERE id = $1 AND current_slide_id = $2")
            .bind(presentation_id)
            .bind(slide_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        let deleted = sqlx::query("DELETE FROM slides WHERE id = $1 AND presentation_id = $2")
            .bind(slide_id)
            .bind(presentation_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        if deleted.rows_affected() == 0 {
            return Err(StoreError::slide_not_found(slide_id));
        }
        tx.commit().await.map_err(db_error)?;
        info!(%presentation_id, %slide_id, "slide deleted");
        Ok(())
    }

    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let row = Self::load_presentation_row(&mut tx, presentation_id, true).await?;
        let slides = Self::load_slides(&mut tx, presentation_id).await?;
        let mut presentation = presentation_from_row(row, slides);
        presentation.reorder(slide_ids);
        for slide in &presentation.slides {
            sqlx::query("UPDATE slides SET slide_order = $2 WHERE id = $1")
                .bind(slide.id)
                .bind(slide.order)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }
        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        Self::load_presentation_row(&mut tx, presentation_id, true).await?;
        if let Some(id) = slide_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM slides WHERE id = $1 AND presentation_id = $2)")
                    .bind(id)
                    .bind(presentation_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(db_error)?;
            if !exists {
                return Err(StoreError::slide_not_found(id));
            }
        }
        sqlx::query("UPDATE presentations SET current_slide_id = $2 WHERE id = $1")
            .bind(presentation_id)
            .bind(slide_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let row = Self::load_presentation_row(&mut tx, presentation_id, true).await?;
        let mut broadcast = presentation_from_row(row, Vec::new()).broadcast;
        broadcast.apply(&patch);
        sqlx::query(
            "UPDATE presentations SET is_presenting = $2, show_slide_ring = $3, viewer_size = $4, \
             background_type = $5, viewer_animation = $6, viewer_countdown_seconds = $7 WHERE id = $1",
        )
        .bind(presentation_id)
        .bind(broadcast.is_presenting)
        .bind(broadcast.show_slide_ring)
        .bind(broadcast.viewer_size.as_str())
        .bind(broadcast.background_type.as_str())
        .bind(broadcast.viewer_animation.as_str())
        .bind(countdown_column(broadcast.viewer_countdown_seconds))
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;
        info!(%presentation_id, is_presenting = broadcast.is_presenting, "broadcast fields updated");
        Ok(broadcast)
    }
}

#[async_trait::async_trait]
impl PresentationCatalog for PgStore {
    async fn create_presentation(&self, presentation: NewPresentation) -> Result<Presentation, StoreError> {
        let mut created = Presentation::new(Uuid::new_v4(), presentation.title);
        created.description = presentation.description;
        sqlx::query("INSERT INTO presentations (id, title, description) VALUES ($1, $2, $3)")
            .bind(created.id)
            .bind(&created.title)
            .bind(&created.description)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        info!(presentation_id = %created.id, title = %created.title, "presentation created");
        Ok(created)
    }

    async fn list_presentations(&self) -> Result<Vec<PresentationSummary>, StoreError> {
        let rows = sqlx::query_as::<_, (Uuid, String, Option<String>, bool, i64)>(
            "SELECT p.id, p.title, p.description, p.is_presenting, COUNT(s.id) \
             FROM presentations p LEFT JOIN slides s ON s.presentation_id = p.id \
             GROUP BY p.id ORDER BY p.title, p.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, title, description, is_presenting, count)| PresentationSummary {
                id,
                title,
                description,
                slide_count: usize::try_from(count).unwrap_or(0),
                is_presenting,
            })
            .collect())
    }
}
