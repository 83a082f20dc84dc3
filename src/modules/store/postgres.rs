use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{RecordStore, ViewTarget};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{
    Category, CategoryFilter, CategoryPatch, CategoryRef, NewCategory,
};
use crate::features::professionals::models::{
    NewProfessional, Professional, ProfessionalFilter, ProfessionalPatch, ProfessionalSummary,
};
use crate::shared::types::{PageRequest, SortDirection};

/// Rows per INSERT statement; keeps professional batches well under the bind limit
const INSERT_CHUNK_SIZE: usize = 1000;

const CATEGORY_COLUMNS: &str = r#"
    c.id, c.name, c.description, c.status, c.icon, c.views,
    (SELECT COUNT(*) FROM professionals p WHERE p.category_id = c.id) AS professional_count,
    c.created_at, c.updated_at
"#;

const PROFESSIONAL_COLUMNS: &str = r#"
    id, full_name, headline, bio, email, phone, website, linkedin_url, instagram_url,
    city, address, image_url, available, views, category_id, created_at, updated_at
"#;

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            if let Some(constraint) = db_err.constraint() {
                if constraint.contains("categories_name") {
                    return AppError::Conflict("A category with this name already exists.".to_string());
                }
            }
            return AppError::Conflict("Record already exists.".to_string());
        }

        // Value too long for a VARCHAR column
        if db_err.code() == Some(std::borrow::Cow::Borrowed("22001")) {
            return AppError::BadRequest(
                "A value is longer than its field allows.".to_string(),
            );
        }

        // Foreign key violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Conflict(
                "Record is still referenced by other records or references a missing record."
                    .to_string(),
            );
        }
    }

    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

fn like_pattern(search: &str) -> String {
    format!("%{}%", search.trim())
}

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRecordStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_category_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CategoryFilter) {
        qb.push(" WHERE TRUE");
        if let Some(status) = filter.status {
            qb.push(" AND c.status = ").push_bind(status);
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            qb.push(" AND (c.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    fn push_professional_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProfessionalFilter) {
        qb.push(" WHERE TRUE");
        if let Some(category_id) = filter.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(available) = filter.available {
            qb.push(" AND available = ").push_bind(available);
        }
        if let Some(city) = filter.city.as_deref().filter(|s| !s.trim().is_empty()) {
            qb.push(" AND LOWER(city) = LOWER(")
                .push_bind(city.trim().to_string())
                .push(")");
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            qb.push(" AND (full_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR headline ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR city ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: Option<PageRequest>) {
        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit)
                .push(" OFFSET ")
                .push_bind(page.offset);
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM categories c", CATEGORY_COLUMNS));
        Self::push_category_filter(&mut qb, filter);
        qb.push(" ORDER BY c.name ASC");
        Self::push_page(&mut qb, page);

        qb.build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn count_categories(&self, filter: &CategoryFilter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM categories c");
        Self::push_category_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories c WHERE c.id = $1", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn category_refs(&self) -> Result<Vec<CategoryRef>> {
        sqlx::query_as::<_, CategoryRef>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn create_category(&self, row: &NewCategory) -> Result<Category> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, status, icon)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.status)
        .bind(&row.icon)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.find_category(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Category {} vanished after insert", id)))
    }

    async fn create_categories(&self, rows: &[NewCategory], skip_duplicates: bool) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(handle_db_error)?;
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut qb =
                QueryBuilder::<Postgres>::new("INSERT INTO categories (id, name, description, status, icon) ");
            qb.push_values(chunk, |mut b, row| {
                b.push_bind(Uuid::now_v7())
                    .push_bind(row.name.clone())
                    .push_bind(row.description.clone())
                    .push_bind(row.status)
                    .push_bind(row.icon.clone());
            });
            if skip_duplicates {
                qb.push(" ON CONFLICT DO NOTHING");
            }

            let result = qb
                .build()
                .execute(&mut *tx)
                .await
                .map_err(handle_db_error)?;
            inserted += result.rows_affected();
        }
        tx.commit().await.map_err(handle_db_error)?;

        Ok(inserted)
    }

    async fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Option<Category>> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                description = NULLIF(COALESCE($2, description), ''),
                status = COALESCE($3, status),
                icon = NULLIF(COALESCE($4, icon), ''),
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.status)
        .bind(&patch.icon)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_category(id).await
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_professionals(
        &self,
        filter: &ProfessionalFilter,
        sort: SortDirection,
        page: Option<PageRequest>,
    ) -> Result<Vec<Professional>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM professionals", PROFESSIONAL_COLUMNS));
        Self::push_professional_filter(&mut qb, filter);
        qb.push(format!(" ORDER BY created_at {}, id", sort.as_sql()));
        Self::push_page(&mut qb, page);

        qb.build_query_as::<Professional>()
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn count_professionals(&self, filter: &ProfessionalFilter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM professionals");
        Self::push_professional_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn find_professional(&self, id: Uuid) -> Result<Option<Professional>> {
        let query = format!("SELECT {} FROM professionals WHERE id = $1", PROFESSIONAL_COLUMNS);
        sqlx::query_as::<_, Professional>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn professional_summaries(&self) -> Result<Vec<ProfessionalSummary>> {
        sqlx::query_as::<_, ProfessionalSummary>(
            r#"
            SELECT id, full_name, email, phone, headline, city, created_at
            FROM professionals
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn create_professional(&self, row: &NewProfessional) -> Result<Professional> {
        let query = format!(
            r#"
            INSERT INTO professionals (
                id, full_name, headline, bio, email, phone, website, linkedin_url,
                instagram_url, city, address, image_url, available, category_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            PROFESSIONAL_COLUMNS
        );

        sqlx::query_as::<_, Professional>(&query)
            .bind(Uuid::now_v7())
            .bind(&row.full_name)
            .bind(&row.headline)
            .bind(&row.bio)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(&row.website)
            .bind(&row.linkedin_url)
            .bind(&row.instagram_url)
            .bind(&row.city)
            .bind(&row.address)
            .bind(&row.image_url)
            .bind(row.available)
            .bind(row.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn create_professionals(
        &self,
        rows: &[NewProfessional],
        skip_duplicates: bool,
    ) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(handle_db_error)?;
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<Postgres>::new(
                r#"INSERT INTO professionals (
                    id, full_name, headline, bio, email, phone, website, linkedin_url,
                    instagram_url, city, address, image_url, available, category_id
                ) "#,
            );
            qb.push_values(chunk, |mut b, row| {
                b.push_bind(Uuid::now_v7())
                    .push_bind(row.full_name.clone())
                    .push_bind(row.headline.clone())
                    .push_bind(row.bio.clone())
                    .push_bind(row.email.clone())
                    .push_bind(row.phone.clone())
                    .push_bind(row.website.clone())
                    .push_bind(row.linkedin_url.clone())
                    .push_bind(row.instagram_url.clone())
                    .push_bind(row.city.clone())
                    .push_bind(row.address.clone())
                    .push_bind(row.image_url.clone())
                    .push_bind(row.available)
                    .push_bind(row.category_id);
            });
            if skip_duplicates {
                qb.push(" ON CONFLICT DO NOTHING");
            }

            let result = qb
                .build()
                .execute(&mut *tx)
                .await
                .map_err(handle_db_error)?;
            inserted += result.rows_affected();
        }
        tx.commit().await.map_err(handle_db_error)?;

        Ok(inserted)
    }

    async fn update_professional(
        &self,
        id: Uuid,
        patch: &ProfessionalPatch,
    ) -> Result<Option<Professional>> {
        let query = format!(
            r#"
            UPDATE professionals
            SET full_name = COALESCE($1, full_name),
                headline = COALESCE($2, headline),
                bio = NULLIF(COALESCE($3, bio), ''),
                email = NULLIF(COALESCE($4, email), ''),
                phone = NULLIF(COALESCE($5, phone), ''),
                website = NULLIF(COALESCE($6, website), ''),
                linkedin_url = NULLIF(COALESCE($7, linkedin_url), ''),
                instagram_url = NULLIF(COALESCE($8, instagram_url), ''),
                city = NULLIF(COALESCE($9, city), ''),
                address = NULLIF(COALESCE($10, address), ''),
                image_url = NULLIF(COALESCE($11, image_url), ''),
                available = COALESCE($12, available),
                category_id = COALESCE($13, category_id),
                updated_at = $14
            WHERE id = $15
            RETURNING {}
            "#,
            PROFESSIONAL_COLUMNS
        );

        sqlx::query_as::<_, Professional>(&query)
            .bind(&patch.full_name)
            .bind(&patch.headline)
            .bind(&patch.bio)
            .bind(&patch.email)
            .bind(&patch.phone)
            .bind(&patch.website)
            .bind(&patch.linkedin_url)
            .bind(&patch.instagram_url)
            .bind(&patch.city)
            .bind(&patch.address)
            .bind(&patch.image_url)
            .bind(patch.available)
            .bind(patch.category_id)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn delete_professional(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM professionals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_professionals(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM professionals WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected())
    }

    async fn sum_views(&self, target: ViewTarget) -> Result<i64> {
        let query = match target {
            ViewTarget::Category => "SELECT COALESCE(SUM(views), 0)::BIGINT FROM categories",
            ViewTarget::Professional => "SELECT COALESCE(SUM(views), 0)::BIGINT FROM professionals",
        };

        sqlx::query_scalar::<_, i64>(query)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn increment_views(&self, target: ViewTarget, id: Uuid) -> Result<bool> {
        let query = match target {
            ViewTarget::Category => "UPDATE categories SET views = views + 1 WHERE id = $1",
            ViewTarget::Professional => "UPDATE professionals SET views = views + 1 WHERE id = $1",
        };

        let result = sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
