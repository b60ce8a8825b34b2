//! PostgreSQL implementation of the blog store
//!
//! Every method issues exactly one statement. Key-set lookups bind the whole
//! key slice as a single `int[]` parameter and match with `= ANY($1)`.

use std::time::Duration;

use async_trait::async_trait;
use blogql_shared_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::utils::{qualify_columns, COMMENT_COLUMNS, POST_COLUMNS, USER_COLUMNS};
use super::{BlogStore, StoreResult};
use crate::models::{Category, Comment, LikedPost, Post, PostLiker, User};
use crate::pagination::{count_query, PostFilter, PostWindow};

/// Store backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await?;
        tracing::info!("Database connection established");
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations completed successfully");
        Ok(())
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn users_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn posts_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = ANY($1)", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn posts_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY author_id, id DESC",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn comments_by_post_ids(&self, post_ids: &[i32]) -> StoreResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM comments WHERE post_id = ANY($1) ORDER BY post_id, id",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn comments_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM comments WHERE author_id = ANY($1) ORDER BY author_id, id",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn comment_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>> {
        sqlx::query_as(
            r#"SELECT post_id, COUNT(1) AS count
            FROM comments
            WHERE post_id = ANY($1)
            GROUP BY post_id"#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
    }

    async fn like_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>> {
        sqlx::query_as(
            r#"SELECT post_id, COUNT(1) AS count
            FROM likes
            WHERE post_id = ANY($1)
            GROUP BY post_id"#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
    }

    async fn likers_of_posts(&self, post_ids: &[i32]) -> StoreResult<Vec<PostLiker>> {
        let sql = format!(
            r#"SELECT l.post_id, {}
            FROM likes l
            JOIN users u ON l.author_id = u.id
            WHERE l.post_id = ANY($1)
            ORDER BY l.post_id, l.created_at"#,
            qualify_columns(USER_COLUMNS, "u")
        );
        sqlx::query_as::<_, PostLiker>(&sql)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn posts_liked_by_users(&self, user_ids: &[i32]) -> StoreResult<Vec<LikedPost>> {
        let sql = format!(
            r#"SELECT l.author_id AS liker_id, {}
            FROM likes l
            JOIN posts p ON l.post_id = p.id
            WHERE l.author_id = ANY($1)
            ORDER BY l.author_id, l.created_at"#,
            qualify_columns(POST_COLUMNS, "p")
        );
        sqlx::query_as::<_, LikedPost>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts ORDER BY created_at DESC",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await
    }

    async fn posts_by_category(&self, category: Category) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE category = $1 ORDER BY created_at DESC",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
    }

    async fn comments_for_post(&self, post_id: i32) -> StoreResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM comments WHERE post_id = $1 ORDER BY created_at DESC",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn search_posts(&self, query: &str, limit: i64) -> StoreResult<Vec<Post>> {
        let sql = format!(
            r#"SELECT {}
            FROM posts p, plainto_tsquery('english', $1) query
            WHERE p.search_vector @@ query
            ORDER BY ts_rank(p.search_vector, query) DESC
            LIMIT $2"#,
            qualify_columns(POST_COLUMNS, "p")
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn fetch_post_window(&self, window: &PostWindow) -> StoreResult<Vec<Post>> {
        let mut query = window.to_query();
        tracing::debug!(sql = query.sql(), "Fetching post window");
        query.build_query_as::<Post>().fetch_all(&self.pool).await
    }

    async fn count_posts(&self, filter: &PostFilter) -> StoreResult<i64> {
        let mut query = count_query(filter);
        query.build_query_scalar::<i64>().fetch_one(&self.pool).await
    }
}
