use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use store::{
    Feedback, FeedbackDraft, FeedbackStore, NewUser, StoreError, StoreResult, User,
};

#[derive(Clone, FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    email: String,
    first_name: String,
    last_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct FeedbackRow {
    id: i32,
    title: String,
    content: String,
    username: String,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            username: row.username,
        }
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Conflict(db.constraint().unwrap_or("unique").to_string());
        }
        if db.is_foreign_key_violation() {
            return StoreError::UnknownOwner;
        }
    }
    StoreError::Backend(err.to_string())
}

/// PostgreSQL-backed store.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password_hash, email, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING username, password_hash, email, first_name, last_name",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.into())
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password_hash, email, first_name, last_name \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(User::from))
    }

    async fn delete_user(&self, username: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        sqlx::query("DELETE FROM feedback WHERE username = $1")
            .bind(username)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;

        let deleted = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?
            .rows_affected();

        tx.commit().await.map_err(store_error)?;
        Ok(deleted > 0)
    }

    async fn list_feedback_for(&self, username: &str) -> StoreResult<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, title, content, username FROM feedback \
             WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(Feedback::from).collect())
    }

    async fn insert_feedback(
        &self,
        username: &str,
        draft: FeedbackDraft,
    ) -> StoreResult<Feedback> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "INSERT INTO feedback (title, content, username) VALUES ($1, $2, $3) \
             RETURNING id, title, content, username",
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.into())
    }

    async fn find_feedback(&self, id: i32) -> StoreResult<Option<Feedback>> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, title, content, username FROM feedback WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(Feedback::from))
    }

    async fn update_feedback(
        &self,
        id: i32,
        draft: FeedbackDraft,
    ) -> StoreResult<Option<Feedback>> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "UPDATE feedback SET title = $1, content = $2 WHERE id = $3 \
             RETURNING id, title, content, username",
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(Feedback::from))
    }

    async fn delete_feedback(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}
