use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::word::{NewWord, Word, WordPatch};

const WORD_COLUMNS: &str = "id, word, definition, created_at, updated_at, created_by";

/// Storage operations behind the `/words` routes.
///
/// Absence is reported as `None` / `false`, never as an error. Storage failures come back
/// as typed `AppError`s (`Conflict` for a duplicate word).
#[async_trait]
pub trait WordRepository: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Word>>;

    /// Case-insensitive substring match on `word`. The term is matched literally.
    async fn search(&self, term: &str) -> AppResult<Vec<Word>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Word>>;

    async fn create(&self, new_word: NewWord) -> AppResult<Word>;

    /// Returns `true` if a row with `id` exists (and was updated).
    async fn update(&self, id: i32, patch: WordPatch) -> AppResult<bool>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// `WordRepository` over the `words` table.
#[derive(Clone)]
pub struct PgWordRepository {
    pool: PgPool,
}

impl PgWordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WordRepository for PgWordRepository {
    async fn list_all(&self) -> AppResult<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(&format!(
            "SELECT {} FROM words ORDER BY id",
            WORD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("list_all returned {} rows", words.len());
        Ok(words)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(&format!(
            "SELECT {} FROM words WHERE word ILIKE $1 ORDER BY id",
            WORD_COLUMNS
        ))
        .bind(format!("%{}%", escape_like(term)))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("search '{}' returned {} rows", term, words.len());
        Ok(words)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Word>> {
        let word = sqlx::query_as::<_, Word>(&format!(
            "SELECT {} FROM words WHERE id = $1",
            WORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    async fn create(&self, new_word: NewWord) -> AppResult<Word> {
        // Single round trip: the row comes back with its id and timestamps.
        let word = sqlx::query_as::<_, Word>(&format!(
            "INSERT INTO words (word, definition) VALUES ($1, $2) RETURNING {}",
            WORD_COLUMNS
        ))
        .bind(&new_word.word)
        .bind(&new_word.definition)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("inserted word id={}", word.id);
        Ok(word)
    }

    async fn update(&self, id: i32, patch: WordPatch) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE words
            SET word = COALESCE($1, word),
                definition = COALESCE($2, definition),
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(patch.word)
        .bind(patch.definition)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM words WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Escapes `LIKE` wildcards so the term matches literally (backslash is Postgres' default
/// escape character).
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
