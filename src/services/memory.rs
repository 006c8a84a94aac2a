//! In-process `WordRepository` used by the handler tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::word::{NewWord, Word, WordPatch};
use crate::services::word_service::WordRepository;

#[derive(Default)]
pub struct MemoryWordRepository {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Word>,
}

impl Table {
    fn word_taken(&self, word: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|row| row.word == word && Some(row.id) != except)
    }
}

fn duplicate() -> AppError {
    AppError::Conflict("Word already exists".to_string())
}

impl MemoryWordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }
}

#[async_trait]
impl WordRepository for MemoryWordRepository {
    async fn list_all(&self) -> AppResult<Vec<Word>> {
        Ok(self.inner.lock().await.rows.values().cloned().collect())
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Word>> {
        let needle = term.to_lowercase();
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|row| row.word.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Word>> {
        Ok(self.inner.lock().await.rows.get(&id).cloned())
    }

    async fn create(&self, new_word: NewWord) -> AppResult<Word> {
        let mut table = self.inner.lock().await;
        if table.word_taken(&new_word.word, None) {
            return Err(duplicate());
        }
        table.next_id += 1;
        let now = Utc::now();
        let word = Word {
            id: table.next_id,
            word: new_word.word,
            definition: new_word.definition,
            created_at: now,
            updated_at: now,
            created_by: None,
        };
        table.rows.insert(word.id, word.clone());
        Ok(word)
    }

    async fn update(&self, id: i32, patch: WordPatch) -> AppResult<bool> {
        let mut table = self.inner.lock().await;
        if !table.rows.contains_key(&id) {
            return Ok(false);
        }
        if let Some(word) = &patch.word {
            if table.word_taken(word, Some(id)) {
                return Err(duplicate());
            }
        }
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(word) = patch.word {
            row.word = word;
        }
        if let Some(definition) = patch.definition {
            row.definition = definition;
        }
        row.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.inner.lock().await.rows.remove(&id).is_some())
    }
}

/// Fails every call, as a lost database connection would.
pub struct UnavailableWordRepository;

#[async_trait]
impl WordRepository for UnavailableWordRepository {
    async fn list_all(&self) -> AppResult<Vec<Word>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn search(&self, _term: &str) -> AppResult<Vec<Word>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get_by_id(&self, _id: i32) -> AppResult<Option<Word>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _new_word: NewWord) -> AppResult<Word> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: i32, _patch: WordPatch) -> AppResult<bool> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i32) -> AppResult<bool> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
