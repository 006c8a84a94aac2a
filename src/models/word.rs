use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Word {
    pub id: i32,
    pub word: String,
    pub definition: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>, // external user id, never set by this service
}

/// Body of `POST /words`. Fields stay optional so that a missing one is a 400, not a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWordRequest {
    pub word: Option<String>,
    pub definition: Option<String>,
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWord {
    pub word: String,
    pub definition: String,
}

impl CreateWordRequest {
    pub fn validate(self) -> Result<NewWord, AppError> {
        match (non_blank(self.word), non_blank(self.definition)) {
            (Some(word), Some(definition)) => Ok(NewWord { word, definition }),
            _ => Err(AppError::Invalid("Word and definition required".to_string())),
        }
    }
}

/// Body of `PUT /words/:id`, any subset of the mutable fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWordRequest {
    pub word: Option<String>,
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordPatch {
    pub word: Option<String>,
    pub definition: Option<String>,
}

impl UpdateWordRequest {
    /// Supplied fields must not be blank; absent fields are left untouched.
    pub fn validate(self) -> Result<WordPatch, AppError> {
        let word = supplied("word", self.word)?;
        let definition = supplied("definition", self.definition)?;
        Ok(WordPatch { word, definition })
    }
}

impl WordPatch {
    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.definition.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// `page` / `limit` on `GET /words`. Parsed but not applied to the query yet.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        lenient_positive(self.page.as_deref()).unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        lenient_positive(self.limit.as_deref()).unwrap_or(10)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn supplied(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::Invalid(format!("{} must not be empty", field))),
        other => Ok(other),
    }
}

// Leading digits only, so "3abc" reads as 3. Zero counts as unset.
fn lenient_positive(raw: Option<&str>) -> Option<u32> {
    let digits: String = raw?.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_both_fields() {
        let ok = CreateWordRequest {
            word: Some("foo".into()),
            definition: Some("bar".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok, NewWord { word: "foo".into(), definition: "bar".into() });

        for req in [
            CreateWordRequest::default(),
            CreateWordRequest { word: Some("foo".into()), definition: None },
            CreateWordRequest { word: Some("  ".into()), definition: Some("bar".into()) },
        ] {
            let err = req.validate().unwrap_err();
            assert_eq!(err.to_string(), "Word and definition required");
        }
    }

    #[test]
    fn patch_rejects_blank_supplied_fields() {
        let patch = UpdateWordRequest { word: None, definition: Some("new".into()) }
            .validate()
            .unwrap();
        assert_eq!(patch.definition.as_deref(), Some("new"));
        assert!(patch.word.is_none());

        let err = UpdateWordRequest { word: Some("".into()), definition: None }
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));

        assert!(UpdateWordRequest::default().validate().unwrap().is_empty());
    }

    #[test]
    fn pagination_parses_leniently() {
        let q = ListQuery { page: Some("3abc".into()), limit: Some("0".into()) };
        assert_eq!(q.page(), 3);
        assert_eq!(q.limit(), 10);

        let q = ListQuery::default();
        assert_eq!((q.page(), q.limit()), (1, 10));

        let q = ListQuery { page: Some("-2".into()), limit: Some("25".into()) };
        assert_eq!((q.page(), q.limit()), (1, 25));
    }
}
