use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted short link pointing at a stored object's signed URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareRecord {
    pub id: i64,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Record as handed to the mapping store, before it has an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShareRecord {
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl NewShareRecord {
    /// Stamp a record with the current time
    pub fn now(original_url: impl Into<String>, short_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            short_url: short_url.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_document_field_names() {
        let record = ShareRecord {
            id: 7,
            original_url: "https://bucket.example/files/image-1.png?sig=abc".to_string(),
            short_url: "http://localhost:8000/api/get-file/ABC1D".to_string(),
            created_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["originalURL"], record.original_url);
        assert_eq!(json["shortURL"], record.short_url);
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    }

    #[test]
    fn new_record_is_stamped_in_milliseconds() {
        let before = chrono::Utc::now().timestamp_millis();
        let record = NewShareRecord::now("https://a", "http://b/XYZ1Q");
        let after = chrono::Utc::now().timestamp_millis();

        assert!(record.created_at >= before && record.created_at <= after);
    }
}
