use memolookup_core::{Error, Record, RecordSet, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use crate::config::ClientConfig;

const REST_PATH: &str = "rest/v1";

/// Query parameter names the tables API interprets itself; a column filter
/// under one of these names would collide with them.
const RESERVED_PARAMS: &[&str] = &["select", "limit", "offset", "order", "or", "and", "not", "on_conflict", "columns"];

/// Error body returned by the tables API on a rejected query.
#[derive(Deserialize)]
struct BackendError {
    message: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Read-only client for a hosted tables API.
///
/// Holds no state between calls beyond the connection pool. Cloning is cheap
/// and clones share the pool, so independent lookups can run side by side.
#[derive(Clone, Debug)]
pub struct RemoteRecordClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteRecordClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut key = HeaderValue::from_str(config.credential.trim())
            .map_err(|e| Error::InvalidConfig(format!("access credential is not a valid header: {}", e)))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.credential.trim()))
            .map_err(|e| Error::InvalidConfig(format!("access credential is not a valid header: {}", e)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    /// Fetch every row and column of a collection. An empty collection is not an error.
    pub async fn fetch_all(&self, collection: &str) -> Result<RecordSet> {
        let operation = format!("fetch_all({})", collection);
        check_identifier(&operation, "collection", collection)?;

        let rows = self
            .get_rows(&operation, collection, &[("select", "*".to_string())])
            .await?;
        info!("Fetched {} row(s) from {}", rows.len(), collection);
        Ok(rows)
    }

    /// Fetch exactly one row where `filter_field` equals `filter_value`,
    /// optionally embedding the row of a related collection.
    ///
    /// Zero rows is [`Error::NotFound`]; more than one is [`Error::Ambiguous`].
    pub async fn fetch_one(
        &self,
        collection: &str,
        filter_field: &str,
        filter_value: &str,
        related: Option<&str>,
    ) -> Result<Record> {
        let operation = format!("fetch_one({})", collection);
        check_identifier(&operation, "collection", collection)?;
        check_identifier(&operation, "filter field", filter_field)?;
        check_not_reserved(&operation, filter_field)?;
        if let Some(related) = related {
            check_identifier(&operation, "related collection", related)?;
        }

        let select = match related {
            Some(related) => format!("*,{}(*)", related),
            None => "*".to_string(),
        };
        // Two rows are enough to detect a uniqueness violation.
        let query = [
            ("select", select),
            (filter_field, format!("eq.{}", filter_value)),
            ("limit", "2".to_string()),
        ];

        let mut rows = self.get_rows(&operation, collection, &query).await?;
        match rows.len() {
            0 => Err(Error::NotFound {
                collection: collection.to_string(),
                field: filter_field.to_string(),
                value: filter_value.to_string(),
            }),
            1 => {
                info!("Found {} row where {} = {}", collection, filter_field, filter_value);
                Ok(rows.remove(0))
            }
            _ => Err(Error::Ambiguous {
                collection: collection.to_string(),
                field: filter_field.to_string(),
                value: filter_value.to_string(),
            }),
        }
    }

    /// Sorted union of the field names present across all rows of a collection.
    pub async fn describe(&self, collection: &str) -> Result<Vec<String>> {
        let rows = self.fetch_all(collection).await?;
        let fields: BTreeSet<&str> = rows.iter().flat_map(Record::field_names).collect();
        Ok(fields.into_iter().map(str::to_string).collect())
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, collection)
    }

    async fn get_rows(
        &self,
        operation: &str,
        collection: &str,
        query: &[(&str, String)],
    ) -> Result<RecordSet> {
        let url = self.collection_url(collection);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::connection(operation, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::connection(operation, e))?;

        if !status.is_success() {
            warn!("{} returned HTTP {}", operation, status);
            return Err(Error::query(
                operation,
                Some(status.as_u16()),
                backend_message(&body, status),
            ));
        }

        parse_rows(operation, &body)
    }
}

fn check_identifier(operation: &str, what: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::query(operation, None, format!("invalid {} name '{}'", what, name)))
    }
}

fn check_not_reserved(operation: &str, filter_field: &str) -> Result<()> {
    if RESERVED_PARAMS.contains(&filter_field) {
        return Err(Error::query(
            operation,
            None,
            format!("filter field '{}' is a reserved query parameter", filter_field),
        ));
    }
    Ok(())
}

fn backend_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(BackendError { message: Some(message), hint }) = serde_json::from_str::<BackendError>(body) {
        return match hint {
            Some(hint) => format!("{} (hint: {})", message, hint),
            None => message,
        };
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn parse_rows(operation: &str, body: &str) -> Result<RecordSet> {
    let values: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| Error::query(operation, None, format!("response is not a JSON array: {}", e)))?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            Record::from_value(value)
                .ok_or_else(|| Error::query(operation, None, format!("row {} is not an object", i)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_check() {
        assert!(check_identifier("op", "collection", "Memorial").is_ok());
        assert!(check_identifier("op", "field", "stripe_payment_id").is_ok());
        assert!(check_identifier("op", "collection", "").is_err());
        assert!(check_identifier("op", "collection", "1abc").is_err());
        assert!(check_identifier("op", "collection", "Memorial?select=*").is_err());
    }

    #[test]
    fn test_reserved_filter_fields_rejected() {
        for name in ["select", "limit", "offset", "order", "or", "and", "not"] {
            assert!(check_identifier("op", "filter field", name).is_ok());
            assert!(matches!(
                check_not_reserved("op", name),
                Err(Error::Query { status: None, .. })
            ));
        }
        assert!(check_not_reserved("op", "order_number").is_ok());
        assert!(check_not_reserved("op", "ordered").is_ok());
    }

    #[test]
    fn test_backend_message_prefers_json_message() {
        let body = r#"{"code":"42P01","message":"relation does not exist","hint":null}"#;
        assert_eq!(
            backend_message(body, reqwest::StatusCode::NOT_FOUND),
            "relation does not exist"
        );
        assert_eq!(
            backend_message("", reqwest::StatusCode::UNAUTHORIZED),
            "Unauthorized"
        );
        assert_eq!(
            backend_message("gateway down", reqwest::StatusCode::BAD_GATEWAY),
            "gateway down"
        );
    }

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows("op", r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(matches!(parse_rows("op", r#"{"id":"a"}"#), Err(Error::Query { .. })));
        assert!(matches!(parse_rows("op", r#"[{"id":"a"}, 3]"#), Err(Error::Query { .. })));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(RemoteRecordClient::new(ClientConfig::new("localhost", "key")).is_err());
        assert!(RemoteRecordClient::new(ClientConfig::new("http://localhost", "bad\nkey")).is_err());
    }
}
