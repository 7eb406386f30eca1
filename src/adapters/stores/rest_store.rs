use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::{ActivityDraft, ActivityRecord};
use crate::core::traits::activity_store::ActivityStore;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote store speaking the PostgREST dialect used by hosted
/// Postgres services (Supabase and friends).
///
/// Rows live in one table; the service assigns ids. Requests carry the
/// key both as `apikey` and as a bearer token.
pub struct RestStore {
    base_url: String,
    table: String,
    api_key: String,
    timeout: Duration,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the table endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("actman/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ActivityError::connection(format!("failed to create HTTP client: {e}")))
    }

    fn request(&self, client: &reqwest::Client, method: Method) -> RequestBuilder {
        client
            .request(method, self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Drive one async request to completion on a private runtime.
    fn block_on<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ActivityError::connection(format!("failed to create async runtime: {e}")))?;
        rt.block_on(fut)
    }

    fn transport_error(&self, e: reqwest::Error) -> ActivityError {
        if e.is_timeout() {
            ActivityError::connection(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            ActivityError::connection(format!("request to {} failed: {e}", self.endpoint()))
        }
    }

    async fn rows(&self, resp: Response, kind: RequestKind) -> Result<Vec<ActivityRow>> {
        let resp = check_status(resp, kind).await?;
        resp.json()
            .await
            .map_err(|e| ActivityError::connection(format!("unexpected response body: {e}")))
    }
}

/// Whether a request carries an activity payload the service may reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Plain,
    Payload,
}

/// Map non-success HTTP statuses onto the error taxonomy.
async fn check_status(resp: Response, kind: RequestKind) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = service_message(&body).unwrap_or(body);
    Err(status_error(status, kind, &message))
}

/// Only a 4xx answer to a payload rejects the activity itself. Auth
/// failures and a missing table (404) mean the store is unusable.
fn status_error(status: StatusCode, kind: RequestKind, message: &str) -> ActivityError {
    let payload_rejected = kind == RequestKind::Payload
        && status.is_client_error()
        && !matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        );

    if payload_rejected {
        ActivityError::validation(format!(
            "the service rejected the activity ({status}): {message}"
        ))
    } else {
        ActivityError::connection(format!("the service answered {status}: {message}"))
    }
}

/// PostgREST errors are JSON objects with a `message` field.
fn service_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ServiceError {
        message: String,
    }
    serde_json::from_str::<ServiceError>(body)
        .ok()
        .map(|e| e.message)
}

impl ActivityStore for RestStore {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        self.block_on(async {
            let client = self.client()?;
            let resp = self
                .request(&client, Method::GET)
                .query(&[("select", "*"), ("order", "date.desc")])
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            let rows = self.rows(resp, RequestKind::Plain).await?;
            tracing::debug!(count = rows.len(), table = %self.table, "fetched remote rows");
            rows.into_iter().map(ActivityRow::into_record).collect()
        })
    }

    fn insert(&self, record: &ActivityRecord) -> Result<ActivityRecord> {
        let row = ActivityRow::from_draft(&record.to_draft());

        self.block_on(async {
            let client = self.client()?;
            let resp = self
                .request(&client, Method::POST)
                .header("Prefer", "return=representation")
                .json(&row)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            self.rows(resp, RequestKind::Payload)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ActivityError::connection("the service did not return the new row"))?
                .into_record()
        })
    }

    fn replace(&self, id: &str, draft: &ActivityDraft) -> Result<ActivityRecord> {
        let row = ActivityRow::from_draft(draft);
        let id_filter = format!("eq.{id}");

        self.block_on(async {
            let client = self.client()?;
            let resp = self
                .request(&client, Method::PATCH)
                .query(&[("id", id_filter.as_str())])
                .header("Prefer", "return=representation")
                .json(&row)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            // A filter that matched nothing comes back as an empty array.
            self.rows(resp, RequestKind::Payload)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ActivityError::NotFound { id: id.to_string() })?
                .into_record()
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        let id_filter = format!("eq.{id}");

        self.block_on(async {
            let client = self.client()?;
            let resp = self
                .request(&client, Method::DELETE)
                .query(&[("id", id_filter.as_str())])
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            check_status(resp, RequestKind::Plain).await?;
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Row id as the service stores it: text (uuid) or an identity column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Wire shape of the `activities` table.
///
/// Column names are lowercase on the service side (`cardnumber`); this
/// type is the only place that knows about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub date: NaiveDate,
    pub duration: u32,
    pub description: String,
    pub cardnumber: String,
    pub responsible: String,
}

impl ActivityRow {
    /// Outgoing payload for insert or replace. The id is left to the service.
    pub fn from_draft(draft: &ActivityDraft) -> Self {
        Self {
            id: None,
            date: draft.date,
            duration: draft.duration,
            description: draft.description.clone(),
            cardnumber: draft.card_number.clone(),
            responsible: draft.responsible.clone(),
        }
    }

    /// Incoming row to domain record. Rows without an id are rejected.
    pub fn into_record(self) -> Result<ActivityRecord> {
        let id = self
            .id
            .ok_or_else(|| ActivityError::connection("the service returned a row without an id"))?
            .into_string();

        Ok(ActivityRecord {
            id,
            date: self.date,
            duration: self.duration,
            description: self.description,
            card_number: self.cardnumber,
            responsible: self.responsible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ActivityDraft {
        ActivityDraft {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            duration: 15,
            description: "y".into(),
            card_number: "CD-2".into(),
            responsible: "Bob".into(),
        }
    }

    #[test]
    fn outgoing_row_uses_lowercase_column_and_no_id() {
        let json = serde_json::to_value(ActivityRow::from_draft(&draft())).unwrap();
        assert_eq!(json["cardnumber"], "CD-2");
        assert_eq!(json["date"], "2024-01-02");
        assert!(json.get("id").is_none());
        assert!(json.get("card_number").is_none());
    }

    #[test]
    fn incoming_row_with_numeric_id() {
        let row: ActivityRow = serde_json::from_str(
            r#"{"id": 42, "date": "2024-01-02", "duration": 15,
                "description": "y", "cardnumber": "CD-2", "responsible": "Bob",
                "created_at": "2024-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        let record = row.into_record().unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.card_number, "CD-2");
        assert_eq!(record.to_draft(), draft());
    }

    #[test]
    fn incoming_row_with_uuid_id() {
        let row: ActivityRow = serde_json::from_str(
            r#"{"id": "2f1c0b7e-4d1a-4b7a-9a57-0c7f0f4c1e11", "date": "2024-01-02",
                "duration": 15, "description": "y", "cardnumber": "CD-2",
                "responsible": "Bob"}"#,
        )
        .unwrap();
        assert_eq!(
            row.into_record().unwrap().id,
            "2f1c0b7e-4d1a-4b7a-9a57-0c7f0f4c1e11"
        );
    }

    #[test]
    fn row_without_id_is_rejected() {
        let row = ActivityRow::from_draft(&draft());
        assert!(matches!(
            row.into_record(),
            Err(ActivityError::Connection { .. })
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let store = RestStore::new("https://example.supabase.co/", "activities", "k");
        assert_eq!(
            store.endpoint(),
            "https://example.supabase.co/rest/v1/activities"
        );
    }

    #[test]
    fn service_message_extracts_postgrest_error() {
        let body = r#"{"code":"23502","message":"null value in column \"date\""}"#;
        assert_eq!(
            service_message(body).as_deref(),
            Some("null value in column \"date\"")
        );
        assert!(service_message("plain text").is_none());
    }

    #[test]
    fn payload_rejections_are_validation_errors() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::CONFLICT] {
            assert!(matches!(
                status_error(status, RequestKind::Payload, "bad row"),
                ActivityError::Validation { .. }
            ));
        }
    }

    #[test]
    fn auth_and_missing_table_are_connection_errors_on_payloads() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(matches!(
                status_error(status, RequestKind::Payload, "nope"),
                ActivityError::Connection { .. }
            ));
        }
    }

    #[test]
    fn plain_request_failures_are_always_connection_errors() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = status_error(status, RequestKind::Plain, "relation does not exist");
            assert!(matches!(err, ActivityError::Connection { .. }));
            assert!(err.to_string().contains("relation does not exist"));
        }
    }

    #[test]
    fn unreachable_service_is_a_connection_error() {
        let store = RestStore::new("http://127.0.0.1:9", "activities", "k")
            .with_timeout(Duration::from_secs(2));
        assert!(matches!(
            store.fetch_all(),
            Err(ActivityError::Connection { .. })
        ));
    }
}
