use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use roster_core::{PendingRow, Record, RecordId};
use roster_logging::{roster_debug, roster_trace, roster_warn};

use crate::{ApiError, ApiErrorKind, DeleteReport};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and optional path prefix of the records API.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait RecordsClient: Send + Sync {
    /// `GET /record/`
    async fn fetch_records(&self) -> Result<Vec<Record>, ApiError>;

    /// `DELETE /record/{id}`; the response body is ignored.
    async fn delete_record(&self, id: &RecordId) -> Result<(), ApiError>;

    /// `POST /record/multi-insert` with the rows as a JSON array.
    async fn insert_records(&self, rows: &[PendingRow]) -> Result<(), ApiError>;
}

/// Deletes `ids` one at a time, each request awaited before the next is sent.
/// Failures are collected, never short-circuit the run.
pub async fn delete_sequentially(client: &dyn RecordsClient, ids: &[RecordId]) -> DeleteReport {
    let mut report = DeleteReport {
        requested: ids.to_vec(),
        failed: Vec::new(),
    };
    for id in ids {
        if let Err(err) = client.delete_record(id).await {
            report.failed.push((id.clone(), err));
        }
    }
    report
}

#[derive(Debug, Clone)]
pub struct ReqwestRecordsClient {
    settings: ClientSettings,
}

impl ReqwestRecordsClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::new(ApiErrorKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    ApiErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    ApiErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RecordsClient for ReqwestRecordsClient {
    async fn fetch_records(&self) -> Result<Vec<Record>, ApiError> {
        let url = self.endpoint(&["record", ""])?;
        roster_trace!("GET {}", url);
        let response = self
            .build_client()?
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;

        let bytes = self.read_body(response).await?;
        let records = decode_records(&bytes)?;
        roster_debug!("Fetched {} records ({} bytes)", records.len(), bytes.len());
        Ok(records)
    }

    async fn delete_record(&self, id: &RecordId) -> Result<(), ApiError> {
        let url = self.endpoint(&["record", id.as_str()])?;
        roster_trace!("DELETE {}", url);
        let response = self
            .build_client()?
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response)?;
        Ok(())
    }

    async fn insert_records(&self, rows: &[PendingRow]) -> Result<(), ApiError> {
        let url = self.endpoint(&["record", "multi-insert"])?;
        let body = serde_json::to_vec(rows)
            .map_err(|err| ApiError::new(ApiErrorKind::Encode, err.to_string()))?;
        roster_trace!("POST {} rows={}", url, rows.len());
        let response = self
            .build_client()?
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response)?;
        Ok(())
    }
}

/// The body must be a JSON array. Items that do not form a [`Record`] are
/// skipped so one bad document does not hide the rest of the list.
fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, ApiError> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))?;
    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<Record>(item) {
            Ok(record) => Some(record),
            Err(err) => {
                roster_warn!("Skipping record at index {}: {}", idx, err);
                None
            }
        })
        .collect();
    if records.len() < total {
        roster_warn!("Kept {} of {} records", records.len(), total);
    }
    Ok(records)
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::new(
            ApiErrorKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
