//! HTTP client for the outreach backend.
//!
//! `GET /api/states` and `GET /api/volunteer-queue` are JSON routes the Flask
//! app does not serve yet; it renders both lists into its own templates. The
//! backend has to expose them before the registration state list and the
//! volunteer queue page can load.

use anyhow::Context;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{ChartSeries, DashboardPayload, EscalatedCase, PublicStats, RegionOption};
use crate::services::chat::{ChatReply, ChatRequest, ChatTransport};
use crate::services::dashboard::DashboardSource;
use crate::services::filters::FilterState;
use crate::services::location::LocationSource;

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed client for the outreach backend.
#[derive(Clone)]
pub struct OutreachClient {
    inner: reqwest::Client,
    base_url: String,
}

impl OutreachClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let base_url = resolve_base_url(&config.api_base_url);

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let client = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            base_url,
        })
    }

    pub async fn get_dashboard_data(&self, filter: &FilterState) -> ClientResult<DashboardPayload> {
        let mut builder = self.request(Method::GET, "dashboard-data");
        if !filter.is_empty() {
            builder = builder.query(&filter.query_pairs());
        }
        self.send(builder).await
    }

    pub async fn get_histogram_data(&self, filter: &FilterState) -> ClientResult<ChartSeries> {
        let builder = self
            .request(Method::GET, "histogram-data")
            .query(&filter.query_pairs());
        self.send(builder).await
    }

    pub async fn get_states(&self) -> ClientResult<Vec<RegionOption>> {
        let builder = self.request(Method::GET, "api/states");
        self.send(builder).await
    }

    pub async fn get_lgas(&self, state_id: &str) -> ClientResult<Vec<RegionOption>> {
        let path = format!("api/lgas/{}", state_id.trim());
        let builder = self.request(Method::GET, &path);
        self.send(builder).await
    }

    pub async fn get_public_stats(&self) -> ClientResult<PublicStats> {
        let builder = self.request(Method::GET, "api/public-stats");
        self.send(builder).await
    }

    pub async fn get_volunteer_queue(&self) -> ClientResult<Vec<EscalatedCase>> {
        let builder = self.request(Method::GET, "api/volunteer-queue");
        self.send(builder).await
    }

    pub async fn post_chatbot<TReq>(&self, payload: &TReq) -> ClientResult<ChatReply>
    where
        TReq: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, "chatbot").json(payload);
        self.send(builder).await
    }

    /// Path for plain form submissions, which the browser performs itself.
    pub fn form_action(&self, path: &str) -> String {
        self.join_path(path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.join_path(path);
        self.inner
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                body: bytes.to_vec(),
            });
        }

        if bytes.is_empty() {
            return Err(ClientError::EmptyResponse(status));
        }

        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }
}

impl LocationSource for OutreachClient {
    type Error = ClientError;

    async fn sub_regions(&self, region_id: &str) -> ClientResult<Vec<RegionOption>> {
        self.get_lgas(region_id).await
    }
}

impl DashboardSource for OutreachClient {
    type Error = ClientError;

    async fn dashboard_data(&self, filter: &FilterState) -> ClientResult<DashboardPayload> {
        self.get_dashboard_data(filter).await
    }

    async fn histogram_data(&self, filter: &FilterState) -> ClientResult<ChartSeries> {
        self.get_histogram_data(filter).await
    }
}

impl ChatTransport for OutreachClient {
    type Error = ClientError;

    async fn ask(&self, request: &ChatRequest) -> ClientResult<ChatReply> {
        self.post_chatbot(request).await
    }
}

/// An empty base means "same origin as the page".
fn resolve_base_url(input: &str) -> String {
    let trimmed = normalize_base_url(input);
    if !trimmed.is_empty() {
        return trimmed;
    }
    page_origin().unwrap_or_else(|| FALLBACK_ORIGIN.to_string())
}

fn normalize_base_url(input: &str) -> String {
    input.trim().trim_end_matches('/').to_string()
}

const FALLBACK_ORIGIN: &str = "http://localhost:5000";

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("client setup error: {0}")]
    Setup(#[from] anyhow::Error),
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("unexpected status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::EmptyResponse(status) => Some(*status),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(normalize_base_url("https://api.example.org/"), "https://api.example.org");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn empty_base_falls_back_to_local_origin() {
        let client = OutreachClient::new(AppConfig::default()).unwrap();
        assert_eq!(client.join_path("api/lgas/7"), "http://localhost:5000/api/lgas/7");
        assert_eq!(
            client.form_action("/complete-case/42"),
            "http://localhost:5000/complete-case/42"
        );
    }

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = ClientError::UnexpectedStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: br#"{"error":"boom"}"#.to_vec(),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("boom"));
    }
}
