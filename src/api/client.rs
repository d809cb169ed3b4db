//! HTTP client for the camera cloud API.
//!
//! Thin typed wrapper over reqwest: bearer-token auth, pagination for the
//! inventory endpoint and deserialization into the records in
//! [`crate::api::models`]. Retries and caching live with the callers.

use crate::api::models::{BakedArchivesResponse, BakedArchive, Camera, CamerasPage, FragmentsResponse, Health};
use crate::libs::analyzer::Fragment;
use crate::libs::config::ApiConfig;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const HEALTH_URL: &str = "/v1/health.json";
const CAMERAS_URL: &str = "/v3/user/cameras.json";
const BAKED_ARCHIVES_URL: &str = "/v1/user/baked_archives.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    #[error("invalid API key: {0}")]
    InvalidKey(String),
}

pub struct CameraClient {
    base_url: String,
    per_page: u32,
    client: Client,
    /// Separate unauthenticated client with a short timeout for health probes.
    health_client: Client,
}

impl CameraClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer token={}", config.api_key);
        let value = HeaderValue::from_str(&auth).map_err(|e| ApiError::InvalidKey(e.to_string()))?;
        headers.insert(AUTHORIZATION, value);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            client: Client::builder().default_headers(headers).timeout(REQUEST_TIMEOUT).build()?,
            health_client: Client::builder().timeout(HEALTH_TIMEOUT).build()?,
        })
    }

    pub async fn get_health(&self) -> Result<Health, ApiError> {
        let url = format!("{}{}", self.base_url, HEALTH_URL);
        let resp = self.health_client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status { status: resp.status(), url });
        }
        Ok(resp.json().await?)
    }

    /// Fetches the full camera inventory, walking pages until `total_pages`.
    pub async fn get_all_cameras(&self) -> Result<Vec<Camera>, ApiError> {
        let mut cameras = Vec::new();
        let mut page: u32 = 1;
        loop {
            let data: CamerasPage = self
                .get(CAMERAS_URL, &[("page", page), ("per_page", self.per_page)])
                .await?;
            cameras.extend(data.cameras);
            if page >= data.total_pages {
                break;
            }
            page += 1;
        }
        tracing::debug!(count = cameras.len(), "fetched camera inventory");
        Ok(cameras)
    }

    /// Recording fragments for one camera over `[since, till]` epoch seconds.
    pub async fn get_camera_fragments(&self, uid: &str, since: i64, till: i64) -> Result<Vec<Fragment>, ApiError> {
        let path = format!("/v1/user/cameras/{}/estore_fragments.json", uid);
        let data: FragmentsResponse = self.get(&path, &[("since", since), ("till", till)]).await?;
        Ok(data.fragments)
    }

    /// One page of baked archive export jobs, newest first.
    pub async fn get_baked_archives(&self, offset: u32, limit: u32) -> Result<Vec<BakedArchive>, ApiError> {
        let params: &[(&str, String)] = &[
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
            ("sort_column", "updated_at".to_string()),
            ("sort_order", "desc".to_string()),
        ];
        let data: BakedArchivesResponse = self.get(BAKED_ARCHIVES_URL, params).await?;
        Ok(data.baked_archives)
    }

    async fn get<T, P>(&self, path: &str, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(params).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status { status: resp.status(), url });
        }
        Ok(resp.json().await?)
    }
}
