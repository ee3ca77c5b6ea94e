use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::PickerError;
use crate::models::{SeasonDetails, ShowDetails, ShowId};
use crate::settings::{Settings, SETTINGS};

/// Source of show and season metadata.
///
/// Futures are `'static` so callers can hold them across UI events without
/// borrowing the provider.
pub trait MetadataProvider: Send + Sync {
    fn fetch_show(&self, show_id: ShowId) -> BoxFuture<'static, Result<ShowDetails, PickerError>>;

    fn fetch_season(
        &self,
        show_id: ShowId,
        season_number: i64,
    ) -> BoxFuture<'static, Result<SeasonDetails, PickerError>>;
}

/// TMDB v3 client backed by a shared reqwest client.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    auth_token: String,
    language: String,
}

impl TmdbClient {
    /// Build a client from the global settings.
    pub fn from_settings() -> Result<Self, PickerError> {
        Self::with_settings(&SETTINGS)
    }

    pub fn with_settings(settings: &Settings) -> Result<Self, PickerError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.request_timeout)
            .build()?;
        Ok(Self::new(
            Arc::new(client),
            &settings.metadata_base_url,
            &settings.metadata_auth_token,
            &settings.metadata_language,
        ))
    }

    /// Use a custom reqwest client for connection reuse and shared configuration.
    pub fn new(client: Arc<Client>, base_url: &str, auth_token: &str, language: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.to_string(),
            language: language.to_string(),
        }
    }

    pub fn show_url(&self, show_id: ShowId) -> String {
        format!("{}/tv/{}", self.base_url, show_id)
    }

    pub fn season_url(&self, show_id: ShowId, season_number: i64) -> String {
        format!("{}/tv/{}/season/{}", self.base_url, show_id, season_number)
    }

    fn get_json<T>(&self, url: String) -> BoxFuture<'static, Result<T, PickerError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let token = self.auth_token.clone();
        let language = self.language.clone();
        async move {
            debug!(%url, "Requesting metadata");
            let response = client
                .get(&url)
                .query(&[("language", language.as_str())])
                .header("accept", "application/json")
                .bearer_auth(&token)
                .send()
                .await?;

            match response.status() {
                StatusCode::UNAUTHORIZED => {
                    error!(%url, "Metadata provider rejected the auth token");
                    return Err(PickerError::Unauthorized);
                }
                StatusCode::NOT_FOUND => {
                    warn!(%url, "Metadata not found");
                    return Err(PickerError::NotFound(url));
                }
                status if !status.is_success() => {
                    let body_text = response.text().await.unwrap_or_default();
                    let error_msg = format!("{} returned {}: {}", url, status, body_text);
                    error!("{}", error_msg);
                    return Err(PickerError::InvalidResponse(error_msg));
                }
                _ => {}
            }

            let body = response.bytes().await?;
            let parsed = serde_json::from_slice::<T>(&body)?;
            Ok(parsed)
        }
        .boxed()
    }
}

impl MetadataProvider for TmdbClient {
    fn fetch_show(&self, show_id: ShowId) -> BoxFuture<'static, Result<ShowDetails, PickerError>> {
        self.get_json(self.show_url(show_id))
    }

    fn fetch_season(
        &self,
        show_id: ShowId,
        season_number: i64,
    ) -> BoxFuture<'static, Result<SeasonDetails, PickerError>> {
        self.get_json(self.season_url(show_id, season_number))
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish()
    }
}
