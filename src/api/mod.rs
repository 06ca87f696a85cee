//! Thin typed client over the exam server's REST surface.
//!
//! Every helper sends one request and maps the outcome onto the error
//! taxonomy: non-success statuses become conflict errors carrying the
//! server's message verbatim, connection failures become transport errors.
//! Nothing here retries.

mod calendar;
mod reservations;
mod rooms;

pub use calendar::SlotQuery;
pub use reservations::{ReservationRequest, ReservationTarget};
pub use rooms::{ExceptionUpdate, WeekdayBlocks, WireBlock, WorkingHoursUpdate};

use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub(crate) async fn get_json_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::checked(response).await.map(drop)
    }

    pub(crate) async fn put_json_returning<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::checked(response).await.map(drop)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.http.delete(self.url(path)).send().await?;
        Self::checked(response).await.map(drop)
    }

    /// Pass successful responses through; turn anything else into a
    /// conflict error carrying the server's message verbatim.
    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        if message.trim().is_empty() {
            Err(Error::conflict(status.to_string()))
        } else {
            Err(Error::Conflict(message))
        }
    }
}
