use crate::error::ErrorBody;
use crate::models::{ListingStatus, NewProperty, Property, PropertyId, PropertyUpdate};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:7000/api";

/// Failure of a client-side catalog action
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message} (status {status}, {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("{0}")]
    Form(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Deserialize)]
struct Message {
    message: String,
}

/// HTTP client for the catalog REST API
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client against `base_url`, e.g. `http://localhost:7000/api`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("property-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn properties_url(&self) -> String {
        format!("{}/properties", self.base_url)
    }

    fn property_url(&self, id: &PropertyId) -> String {
        format!("{}/properties/{}", self.base_url, id)
    }

    /// Liveness message of the API root
    pub async fn health(&self) -> ClientResult<String> {
        let response = self.client.get(&self.base_url).send().await?;
        let body: Message = check(response).await?.json().await?;
        Ok(body.message)
    }

    /// Fetch every listing, newest first
    pub async fn list(&self) -> ClientResult<Vec<Property>> {
        let url = self.properties_url();
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let properties: Vec<Property> = check(response).await?.json().await?;
        debug!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    pub async fn create(&self, new: &NewProperty) -> ClientResult<Property> {
        let response = self
            .client
            .post(self.properties_url())
            .json(new)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update(&self, id: &PropertyId, update: &PropertyUpdate) -> ClientResult<Property> {
        let response = self
            .client
            .put(self.property_url(id))
            .json(update)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update_status(
        &self,
        id: &PropertyId,
        status: ListingStatus,
    ) -> ClientResult<Property> {
        self.update(id, &PropertyUpdate::status(status)).await
    }

    /// Delete a listing, returning the server's confirmation message
    pub async fn delete(&self, id: &PropertyId) -> ClientResult<String> {
        let response = self.client.delete(self.property_url(id)).send().await?;
        let body: Message = check(response).await?.json().await?;
        Ok(body.message)
    }
}

/// Pass successful responses through; turn the rest into `ClientError::Api`
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("API returned status: {}", status);
    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => ("UNKNOWN".to_string(), text),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
