use std::env;

use academy_core::model::{ModuleId, ModuleProgress};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::error::ClientError;

/// One call per progress operation; implementations do no caching.
#[async_trait]
pub trait ProgressTransport: Send + Sync {
    async fn get_all_module_progress(&self) -> Result<Vec<ModuleProgress>, ClientError>;

    async fn is_module_complete(&self, id: &ModuleId) -> Result<bool, ClientError>;

    async fn mark_module_complete(&self, id: &ModuleId) -> Result<(), ClientError>;

    async fn reset_module(&self, id: &ModuleId) -> Result<(), ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    pub base_url: String,
}

impl HttpTransportConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:7878";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `ACADEMY_API_URL`, falling back to the local default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("ACADEMY_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }
}

/// JSON-over-HTTP transport for the progress server's `/api` routes.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: HttpTransportConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(HttpTransportConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProgressTransport for HttpTransport {
    async fn get_all_module_progress(&self) -> Result<Vec<ModuleProgress>, ClientError> {
        let response = self.client.get(self.url("/api/progress")).send().await?;
        let pairs: Vec<(ModuleId, bool)> = check(response).await?.json().await?;
        Ok(pairs.into_iter().map(ModuleProgress::from).collect())
    }

    async fn is_module_complete(&self, id: &ModuleId) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/progress/{id}")))
            .send()
            .await?;
        let completed: bool = check(response).await?.json().await?;
        Ok(completed)
    }

    async fn mark_module_complete(&self, id: &ModuleId) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/api/progress/{id}/complete")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn reset_module(&self, id: &ModuleId) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/api/progress/{id}/reset")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
