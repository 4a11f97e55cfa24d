use crate::domain::http::{HttpRequest, HttpResponse};
use crate::domain::model::StoredSession;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Executes exactly one HTTP round trip. Non-2xx statuses are returned as
/// data, only connection-level failures become errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
}

pub trait TokenStore: Send + Sync {
    fn save(&self, session: &StoredSession) -> Result<()>;
    fn load(&self) -> Result<Option<StoredSession>>;
    fn clear(&self) -> Result<()>;
}
