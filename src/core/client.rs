use crate::adapters::http::ReqwestTransport;
use crate::core::cancel::CancelSignal;
use crate::core::normalize::normalize_error_response;
use crate::domain::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::domain::model::{
    decode_body, AuthToken, CreateUserResponse, Credentials, PagedResult, RegistrationRequest,
    UserRecord,
};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_base_url, validate_positive_number, Validate};

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "User registration successful.";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Typed client for the federation REST API.
///
/// Holds the injected base URL and a transport; no token, no cache. Each
/// operation performs at most one request and yields either its typed value
/// or a single `ApiError`.
pub struct ApiClient<T: Transport> {
    base_url: Option<String>,
    transport: T,
    cancel: Option<CancelSignal>,
}

impl ApiClient<ReqwestTransport> {
    /// Builds the reqwest transport; a zero timeout or a base URL carrying a
    /// query string or fragment is rejected up front.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        if config.timeout().is_zero() {
            return Err(ApiError::Validation {
                field: "timeout_seconds".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        if let Some(url) = config.base_url().filter(|url| !url.trim().is_empty()) {
            validate_base_url("base_url", url.trim())?;
        }
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new<C: ConfigProvider>(config: &C, transport: T) -> Self {
        Self {
            base_url: config
                .base_url()
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            transport,
            cancel: None,
        }
    }

    pub fn with_cancel_signal(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        match &self.base_url {
            Some(base) if base.contains(['?', '#']) => Err(ApiError::Configuration {
                message: format!("base URL {} must not carry a query string or fragment", base),
            }),
            Some(base) => Ok(format!("{}{}", base, path)),
            None => Err(ApiError::configuration_missing()),
        }
    }

    fn require_token(token: &str) -> Result<&str> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::missing_token());
        }
        Ok(token)
    }

    /// 送出請求；非 2xx 一律經過共用的錯誤正規化
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!("📡 {} {}", request.method.as_str(), request.url);

        if self.cancel.as_ref().is_some_and(CancelSignal::is_cancelled) {
            return Err(ApiError::Cancelled);
        }

        let response = match &self.cancel {
            Some(signal) => {
                let mut signal = signal.clone();
                tokio::select! {
                    biased;
                    _ = signal.cancelled() => {
                        tracing::debug!("📡 Request to {} cancelled", request.url);
                        return Err(ApiError::Cancelled);
                    }
                    result = self.transport.send(request.clone()) => result?,
                }
            }
            None => self.transport.send(request.clone()).await?,
        };

        tracing::debug!("📡 {} responded with {}", request.url, response.status);

        if response.is_success() {
            return Ok(response);
        }

        let error = normalize_error_response(&response);
        tracing::warn!(
            "⚠️ {} {} failed with HTTP {}: {}",
            request.method.as_str(),
            request.url,
            response.status,
            error
        );
        Err(error)
    }

    /// POST /auth/login. The returned token is not stored anywhere.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken> {
        let url = self.endpoint("/auth/login")?;
        credentials.validate()?;

        let request =
            HttpRequest::new(HttpMethod::Post, url).json_body(serde_json::to_value(credentials)?);
        let response = self.execute(request).await?;

        let token: AuthToken = decode_body("login", &response.body)?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::contract("login response carried an empty access token"));
        }
        Ok(token)
    }

    /// POST /auth/signup. The response body is ignored.
    pub async fn register(&self, registration: &RegistrationRequest) -> Result<String> {
        let url = self.endpoint("/auth/signup")?;
        registration.validate()?;

        let request =
            HttpRequest::new(HttpMethod::Post, url).json_body(serde_json::to_value(registration)?);
        self.execute(request).await?;

        Ok(REGISTRATION_SUCCESS_MESSAGE.to_string())
    }

    /// POST /auth/create-user-protected. Expect 401 for a bad token and 403
    /// when the caller is not an administrator.
    pub async fn create_user_as_admin(
        &self,
        registration: &RegistrationRequest,
        token: &str,
    ) -> Result<CreateUserResponse> {
        let url = self.endpoint("/auth/create-user-protected")?;
        let token = Self::require_token(token)?;
        registration.validate()?;

        let request = HttpRequest::new(HttpMethod::Post, url)
            .bearer(token)
            .json_body(serde_json::to_value(registration)?);
        let response = self.execute(request).await?;

        decode_body("create-user", &response.body)
    }

    pub async fn list_users(&self, token: &str) -> Result<PagedResult<UserRecord>> {
        self.list_users_paged(token, DEFAULT_PAGE, DEFAULT_PAGE_SIZE).await
    }

    /// GET /users?page=&limit=. The envelope is returned exactly as sent.
    pub async fn list_users_paged(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<UserRecord>> {
        let url = self.endpoint("/users")?;
        let token = Self::require_token(token)?;
        validate_positive_number("page", i64::from(page), 1)?;
        validate_positive_number("limit", i64::from(page_size), 1)?;

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer(token)
            .query_param("page", page)
            .query_param("limit", page_size);
        let response = self.execute(request).await?;

        decode_body("user list", &response.body)
    }

    /// GET /users/{id}
    pub async fn get_user_detail(&self, token: &str, user_id: i64) -> Result<UserRecord> {
        let url = self.endpoint(&format!("/users/{}", user_id))?;
        let token = Self::require_token(token)?;
        validate_positive_number("user_id", user_id, 1)?;

        let request = HttpRequest::new(HttpMethod::Get, url).bearer(token);
        let response = self.execute(request).await?;

        decode_body("user detail", &response.body)
    }
}
