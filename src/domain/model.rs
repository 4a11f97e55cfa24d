use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_positive_number, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)?;
        validate_non_empty_string("password", &self.password)
    }
}

/// 註冊與管理員建立使用者共用的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(rename = "roles_id", alias = "rolesId")]
    pub role_id: i64,
}

impl RegistrationRequest {
    pub fn new(credentials: Credentials, role_id: i64) -> Self {
        Self {
            credentials,
            role_id,
        }
    }
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        validate_positive_number("role_id", self.role_id, 1)
    }
}

/// Federation roles as numbered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Master,
    Representative,
    Student,
}

impl Role {
    pub fn id(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Master => 2,
            Role::Representative => 3,
            Role::Student => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "accessToken", alias = "access_token")]
    pub access_token: String,
}

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub ok: bool,
    pub status: u16,
    pub description: String,
}

/// Distinguishes an omitted field (`None`) from an explicit `null` (`Some(None)`)
/// so a record serializes back exactly as the server sent it.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn flatten_str(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|value| value.as_deref())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lastname: Option<Option<String>>,
    pub email: String,
    pub role: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url_image: Option<Option<String>>,
    pub created_at: String,
    pub updated_at: String,
    /// 伺服器額外回傳的欄位，原樣保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn name(&self) -> Option<&str> {
        flatten_str(&self.name)
    }

    pub fn lastname(&self) -> Option<&str> {
        flatten_str(&self.lastname)
    }

    pub fn birthdate(&self) -> Option<&str> {
        flatten_str(&self.birthdate)
    }

    pub fn url_image(&self) -> Option<&str> {
        flatten_str(&self.url_image)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub total_records: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    /// 分頁 envelope 的其他欄位（例如 hasNextPage），原樣保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Caller-side record of a login, persisted by a `TokenStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub email: Option<String>,
    pub stored_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(token: &AuthToken, email: Option<String>) -> Self {
        Self {
            access_token: token.access_token.clone(),
            email,
            stored_at: Utc::now(),
        }
    }
}

/// Decodes a success body into its schema; any mismatch is a contract violation.
pub fn decode_body<T: serde::de::DeserializeOwned>(what: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::contract(format!("unexpected {} response: {}", what, e)))
}
