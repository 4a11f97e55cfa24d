pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{
    http::ReqwestTransport,
    token_store::{FileTokenStore, MemoryTokenStore},
};
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use crate::core::{
    cancel::{cancel_pair, CancelHandle, CancelSignal},
    client::ApiClient,
};
pub use domain::model::{
    AuthToken, CreateUserResponse, Credentials, PagedResult, RegistrationRequest, Role,
    StoredSession, UserRecord,
};
pub use utils::error::{ApiError, NormalizedError, Result};
