use crate::config::cli::{Command, UsersCommand};
use crate::core::client::ApiClient;
use crate::domain::model::{Credentials, RegistrationRequest, Role, StoredSession};
use crate::domain::ports::{TokenStore, Transport};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::validate_min_length;
use serde_json::{json, Value};

pub const REGISTER_MIN_PASSWORD: usize = 6;
pub const ADMIN_CREATE_MIN_PASSWORD: usize = 8;

/// Runs one CLI command against the API. The session store is owned here,
/// never by the client.
pub struct CommandRunner<'a, T: Transport, S: TokenStore> {
    client: &'a ApiClient<T>,
    store: &'a S,
}

impl<'a, T: Transport, S: TokenStore> CommandRunner<'a, T, S> {
    pub fn new(client: &'a ApiClient<T>, store: &'a S) -> Self {
        Self { client, store }
    }

    pub async fn run(&self, command: &Command) -> Result<Value> {
        let result = self.dispatch(command).await;

        // 401 代表 token 已失效，清除本地 session；登入失敗與既有 session 無關
        if let Err(err) = &result {
            if err.is_unauthenticated() && !matches!(command, Command::Login { .. }) {
                tracing::info!("🔑 Access token rejected, clearing stored session");
                if let Err(clear_err) = self.store.clear() {
                    tracing::warn!("⚠️ Failed to clear stored session: {}", clear_err);
                }
            }
        }

        result
    }

    async fn dispatch(&self, command: &Command) -> Result<Value> {
        match command {
            Command::Login { email, password } => self.login(email, password).await,
            Command::Logout => {
                self.store.clear()?;
                Ok(json!({"message": "Logged out."}))
            }
            Command::Register {
                email,
                password,
                role,
            } => {
                validate_min_length("password", password, REGISTER_MIN_PASSWORD)?;
                let message = self
                    .client
                    .register(&registration(email, password, *role))
                    .await?;
                Ok(json!({ "message": message }))
            }
            Command::Users { command } => self.users(command).await,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let token = self
            .client
            .login(&Credentials::new(email, password))
            .await?;

        self.store
            .save(&StoredSession::new(&token, Some(email.to_string())))?;
        tracing::info!("✅ Logged in as {}", email);

        Ok(serde_json::to_value(&token)?)
    }

    async fn users(&self, command: &UsersCommand) -> Result<Value> {
        match command {
            UsersCommand::List { page, limit, token } => {
                let token = self.token(token.as_deref())?;
                let users = self.client.list_users_paged(&token, *page, *limit).await?;
                tracing::info!(
                    "📋 Page {}/{} with {} of {} users",
                    users.current_page,
                    users.total_pages,
                    users.items.len(),
                    users.total_records
                );
                Ok(serde_json::to_value(&users)?)
            }
            UsersCommand::Get { id, token } => {
                let token = self.token(token.as_deref())?;
                let user = self.client.get_user_detail(&token, *id).await?;
                Ok(serde_json::to_value(&user)?)
            }
            UsersCommand::Create {
                email,
                password,
                role,
                token,
            } => {
                let token = self.token(token.as_deref())?;
                validate_min_length("password", password, ADMIN_CREATE_MIN_PASSWORD)?;
                let created = self
                    .client
                    .create_user_as_admin(&registration(email, password, *role), &token)
                    .await?;
                Ok(serde_json::to_value(&created)?)
            }
        }
    }

    /// 明確傳入的 token 優先，否則使用已儲存的 session；都沒有時回傳空字串交由 client 判斷
    fn token(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit {
            return Ok(token.to_string());
        }
        Ok(self
            .store
            .load()?
            .map(|session| session.access_token)
            .unwrap_or_default())
    }
}

fn registration(email: &str, password: &str, role: Role) -> RegistrationRequest {
    RegistrationRequest::new(Credentials::new(email, password), role.id())
}

/// Maps a failure to the process exit code.
pub fn exit_code(error: &ApiError) -> i32 {
    use crate::utils::error::ErrorCategory;

    match error.category() {
        ErrorCategory::Input => 2,
        ErrorCategory::Authentication | ErrorCategory::Authorization => 3,
        ErrorCategory::Configuration => 4,
        ErrorCategory::Server | ErrorCategory::Transport => 5,
        ErrorCategory::Contract => 6,
        ErrorCategory::Cancelled => 130,
        ErrorCategory::Local => 1,
    }
}
