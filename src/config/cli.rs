use crate::adapters::token_store::FileTokenStore;
use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::model::Role;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_base_url, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "federation-client")]
#[command(about = "Command-line client for the federation administration API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "API base URL (overrides env and config file)")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Where the login session is stored")]
    pub token_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Create an account through the public signup endpoint
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value_t = Role::Admin)]
        role: Role,
    },
    /// Protected user operations
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, help = "Bearer token; defaults to the stored session")]
        token: Option<String>,
    },
    Get {
        id: i64,
        #[arg(long, help = "Bearer token; defaults to the stored session")]
        token: Option<String>,
    },
    /// Create a user as an administrator
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum)]
        role: Role,
        #[arg(long, help = "Bearer token; defaults to the stored session")]
        token: Option<String>,
    },
}

/// Everything the binary needs after merging env, config file and flags.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub client: ClientConfig,
    pub token_file: PathBuf,
}

impl CliConfig {
    /// 優先順序：命令列 > 設定檔 > 環境變數
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let mut client = ClientConfig::from_env()?;
        let mut token_file = None;

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            client = file_config.apply_to(client);
            token_file = file_config.token_file().map(PathBuf::from);
        }

        client = client.merge(self.base_url.clone(), self.timeout);
        client.validate()?;

        Ok(ResolvedSettings {
            client,
            token_file: self
                .token_file
                .clone()
                .or(token_file)
                .unwrap_or_else(FileTokenStore::default_path),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            validate_base_url("--base-url", url)?;
        }
        if self.timeout == Some(0) {
            return Err(ApiError::Validation {
                field: "--timeout".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
