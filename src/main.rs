use clap::Parser;
use federation_client::app::commands::{exit_code, CommandRunner};
use federation_client::utils::{logger, validation::Validate};
use federation_client::{cancel_pair, ApiClient, CliConfig, FileTokenStore};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting federation-client");

    let settings = match config.validate().and_then(|_| config.resolve()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // Ctrl-C 取消進行中的請求
    let (cancel_handle, cancel_signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_handle.cancel();
        }
    });

    let client = match ApiClient::from_config(&settings.client) {
        Ok(client) => client.with_cancel_signal(cancel_signal),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };
    let store = FileTokenStore::new(settings.token_file);

    match CommandRunner::new(&client, &store).run(&config.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to render output: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            let normalized = e.normalized();
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Status: {:?})",
                normalized.message,
                e.category(),
                normalized.http_status
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}
