use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use huddlebot::commands::{default_registry, dispatch, CommandContext, CommandInvocation};
use huddlebot::core::Config;
use huddlebot::features::notifications::{LogNotifier, Notifier, WebhookNotifier};
use huddlebot::features::reminders::ReminderScheduler;
use huddlebot::store::SharedStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting huddlebot...");

    // Missing state is initialized with defaults; a corrupt file is fatal so
    // an operator can inspect it instead of losing the team's data
    let store = SharedStore::load_or_init(&config.data_path).map_err(|e| {
        error!("Could not open state file: {e}");
        anyhow::anyhow!("state load failed: {e}")
    })?;
    info!("State loaded from {}", config.data_path);

    let notifier: Arc<dyn Notifier> = match &config.notify_api_url {
        Some(url) => {
            if config.bot_token.is_empty() {
                warn!("NOTIFY_API_URL is set but BOT_TOKEN is empty");
            }
            info!("Notifications will be posted to the configured webhook");
            Arc::new(WebhookNotifier::new(url.clone(), config.bot_token.clone())?)
        }
        None => {
            info!("No NOTIFY_API_URL configured, notifications will be logged only");
            Arc::new(LogNotifier)
        }
    };

    let scheduler_handle = ReminderScheduler::new(
        store.clone(),
        notifier,
        config.scheduler_period,
    )
    .with_startup_tick(config.startup_tick)
    .spawn();

    let ctx = Arc::new(CommandContext::new(store, config.milestone_plan_size));
    let registry = default_registry();

    // Console shell: a stand-in for the chat transport. Each line is treated
    // as a message from the operator on the "console" channel.
    let sender = std::env::var("OPERATOR_HANDLE").unwrap_or_else(|_| "operator".to_string());
    info!("Ready. Type /help for commands, /quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break, // EOF
                    Err(e) => {
                        error!("Failed to read input: {e}");
                        break;
                    }
                };

                if line.trim() == "/quit" {
                    break;
                }

                let Some(invocation) = CommandInvocation::parse(&line, &sender, "console") else {
                    continue;
                };

                match dispatch(&registry, ctx.clone(), &invocation).await {
                    Ok(reply) => println!("{reply}"),
                    Err(e) => {
                        error!("Command /{} failed: {e}", invocation.name);
                        println!("⚠️ Sorry, something went wrong processing that command.");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
        }
    }

    info!("Shutting down");
    scheduler_handle.shutdown().await;
    Ok(())
}
