//! Reminder command handlers
//!
//! Handles: alert, alerts

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::CommandInvocation;
use crate::core::error::StateError;

/// Handler for date-triggered reminder commands
pub struct AlertHandler;

#[async_trait]
impl ChatCommandHandler for AlertHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["alert", "alerts"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        match invocation.name.as_str() {
            "alert" => self.handle_register(&ctx, invocation).await,
            _ => self.handle_list(&ctx).await,
        }
    }
}

impl AlertHandler {
    /// /alert <YYYY-MM-DD> <message> - register a reminder for the issuing
    /// channel
    async fn handle_register(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        if invocation.args.len() < 2 {
            return Ok("❌ Format: /alert YYYY-MM-DD message".to_string());
        }

        let date = invocation.args[0].clone();
        let message = invocation.arg_text(1);
        let destination = invocation.channel.clone();

        match ctx
            .store
            .with_exclusive_access(|s| {
                s.register_reminder(&date, &message, &destination)?;
                Ok(())
            })
            .await
        {
            Ok(()) => Ok(format!("🔔 Alert saved: {date} → {message}")),
            Err(StateError::InvalidArgument(reason)) => Ok(format!("❌ {reason}")),
            Err(e) => Err(e.into()),
        }
    }

    /// /alerts - list registered reminders in insertion order
    async fn handle_list(&self, ctx: &CommandContext) -> Result<String> {
        let reminders = ctx.store.read(|s| s.reminders.clone()).await;

        if reminders.is_empty() {
            return Ok("📭 No alerts registered. Add one with /alert YYYY-MM-DD message.".to_string());
        }

        let lines: Vec<String> = reminders
            .iter()
            .map(|r| {
                let status = if r.delivered { "sent" } else { "pending" };
                format!("• {} → {} ({status})", r.target_date, r.message)
            })
            .collect();
        Ok(format!("🔔 Alerts:\n{}", lines.join("\n")))
    }
}
