//! Milestone and leaderboard command handlers
//!
//! Handles: done, progress, leaderboard

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::CommandInvocation;
use crate::core::error::StateError;
use crate::core::response::{format_leaderboard, format_progress};
use crate::store::MILESTONE_AWARD_POINTS;

/// Handler for milestone completion, progress, and the points leaderboard
pub struct MilestoneHandler;

#[async_trait]
impl ChatCommandHandler for MilestoneHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["done", "progress", "leaderboard"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        match invocation.name.as_str() {
            "done" => self.handle_done(&ctx, invocation).await,
            "progress" => self.handle_progress(&ctx).await,
            _ => self.handle_leaderboard(&ctx).await,
        }
    }
}

impl MilestoneHandler {
    /// /done <key> - mark a milestone complete, crediting the sender
    async fn handle_done(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        // the milestone key is a single token; anything after it is ignored
        let key = invocation.args.first().cloned().unwrap_or_default();
        let actor = invocation.sender.clone();

        match ctx
            .store
            .with_exclusive_access(|s| s.complete_milestone(&key, &actor))
            .await
        {
            Ok(outcome) if outcome.awarded => Ok(format!(
                "✅ {} marked complete, +{MILESTONE_AWARD_POINTS} pts for {actor}",
                key.trim().to_lowercase()
            )),
            Ok(_) => Ok(format!(
                "✅ {} was already complete, no points awarded",
                key.trim().to_lowercase()
            )),
            Err(StateError::InvalidArgument(_)) => Ok("❌ Usage: /done <milestone>".to_string()),
            Err(e) => Err(e.into()),
        }
    }

    /// /progress - completed count against the fixed plan total
    async fn handle_progress(&self, ctx: &CommandContext) -> Result<String> {
        let plan_size = ctx.milestone_plan_size;
        let (completed, total) = ctx.store.read(|s| s.compute_progress(plan_size)).await;
        Ok(format!("📊 Progress: {}", format_progress(completed, total)))
    }

    /// /leaderboard - scores ranked descending, stable on ties
    async fn handle_leaderboard(&self, ctx: &CommandContext) -> Result<String> {
        let ranked = ctx.store.read(|s| s.leaderboard_snapshot()).await;

        if ranked.is_empty() {
            return Ok("📭 No points yet. Complete a milestone with /done <milestone>.".to_string());
        }
        Ok(format!("🏆 Leaderboard:\n{}", format_leaderboard(&ranked)))
    }
}
