//! Greeting and help handlers
//!
//! Handles: start, help

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::CommandInvocation;

const HELP_TEXT: &str = "📌 Commands:
- /note <text> → add a note
- /notes → list notes
- /alert YYYY-MM-DD <message> → register a reminder
- /alerts → list reminders
- /done <milestone> → mark a milestone complete (+10 pts)
- /progress → milestone progress
- /leaderboard → team points";

pub struct UtilityHandler;

#[async_trait]
impl ChatCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "help"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        match invocation.name.as_str() {
            "start" => Ok("👋 Hi! I keep track of your team's notes, reminders, milestones and points.\nUse /help to see the commands.".to_string()),
            _ => Ok(HELP_TEXT.to_string()),
        }
    }
}
