//! Note command handlers
//!
//! Handles: note, notes

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::CommandInvocation;
use crate::core::error::StateError;
use crate::core::response::numbered_list;

/// Handler for team note commands
pub struct NoteHandler;

#[async_trait]
impl ChatCommandHandler for NoteHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["note", "notes"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        match invocation.name.as_str() {
            "note" => self.handle_add(&ctx, invocation).await,
            _ => self.handle_list(&ctx).await,
        }
    }
}

impl NoteHandler {
    /// /note <text> - append a note
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        let text = invocation.arg_text(0);

        match ctx
            .store
            .with_exclusive_access(|s| s.add_note(&text))
            .await
        {
            Ok(position) => Ok(format!("📝 Note {position} added: {}", text.trim())),
            Err(StateError::InvalidArgument(_)) => Ok("❌ Usage: /note <text>".to_string()),
            Err(e) => Err(e.into()),
        }
    }

    /// /notes - list all notes, 1-indexed
    async fn handle_list(&self, ctx: &CommandContext) -> Result<String> {
        let notes = ctx.store.read(|s| s.notes.clone()).await;

        if notes.is_empty() {
            return Ok("📭 No notes yet. Add one with /note <text>.".to_string());
        }
        Ok(format!("📝 Notes:\n{}", numbered_list(&notes)))
    }
}
