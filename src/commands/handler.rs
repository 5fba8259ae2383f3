//! Chat command handler trait

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::CommandInvocation;

/// Trait for chat command handlers
///
/// Each handler processes one or more commands and returns the reply text for
/// the transport to send. Handlers are registered with a [`CommandRegistry`]
/// and dispatched by command name.
///
/// [`CommandRegistry`]: super::registry::CommandRegistry
#[async_trait]
pub trait ChatCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    ///
    /// A handler can process multiple commands if they share logic.
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command, returning the reply text
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String>;
}
