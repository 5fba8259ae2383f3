//! # Commands Layer
//!
//! Transport-agnostic command interface. The chat shell parses an incoming
//! line into a [`CommandInvocation`], dispatches it through the
//! [`CommandRegistry`], and sends the returned reply text back over whatever
//! transport it speaks.

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use context::CommandContext;
pub use handler::ChatCommandHandler;
pub use registry::CommandRegistry;

use std::sync::Arc;

use anyhow::Result;
use log::debug;

/// One parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Lowercased command name without the leading slash
    pub name: String,
    /// Whitespace-separated arguments
    pub args: Vec<String>,
    /// Display name or handle of the issuing member
    pub sender: String,
    /// Delivery target of the channel the command arrived on
    pub channel: String,
}

impl CommandInvocation {
    /// Parse a `/command args...` line. Returns None for anything that is not
    /// a command.
    pub fn parse(line: &str, sender: &str, channel: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next()?.to_lowercase();

        Some(Self {
            name,
            args: parts.map(String::from).collect(),
            sender: sender.to_string(),
            channel: channel.to_string(),
        })
    }

    /// Join the arguments from `from` onward back into free text
    pub fn arg_text(&self, from: usize) -> String {
        if from >= self.args.len() {
            return String::new();
        }
        self.args[from..].join(" ")
    }
}

/// Build the registry with every built-in handler
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(handlers::notes::NoteHandler));
    registry.register(Arc::new(handlers::reminders::AlertHandler));
    registry.register(Arc::new(handlers::milestones::MilestoneHandler));
    registry.register(Arc::new(handlers::utility::UtilityHandler));
    registry
}

/// Dispatch an invocation to its handler and return the reply text
pub async fn dispatch(
    registry: &CommandRegistry,
    ctx: Arc<CommandContext>,
    invocation: &CommandInvocation,
) -> Result<String> {
    debug!(
        "Dispatching /{} from {} ({} args)",
        invocation.name,
        invocation.sender,
        invocation.args.len()
    );

    match registry.get(&invocation.name) {
        Some(handler) => handler.handle(ctx, invocation).await,
        None => Ok(format!(
            "❓ Unknown command /{}. Use /help to see what I can do.",
            invocation.name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let inv = CommandInvocation::parse("/alert 2024-01-01 kickoff meeting", "alice", "chat-42")
            .unwrap();
        assert_eq!(inv.name, "alert");
        assert_eq!(inv.args, vec!["2024-01-01", "kickoff", "meeting"]);
        assert_eq!(inv.sender, "alice");
        assert_eq!(inv.channel, "chat-42");
    }

    #[test]
    fn test_parse_lowercases_name() {
        let inv = CommandInvocation::parse("/Done Week1", "bob", "c").unwrap();
        assert_eq!(inv.name, "done");
        // args keep their original case
        assert_eq!(inv.args, vec!["Week1"]);
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert!(CommandInvocation::parse("hello there", "a", "c").is_none());
        assert!(CommandInvocation::parse("", "a", "c").is_none());
        assert!(CommandInvocation::parse("/", "a", "c").is_none());
        assert!(CommandInvocation::parse("   ", "a", "c").is_none());
    }

    #[test]
    fn test_arg_text_joins_tail() {
        let inv = CommandInvocation::parse("/alert 2024-01-01 team demo day", "a", "c").unwrap();
        assert_eq!(inv.arg_text(1), "team demo day");
        assert_eq!(inv.arg_text(0), "2024-01-01 team demo day");
        assert_eq!(inv.arg_text(4), "");
    }

    #[test]
    fn test_default_registry_covers_all_commands() {
        let registry = default_registry();
        for name in [
            "note",
            "notes",
            "alert",
            "alerts",
            "done",
            "progress",
            "leaderboard",
            "start",
            "help",
        ] {
            assert!(registry.contains(name), "missing handler for /{name}");
        }
    }
}
