//! Shared context for command handlers

use crate::store::SharedStore;

/// Shared context passed to every command handler
///
/// Carries the state store handle and the fixed milestone plan size used for
/// progress reporting.
#[derive(Clone)]
pub struct CommandContext {
    pub store: SharedStore,
    pub milestone_plan_size: usize,
}

impl CommandContext {
    pub fn new(store: SharedStore, milestone_plan_size: usize) -> Self {
        Self {
            store,
            milestone_plan_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
