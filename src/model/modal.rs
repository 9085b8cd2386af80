//! Modal stack for managing overlays
//!
//! Only the top modal receives input.

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Pick the domain to rescan
    RescanTarget,
    /// Completed rescan requests
    History,
    /// Keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create an empty modal stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Pop the top modal from the stack
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get the top modal (the one receiving input)
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Check if no modal is open
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::RescanTarget);
        stack.push(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::RescanTarget));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
