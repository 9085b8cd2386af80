//! Component trait - Interface for UI components

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A self-contained piece of UI.
///
/// 1. `handle_key_event` maps a key to an [`Action`] without touching state
/// 2. `update` applies an action, optionally yielding a follow-up action
/// 3. `draw` renders into the given area
pub trait Component {
    /// Load whatever the component needs before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key press to an action
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an action; may return a follow-up action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
