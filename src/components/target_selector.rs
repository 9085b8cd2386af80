//! Rescan target dialog
//!
//! Shown to roles that may not rescan the whole organization. The user
//! types a domain or picks one of the suggestions; Enter confirms.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").unwrap()
});

const MAX_HOSTNAME_LEN: usize = 253;

/// Validate and normalize a domain typed by the user
pub fn validate_domain(input: &str) -> Result<String, String> {
    let domain = input.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return Err("Enter a domain to rescan".to_string());
    }
    if domain.len() > MAX_HOSTNAME_LEN || !HOSTNAME_REGEX.is_match(&domain) {
        return Err(format!("'{}' is not a valid domain name", domain));
    }
    Ok(domain)
}

pub struct RescanTargetDialog {
    pub input: String,
    pub suggestions: Vec<String>,
    pub error: Option<String>,
    list_state: ListState,
}

impl Default for RescanTargetDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl RescanTargetDialog {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            error: None,
            list_state: ListState::default(),
        }
    }

    /// Clear the input and offer these domains
    pub fn open(&mut self, suggestions: Vec<String>) {
        self.input.clear();
        self.error = None;
        self.suggestions = suggestions;
        self.list_state.select(None);
    }

    /// The domain to scan, or the message to show under the input
    pub fn validated_domain(&self) -> Result<String, String> {
        validate_domain(&self.input)
    }

    fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
        if let Some(domain) = self.suggestions.get(index) {
            self.input = domain.clone();
            self.error = None;
        }
    }
}

impl Component for RescanTargetDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Tab => Some(Action::ModalDown),
            KeyCode::Backspace => Some(Action::TargetBackspace),
            KeyCode::Char(c) => Some(Action::TargetInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::TargetInput(c) => {
                self.input.push(c);
                self.error = None;
                self.list_state.select(None);
            }
            Action::TargetBackspace => {
                self.input.pop();
                self.error = None;
                self.list_state.select(None);
            }
            Action::ModalDown if !self.suggestions.is_empty() => {
                let next = match self.list_state.selected() {
                    Some(i) => (i + 1) % self.suggestions.len(),
                    None => 0,
                };
                self.select(next);
            }
            Action::ModalUp if !self.suggestions.is_empty() => {
                let prev = match self.list_state.selected() {
                    Some(0) | None => self.suggestions.len() - 1,
                    Some(i) => i - 1,
                };
                self.select(prev);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let suggestion_rows = self.suggestions.len().min(8) as u16;
        let height = 3 + 1 + suggestion_rows.max(1) + 2 + 3;
        let popup_area = centered_popup(area, 60u16.min(area.width.saturating_sub(4)), height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(&self.input, Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Rescan domain ")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(input, chunks[0]);

        let message = match &self.error {
            Some(err) => Span::styled(format!(" {}", err), Style::default().fg(Color::Red)),
            None => Span::styled(
                " Type a domain or pick a suggestion",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(message)), chunks[1]);

        let items: Vec<ListItem> = if self.suggestions.is_empty() {
            vec![ListItem::new(Span::styled(
                "No suggestions",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.suggestions
                .iter()
                .map(|d| ListItem::new(d.as_str()))
                .collect()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Suggestions ")
                    .title_style(Style::default().fg(Color::Cyan))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[2], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Rescan  "),
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Suggestions  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert_eq!(validate_domain(" Shop.Example.COM. ").unwrap(), "shop.example.com");
        assert_eq!(validate_domain("a-b.co.uk").unwrap(), "a-b.co.uk");

        assert!(validate_domain("").is_err());
        assert!(validate_domain("localhost").is_err());
        assert!(validate_domain("-bad.example.com").is_err());
        assert!(validate_domain("has space.com").is_err());
        assert!(validate_domain("https://example.com").is_err());
    }

    #[test]
    fn test_typing_clears_suggestion_and_error() {
        let mut dialog = RescanTargetDialog::new();
        dialog.open(vec!["a.example.com".into()]);
        dialog.error = Some("bad".into());

        dialog.update(Action::ModalDown).unwrap();
        assert_eq!(dialog.input, "a.example.com");
        assert_eq!(dialog.list_state.selected(), Some(0));

        dialog.update(Action::TargetBackspace).unwrap();
        dialog.update(Action::TargetInput('x')).unwrap();
        assert_eq!(dialog.input, "a.example.cox");
        assert!(dialog.list_state.selected().is_none());
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_suggestions_wrap() {
        let mut dialog = RescanTargetDialog::new();
        dialog.open(vec!["a.example.com".into(), "b.example.com".into()]);

        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.input, "b.example.com");
        dialog.update(Action::ModalDown).unwrap();
        assert_eq!(dialog.input, "a.example.com");
    }

    #[test]
    fn test_keys_map_to_actions() {
        use crossterm::event::KeyModifiers;
        let mut dialog = RescanTargetDialog::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::TargetInput('q'))
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ConfirmModal)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
