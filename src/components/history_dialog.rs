//! Rescan history dialog
//!
//! List of completed rescan requests on the left, details of the selected
//! one on the right.

use crate::action::Action;
use crate::component::Component;
use crate::model::history::ScanHistoryEntry;
use crate::model::rescan::OutcomeKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct HistoryDialog {
    pub selected_index: usize,
}

fn outcome_color(outcome: OutcomeKind) -> Color {
    match outcome {
        OutcomeKind::Started => Color::Green,
        OutcomeKind::RateLimited => Color::Yellow,
        OutcomeKind::Failed => Color::Red,
    }
}

impl Component for HistoryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.selected_index = self.selected_index.saturating_sub(1),
            Action::ModalDown => self.selected_index += 1,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the history entries; see draw_with_history
        Ok(())
    }
}

impl HistoryDialog {
    pub fn draw_with_history(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        history: &[ScanHistoryEntry],
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let title_style = Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD);

        if history.is_empty() {
            let paragraph = Paragraph::new("No rescans yet. Press r on the dashboard to start one.")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Rescan History ")
                        .title_style(title_style),
                );
            frame.render_widget(paragraph, overlay_area);
            return Ok(());
        }

        self.selected_index = self.selected_index.min(history.len() - 1);
        let selected_idx = self.selected_index;

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        let items: Vec<ListItem> = history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == selected_idx {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.status_icon()),
                        Style::default().fg(outcome_color(entry.outcome)),
                    ),
                    Span::styled(
                        format!("{} ", entry.formatted_time()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.scope.clone(), style),
                ]))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Rescan History ({}) ", history.len()))
                .title_style(title_style),
        );
        frame.render_widget(list, content_chunks[0]);

        if let Some(entry) = history.get(selected_idx) {
            let detail = Paragraph::new(render_history_detail(entry))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Details ")
                        .title_style(
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                );
            frame.render_widget(detail, content_chunks[1]);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Esc/h ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close  "),
            Span::styled(
                " ↑/↓ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Select"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[1]);

        Ok(())
    }
}

fn render_history_detail(entry: &ScanHistoryEntry) -> Vec<Line<'static>> {
    let label = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let outcome = match entry.outcome {
        OutcomeKind::Started => "Started",
        OutcomeKind::RateLimited => "Rate limited",
        OutcomeKind::Failed => "Failed",
    };

    vec![
        Line::from(vec![label("Time: "), Span::raw(entry.formatted_time())]),
        Line::from(vec![label("Scope: "), Span::raw(entry.scope.clone())]),
        Line::from(vec![
            label("Outcome: "),
            Span::styled(
                format!("{} {}", entry.status_icon(), outcome),
                Style::default().fg(outcome_color(entry.outcome)),
            ),
        ]),
        Line::from(vec![
            label("Duration: "),
            Span::raw(entry.formatted_duration()),
        ]),
        Line::from(""),
        Line::from(label("Message:")),
        Line::from(Span::raw(entry.message.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};

    fn entry(scope: &str, outcome: OutcomeKind, message: &str) -> ScanHistoryEntry {
        ScanHistoryEntry {
            timestamp: Local::now(),
            scope: scope.to_string(),
            outcome,
            message: message.to_string(),
            duration_secs: 0.25,
        }
    }

    #[test]
    fn test_detail_shows_scope_and_message() {
        let lines = render_history_detail(&entry("shop.example.com", OutcomeKind::RateLimited, "rate limited"));
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text.contains(&"Scope: shop.example.com".to_string()));
        assert!(text.contains(&"Duration: 250ms".to_string()));
        assert!(text.contains(&"rate limited".to_string()));
    }

    #[test]
    fn test_selection_is_clamped_when_drawn() {
        let history = vec![
            entry("organization", OutcomeKind::Started, "scan started"),
            entry("organization", OutcomeKind::Failed, "failed"),
        ];
        let mut dialog = HistoryDialog::default();
        for _ in 0..5 {
            dialog.update(Action::ModalDown).unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                dialog
                    .draw_with_history(frame, frame.area(), &history)
                    .unwrap();
            })
            .unwrap();
        assert_eq!(dialog.selected_index, 1);
    }
}
