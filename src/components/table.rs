//! Table rendering for report detail rows
//!
//! Rows are arbitrary JSON values. Object rows become columns keyed by
//! field name, in first-seen order; anything else lands in a single
//! `value` column.

use crate::action::Action;
use crate::component::Component;
use crate::model::report::Row;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_COLUMN_WIDTH: usize = 40;
const VALUE_COLUMN: &str = "value";

/// Column headers for a set of rows
pub fn column_headers(rows: &[Row]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    let mut has_scalar = false;
    for row in rows {
        match row {
            Value::Object(map) => {
                for key in map.keys() {
                    if !headers.iter().any(|h| h == key) {
                        headers.push(key.clone());
                    }
                }
            }
            _ => has_scalar = true,
        }
    }
    if has_scalar && !headers.iter().any(|h| h == VALUE_COLUMN) {
        headers.push(VALUE_COLUMN.to_string());
    }
    headers
}

/// Display text for one JSON cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(|v| !v.is_array() && !v.is_object()) => items
            .iter()
            .map(cell_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn row_cells(row: &Row, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|header| match row {
            Value::Object(map) => map.get(header).map(cell_text).unwrap_or_default(),
            other if header == VALUE_COLUMN => cell_text(other),
            _ => String::new(),
        })
        .collect()
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Scrollable table of the active tab's rows
pub struct TableComponent {
    headers: Vec<String>,
    cells: Vec<Vec<String>>,
    scroll: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            cells: Vec::new(),
            scroll: 0,
        }
    }

    /// Replace the rows and reset scrolling
    pub fn set_rows(&mut self, rows: &[Row]) {
        self.headers = column_headers(rows);
        self.cells = rows.iter().map(|r| row_cells(r, &self.headers)).collect();
        self.scroll = 0;
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn render_lines(&self) -> Vec<Line<'static>> {
        Self::build_table_lines(&self.headers, &self.cells)
    }

    pub fn build_table_lines(headers: &[String], rows: &[Vec<String>]) -> Vec<Line<'static>> {
        if headers.is_empty() {
            return vec![Line::from(Span::styled(
                "No findings in this category",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = col_widths.get_mut(i) {
                    *w = (*w).max(cell.width());
                }
            }
        }
        for width in &mut col_widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);

        let header_spans: Vec<Span> = headers
            .iter()
            .zip(&col_widths)
            .flat_map(|(h, &width)| {
                vec![
                    Span::styled(
                        pad_to_width(&truncate_to_width(h, width), width),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        let separator = col_widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        for row in rows {
            let spans: Vec<Span> = row
                .iter()
                .zip(&col_widths)
                .flat_map(|(cell, &width)| {
                    vec![
                        Span::raw(pad_to_width(&truncate_to_width(cell, width), width)),
                        Span::raw(" │ "),
                    ]
                })
                .collect();
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let max_scroll = self.cells.len().saturating_sub(1);
        match action {
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(max_scroll),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = (self.scroll + 10).min(max_scroll),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = self.render_lines();
        let total = content.len();
        let visible_height = area.height.saturating_sub(2) as usize;

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Findings ({}) ", self.cells.len()))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}
