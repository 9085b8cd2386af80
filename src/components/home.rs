//! Home component - the attack-surface panel
//!
//! Category tabs with their counts, the active category's findings, the
//! "see all" link, toasts and the help bar.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, TableComponent};
use crate::model::notification::{Level, Notification};
use crate::model::{Category, TabDescriptor};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct HomeComponent {
    /// Findings of the active category
    pub table: TableComponent,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            table: TableComponent::new(),
        }
    }

    /// Show the rows of a newly active or rebuilt tab
    pub fn show_tab(&mut self, tab: &TabDescriptor) {
        self.table.set_rows(&tab.rows);
    }
}

/// Tab label: short title plus the count when the report has one
pub fn tab_label(tab: &TabDescriptor) -> String {
    let count = tab.count_label();
    if count.is_empty() {
        tab.category.short_title().to_string()
    } else {
        format!("{} ({})", tab.category.short_title(), count)
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            // Categories
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Category::from_index(index).map(Action::SelectTab)
            }
            KeyCode::Tab | KeyCode::Right => Some(Action::NextTab),
            KeyCode::BackTab | KeyCode::Left => Some(Action::PrevTab),
            KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenSeeAll),

            // Findings
            KeyCode::Char('d') if ctrl => Some(Action::PageDown),
            KeyCode::Char('u') if ctrl => Some(Action::PageUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),

            // Rescan
            KeyCode::Char('r') => Some(Action::TriggerRescan),
            KeyCode::Char('h') => Some(Action::OpenHistory),

            KeyCode::Char('R') => Some(Action::RefreshReport),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.table.update(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs report state; see draw_home_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the home screen shows that the component does not own
pub struct HomeRenderContext<'a> {
    pub tabs: &'a [TabDescriptor],
    pub active: Category,
    /// Absolute "see all" URL of the active tab
    pub see_all_url: &'a str,
    pub user_label: &'a str,
    /// Whether `r` rescans the organization without asking
    pub organization_rescan: bool,
    pub scan_in_flight: bool,
    pub toast: Option<&'a Notification>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let has_status = ctx.toast.is_some()
        || ctx.error.is_some()
        || ctx.status_message.is_some()
        || ctx.scan_in_flight;
    let layout = calculate_main_layout(area, has_status);

    render_tabs(frame, layout.tabs, ctx);
    home.table.draw(frame, layout.rows)?;
    render_see_all(frame, layout.see_all, ctx);
    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, ctx);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let titles: Vec<String> = ctx.tabs.iter().map(tab_label).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Attack Surface ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(ctx.active.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_see_all(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let title = ctx
        .tabs
        .get(ctx.active.index())
        .map(|tab| tab.title)
        .unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(
            format!(" See all {}: ", title),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            ctx.see_all_url.to_string(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![];

    if ctx.scan_in_flight {
        spans.push(Span::styled(
            " ⟳ Rescan in progress ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    // A toast outranks older status text
    if let Some(toast) = ctx.toast {
        let (icon, color) = match toast.level {
            Level::Success => ("✓", Color::Green),
            Level::Error => ("✗", Color::Red),
        };
        spans.push(Span::styled(
            format!("{} {} ", icon, toast.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let rescan_label = if ctx.organization_rescan {
        "Rescan org "
    } else {
        "Rescan domain "
    };

    let spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" 1-4 ", Color::Cyan),
        Span::raw("Category "),
        key(" Enter ", Color::Cyan),
        Span::raw("See all "),
        key(" r ", if ctx.scan_in_flight { Color::DarkGray } else { Color::Green }),
        Span::raw(rescan_label),
        key(" h ", Color::Magenta),
        Span::raw("History "),
        key(" R ", Color::Cyan),
        Span::raw("Reload "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", ctx.user_label))
                .title_alignment(Alignment::Right)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}
