//! Action enum - All possible application actions
//!
//! Components turn key events into actions; `App::update` applies them.
//! State changes that would otherwise happen implicitly (report reloads,
//! tab switches, scan completion) travel through here as explicit events.

use crate::model::Category;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: poll the scan runner, expire toasts
    Tick,
    Resize(u16, u16),
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Report
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-read the detail report from disk
    RefreshReport,
    /// A report was loaded; rebuild the tab model if needed
    ReportLoaded,

    // ─────────────────────────────────────────────────────────────────────────
    // Tabs
    // ─────────────────────────────────────────────────────────────────────────
    NextTab,
    PrevTab,
    SelectTab(Category),
    /// Resolve the active tab's "see all" route
    OpenSeeAll,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Rescan
    // ─────────────────────────────────────────────────────────────────────────
    /// The rescan control was pressed
    TriggerRescan,
    /// Type into the rescan target field
    TargetInput(char),
    TargetBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHistory,
    OpenHelp,
    CloseModal,
    ConfirmModal,
    ModalUp,
    ModalDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::RefreshReport => write!(f, "RefreshReport"),
            Action::ReportLoaded => write!(f, "ReportLoaded"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(category) => write!(f, "SelectTab({})", category),
            Action::OpenSeeAll => write!(f, "OpenSeeAll"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::TriggerRescan => write!(f, "TriggerRescan"),
            Action::TargetInput(c) => write!(f, "TargetInput('{}')", c),
            Action::TargetBackspace => write!(f, "TargetBackspace"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHistory => write!(f, "OpenHistory"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
        }
    }
}
