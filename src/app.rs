//! Root application component
//!
//! Coordinates the model (report, tabs, selection, rescan state) with the
//! child components. Background scan results are picked up on `Tick`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, HelpDialog, HistoryDialog, HomeComponent, HomeRenderContext, QuitDialog,
    RescanTargetDialog,
};
use crate::config::Config;
use crate::model::account::requires_confirmation;
use crate::model::history::{ScanHistory, ScanHistoryEntry};
use crate::model::modal::{Modal, ModalStack};
use crate::model::notification::{Notifier, Toasts};
use crate::model::rescan::{ScanOutcome, TriggerDecision};
use crate::model::route::absolute_url;
use crate::model::selection::SelectionState;
use crate::model::{Category, ReportData, RescanDispatcher, TabModel, UserAccount};
use crate::services::{self, ScanRunner, TokenProvider};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

pub struct App {
    config: Config,
    account: UserAccount,
    report: Option<ReportData>,
    tabs: TabModel,
    selection: SelectionState,
    dispatcher: RescanDispatcher,
    runner: ScanRunner,
    toasts: Toasts,
    history: ScanHistory,
    modals: ModalStack,

    pub should_quit: bool,
    pub error: Option<String>,
    pub status_message: Option<String>,
    /// Last "see all" URL the user opened
    pub last_navigation: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    home: HomeComponent,
    quit_dialog: QuitDialog,
    history_dialog: HistoryDialog,
    help_dialog: HelpDialog,
    target_dialog: RescanTargetDialog,
}

impl App {
    pub fn new(
        config: Config,
        account: UserAccount,
        tokens: Arc<dyn TokenProvider>,
        handle: Handle,
    ) -> Result<App> {
        let client = services::build_client(config.request_timeout_secs)?;
        let runner = ScanRunner::new(handle, client, config.scan_endpoint(), tokens);
        let history = ScanHistory::load(&config.state_dir);

        info!(
            user = account.id.as_str(),
            admin = account.is_admin,
            role = account.role_name.as_str(),
            endpoint = runner.endpoint(),
            "Starting dashboard"
        );

        Ok(App {
            config,
            account,
            report: None,
            tabs: TabModel::new(),
            selection: SelectionState::default(),
            dispatcher: RescanDispatcher::new(),
            runner,
            toasts: Toasts::new(),
            history,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            last_navigation: None,
            home: HomeComponent::new(),
            quit_dialog: QuitDialog::default(),
            history_dialog: HistoryDialog::default(),
            help_dialog: HelpDialog::default(),
            target_dialog: RescanTargetDialog::new(),
        })
    }

    /// Re-read the report file. Returns the follow-up action on success.
    fn reload_report(&mut self) -> Option<Action> {
        match services::load_report(&self.config.report_path) {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
                Some(Action::ReportLoaded)
            }
            Err(e) => {
                warn!(error = %e, "Report unavailable");
                self.error = Some(e);
                None
            }
        }
    }

    fn show_active_tab(&mut self) {
        let tab = self.tabs.get(self.selection.active());
        self.home.show_tab(tab);
    }

    fn select(&mut self, category: Category) {
        self.selection.select(category);
        self.show_active_tab();
    }

    /// Absolute "see all" URL of the active tab
    fn see_all_url(&self) -> String {
        let tab = self.tabs.get(self.selection.active());
        let path = tab
            .route_target
            .resolve(Some(self.config.route_target_id.as_str()));
        absolute_url(&self.config.dashboard_url, &path)
    }

    /// Domains offered in the rescan dialog
    fn domain_suggestions(&self) -> Vec<String> {
        let mut domains = self.config.suggested_domains.clone();
        if let Some(report) = &self.report {
            for domain in services::domains_from_report(report) {
                if !domains.contains(&domain) {
                    domains.push(domain);
                }
            }
        }
        domains
    }

    fn trigger_rescan(&mut self) {
        let decision = self.dispatcher.trigger(&self.account.role_name);
        debug!(state = ?self.dispatcher.state(), "Rescan triggered");
        match decision {
            TriggerDecision::Dispatch(request) => {
                self.status_message = Some(format!("Rescan requested: {}", request.scope_label()));
                self.runner.spawn(request);
            }
            TriggerDecision::Confirm => {
                let suggestions = self.domain_suggestions();
                self.target_dialog.open(suggestions);
                self.modals.push(Modal::RescanTarget);
            }
            TriggerDecision::AlreadyInFlight => {
                self.status_message = Some("A rescan is already in progress".to_string());
            }
        }
    }

    fn confirm_rescan_target(&mut self) {
        match self.target_dialog.validated_domain() {
            Ok(domain) => {
                self.modals.pop();
                if let Some(request) = self.dispatcher.confirm(&domain) {
                    self.status_message =
                        Some(format!("Rescan requested: {}", request.scope_label()));
                    self.runner.spawn(request);
                }
            }
            Err(message) => self.target_dialog.error = Some(message),
        }
    }

    /// One notification and one history entry per completed request
    fn finish_rescan(&mut self, outcome: ScanOutcome) {
        let Some(done) = self.dispatcher.complete(outcome) else {
            warn!("Scan outcome arrived with no request in flight");
            return;
        };
        self.toasts.notify(done.outcome.notification());
        self.status_message = None;
        if let Err(e) = self.history.record(ScanHistoryEntry::from_completed(&done)) {
            warn!(error = %e, "Failed to save scan history");
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::RescanTarget => self.target_dialog.handle_key_event(key),
            Modal::History => self.history_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn update_modal(&mut self, action: Action) -> Result<Option<Action>> {
        match self.modals.top().cloned() {
            Some(Modal::RescanTarget) => self.target_dialog.update(action),
            Some(Modal::History) => self.history_dialog.update(action),
            Some(Modal::Help) => self.help_dialog.update(action),
            Some(Modal::QuitConfirm) | None => Ok(None),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::RescanTarget => self.target_dialog.draw(frame, area),
            Modal::History => {
                self.history_dialog
                    .draw_with_history(frame, area, self.history.entries())
            }
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        if let Some(action) = self.reload_report() {
            self.update(action)?;
        } else {
            self.show_active_tab();
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if let Some(outcome) = self.runner.poll() {
                    self.finish_rescan(outcome);
                }
                if !self.toasts.is_empty() && self.toasts.prune(Local::now()) {
                    debug!(remaining = self.toasts.len(), "Toast expired");
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => self.should_quit = true,

            // ─────────────────────────────────────────────────────────────────
            // Report
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshReport => return Ok(self.reload_report()),
            Action::ReportLoaded => {
                if self.tabs.report_updated(self.report.as_ref()) {
                    self.show_active_tab();
                    self.status_message = Some("Report loaded".to_string());
                } else {
                    self.status_message = Some("Report unchanged".to_string());
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Tabs
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab => {
                self.selection.next();
                self.show_active_tab();
            }
            Action::PrevTab => {
                self.selection.previous();
                self.show_active_tab();
            }
            Action::SelectTab(category) => self.select(category),
            Action::OpenSeeAll => {
                let url = self.see_all_url();
                info!(url = %url, category = %self.selection.active(), "See all");
                self.status_message = Some(format!("Open {}", url));
                self.last_navigation = Some(url);
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.home.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Rescan
            // ─────────────────────────────────────────────────────────────────
            Action::TriggerRescan => self.trigger_rescan(),
            Action::TargetInput(_) | Action::TargetBackspace => {
                self.target_dialog.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.scan_in_flight = self.runner.is_running();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHistory => {
                if matches!(self.modals.top(), Some(Modal::History)) {
                    self.modals.pop();
                } else {
                    self.history_dialog.selected_index = 0;
                    self.modals.push(Modal::History);
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.help_dialog.organization_rescan = !requires_confirmation(&self.account.role_name);
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                if self.modals.pop() == Some(Modal::RescanTarget) {
                    self.dispatcher.cancel();
                }
            }
            Action::ConfirmModal => match self.modals.top().cloned() {
                Some(Modal::RescanTarget) => self.confirm_rescan_target(),
                Some(Modal::QuitConfirm) => return Ok(Some(Action::ForceQuit)),
                _ => {}
            },
            Action::ModalUp | Action::ModalDown => {
                self.update_modal(action)?;
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let see_all_url = self.see_all_url();
        let name = if self.account.full_name.is_empty() {
            &self.account.email
        } else {
            &self.account.full_name
        };
        let user_label = if name.is_empty() {
            self.account.role_name.as_str().to_string()
        } else {
            format!("{} · {}", name, self.account.role_name.as_str())
        };

        let ctx = HomeRenderContext {
            tabs: self.tabs.tabs(),
            active: self.selection.active(),
            see_all_url: &see_all_url,
            user_label: &user_label,
            organization_rescan: !requires_confirmation(&self.account.role_name),
            scan_in_flight: self.dispatcher.is_in_flight(),
            toast: self.toasts.latest(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}
