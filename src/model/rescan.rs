//! Rescan request lifecycle
//!
//! `RescanDispatcher` owns the state machine. It never performs I/O: it
//! decides what should happen and the app hands in-flight requests to the
//! scan runner, then feeds the outcome back through [`RescanDispatcher::complete`].
//!
//! ```text
//! Idle ──trigger──▶ InFlight            (client_admin, organization-wide)
//!   │                  ▲
//!   └──trigger──▶ AwaitingConfirmation ─confirm(domain)─┘
//!                      │
//!                      └─cancel──▶ Idle
//! InFlight ──complete(outcome)──▶ Idle
//! ```

use super::account::{can_auto_dispatch, Role};
use super::notification::Notification;
use crate::error::ScanError;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Message shown for every outcome that is not a recognized server reply
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to initiate scan. An unexpected error occurred.";

/// What to scan. No domain means the whole organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RescanRequest {
    pub domain_name: Option<String>,
}

impl RescanRequest {
    pub fn organization() -> Self {
        Self { domain_name: None }
    }

    pub fn domain(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: Some(domain_name.into()),
        }
    }

    /// JSON body for the scan endpoint; `None` means send no body at all
    pub fn body(&self) -> Option<serde_json::Value> {
        self.domain_name
            .as_ref()
            .map(|d| serde_json::json!({ "domain_name": d }))
    }

    pub fn scope_label(&self) -> String {
        match &self.domain_name {
            Some(domain) => domain.clone(),
            None => "organization".to_string(),
        }
    }
}

/// Result of a completed rescan request
#[derive(Debug)]
pub enum ScanOutcome {
    /// 2xx; message taken from the response `data` field
    Started(String),
    /// 429; message taken from the response `data` field
    RateLimited(String),
    Failed(ScanError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum OutcomeKind {
    Started,
    RateLimited,
    Failed,
}

impl ScanOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ScanOutcome::Started(_) => OutcomeKind::Started,
            ScanOutcome::RateLimited(_) => OutcomeKind::RateLimited,
            ScanOutcome::Failed(_) => OutcomeKind::Failed,
        }
    }

    /// The single notification this outcome produces
    pub fn notification(&self) -> Notification {
        match self {
            ScanOutcome::Started(message) => Notification::success(message.clone()),
            ScanOutcome::RateLimited(message) => Notification::error(message.clone()),
            ScanOutcome::Failed(_) => Notification::error(GENERIC_FAILURE_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RescanState {
    Idle,
    AwaitingConfirmation,
    InFlight {
        request: RescanRequest,
        started_at: Instant,
    },
}

/// What the caller should do after a trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Send this request now
    Dispatch(RescanRequest),
    /// Open the domain confirmation dialog
    Confirm,
    /// A request is already outstanding; nothing happens
    AlreadyInFlight,
}

/// A request that just finished, with how long it took
#[derive(Debug)]
pub struct CompletedScan {
    pub request: RescanRequest,
    pub outcome: ScanOutcome,
    pub duration_secs: f64,
}

#[derive(Debug)]
pub struct RescanDispatcher {
    state: RescanState,
}

impl Default for RescanDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RescanDispatcher {
    pub fn new() -> Self {
        Self {
            state: RescanState::Idle,
        }
    }

    pub fn state(&self) -> &RescanState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, RescanState::InFlight { .. })
    }

    /// User pressed the rescan control.
    ///
    /// Only one request may be outstanding; further triggers are ignored
    /// until it completes.
    pub fn trigger(&mut self, role: &Role) -> TriggerDecision {
        if self.is_in_flight() {
            warn!("Rescan already in progress, ignoring trigger");
            return TriggerDecision::AlreadyInFlight;
        }
        if can_auto_dispatch(role) {
            let request = RescanRequest::organization();
            self.enter_in_flight(request.clone());
            TriggerDecision::Dispatch(request)
        } else {
            debug!(role = role.as_str(), "Rescan needs an explicit target");
            self.state = RescanState::AwaitingConfirmation;
            TriggerDecision::Confirm
        }
    }

    /// The confirmation dialog supplied a domain.
    ///
    /// Returns the request to send, or `None` when no confirmation was
    /// pending.
    pub fn confirm(&mut self, domain_name: &str) -> Option<RescanRequest> {
        if self.state != RescanState::AwaitingConfirmation {
            return None;
        }
        let request = RescanRequest::domain(domain_name.trim());
        self.enter_in_flight(request.clone());
        Some(request)
    }

    /// The confirmation dialog was dismissed
    pub fn cancel(&mut self) {
        if self.state == RescanState::AwaitingConfirmation {
            debug!("Rescan confirmation cancelled");
            self.state = RescanState::Idle;
        }
    }

    /// Record the outcome of the in-flight request and return to idle.
    ///
    /// Returns `None` if nothing was in flight.
    pub fn complete(&mut self, outcome: ScanOutcome) -> Option<CompletedScan> {
        let state = std::mem::replace(&mut self.state, RescanState::Idle);
        match state {
            RescanState::InFlight {
                request,
                started_at,
            } => Some(CompletedScan {
                request,
                outcome,
                duration_secs: started_at.elapsed().as_secs_f64(),
            }),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn enter_in_flight(&mut self, request: RescanRequest) {
        debug!(scope = %request.scope_label(), "Rescan request in flight");
        self.state = RescanState::InFlight {
            request,
            started_at: Instant::now(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::notification::Level;
    use serde_json::json;

    #[test]
    fn test_client_admin_dispatches_organization_scan() {
        let mut dispatcher = RescanDispatcher::new();
        let decision = dispatcher.trigger(&Role::ClientAdmin);

        assert_eq!(decision, TriggerDecision::Dispatch(RescanRequest::organization()));
        assert!(dispatcher.is_in_flight());
    }

    #[test]
    fn test_other_roles_wait_for_confirmation() {
        for role in [
            Role::ClientUser,
            Role::PartnerUser,
            Role::Other("partner_admin".into()),
        ] {
            let mut dispatcher = RescanDispatcher::new();
            assert_eq!(dispatcher.trigger(&role), TriggerDecision::Confirm);
            assert_eq!(dispatcher.state(), &RescanState::AwaitingConfirmation);
            assert!(!dispatcher.is_in_flight());
        }
    }

    #[test]
    fn test_confirm_enters_flight_with_domain() {
        let mut dispatcher = RescanDispatcher::new();
        dispatcher.trigger(&Role::PartnerUser);

        let request = dispatcher.confirm(" shop.example.com ").unwrap();
        assert_eq!(request, RescanRequest::domain("shop.example.com"));
        assert!(dispatcher.is_in_flight());
    }

    #[test]
    fn test_confirm_without_pending_dialog_does_nothing() {
        let mut dispatcher = RescanDispatcher::new();
        assert!(dispatcher.confirm("example.com").is_none());
        assert_eq!(dispatcher.state(), &RescanState::Idle);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut dispatcher = RescanDispatcher::new();
        dispatcher.trigger(&Role::ClientUser);
        dispatcher.cancel();
        assert_eq!(dispatcher.state(), &RescanState::Idle);
    }

    #[test]
    fn test_second_trigger_while_in_flight_is_ignored() {
        let mut dispatcher = RescanDispatcher::new();
        dispatcher.trigger(&Role::ClientAdmin);
        assert_eq!(
            dispatcher.trigger(&Role::ClientAdmin),
            TriggerDecision::AlreadyInFlight
        );
    }

    #[test]
    fn test_complete_returns_to_idle() {
        let mut dispatcher = RescanDispatcher::new();
        dispatcher.trigger(&Role::ClientAdmin);

        let done = dispatcher
            .complete(ScanOutcome::Started("scan started".into()))
            .unwrap();
        assert_eq!(done.request, RescanRequest::organization());
        assert_eq!(done.outcome.kind(), OutcomeKind::Started);
        assert_eq!(dispatcher.state(), &RescanState::Idle);

        assert!(dispatcher
            .complete(ScanOutcome::Started("late".into()))
            .is_none());
    }

    #[test]
    fn test_request_body_only_for_domain_scans() {
        assert_eq!(RescanRequest::organization().body(), None);
        assert_eq!(
            RescanRequest::domain("example.com").body(),
            Some(json!({ "domain_name": "example.com" }))
        );
    }

    #[test]
    fn test_outcome_notifications() {
        let started = ScanOutcome::Started("scan started".into()).notification();
        assert_eq!(started.level, Level::Success);
        assert_eq!(started.message, "scan started");

        let limited = ScanOutcome::RateLimited("rate limited".into()).notification();
        assert_eq!(limited.level, Level::Error);
        assert_eq!(limited.message, "rate limited");

        let failed = ScanOutcome::Failed(ScanError::Interrupted).notification();
        assert_eq!(failed.level, Level::Error);
        assert_eq!(failed.message, GENERIC_FAILURE_MESSAGE);
    }
}
