//! Session event log.
//!
//! RULE: every state change made through the app shell is recorded as
//! a ShieldEvent. Variants are added, never removed or reordered.

use crate::{
    dashboard::DashboardMode,
    keyword_responder::ResponseTopic,
    risk_lookup::{CheckCategory, RiskLevel},
    types::{Language, MessageId, SessionId, Tab},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShieldEvent {
    // ── Shell ──────────────────────────────────────
    SessionStarted {
        session_id: SessionId,
        language:   Language,
    },
    LanguageChanged {
        language: Language,
    },
    TabChanged {
        from: Tab,
        to:   Tab,
    },
    PanelTornDown {
        tab:       Tab,
        cancelled: usize,
    },

    // ── Dashboard ──────────────────────────────────
    ModeChanged {
        mode: DashboardMode,
    },

    // ── Fraud checker ──────────────────────────────
    CheckStarted {
        category: CheckCategory,
        input:    String,
    },
    CheckCompleted {
        category:        CheckCategory,
        risk_level:      RiskLevel,
        complaint_count: u32,
    },

    // ── Chat ───────────────────────────────────────
    MessageSent {
        message_id: MessageId,
    },
    ReplyDelivered {
        message_id: MessageId,
        topic:      ResponseTopic,
    },
}

impl ShieldEvent {
    /// Stable name of the variant, matching its serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ShieldEvent::SessionStarted { .. }  => "session_started",
            ShieldEvent::LanguageChanged { .. } => "language_changed",
            ShieldEvent::TabChanged { .. }      => "tab_changed",
            ShieldEvent::PanelTornDown { .. }   => "panel_torn_down",
            ShieldEvent::ModeChanged { .. }     => "mode_changed",
            ShieldEvent::CheckStarted { .. }    => "check_started",
            ShieldEvent::CheckCompleted { .. }  => "check_completed",
            ShieldEvent::MessageSent { .. }     => "message_sent",
            ShieldEvent::ReplyDelivered { .. }  => "reply_delivered",
        }
    }
}

/// An event as recorded in the session log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub session_id: SessionId,
    pub at:         DateTime<Utc>,
    pub event:      ShieldEvent,
}

/// Append-only log of one session's events.
#[derive(Debug, Clone)]
pub struct EventLog {
    session_id: SessionId,
    entries:    Vec<EventLogEntry>,
}

impl EventLog {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id, entries: Vec::new() }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn record(&mut self, event: ShieldEvent) {
        log::debug!("event: {} {}", self.entries.len(), event.kind());
        self.entries.push(EventLogEntry {
            seq:        self.entries.len() as u64,
            session_id: self.session_id.clone(),
            at:         Utc::now(),
            event,
        });
    }

    pub fn entries(&self) -> &[EventLogEntry] {
        &self.entries
    }

    /// Entries recorded at or after `seq`.
    pub fn since(&self, seq: u64) -> &[EventLogEntry] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let events = [
            ShieldEvent::LanguageChanged { language: Language::Kk },
            ShieldEvent::TabChanged { from: Tab::Dashboard, to: Tab::Chat },
            ShieldEvent::CheckCompleted {
                category:        CheckCategory::Card,
                risk_level:      RiskLevel::High,
                complaint_count: 8,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }
}
