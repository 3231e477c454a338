//! The app shell: language, active tab and the mounted panel.
//!
//! RULES:
//!   - Exactly one panel is mounted, the one under the active tab.
//!   - Switching tabs tears the old panel down (pending delays are
//!     cancelled) and mounts a fresh one. Returning to a tab starts over.
//!   - Changing language keeps panel state. Results and messages that
//!     already exist keep the language they were produced in.
//!   - Every change made here is recorded in the session event log.

use crate::{
    achievements::AchievementsPanel,
    chat::{ChatMessage, ChatPanel},
    config::ShieldConfig,
    dashboard::{DashboardMode, DashboardPanel},
    error::ShieldResult,
    event::{EventLog, EventLogEntry, ShieldEvent},
    fraud_checker::FraudChecker,
    panel::Panel,
    risk_lookup::{CheckCategory, RiskRecord},
    types::{Language, Tab},
};
use std::sync::Arc;

pub enum MountedPanel {
    Dashboard(DashboardPanel),
    Fraud(FraudChecker),
    Chat(ChatPanel),
    Achievements(AchievementsPanel),
}

impl MountedPanel {
    fn mount(tab: Tab, config: Arc<ShieldConfig>, language: Language) -> Self {
        match tab {
            Tab::Dashboard    => MountedPanel::Dashboard(DashboardPanel::new(config)),
            Tab::Fraud        => MountedPanel::Fraud(FraudChecker::new(config)),
            Tab::Chat         => MountedPanel::Chat(ChatPanel::new(config, language)),
            Tab::Achievements => MountedPanel::Achievements(AchievementsPanel::new(config)),
        }
    }

    pub fn as_panel(&self) -> &dyn Panel {
        match self {
            MountedPanel::Dashboard(p)    => p,
            MountedPanel::Fraud(p)        => p,
            MountedPanel::Chat(p)         => p,
            MountedPanel::Achievements(p) => p,
        }
    }

    pub fn as_panel_mut(&mut self) -> &mut dyn Panel {
        match self {
            MountedPanel::Dashboard(p)    => p,
            MountedPanel::Fraud(p)        => p,
            MountedPanel::Chat(p)         => p,
            MountedPanel::Achievements(p) => p,
        }
    }
}

pub struct ShieldApp {
    config:    Arc<ShieldConfig>,
    language:  Language,
    mounted:   MountedPanel,
    event_log: EventLog,
}

impl ShieldApp {
    /// Start a session on the dashboard, in Russian.
    pub fn new(config: ShieldConfig) -> Self {
        Self::with_language(config, Language::default())
    }

    pub fn with_language(config: ShieldConfig, language: Language) -> Self {
        let config = Arc::new(config);
        let session_id = uuid::Uuid::new_v4().to_string();
        let mut event_log = EventLog::new(session_id.clone());
        event_log.record(ShieldEvent::SessionStarted { session_id, language });
        log::info!("app: session {} started ({language})", event_log.session_id());

        Self {
            mounted: MountedPanel::mount(Tab::default(), Arc::clone(&config), language),
            config,
            language,
            event_log,
        }
    }

    /// A session over the built-in data.
    pub fn builtin() -> ShieldResult<Self> {
        Ok(Self::new(ShieldConfig::builtin()?))
    }

    pub fn session_id(&self) -> &str {
        self.event_log.session_id()
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    /// UI label for `key` in the current language.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.config.ui_text.get(key, self.language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        self.event_log.record(ShieldEvent::LanguageChanged { language });
    }

    pub fn active_tab(&self) -> Tab {
        self.mounted.as_panel().tab()
    }

    pub fn set_tab(&mut self, tab: Tab) {
        let from = self.active_tab();
        if tab == from {
            return;
        }
        let cancelled = self.teardown();
        self.mounted = MountedPanel::mount(tab, Arc::clone(&self.config), self.language);
        log::debug!("app: tab {from} -> {tab}");
        self.event_log.record(ShieldEvent::TabChanged { from, to: tab });
        if cancelled > 0 {
            log::info!("app: {from} torn down with {cancelled} pending results cancelled");
        }
    }

    /// Tear down the mounted panel in place. Returns the number of
    /// pending results cancelled.
    pub fn teardown(&mut self) -> usize {
        let panel = self.mounted.as_panel_mut();
        let tab = panel.tab();
        let cancelled = panel.teardown();
        self.event_log.record(ShieldEvent::PanelTornDown { tab, cancelled });
        cancelled
    }

    pub fn panel(&self) -> &MountedPanel {
        &self.mounted
    }

    pub fn events(&self) -> &[EventLogEntry] {
        self.event_log.entries()
    }

    pub fn events_since(&self, seq: u64) -> &[EventLogEntry] {
        self.event_log.since(seq)
    }

    // ── Typed access to the mounted panel ─────────

    pub fn dashboard(&self) -> Option<&DashboardPanel> {
        match &self.mounted {
            MountedPanel::Dashboard(p) => Some(p),
            _ => None,
        }
    }

    pub fn fraud_checker(&self) -> Option<&FraudChecker> {
        match &self.mounted {
            MountedPanel::Fraud(p) => Some(p),
            _ => None,
        }
    }

    pub fn fraud_checker_mut(&mut self) -> Option<&mut FraudChecker> {
        match &mut self.mounted {
            MountedPanel::Fraud(p) => Some(p),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&ChatPanel> {
        match &self.mounted {
            MountedPanel::Chat(p) => Some(p),
            _ => None,
        }
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatPanel> {
        match &mut self.mounted {
            MountedPanel::Chat(p) => Some(p),
            _ => None,
        }
    }

    pub fn achievements(&self) -> Option<&AchievementsPanel> {
        match &self.mounted {
            MountedPanel::Achievements(p) => Some(p),
            _ => None,
        }
    }

    // ── User actions ───────────────────────────────
    // Each action navigates to its tab first, as a user would.

    pub fn set_mode(&mut self, mode: DashboardMode) {
        self.set_tab(Tab::Dashboard);
        if let MountedPanel::Dashboard(dashboard) = &mut self.mounted {
            if dashboard.mode() != mode {
                dashboard.set_mode(mode);
                self.event_log.record(ShieldEvent::ModeChanged { mode });
            }
        }
    }

    /// Run a fraud check and wait for the verdict.
    ///
    /// `None` if the input is empty or the check was cancelled.
    pub async fn check(&mut self, category: CheckCategory, value: &str) -> Option<RiskRecord> {
        self.set_tab(Tab::Fraud);
        let language = self.language;
        let MountedPanel::Fraud(checker) = &mut self.mounted else {
            return None;
        };

        checker.select_category(category);
        checker.set_input(value);
        if !checker.start_check(language) {
            return None;
        }
        self.event_log.record(ShieldEvent::CheckStarted { category, input: value.to_string() });

        let record = checker.finish_check().await.cloned()?;
        self.event_log.record(ShieldEvent::CheckCompleted {
            category,
            risk_level:      record.risk_level,
            complaint_count: record.complaint_count,
        });
        Some(record)
    }

    /// Send a chat message and wait for the assistant's reply to it.
    ///
    /// `None` if the text is blank or the reply was cancelled.
    pub async fn ask(&mut self, text: &str) -> Option<ChatMessage> {
        self.set_tab(Tab::Chat);
        let language = self.language;
        let MountedPanel::Chat(chat) = &mut self.mounted else {
            return None;
        };

        chat.set_input(text);
        let sent = chat.send(language)?.id;
        self.event_log.record(ShieldEvent::MessageSent { message_id: sent });

        // Earlier replies still pending are delivered first; ours is last.
        let mut last = None;
        while chat.is_typing() {
            let (topic, reply) = chat.receive_reply().await?;
            self.event_log.record(ShieldEvent::ReplyDelivered { message_id: reply.id, topic });
            last = Some(reply.clone());
        }
        last
    }
}
