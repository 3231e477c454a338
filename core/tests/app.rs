//! App shell: tabs, language and the session event log.

use finshield_core::{
    app::ShieldApp,
    chat::Sender,
    config::ShieldConfig,
    dashboard::DashboardMode,
    event::ShieldEvent,
    keyword_responder::ResponseTopic,
    risk_lookup::{CheckCategory, RiskLevel},
    types::{Language, Tab},
};
use std::time::Duration;

fn app(delay: Duration) -> ShieldApp {
    let _ = env_logger::builder().is_test(true).try_init();
    ShieldApp::new(ShieldConfig::builtin().unwrap().with_latency(delay, delay))
}

fn kinds(app: &ShieldApp) -> Vec<&'static str> {
    app.events().iter().map(|e| e.event.kind()).collect()
}

#[test]
fn session_starts_on_dashboard_in_russian() {
    let app = app(Duration::ZERO);
    assert_eq!(app.active_tab(), Tab::Dashboard);
    assert_eq!(app.language(), Language::Ru);
    assert!(app.dashboard().is_some());
    assert_eq!(app.text("app.tagline"), "Умный финансовый защитник");
    assert_eq!(kinds(&app), vec!["session_started"]);
    assert!(app.events().iter().all(|e| e.session_id == app.session_id()));
}

#[test]
fn language_switch_relabels_without_resetting() {
    let mut app = app(Duration::ZERO);
    app.set_mode(DashboardMode::Economy);
    app.set_language(Language::Kk);

    assert_eq!(app.text("tab.chat"), "AI көмекші");
    let dashboard = app.dashboard().expect("dashboard mounted");
    assert_eq!(dashboard.mode(), DashboardMode::Economy);
    assert!(dashboard.insight(app.language()).starts_with("🎯 Сіз тамаққа"));

    app.set_language(Language::Kk);
    assert_eq!(kinds(&app), vec!["session_started", "mode_changed", "language_changed"]);
}

#[test]
fn returning_to_a_tab_starts_over() {
    let mut app = app(Duration::ZERO);
    app.set_mode(DashboardMode::Savings);
    app.set_tab(Tab::Achievements);
    assert!(app.dashboard().is_none());
    assert!(app.achievements().is_some());

    app.set_tab(Tab::Dashboard);
    assert_eq!(app.dashboard().map(|d| d.mode()), Some(DashboardMode::Balance));
}

#[tokio::test]
async fn check_navigates_and_records_events() {
    let mut app = app(Duration::from_millis(5));
    let record = app
        .check(CheckCategory::Phone, "+7 (777) 123-45-67")
        .await
        .expect("verdict");
    assert_eq!(record.risk_level, RiskLevel::High);
    assert_eq!(app.active_tab(), Tab::Fraud);
    assert_eq!(app.fraud_checker().and_then(|f| f.result()), Some(&record));

    let last = &app.events().last().expect("events").event;
    assert_eq!(
        last,
        &ShieldEvent::CheckCompleted {
            category:        CheckCategory::Phone,
            risk_level:      RiskLevel::High,
            complaint_count: 12,
        }
    );
}

#[tokio::test]
async fn verdict_keeps_language_it_was_produced_in() {
    let mut app = app(Duration::ZERO);
    let record = app.check(CheckCategory::Card, "5500 4501 8765 4321").await.expect("verdict");
    app.set_language(Language::Kk);
    assert_eq!(record.reason, "Безопасная карта");
    let shown = app.fraud_checker().and_then(|f| f.result()).map(|r| r.reason.as_str());
    assert_eq!(shown, Some("Безопасная карта"));
}

#[tokio::test]
async fn ask_appends_reply_in_current_language() {
    let mut app = app(Duration::from_millis(5));
    app.set_language(Language::Kk);
    let reply = app.ask("проверка мошенничества").await.expect("reply");
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(reply.text.starts_with("Аударымнан бұрын"));

    let chat = app.chat().expect("chat mounted");
    assert_eq!(chat.messages().len(), 3);
    assert!(chat.messages()[0].text.starts_with("Сәлем!"), "greeting uses mount-time language");
}

/// Leaving a tab with a pending reply cancels it; nothing arrives later.
#[test]
fn leaving_tab_cancels_pending_work() {
    let mut app = app(Duration::from_secs(30));
    app.set_tab(Tab::Chat);
    let chat = app.chat_mut().expect("chat mounted");
    chat.set_input("хочу накопить");
    assert!(chat.send(Language::Ru).is_some());
    assert!(chat.is_typing());

    app.set_tab(Tab::Fraud);
    let torn_down = app
        .events()
        .iter()
        .rev()
        .find_map(|e| match e.event {
            ShieldEvent::PanelTornDown { tab: Tab::Chat, cancelled } => Some(cancelled),
            _ => None,
        });
    assert_eq!(torn_down, Some(1));

    app.set_tab(Tab::Chat);
    let chat = app.chat().expect("chat remounted");
    assert_eq!(chat.messages().len(), 1, "remounted chat starts from the greeting");
    assert!(!chat.is_typing());
}

#[tokio::test]
async fn ask_after_unanswered_send_gets_its_own_reply() {
    let mut app = app(Duration::from_millis(5));
    app.set_tab(Tab::Chat);
    let chat = app.chat_mut().expect("chat mounted");
    chat.set_input("хочу накопить");
    assert!(chat.send(Language::Ru).is_some());

    let reply = app.ask("проверка мошенничества").await.expect("reply");
    assert!(reply.text.starts_with("Перед переводом"));
    assert!(!app.chat().expect("chat mounted").is_typing());

    let delivered: Vec<_> = app
        .events()
        .iter()
        .filter_map(|e| match e.event {
            ShieldEvent::ReplyDelivered { message_id, topic } => Some((message_id, topic)),
            _ => None,
        })
        .collect();
    assert_eq!(delivered, vec![(4, ResponseTopic::Savings), (5, ResponseTopic::Security)]);
}

#[tokio::test]
async fn blank_question_gets_no_reply() {
    let mut app = app(Duration::ZERO);
    assert!(app.ask("   ").await.is_none());
    assert!(!kinds(&app).contains(&"message_sent"));
}

#[test]
fn events_since_skips_earlier_entries() {
    let mut app = app(Duration::ZERO);
    let mark = app.events().len() as u64;
    app.set_tab(Tab::Fraud);
    let fresh: Vec<&str> = app.events_since(mark).iter().map(|e| e.event.kind()).collect();
    assert_eq!(fresh, vec!["panel_torn_down", "tab_changed"]);
    assert!(app.events_since(1_000).is_empty());
}
