//! Plain-text rendering of the app shell and each panel.

use finshield_core::{
    achievements::AchievementsPanel,
    app::{MountedPanel, ShieldApp},
    chat::{ChatPanel, Sender},
    dashboard::{DashboardMode, DashboardPanel, TransactionKind},
    format::{group_thousands, signed_tenge, tenge},
    fraud_checker::FraudChecker,
    risk_lookup::RiskRecord,
    types::{Language, Tab},
};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render_app(app: &ShieldApp) -> String {
    let mut out = String::new();
    render_header(app, &mut out);
    match app.panel() {
        MountedPanel::Dashboard(p)    => render_dashboard(app, p, &mut out),
        MountedPanel::Fraud(p)        => render_fraud_checker(app, p, &mut out),
        MountedPanel::Chat(p)         => render_chat(app, p, &mut out),
        MountedPanel::Achievements(p) => render_achievements(app, p, &mut out),
    }
    out
}

/// One verdict, as shown in the alert box after a check.
pub fn render_verdict(app: &ShieldApp, record: &RiskRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", app.text(record.risk_level.verdict_key()), record.reason);
    if record.complaint_count > 0 {
        let _ = writeln!(out, "{}: {}", app.text("fraud.complaints"), record.complaint_count);
    }
    out
}

fn render_header(app: &ShieldApp, out: &mut String) {
    let lang = |l: Language| {
        let label = app.text(if l == Language::Ru { "language.ru" } else { "language.kk" });
        if app.language() == l { format!("[{label}]") } else { label.to_string() }
    };
    let _ = writeln!(
        out,
        "{} — {}    {} {}",
        app.text("app.title"),
        app.text("app.tagline"),
        lang(Language::Ru),
        lang(Language::Kk)
    );

    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            let label = app.text(tab.label_key());
            if *tab == app.active_tab() { format!("[{label}]") } else { label.to_string() }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" | "));
    let _ = writeln!(out);
}

fn render_dashboard(app: &ShieldApp, panel: &DashboardPanel, out: &mut String) {
    let language = app.language();
    let modes: Vec<String> = DashboardMode::ALL
        .iter()
        .map(|mode| {
            let label = app.text(mode.label_key());
            if *mode == panel.mode() { format!("[{label}]") } else { label.to_string() }
        })
        .collect();
    let _ = writeln!(out, "{}: {}", app.text("dashboard.mode"), modes.join(" "));
    let _ = writeln!(out, "  {}", app.text("dashboard.mode_hint"));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", app.text("dashboard.ai_insights"));
    let _ = writeln!(out, "  {}", panel.insight(language));
    let _ = writeln!(out);

    let stats = panel.stats();
    let headline = [
        ("dashboard.total_balance", stats.total_balance, &stats.balance_change),
        ("dashboard.monthly_income", stats.monthly_income, &stats.income_change),
        ("dashboard.monthly_spending", stats.monthly_spending, &stats.spending_change),
    ];
    for (key, amount, change) in headline {
        let _ = writeln!(
            out,
            "  {:<24} {:>12}  {}",
            app.text(key),
            tenge(amount),
            change.text(language)
        );
    }
    let _ = writeln!(
        out,
        "  {:<24} {:>12}  {} {}% {}",
        app.text("dashboard.savings_goal"),
        tenge(stats.savings_goal),
        bar(f64::from(stats.savings_progress)),
        stats.savings_progress,
        app.text("dashboard.completed")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("dashboard.by_category"));
    for share in panel.category_shares(language) {
        let _ = writeln!(
            out,
            "  {:<14} {:>5.1}% {} {:>10}",
            share.name,
            share.percent,
            bar(share.percent),
            tenge(share.amount)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{}  ({} / {})",
        app.text("dashboard.trends"),
        app.text("dashboard.income"),
        app.text("dashboard.spending")
    );
    for trend in panel.trends() {
        let _ = writeln!(
            out,
            "  {:<10} {:>9} / {:>9}",
            trend.month.text(language),
            group_thousands(trend.income),
            group_thousands(trend.spending)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("dashboard.recent"));
    for txn in panel.transactions() {
        let arrow = match txn.kind {
            TransactionKind::Income  => "↗",
            TransactionKind::Expense => "↘",
        };
        let _ = writeln!(
            out,
            "  {arrow} {:<14} {:<14} {:>12}  {}",
            txn.name.text(language),
            txn.category.text(language),
            signed_tenge(txn.amount),
            txn.date
        );
    }
}

fn render_fraud_checker(app: &ShieldApp, panel: &FraudChecker, out: &mut String) {
    let _ = writeln!(out, "{}", app.text("fraud.title"));
    let _ = writeln!(out, "  {}", app.text("fraud.subtitle"));
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        app.text("fraud.check_phone"),
        app.text("fraud.check_card"),
        app.text("fraud.check_website")
    );
    let input = if panel.input().is_empty() {
        app.text(panel.placeholder_key()).to_string()
    } else {
        panel.input().to_string()
    };
    let _ = writeln!(out, "  [{}] > {input}  ({})", panel.category(), app.text("fraud.check"));
    if panel.is_checking() {
        let _ = writeln!(out, "  ...");
    }
    if let Some(record) = panel.result() {
        for line in render_verdict(app, record).lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    let _ = writeln!(out);

    let stats = panel.stats();
    let _ = writeln!(out, "{}", app.text("fraud.stats"));
    let counters = [
        ("fraud.total_checks", stats.total_checks),
        ("fraud.fraud_detected", stats.fraud_detected),
        ("fraud.safe_transfers", stats.safe_transfers),
    ];
    for (key, count) in counters {
        let _ = writeln!(
            out,
            "  {:<24} {:>6}",
            app.text(key),
            group_thousands(count.into())
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("fraud.recent_checks"));
    for check in panel.recent_checks() {
        let _ = writeln!(
            out,
            "  {:<7} {:<22} {:<8} {}",
            app.text(check.risk.verdict_key()),
            check.value,
            check.category,
            check.date
        );
    }
}

fn render_chat(app: &ShieldApp, panel: &ChatPanel, out: &mut String) {
    let _ = writeln!(out, "{}", app.text("chat.title"));
    let _ = writeln!(out, "  {}", app.text("chat.subtitle"));
    let _ = writeln!(out);
    for message in panel.messages() {
        let who = match message.sender {
            Sender::User      => ">",
            Sender::Assistant => "FinAI:",
        };
        let _ = writeln!(out, "{who} ({})", message.time_label());
        for line in message.text.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    if panel.is_typing() {
        let _ = writeln!(out, "FinAI: ...");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", app.text("chat.suggestions"));
    for (i, question) in panel.suggestions(app.language()).iter().enumerate() {
        let _ = writeln!(out, "  {}. {question}", i + 1);
    }
}

fn render_achievements(app: &ShieldApp, panel: &AchievementsPanel, out: &mut String) {
    let language = app.language();
    let data = panel.data();
    let points = app.text("achievements.points");

    let _ = writeln!(out, "{}", app.text("achievements.title"));
    let _ = writeln!(out, "  {}", app.text("achievements.subtitle"));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}: {}  ({} {})",
        app.text("achievements.total_points"),
        group_thousands(data.total_points.into()),
        app.text("achievements.level"),
        data.level
    );
    let _ = writeln!(
        out,
        "  {}: {} {} -> {} {}  {} {} {}",
        app.text("achievements.next_level"),
        app.text("achievements.level"),
        data.level,
        app.text("achievements.level"),
        panel.next_level(),
        bar(f64::from(data.level_progress)),
        group_thousands(data.points_to_next_level.into()),
        points
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("achievements.badges"));
    for badge in &data.badges {
        let status = if badge.unlocked { app.text("achievements.badge_unlocked") } else { "—" };
        let _ = writeln!(
            out,
            "  {:<18} {:<28} {status}",
            badge.name.text(language),
            badge.description.text(language)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("achievements.challenges"));
    for challenge in &data.challenges {
        let _ = writeln!(
            out,
            "  {}  +{} {points}",
            challenge.name.text(language),
            challenge.reward
        );
        let _ = writeln!(out, "    {}", challenge.description.text(language));
        let _ = writeln!(
            out,
            "    {} {}% {}",
            bar(f64::from(challenge.progress)),
            challenge.progress,
            app.text("achievements.completed")
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", app.text("achievements.leaderboard"));
    for entry in &data.leaderboard {
        let place = if entry.has_trophy() { "🏆".to_string() } else { format!("#{}", entry.rank) };
        let you = if entry.is_user {
            format!("  [{}]", app.text("achievements.you"))
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {place:<4} {:<14} {:>6} {points}{you}",
            entry.name.text(language),
            group_thousands(entry.points.into())
        );
    }
}

/// A fixed-width progress bar for a percentage.
fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(bar(250.0), bar(100.0));
    }

    #[test]
    fn header_marks_active_tab_and_language() {
        let app = ShieldApp::builtin().unwrap();
        let text = render_app(&app);
        assert!(text.contains("[Дашборд]"));
        assert!(text.contains("[РУС]"));
        assert!(text.contains("425,000 ₸"));
    }
}
