//! finshield: terminal front end for FinAI Shield.
//!
//! Usage:
//!   finshield                                   # print every tab
//!   finshield --lang kk --tab fraud
//!   finshield --check "phone=+7 (777) 123-45-67"
//!   finshield --ask "Где я больше всего трачу?" --instant
//!   finshield --ipc-mode --data-dir ./core/data

mod render;

use anyhow::{Context, Result};
use finshield_core::{
    app::{MountedPanel, ShieldApp},
    chat::ChatMessage,
    config::ShieldConfig,
    dashboard::DashboardMode,
    event::EventLogEntry,
    risk_lookup::{CheckCategory, RiskRecord},
    types::{Language, Tab},
};
use std::env;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetLanguage { language: Language },
    SetTab { tab: Tab },
    SetMode { mode: DashboardMode },
    Check { category: CheckCategory, value: String },
    Chat { text: String },
    Quit,
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PanelState<'a> {
    Dashboard {
        mode:    DashboardMode,
        insight: &'a str,
    },
    Fraud {
        category: CheckCategory,
        input:    &'a str,
        checking: bool,
        result:   Option<&'a RiskRecord>,
        verdict:  Option<&'a str>,
    },
    Chat {
        messages: &'a [ChatMessage],
        typing:   bool,
    },
    Achievements {
        total_points:    u32,
        level:           u32,
        unlocked_badges: usize,
    },
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    session_id: &'a str,
    language:   Language,
    tab:        Tab,
    panel:      PanelState<'a>,
    /// Events recorded since the previous response.
    events:     &'a [EventLogEntry],
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let language: Language = arg_value(&args, "--lang")
        .map(str::parse)
        .transpose()?
        .unwrap_or_default();
    let tab: Option<Tab> = arg_value(&args, "--tab").map(str::parse).transpose()?;
    let data_dir = arg_value(&args, "--data-dir");
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let instant = has_flag(&args, "--instant");

    let mut config = match data_dir {
        Some(dir) => ShieldConfig::load(dir)?,
        None => ShieldConfig::builtin()?,
    };
    if instant {
        config = config.instant();
    }
    let mut app = ShieldApp::with_language(config, language);

    if ipc_mode {
        run_ipc_loop(&mut app).await
    } else {
        println!("FinAI Shield — finshield");
        println!("  session:   {}", app.session_id());
        println!("  language:  {language}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(built-in)"));
        println!();
        run_demo(&mut app, &args, tab).await
    }
}

async fn run_demo(app: &mut ShieldApp, args: &[String], tab: Option<Tab>) -> Result<()> {
    if let Some(pair) = arg_value(args, "--check") {
        let (category, value) = pair
            .split_once('=')
            .context("--check expects <category>=<value>")?;
        let category: CheckCategory = category.parse()?;
        match app.check(category, value).await {
            Some(record) => print!("{}", render::render_verdict(app, &record)),
            None => log::warn!("check skipped: empty input"),
        }
        println!();
        print!("{}", render::render_app(app));
        return Ok(());
    }

    if let Some(question) = arg_value(args, "--ask") {
        if app.ask(question).await.is_none() {
            log::warn!("question skipped: blank input");
        }
        print!("{}", render::render_app(app));
        return Ok(());
    }

    let tabs = match tab {
        Some(tab) => vec![tab],
        None => Tab::ALL.to_vec(),
    };
    for tab in tabs {
        app.set_tab(tab);
        println!("{}", render::render_app(app));
    }
    Ok(())
}

async fn run_ipc_loop(app: &mut ShieldApp) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut reported: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(reply) = handle_line(app, &line, reported).await? else {
            break;
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
        reported = app.events().len() as u64;
    }
    Ok(())
}

/// Apply one IPC command line and build the JSON reply.
///
/// Malformed lines get an `{"error": ..}` reply and change nothing.
/// `None` means the session should end.
async fn handle_line(app: &mut ShieldApp, line: &str, since: u64) -> Result<Option<String>> {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("ipc: rejected command: {e}");
            return Ok(Some(serde_json::json!({ "error": e.to_string() }).to_string()));
        }
    };

    match cmd {
        IpcCommand::Quit => return Ok(None),
        IpcCommand::GetState => {}
        IpcCommand::SetLanguage { language } => app.set_language(language),
        IpcCommand::SetTab { tab } => app.set_tab(tab),
        IpcCommand::SetMode { mode } => app.set_mode(mode),
        IpcCommand::Check { category, value } => {
            if app.check(category, &value).await.is_none() {
                log::warn!("ipc: check ignored (empty input)");
            }
        }
        IpcCommand::Chat { text } => {
            if app.ask(&text).await.is_none() {
                log::warn!("ipc: chat ignored (blank input)");
            }
        }
    }

    let state = build_ui_state(app, since);
    Ok(Some(serde_json::to_string(&state)?))
}

fn build_ui_state(app: &ShieldApp, since: u64) -> UiState<'_> {
    let panel = match app.panel() {
        MountedPanel::Dashboard(p) => PanelState::Dashboard {
            mode:    p.mode(),
            insight: p.insight(app.language()),
        },
        MountedPanel::Fraud(p) => PanelState::Fraud {
            category: p.category(),
            input:    p.input(),
            checking: p.is_checking(),
            result:   p.result(),
            verdict:  p.result().map(|r| app.text(r.risk_level.verdict_key())),
        },
        MountedPanel::Chat(p) => PanelState::Chat {
            messages: p.messages(),
            typing:   p.is_typing(),
        },
        MountedPanel::Achievements(p) => PanelState::Achievements {
            total_points:    p.data().total_points,
            level:           p.data().level,
            unlocked_badges: p.unlocked_badges().count(),
        },
    };

    UiState {
        session_id: app.session_id(),
        language:   app.language(),
        tab:        app.active_tab(),
        panel,
        events:     app.events_since(since),
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
