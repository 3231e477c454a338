//! FinAI Shield core: a financial-literacy demo with a static fraud
//! checker, a canned chat assistant, a mock dashboard and achievements.
//!
//! Everything runs in one session, in memory, over the data under `data/`.

pub mod achievements;
pub mod app;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod format;
pub mod fraud_checker;
pub mod keyword_responder;
pub mod latency;
pub mod panel;
pub mod risk_lookup;
pub mod types;
