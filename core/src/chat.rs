//! Chat panel: a session of user messages and canned assistant replies.
//!
//! RULE: message ids are assigned when a message is appended, so ids
//! are unique and increasing and id order equals chronological order.
//! Replies are produced by the keyword responder and revealed after
//! the reply delay. Teardown cancels every reply still pending.

use crate::{
    config::ShieldConfig,
    keyword_responder::ResponseTopic,
    latency::Delayed,
    panel::Panel,
    types::{Language, Localized, MessageId, Tab},
};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id:        MessageId,
    pub text:      String,
    pub sender:    Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Local wall-clock time as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Greeting and suggested questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatScript {
    pub greeting:    Localized<String>,
    pub suggestions: Vec<Localized<String>>,
}

/// A reply waiting out its delay.
#[derive(Debug, Clone)]
struct Reply {
    topic: ResponseTopic,
    text:  String,
}

pub struct ChatPanel {
    config:   Arc<ShieldConfig>,
    messages: Vec<ChatMessage>,
    next_id:  MessageId,
    input:    String,
    pending:  VecDeque<Delayed<Reply>>,
}

impl ChatPanel {
    /// Mount a fresh session. The greeting uses the language at mount time.
    pub fn new(config: Arc<ShieldConfig>, language: Language) -> Self {
        let greeting = config.chat_script.greeting.get(language).clone();
        let mut panel = Self {
            config,
            messages: Vec::new(),
            next_id:  1,
            input:    String::new(),
            pending:  VecDeque::new(),
        };
        panel.append(greeting, Sender::Assistant);
        panel
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn suggestions(&self, language: Language) -> Vec<&str> {
        self.config
            .chat_script
            .suggestions
            .iter()
            .map(|s| s.text(language))
            .collect()
    }

    /// Copy suggestion `index` into the input. False if out of range.
    pub fn use_suggestion(&mut self, language: Language, index: usize) -> bool {
        match self.config.chat_script.suggestions.get(index) {
            Some(question) => {
                self.input = question.get(language).clone();
                true
            }
            None => false,
        }
    }

    /// Whitespace-only input cannot be sent.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// True while at least one reply is pending.
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Append the input as a user message and schedule the reply.
    ///
    /// Returns the appended message, or `None` if the input was blank.
    pub fn send(&mut self, language: Language) -> Option<&ChatMessage> {
        if !self.can_send() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        let topic = self.config.responder.classify(&text);
        let reply = Reply {
            topic,
            text: self.config.responder.response(language, topic).to_string(),
        };
        log::debug!("chat: user message classified as {}", topic.name());

        self.pending
            .push_back(Delayed::schedule(self.config.latency.reply_delay(), reply));
        Some(self.append(text, Sender::User))
    }

    /// Wait for the oldest pending reply and append it.
    ///
    /// Returns the appended message and its topic, or `None` if nothing
    /// was pending or the reply was cancelled.
    pub async fn receive_reply(&mut self) -> Option<(ResponseTopic, &ChatMessage)> {
        let pending = self.pending.pop_front()?;
        let reply = pending.wait().await?;
        Some((reply.topic, self.append(reply.text, Sender::Assistant)))
    }

    /// Type, send and wait for the reply, as a user would.
    ///
    /// Replies arrive in send order, so any earlier pending replies are
    /// delivered first. Returns the reply to `text`.
    pub async fn ask(&mut self, language: Language, text: &str) -> Option<ChatMessage> {
        self.set_input(text);
        self.send(language)?;
        let mut last = None;
        while self.is_typing() {
            let (_, message) = self.receive_reply().await?;
            last = Some(message.clone());
        }
        last
    }

    fn append(&mut self, text: String, sender: Sender) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}

impl Panel for ChatPanel {
    fn tab(&self) -> Tab {
        Tab::Chat
    }

    fn teardown(&mut self) -> usize {
        let cancelled = self.pending.len();
        for reply in self.pending.drain(..) {
            reply.cancel();
        }
        if cancelled > 0 {
            log::debug!("chat: cancelled {cancelled} pending replies");
        }
        cancelled
    }
}
