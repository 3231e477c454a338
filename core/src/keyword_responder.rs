//! Canned chat responder.
//!
//! RULE: topics are tested in a fixed priority order
//! (spending, savings, security, tips) and the first match wins.
//! Input that matches nothing gets the default help response.
//!
//! Keyword stems are stored per language, but every stem of a topic is
//! tested regardless of the display language; the language only selects
//! which response body is returned.

use crate::{
    error::{ShieldError, ShieldResult},
    types::{Language, Localized},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTopic {
    Spending,
    Savings,
    Security,
    Tips,
    Default,
}

impl ResponseTopic {
    /// Match order. Default is never matched, only fallen back to.
    pub const PRIORITY: [ResponseTopic; 4] = [
        ResponseTopic::Spending,
        ResponseTopic::Savings,
        ResponseTopic::Security,
        ResponseTopic::Tips,
    ];

    pub const ALL: [ResponseTopic; 5] = [
        ResponseTopic::Spending,
        ResponseTopic::Savings,
        ResponseTopic::Security,
        ResponseTopic::Tips,
        ResponseTopic::Default,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResponseTopic::Spending => "spending",
            ResponseTopic::Savings  => "savings",
            ResponseTopic::Security => "security",
            ResponseTopic::Tips     => "tips",
            ResponseTopic::Default  => "default",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResponder {
    keywords:  HashMap<ResponseTopic, Localized<Vec<String>>>,
    responses: HashMap<ResponseTopic, Localized<String>>,
}

impl KeywordResponder {
    /// Every topic must have a response body, and every matchable
    /// topic must have at least one stem.
    pub fn validate(&self) -> ShieldResult<()> {
        for topic in ResponseTopic::ALL {
            if !self.responses.contains_key(&topic) {
                return Err(ShieldError::MissingText {
                    key: format!("chat.responses.{}", topic.name()),
                });
            }
        }
        for topic in ResponseTopic::PRIORITY {
            let has_stems = self
                .keywords
                .get(&topic)
                .is_some_and(|k| k.both().iter().any(|stems| !stems.is_empty()));
            if !has_stems {
                return Err(ShieldError::MissingText {
                    key: format!("chat.keywords.{}", topic.name()),
                });
            }
        }
        Ok(())
    }

    /// Pick the topic for `raw`. Lowercases before matching.
    pub fn classify(&self, raw: &str) -> ResponseTopic {
        let lowered = raw.to_lowercase();
        ResponseTopic::PRIORITY
            .into_iter()
            .find(|topic| self.matches(*topic, &lowered))
            .unwrap_or(ResponseTopic::Default)
    }

    pub fn response(&self, language: Language, topic: ResponseTopic) -> &str {
        self.responses
            .get(&topic)
            .map_or("", |body| body.text(language))
    }

    pub fn respond(&self, language: Language, raw: &str) -> &str {
        self.response(language, self.classify(raw))
    }

    fn matches(&self, topic: ResponseTopic, lowered: &str) -> bool {
        self.keywords.get(&topic).is_some_and(|stems| {
            stems
                .both()
                .into_iter()
                .flatten()
                .any(|stem| lowered.contains(stem.as_str()))
        })
    }
}
