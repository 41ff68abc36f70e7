//! Splits a chat message into renderable parts.
//!
//! OGQ sticker chats become a single [`MessagePart::Ogq`]. Otherwise, when an
//! emoji table is installed and the comment contains `/title/` tokens, those
//! tokens become [`MessagePart::Emoji`]. Remaining text is split into word and
//! space runs, and words that look like links become [`MessagePart::Url`].

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::{ChatEvent, Ogq};

static WORD_RUNS: OnceLock<Regex> = OnceLock::new();
static URL: OnceLock<Regex> = OnceLock::new();

fn word_runs() -> &'static Regex {
    WORD_RUNS.get_or_init(|| Regex::new(r"[^ ]+| +").expect("word-run regex is valid"))
}

fn url() -> &'static Regex {
    URL.get_or_init(|| Regex::new(r"(?i)https?://\S+").expect("url regex is valid"))
}

/// A renderable piece of a chat message.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MessagePart {
    Text(String),
    Url(String),
    Emoji {
        title: String,
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
    Ogq(Ogq),
}

/// Emoji titles and their image URLs.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    images: HashMap<String, String>,
    regex: Option<Regex>,
}

impl EmojiTable {
    /// Build a table from `title -> image url`.
    ///
    /// Longer titles are tried first so `/ab/` wins over `/a/`.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the combined pattern cannot be compiled.
    pub fn new(images: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut titles: Vec<&str> = images
            .keys()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        titles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let regex = if titles.is_empty() {
            None
        } else {
            let alternation = titles
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            let compiled = Regex::new(&format!("/({alternation})/")).map_err(|e| ConfigError::Invalid {
                field: "emoji".to_string(),
                reason: e.to_string(),
            })?;
            Some(compiled)
        };

        Ok(Self { images, regex })
    }

    /// Merge `overrides` on top of `base`; streamer emoji shadow the defaults.
    ///
    /// # Errors
    /// See [`EmojiTable::new`].
    pub fn merged(
        base: HashMap<String, String>,
        overrides: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut images = base;
        images.extend(overrides);
        Self::new(images)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// True if `text` contains at least one known `/title/` token.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }

    fn process(&self, text: &str) -> Vec<MessagePart> {
        let Some(re) = self.regex.as_ref() else {
            return split_text(text);
        };

        let mut parts = Vec::new();
        let mut last = 0;
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(title)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            parts.extend(split_text(&text[last..whole.start()]));
            parts.push(MessagePart::Emoji {
                title: title.as_str().to_string(),
                image_url: self.images.get(title.as_str()).cloned().unwrap_or_default(),
            });
            last = whole.end();
        }
        parts.extend(split_text(&text[last..]));
        parts
    }
}

/// Split plain text into word and space runs, tagging links.
#[must_use]
pub fn split_text(text: &str) -> Vec<MessagePart> {
    word_runs()
        .find_iter(text)
        .map(|m| {
            let run = m.as_str().to_string();
            if url().is_match(&run) {
                MessagePart::Url(run)
            } else {
                MessagePart::Text(run)
            }
        })
        .collect()
}

/// Turns chat events into message parts.
#[derive(Debug, Clone, Default)]
pub struct MessageProcessor {
    emoji: Option<EmojiTable>,
}

impl MessageProcessor {
    /// Processor without emoji support.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor that also renders emoji from `table`.
    #[must_use]
    pub const fn with_emoji(table: EmojiTable) -> Self {
        Self { emoji: Some(table) }
    }

    /// Install or replace the emoji table.
    pub fn update_emoji(&mut self, table: EmojiTable) {
        self.emoji = Some(table);
    }

    /// Compute the parts for `chat`.
    #[must_use]
    pub fn process(&self, chat: &ChatEvent) -> Vec<MessagePart> {
        if let Some(ogq) = &chat.ogq {
            return vec![MessagePart::Ogq(ogq.clone())];
        }
        match &self.emoji {
            Some(table) if table.matches(&chat.comment) => table.process(&chat.comment),
            _ => split_text(&chat.comment),
        }
    }
}
