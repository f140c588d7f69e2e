//! Word validation against an external dictionary.
//!
//! Lookups are asynchronous and may fail. In [`ValidationMode::Lenient`] a
//! failed lookup accepts the word so an outage never blocks play; in
//! [`ValidationMode::Strict`] the move is refused until the dictionary
//! answers. A lookup that outlives the configured timeout abandons the whole
//! move; nothing is written and the player may resubmit.

#![cfg(feature = "std")]

use std::collections::HashSet;
use std::time::Duration;

use crate::common::GameError;
use crate::service::ServiceError;

#[async_trait::async_trait]
pub trait Dictionary: Send + Sync {
    async fn is_real_word(&self, word: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// A failed lookup rejects the move.
    Strict,
    /// A failed lookup accepts the word.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
    /// Upper bound on validating all words of one move.
    pub timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Lenient,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Decision for a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
    /// Lookup failed and lenient mode let the word through.
    Unverified,
    /// Lookup failed and strict mode refused to guess.
    Unavailable,
}

pub struct WordValidator<D: Dictionary> {
    dictionary: D,
    config: ValidatorConfig,
}

impl<D: Dictionary> WordValidator<D> {
    pub fn new(dictionary: D, config: ValidatorConfig) -> Self {
        Self { dictionary, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub async fn validate_word(&self, word: &str) -> Verdict {
        match self.dictionary.is_real_word(word).await {
            Ok(true) => Verdict::Accepted,
            Ok(false) => Verdict::Rejected,
            Err(e) => match self.config.mode {
                ValidationMode::Lenient => {
                    log::warn!("dictionary lookup for '{}' failed, accepting: {}", word, e);
                    Verdict::Unverified
                }
                ValidationMode::Strict => {
                    log::warn!("dictionary lookup for '{}' failed: {}", word, e);
                    Verdict::Unavailable
                }
            },
        }
    }

    /// Validate every word of a move within the configured timeout.
    pub async fn validate_all(&self, words: &[String]) -> Result<(), ServiceError> {
        let check = async {
            for word in words {
                match self.validate_word(word).await {
                    Verdict::Accepted | Verdict::Unverified => {}
                    Verdict::Rejected => return Err(GameError::WordRejected(word.clone()).into()),
                    Verdict::Unavailable => {
                        return Err(ServiceError::DictionaryUnavailable(word.clone()))
                    }
                }
            }
            Ok::<(), ServiceError>(())
        };
        match tokio::time::timeout(self.config.timeout, check).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("word validation timed out after {:?}", self.config.timeout);
                Err(ServiceError::ValidationTimedOut)
            }
        }
    }
}

/// Dictionary backed by an in-memory word list. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_ascii_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// One word per line.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait::async_trait]
impl Dictionary for WordListDictionary {
    async fn is_real_word(&self, word: &str) -> anyhow::Result<bool> {
        Ok(self.words.contains(&word.to_ascii_uppercase()))
    }
}
