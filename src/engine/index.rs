//! Inverted index for the dashboard's global search box.
//!
//! Maps normalized tokens from every entity's searchable fields to record
//! references, so one query can hit students, faculty, news and rooms at once.
//!
//! Example: `{"patel": [student:S001, faculty:F007], "seminar": [room:R201]}`

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::Record;

/// Configuration for index generation.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Minimum token length to include (default: 2)
    pub min_token_length: usize,
    /// Maximum tokens per record (default: 50)
    pub max_tokens_per_record: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            max_tokens_per_record: 50,
        }
    }
}

/// Reference to a record of some entity type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub entity: String,
    pub id: String,
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity, self.id)
    }
}

/// Token to record references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Total number of indexed records
    pub record_count: usize,
    /// Shortest token the index was built with; shorter query tokens are ignored
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
    /// The inverted index: token -> sorted record references
    pub index: HashMap<String, Vec<RecordRef>>,
}

fn default_min_token_length() -> usize {
    IndexConfig::default().min_token_length
}

impl SearchIndex {
    pub fn builder() -> SearchIndexBuilder {
        SearchIndexBuilder::new()
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.index.len()
    }

    /// References containing every token of `query`, sorted.
    ///
    /// Tokens the index would have dropped (stopwords, short tokens) are ignored;
    /// a query with no usable tokens finds nothing.
    pub fn lookup(&self, query: &str) -> Vec<RecordRef> {
        let tokens = tokenize(query, self.min_token_length);
        let mut result: Option<BTreeSet<&RecordRef>> = None;

        for token in &tokens {
            let hits: BTreeSet<&RecordRef> = self
                .index
                .get(token)
                .map(|refs| refs.iter().collect())
                .unwrap_or_default();
            result = Some(match result {
                None => hits,
                Some(acc) => acc.intersection(&hits).copied().collect(),
            });
        }

        result
            .map(|refs| refs.into_iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Builder for constructing a search index.
pub struct SearchIndexBuilder {
    config: IndexConfig,
    index: HashMap<String, BTreeSet<RecordRef>>,
    record_count: usize,
}

impl SearchIndexBuilder {
    /// Create a new index builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create a new index builder with custom configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            index: HashMap::new(),
            record_count: 0,
        }
    }

    /// Add one record's searchable fields.
    pub fn add_record<R: Record>(&mut self, record: &R) {
        self.record_count += 1;
        let reference = RecordRef {
            entity: R::ENTITY.to_string(),
            id: record.id().to_string(),
        };

        let mut tokens = Vec::new();
        for name in R::SEARCHABLE {
            if let Some(value) = record.field(name) {
                for text in value.values() {
                    tokens.extend(tokenize(text, self.config.min_token_length));
                }
            }
        }
        tokens.truncate(self.config.max_tokens_per_record);

        for token in tokens {
            self.index.entry(token).or_default().insert(reference.clone());
        }
    }

    /// Add a whole collection.
    pub fn add_records<R: Record>(&mut self, records: &[R]) -> &mut Self {
        for record in records {
            self.add_record(record);
        }
        self
    }

    /// Build the final index.
    pub fn build(self) -> SearchIndex {
        let index = self
            .index
            .into_iter()
            .map(|(token, refs)| (token, refs.into_iter().collect()))
            .collect();

        SearchIndex {
            record_count: self.record_count,
            min_token_length: self.config.min_token_length,
            index,
        }
    }
}

impl Default for SearchIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase Unicode words, short tokens and stopwords removed.
fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .filter(|word| word.chars().count() >= min_len)
        .filter(|word| !is_stopword(word))
        .map(String::from)
        .collect()
}

fn is_stopword(word: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        "the", "an", "is", "are", "was", "be", "of", "to", "in", "for", "on", "with", "at", "by",
        "from", "as", "or", "and", "dr", "mr", "ms", "mrs", "prof",
    ];
    STOPWORDS.contains(&word)
}
