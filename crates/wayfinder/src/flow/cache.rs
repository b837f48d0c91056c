//! Caller-owned parse memoization
//!
//! Parsing is pure, so a flow only ever needs to be parsed once per distinct
//! source text. `ParseCache` keys parses by a hash of the source and hands
//! out shared `Arc`s; the cache is an explicit value the caller owns, not a
//! process-wide singleton.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::flow::model::ParsedFlow;
use crate::flow::parser::parse_flow;

/// Memoization map from source-text hash to parsed flow
///
/// # Example
///
/// ```rust
/// use wayfinder::flow::ParseCache;
///
/// let mut cache = ParseCache::new();
/// let first = cache.get_or_parse("S1[A]\nS1-->D1\n");
/// let second = cache.get_or_parse("S1[A]\nS1-->D1\n");
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<u64, Arc<ParsedFlow>>,
}

impl ParseCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached flow for this source, parsing it on first sight
    pub fn get_or_parse(&mut self, source: &str) -> Arc<ParsedFlow> {
        let key = source_key(source);
        if let Some(flow) = self.entries.get(&key) {
            return Arc::clone(flow);
        }
        debug!(key, "parse cache miss");
        let flow = Arc::new(parse_flow(source));
        self.entries.insert(key, Arc::clone(&flow));
        flow
    }

    /// Number of distinct sources parsed so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been parsed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached parses
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn source_key(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}
