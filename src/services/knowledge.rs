// src/services/knowledge.rs
use std::{collections::HashMap, collections::HashSet, sync::Arc};

use tokio::sync::RwLock;

use crate::message::CompanyDocument;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "you", "your", "with", "what", "how", "can", "does", "this",
    "that", "from", "have", "has", "was", "were", "will", "about", "which", "who", "when",
    "where", "why", "our", "not", "but", "any", "all", "its", "they", "them", "there",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Passage {
    pub source: String,
    pub text: String,
    keywords: HashSet<String>,
}

impl Passage {
    fn new(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            text: text.to_string(),
            keywords: keywords(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub passage: Passage,
    /// Share of the query keywords found in the passage, 0.0..=1.0.
    pub confidence: f64,
}

/// Lowercased words of three or more characters, minus common stopwords.
pub fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Split a document into paragraph passages. Any blank or whitespace-only
/// line ends a paragraph, whatever the line endings.
pub fn split_passages(doc: &CompanyDocument) -> Vec<Passage> {
    let mut passages = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in doc.text.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if !line.is_empty() {
            paragraph.push(line);
        } else if !paragraph.is_empty() {
            passages.push(Passage::new(&doc.source, &paragraph.join("\n")));
            paragraph.clear();
        }
    }
    passages
}

/// Per-company passages uploaded through `/setup`.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    inner: Arc<RwLock<HashMap<String, Vec<Passage>>>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a company's knowledge. Returns the number of passages stored;
    /// documents without any text leave existing knowledge untouched.
    pub async fn set_documents(&self, company_id: &str, docs: &[CompanyDocument]) -> usize {
        let passages: Vec<Passage> = docs.iter().flat_map(split_passages).collect();
        let count = passages.len();
        if count == 0 {
            return 0;
        }
        let mut guard = self.inner.write().await;
        guard.insert(company_id.to_string(), passages);
        count
    }

    pub async fn has_company(&self, company_id: &str) -> bool {
        self.inner.read().await.contains_key(company_id)
    }

    /// Best passage for `query`, or `None` if the company is unknown, has
    /// no passages, or the query has no keywords.
    pub async fn best_match(&self, company_id: &str, query: &str) -> Option<Match> {
        let query_words = keywords(query);
        if query_words.is_empty() {
            return None;
        }

        let guard = self.inner.read().await;
        let passages = guard.get(company_id)?;

        // First passage wins ties, so earlier documents take precedence.
        let mut best: Option<(&Passage, usize)> = None;
        for passage in passages {
            let hits = query_words.intersection(&passage.keywords).count();
            if best.is_none_or(|(_, top)| hits > top) {
                best = Some((passage, hits));
            }
        }

        best.map(|(passage, hits)| Match {
            passage: passage.clone(),
            confidence: hits as f64 / query_words.len() as f64,
        })
    }
}
