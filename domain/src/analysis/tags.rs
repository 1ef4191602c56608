//! Heuristic tag extraction
//!
//! These heuristics are deliberately simple keyword scans. Callers depend
//! only on [`ContentTags::extract`]: text in, tags out.

use serde::{Deserialize, Serialize};

const MAX_KEY_POINTS: usize = 5;
const MAX_TOPICS: usize = 5;

/// Overall tone of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// Structured tags derived from free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentTags {
    pub key_points: Vec<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
}

impl ContentTags {
    pub fn extract(text: &str) -> Self {
        Self {
            key_points: extract_key_points(text),
            topics: extract_topics(text),
            sentiment: analyze_sentiment(text),
        }
    }
}

/// (topic label, trigger keywords)
const TOPIC_PATTERNS: &[(&str, &[&str])] = &[
    ("Technology", &["tech", "software", "programming", "code", "app", "web", "digital", "development", "coding", "javascript", "python", "rust"]),
    ("Business", &["business", "startup", "entrepreneur", "market", "finance", "company", "money", "investment", "strategy", "marketing"]),
    ("Education", &["learn", "study", "course", "lesson", "teach", "school", "academic", "university", "education", "training"]),
    ("Science", &["science", "research", "discovery", "experiment", "physics", "chemistry", "biology", "space", "universe"]),
    ("Health", &["health", "fitness", "medical", "wellness", "diet", "exercise", "mental", "doctor", "medicine", "nutrition"]),
    ("Entertainment", &["movie", "music", "game", "entertainment", "show", "film", "cinema", "gaming"]),
    ("Artificial Intelligence", &["ai", "artificial intelligence", "machine learning", "robot", "automation", "neural", "deep learning", "llm"]),
    ("Cooking", &["recipe", "cook", "food", "kitchen", "baking", "cooking", "chef", "meal"]),
    ("Travel", &["travel", "vacation", "trip", "destination", "tourism", "adventure"]),
    ("Sports", &["sports", "football", "basketball", "tennis", "athlete", "championship"]),
];

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "best", "excellent", "great", "incredible", "outstanding",
    "valuable", "clear", "helpful", "recommended", "strong", "high-quality", "effective",
];

const NEGATIVE_WORDS: &[&str] = &[
    "worst", "terrible", "disaster", "failed", "poor", "weak", "confusing", "misleading",
    "bad", "broken", "disappointing", "inaccurate", "outdated",
];

/// Bullet and numbered list items, stripped of markers and emphasis
pub fn extract_key_points(text: &str) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    for line in text.lines() {
        let Some(item) = list_item(line.trim()) else {
            continue;
        };
        let item = item.replace("**", "").trim().to_string();
        if item.chars().count() < 4 || points.contains(&item) {
            continue;
        }
        points.push(item);
        if points.len() == MAX_KEY_POINTS {
            break;
        }
    }
    points
}

fn list_item(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest);
        }
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
}

/// Lowercased words joined by single spaces and padded, so that
/// `" keyword "` lookups only match whole words and phrases.
fn normalized_words(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();
    format!(" {} ", words.join(" "))
}

fn count_matches(haystack: &str, keyword: &str) -> usize {
    haystack.matches(&format!(" {} ", keyword)).count()
}

/// Topics ranked by keyword hits; `["General"]` when nothing matches
pub fn extract_topics(text: &str) -> Vec<String> {
    let haystack = normalized_words(text);
    let mut scored: Vec<(&str, usize)> = TOPIC_PATTERNS
        .iter()
        .map(|(topic, keywords)| {
            let score = keywords.iter().map(|k| count_matches(&haystack, k)).sum();
            (*topic, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    // Stable sort keeps table order for equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    if scored.is_empty() {
        return vec!["General".to_string()];
    }
    scored
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(topic, _)| topic.to_string())
        .collect()
}

pub fn analyze_sentiment(text: &str) -> Sentiment {
    let haystack = normalized_words(text);
    let positive: usize = POSITIVE_WORDS.iter().map(|w| count_matches(&haystack, w)).sum();
    let negative: usize = NEGATIVE_WORDS.iter().map(|w| count_matches(&haystack, w)).sum();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
