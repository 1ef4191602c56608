//! Key information extraction from loaded text

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)>\]]+").expect("valid url regex"));
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}\b|\b\d{4}[/.-]\d{1,2}[/.-]\d{1,2}\b")
        .expect("valid date regex")
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?(?:\(\d{3}\)|\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("valid phone regex")
});

/// Contact details and references found in a text, deduplicated in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    pub emails: Vec<String>,
    pub urls: Vec<String>,
    pub dates: Vec<String>,
    pub phones: Vec<String>,
}

impl KeyInfo {
    pub fn extract(text: &str) -> Self {
        Self {
            emails: unique_matches(&EMAIL, text),
            urls: unique_matches(&URL, text),
            dates: unique_matches(&DATE, text),
            phones: unique_matches(&PHONE, text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.urls.is_empty() && self.dates.is_empty() && self.phones.is_empty()
    }
}

fn unique_matches(pattern: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in pattern.find_iter(text) {
        let value = m.as_str().trim_end_matches(['.', ',', ';']);
        if !found.iter().any(|f| f == value) {
            found.push(value.to_string());
        }
    }
    found
}
