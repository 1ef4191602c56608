//! Two-document comparison

use crate::core::error::DomainError;
use crate::core::string::{char_len, take_chars};
use serde::{Deserialize, Serialize};

const SUMMARY_CHARS: usize = 500;

/// What aspect of two documents to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonType {
    Similarity,
    Differences,
    Summary,
    KeyPoints,
    Structure,
}

impl ComparisonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonType::Similarity => "similarity",
            ComparisonType::Differences => "differences",
            ComparisonType::Summary => "summary",
            ComparisonType::KeyPoints => "key-points",
            ComparisonType::Structure => "structure",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            ComparisonType::Similarity => {
                "You are an expert document analyst. Compare the similarity between two documents and provide a detailed analysis."
            }
            ComparisonType::Differences => {
                "You are an expert document analyst. Identify and highlight the differences between two documents."
            }
            ComparisonType::Summary => {
                "You are an expert document analyst. Provide a comprehensive summary comparing two documents."
            }
            ComparisonType::KeyPoints => {
                "You are an expert document analyst. Extract and compare key points from two documents."
            }
            ComparisonType::Structure => {
                "You are an expert document analyst. Analyze and compare the structure and organization of two documents."
            }
        }
    }

    fn lead(&self) -> &'static str {
        match self {
            ComparisonType::Similarity => "Compare these two documents for similarity:",
            ComparisonType::Differences => "Analyze the differences between these two documents:",
            ComparisonType::Summary => "Create a comparative summary of these two documents:",
            ComparisonType::KeyPoints => "Extract and compare key points from these two documents:",
            ComparisonType::Structure => "Analyze the structure and organization of these two documents:",
        }
    }

    fn deliverables(&self) -> [&'static str; 4] {
        match self {
            ComparisonType::Similarity => [
                "Overall similarity percentage (0-100)",
                "Key similarities found",
                "Key differences identified",
                "Summary of the comparison",
            ],
            ComparisonType::Differences => [
                "Major differences between the documents",
                "Content that exists in one but not the other",
                "Structural differences",
                "Recommendations for harmonization",
            ],
            ComparisonType::Summary => [
                "Brief overview of each document",
                "Key themes and topics covered",
                "Comparative analysis",
                "Overall assessment",
            ],
            ComparisonType::KeyPoints => [
                "Key points from Document 1",
                "Key points from Document 2",
                "Points that are unique to each document",
                "Points that are common to both",
            ],
            ComparisonType::Structure => [
                "Structural overview of each document",
                "Organization patterns",
                "Formatting and layout differences",
                "Recommendations for structural improvements",
            ],
        }
    }

    /// Build the comparison request; each document contributes at most
    /// `per_document_chars` characters.
    pub fn prompt(&self, first: (&str, &str), second: (&str, &str), per_document_chars: usize) -> String {
        let render = |text: &str| {
            if text.trim().is_empty() {
                "No text available".to_string()
            } else {
                take_chars(text, per_document_chars).to_string()
            }
        };

        let mut prompt = format!(
            "{}\n\nDocument 1 ({}):\n{}\n\nDocument 2 ({}):\n{}\n\nPlease provide:\n",
            self.lead(),
            first.0,
            render(first.1),
            second.0,
            render(second.1),
        );
        for (i, item) in self.deliverables().iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, item));
        }
        prompt
    }
}

impl std::fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ComparisonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "similarity" => Ok(ComparisonType::Similarity),
            "differences" => Ok(ComparisonType::Differences),
            "summary" => Ok(ComparisonType::Summary),
            "key-points" | "key_points" | "keypoints" => Ok(ComparisonType::KeyPoints),
            "structure" => Ok(ComparisonType::Structure),
            other => Err(DomainError::UnknownComparisonType(other.to_string())),
        }
    }
}

/// Parsed outcome of a document comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub comparison_type: ComparisonType,
    pub detailed_analysis: String,
    /// Only extracted for [`ComparisonType::Similarity`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_similarity: Option<u8>,
    pub summary: String,
}

impl ComparisonResult {
    pub fn from_response(comparison_type: ComparisonType, response: impl Into<String>) -> Self {
        let detailed_analysis = response.into();
        let overall_similarity = match comparison_type {
            ComparisonType::Similarity => parse_similarity(&detailed_analysis),
            _ => None,
        };
        let summary = if char_len(&detailed_analysis) > SUMMARY_CHARS {
            format!("{}...", take_chars(&detailed_analysis, SUMMARY_CHARS))
        } else {
            detailed_analysis.clone()
        };
        Self {
            comparison_type,
            detailed_analysis,
            overall_similarity,
            summary,
        }
    }
}

/// First `NN%` figure in the text, if it is a valid percentage
pub fn parse_similarity(text: &str) -> Option<u8> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'%' {
                return text[start..i].parse::<u8>().ok().filter(|v| *v <= 100);
            }
        } else {
            i += 1;
        }
    }
    None
}
