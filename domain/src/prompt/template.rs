//! Prompt templates shared by every provider

use crate::core::provider::ProviderId;
use crate::source::entities::{SourceContext, SourceKind};

/// Templates for generating prompts at each stage of a query
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a provider answering about a source of `kind`.
    ///
    /// One template for all providers; only the provider name and source
    /// vocabulary change.
    pub fn system(provider: ProviderId, kind: SourceKind) -> String {
        let subject = kind.as_str();
        format!(
            r#"You are an expert assistant specializing in comprehensive {subject} analysis. You are answering through {provider} as one of several models in a multi-provider analysis system.

Core capabilities:
- Complete comprehension: read every part of the {subject} content provided
- Deep extraction: pull out specific information, quotes, data points and relationships
- Contextual synthesis: connect information across different sections of the {subject}

Response guidelines:
- Reference specific parts, sections or passages of the {subject}
- Include relevant direct quotes to support your analysis
- Address every aspect of the question
- Use clear formatting with headings and bullet points

Your goal is the most thorough and accurate answer possible, grounded in the {subject} content provided."#,
            provider = provider.display_name(),
        )
    }

    /// User message for the primary attempt.
    ///
    /// `total_chars` is the length of the source before truncation; when it
    /// exceeds the text actually included, the prompt says so.
    pub fn context_query(question: &str, context: &SourceContext, total_chars: usize) -> String {
        let (label, closing) = Self::labels(context.kind);
        let mut prompt = format!(
            "{label} \"{name}\" (analyze this thoroughly):\n\n{text}\n\n--- End of {closing} ---\n",
            name = context.source_name,
            text = context.text,
        );

        let included = context.char_len();
        if total_chars > included {
            prompt.push_str(&format!(
                "\n[Note: This is a partial view of the {}. Total length: {} characters]\n",
                context.kind.as_str(),
                total_chars
            ));
        }

        prompt.push_str(&format!(
            "\nUser Question: {question}\n\nPlease analyze the {} content above and provide a detailed, accurate response based on it. Reference specific parts when possible.",
            context.kind.as_str()
        ));
        prompt
    }

    /// Shorter user message for the fallback attempt
    pub fn fallback_query(question: &str, context: &SourceContext) -> String {
        let (label, _) = Self::labels(context.kind);
        format!(
            "{label} \"{name}\":\n{text}\n\nUser Question: {question}\n\nProvide a detailed response based on the content above.",
            name = context.source_name,
            text = context.text,
        )
    }

    fn labels(kind: SourceKind) -> (&'static str, &'static str) {
        match kind {
            SourceKind::Document => ("Document context from", "Document"),
            SourceKind::Video => ("Video context from", "Video"),
        }
    }

    /// System prompt for the synthesis call
    pub fn synthesis_system() -> &'static str {
        "You are an expert at synthesizing multiple AI responses into comprehensive, accurate answers."
    }

    /// User prompt for the synthesis call.
    ///
    /// `responses` are `(provider label, text)` pairs in invocation order.
    pub fn synthesis_prompt(
        question: &str,
        responses: &[(String, String)],
        context_chars: usize,
    ) -> String {
        let mut prompt = String::from(
            "You have received responses from multiple AI models answering the same question about the same source. \
Create one comprehensive response that combines the best insights from all of them.\n\nRESPONSES FROM DIFFERENT AI MODELS:\n",
        );

        for (i, (provider, content)) in responses.iter().enumerate() {
            prompt.push_str(&format!(
                "\n--- Response {} from {} ---\n{}\n",
                i + 1,
                provider,
                content
            ));
        }

        prompt.push_str(&format!(
            r#"
ORIGINAL USER QUESTION: {question}

SOURCE CONTEXT LENGTH: {context_chars} characters

SYNTHESIS INSTRUCTIONS:
1. Combine the most accurate and detailed information from all responses
2. Resolve any contradictions by prioritizing responses that reference specific source content
3. Cover every aspect of the question
4. Include specific quotes and references from the source when available
5. Structure the response clearly with proper formatting
6. Do not mention the individual models or label which model said what

Create a single, comprehensive response that represents the best analysis possible:"#
        ));

        prompt
    }

    /// Prompt for a one-shot structured analysis of a document
    pub fn document_analysis(file_name: &str, text: &str) -> String {
        format!(
            r#"Please provide a comprehensive analysis of the document "{file_name}".

Document Content:
{text}

Please provide:
1. **Document Summary**: A concise overview of the main content and purpose
2. **Key Topics**: The primary subjects and themes covered
3. **Important Information**: Critical data, conclusions, or insights
4. **Structure Analysis**: How the document is organized and its logical flow
5. **Notable Elements**: Any significant figures, references, or unique aspects

Format your response with clear headings and bullet points for easy reading."#
        )
    }

    /// Question used to summarize a video from its rendered metadata
    pub fn video_summary_request() -> &'static str {
        r#"Provide a comprehensive analysis of this video including:
1. **Executive Summary**: Overview of the video's content and purpose
2. **Content Breakdown**: What the video covers
3. **Key Insights**: Important points, techniques, or information presented
4. **Target Audience**: Who would benefit most from this content
5. **Topics Covered**: Main subject areas and themes
6. **Overall Assessment**: Evaluation of content quality

Use markdown headings and bullet lists."#
    }
}
