//! Gemini `generateContent` wire format

use super::http::{ChatAttempt, request_error, status_error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use snapstudy_application::ProviderError;
use snapstudy_domain::{ProviderId, Role};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn text_content<'a>(role: &'static str, text: &'a str) -> Content<'a> {
    Content {
        role: Some(role),
        parts: vec![Part { text }],
    }
}

fn build_request<'a>(attempt: &'a ChatAttempt<'a>) -> GenerateRequest<'a> {
    // Gemini has no system role; system turns join the instruction block
    let mut system_parts = vec![Part {
        text: attempt.system,
    }];
    let mut contents = Vec::with_capacity(attempt.history.len() + 1);

    for turn in attempt.history {
        match turn.role {
            Role::System => system_parts.push(Part {
                text: &turn.content,
            }),
            Role::User => contents.push(text_content("user", &turn.content)),
            Role::Assistant => contents.push(text_content("model", &turn.content)),
        }
    }
    contents.push(text_content("user", attempt.user));

    GenerateRequest {
        contents,
        system_instruction: Content {
            role: None,
            parts: system_parts,
        },
        generation_config: GenerationConfig {
            temperature: attempt.params.temperature,
            max_output_tokens: attempt.params.max_tokens,
            top_p: attempt.params.top_p,
            top_k: attempt.params.top_k,
        },
    }
}

/// Send one generateContent request and join the first candidate's text parts
pub(crate) async fn complete(
    client: &Client,
    provider: ProviderId,
    base_url: &str,
    attempt: &ChatAttempt<'_>,
) -> Result<String, ProviderError> {
    let url = format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        attempt.model
    );

    let response = client
        .post(url)
        .query(&[("key", attempt.api_key)])
        .json(&build_request(attempt))
        .send()
        .await
        .map_err(|e| request_error(provider, e))?;

    if !response.status().is_success() {
        return Err(status_error(provider, response).await);
    }

    let body: GenerateResponse = response
        .json()
        .await
        .map_err(|e| request_error(provider, e))?;

    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse { provider });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;
    use snapstudy_domain::{ConversationTurn, GenerationParams};

    #[test]
    fn test_request_maps_roles_and_system_turns() {
        let history = vec![
            ConversationTurn::system("compare carefully"),
            ConversationTurn::user("first"),
            ConversationTurn::assistant("answer"),
        ];
        let attempt = ChatAttempt {
            model: "gemini-1.5-flash",
            api_key: "k",
            system: "base system",
            history: &history,
            user: "next",
            params: GenerationParams::primary().with_top_k(40),
        };

        let value = serde_json::to_value(build_request(&attempt)).unwrap();

        assert_eq!(
            value["systemInstruction"]["parts"],
            json!([{ "text": "base system" }, { "text": "compare carefully" }])
        );
        let roles: Vec<&str> = value["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2000);
    }

    #[tokio::test]
    async fn test_generate_content_joins_parts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-1.5-flash:generateContent")
                    .query_param("key", "gem-key");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
                    }]
                }));
            })
            .await;

        let attempt = ChatAttempt {
            model: "gemini-1.5-flash",
            api_key: "gem-key",
            system: "s",
            history: &[],
            user: "u",
            params: GenerationParams::primary(),
        };
        let text = complete(&Client::new(), ProviderId::Gemini, &server.base_url(), &attempt)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Hello, world");
    }

    #[tokio::test]
    async fn test_blocked_prompt_without_candidates_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/gemini-1.5-flash:generateContent");
                then.status(200)
                    .json_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
            })
            .await;

        let attempt = ChatAttempt {
            model: "gemini-1.5-flash",
            api_key: "k",
            system: "s",
            history: &[],
            user: "u",
            params: GenerationParams::primary(),
        };
        let err = complete(&Client::new(), ProviderId::Gemini, &server.base_url(), &attempt)
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::EmptyResponse { provider: ProviderId::Gemini });
    }
}
