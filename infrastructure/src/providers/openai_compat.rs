//! OpenAI chat-completions wire format (OpenAI, OpenRouter, Groq)

use super::http::{ChatAttempt, request_error, status_error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use snapstudy_application::ProviderError;
use snapstudy_domain::ProviderId;

const OPENROUTER_REFERER: &str = "https://snapstudy.app";
const OPENROUTER_TITLE: &str = "Snap Study";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn build_request<'a>(attempt: &'a ChatAttempt<'a>) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(attempt.history.len() + 2);
    messages.push(ChatMessage {
        role: "system",
        content: attempt.system,
    });
    messages.extend(attempt.history.iter().map(|turn| ChatMessage {
        role: turn.role.as_str(),
        content: &turn.content,
    }));
    messages.push(ChatMessage {
        role: "user",
        content: attempt.user,
    });

    ChatRequest {
        model: attempt.model,
        messages,
        temperature: attempt.params.temperature,
        max_tokens: attempt.params.max_tokens,
        top_p: attempt.params.top_p,
        frequency_penalty: attempt.params.frequency_penalty,
        presence_penalty: attempt.params.presence_penalty,
    }
}

/// Send one chat-completions request and return the first choice's text
pub(crate) async fn complete(
    client: &Client,
    provider: ProviderId,
    base_url: &str,
    attempt: &ChatAttempt<'_>,
) -> Result<String, ProviderError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let mut builder = client
        .post(url)
        .bearer_auth(attempt.api_key)
        .json(&build_request(attempt));

    if provider == ProviderId::OpenRouter {
        builder = builder
            .header("HTTP-Referer", OPENROUTER_REFERER)
            .header("X-Title", OPENROUTER_TITLE);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| request_error(provider, e))?;

    if !response.status().is_success() {
        return Err(status_error(provider, response).await);
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| request_error(provider, e))?;

    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(ProviderError::EmptyResponse { provider })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;
    use snapstudy_domain::{ConversationTurn, GenerationParams};

    fn attempt<'a>(history: &'a [ConversationTurn]) -> ChatAttempt<'a> {
        ChatAttempt {
            model: "gpt-4o-mini",
            api_key: "secret",
            system: "be helpful",
            history,
            user: "what is this?",
            params: GenerationParams::primary(),
        }
    }

    #[test]
    fn test_request_orders_system_history_user() {
        let history = vec![
            ConversationTurn::user("earlier"),
            ConversationTurn::assistant("reply"),
        ];
        let attempt = attempt(&history);
        let value = serde_json::to_value(build_request(&attempt)).unwrap();

        let roles: Vec<&str> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(value["max_tokens"], 2000);
        assert!(value.get("top_k").is_none());
    }

    #[tokio::test]
    async fn test_openrouter_sends_attribution_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer secret")
                    .header("X-Title", OPENROUTER_TITLE)
                    .header_exists("HTTP-Referer");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "content": "routed" } }]
                }));
            })
            .await;

        let text = complete(
            &Client::new(),
            ProviderId::OpenRouter,
            &server.base_url(),
            &attempt(&[]),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "routed");
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let err = complete(&Client::new(), ProviderId::Groq, &server.base_url(), &attempt(&[]))
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::EmptyResponse { provider: ProviderId::Groq });
    }

    #[tokio::test]
    async fn test_error_status_keeps_body_excerpt() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401).body("invalid api key");
            })
            .await;

        let err = complete(&Client::new(), ProviderId::OpenAi, &server.base_url(), &attempt(&[]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProviderError::Status {
                provider: ProviderId::OpenAi,
                status: 401,
                message: "invalid api key".to_string(),
            }
        );
    }
}
