//! Answer use case
//!
//! Routes a question to either the fan-out + synthesis path or a single
//! provider, and turns the outcome into one [`Answer`] or one error.

use crate::config::OrchestrationConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::{ProviderAdapter, ProviderRequest};
use crate::use_cases::fan_out::{FanOutError, FanOutUseCase};
use crate::use_cases::synthesize::{SynthesizeError, SynthesizeUseCase};
use snapstudy_domain::{
    Answer, ConversationTurn, DomainError, ProviderId, QueryPhase, QueryRun, Question, Resolution,
    SourceContext, SynthesisInput,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller; the display text is shown verbatim
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("No AI providers are configured. Set at least one API key.")]
    Configuration,

    #[error("All AI providers failed to respond. Please try again later.")]
    AllProvidersFailed,

    #[error("Internal state error: {0}")]
    State(#[from] DomainError),
}

impl From<SynthesizeError> for AnswerError {
    fn from(e: SynthesizeError) -> Self {
        match e {
            SynthesizeError::NoSuccessfulResults => AnswerError::AllProvidersFailed,
            SynthesizeError::State(e) => AnswerError::State(e),
        }
    }
}

/// Input for the Answer use case
#[derive(Debug, Clone)]
pub struct AnswerInput {
    pub question: Question,
    /// Conversation so far, oldest first
    pub history: Vec<ConversationTurn>,
    pub context: Option<SourceContext>,
}

impl AnswerInput {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            history: Vec::new(),
            context: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_context(mut self, context: SourceContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Answer plus the phases the query went through
#[derive(Debug, Clone)]
pub struct AnswerOutput {
    pub answer: Answer,
    pub trail: Vec<QueryPhase>,
}

/// Use case for answering one question
pub struct AnswerUseCase {
    fan_out: FanOutUseCase,
    config: OrchestrationConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl AnswerUseCase {
    /// `providers` is the fan-out list in invocation order.
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: OrchestrationConfig) -> Self {
        Self {
            fan_out: FanOutUseCase::new(providers),
            config,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &OrchestrationConfig {
        &self.config
    }

    pub fn providers(&self) -> &[Arc<dyn ProviderAdapter>] {
        self.fan_out.providers()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: AnswerInput) -> Result<Answer, AnswerError> {
        self.execute_with_progress(input, &NoProgress)
            .await
            .map(|output| output.answer)
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnswerInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnswerOutput, AnswerError> {
        let context = input.context.as_ref().filter(|c| !c.is_blank());
        let total_chars = context.map(|c| c.char_len()).unwrap_or(0);

        self.logger.log(ConversationEvent::question(
            input.question.content(),
            context.map(|_| total_chars),
        ));

        let result = self.route(&input, context, total_chars, progress).await;
        match &result {
            Ok(output) => {
                info!("Answered via {:?}", output.answer.resolution);
                self.logger.log(ConversationEvent::answer(&output.answer));
            }
            Err(e) => {
                warn!("Query failed: {}", e);
                self.logger.log(ConversationEvent::error(&e.to_string()));
            }
        }
        result
    }

    async fn route(
        &self,
        input: &AnswerInput,
        context: Option<&SourceContext>,
        total_chars: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnswerOutput, AnswerError> {
        if self.providers().is_empty() {
            return Err(AnswerError::Configuration);
        }

        let mut request =
            ProviderRequest::new(input.question.content()).with_history(input.history.clone());
        if let Some(context) = context {
            request = request
                .with_context(context.truncated(self.config.budget.primary_chars))
                .with_context_total_chars(total_chars);
        }

        let mut run = QueryRun::new();

        if total_chars > self.config.min_fanout_context_chars {
            run.advance(QueryPhase::FanningOut)?;
            match self
                .fan_out
                .execute(request.clone(), self.config.fanout_timeout, progress)
                .await
            {
                Ok(results) => {
                    self.logger.log(ConversationEvent::fan_out(&results));
                    let synthesis = SynthesisInput::new(input.question.content(), total_chars, results);
                    let answer = self
                        .synthesizer()
                        .execute(synthesis, &mut run, progress)
                        .await?;
                    return Ok(AnswerOutput {
                        answer,
                        trail: run.trail().to_vec(),
                    });
                }
                Err(FanOutError::NoProviders) => return Err(AnswerError::Configuration),
                Err(FanOutError::TimedOut(timeout)) => {
                    self.logger
                        .log(ConversationEvent::timeout(timeout.as_secs()));
                    info!("Falling back to a single provider");
                }
            }
        } else {
            debug!("Context below fan-out threshold, using a single provider");
        }

        run.advance(QueryPhase::SingleProvider)?;
        let answer = match self.ask_direct(&request, progress).await {
            Ok((provider, text)) => {
                run.advance(QueryPhase::DirectReturn)?;
                Answer::new(text, Resolution::SingleProvider { provider })
            }
            Err(e) => {
                run.advance(QueryPhase::AllFailed)?;
                return Err(e);
            }
        };

        Ok(AnswerOutput {
            answer,
            trail: run.trail().to_vec(),
        })
    }

    /// Send `request` to the direct provider under the chat timeout.
    ///
    /// Used for plain chat, after a fan-out timeout, and by one-shot
    /// operations such as document analysis.
    pub async fn ask_direct(
        &self,
        request: &ProviderRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<(ProviderId, String), AnswerError> {
        let provider = self.direct_provider().ok_or(AnswerError::Configuration)?;
        let id = provider.id();
        info!("Asking {} directly", id);
        progress.on_phase_start(QueryPhase::SingleProvider, 1);

        let outcome = tokio::time::timeout(self.config.chat_timeout, provider.invoke(request)).await;
        let result = match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => Ok((id, text)),
            Ok(Ok(_)) => {
                warn!("{} returned an empty response", id);
                Err(AnswerError::AllProvidersFailed)
            }
            Ok(Err(e)) => {
                warn!("{} failed: {}", id, e);
                Err(AnswerError::AllProvidersFailed)
            }
            Err(_) => {
                warn!("{} timed out after {:?}", id, self.config.chat_timeout);
                progress.on_timeout(QueryPhase::SingleProvider);
                Err(AnswerError::AllProvidersFailed)
            }
        };

        progress.on_provider_complete(QueryPhase::SingleProvider, id, result.is_ok());
        progress.on_phase_complete(QueryPhase::SingleProvider);
        result
    }

    fn find(&self, id: ProviderId) -> Option<&Arc<dyn ProviderAdapter>> {
        self.providers().iter().find(|p| p.id() == id)
    }

    fn direct_provider(&self) -> Option<&Arc<dyn ProviderAdapter>> {
        self.config
            .direct_provider
            .and_then(|id| self.find(id))
            .or_else(|| self.providers().first())
    }

    fn synthesizer(&self) -> SynthesizeUseCase {
        let synthesizer = self.config.synthesizer.and_then(|id| self.find(id)).cloned();
        SynthesizeUseCase::new(synthesizer).with_timeout(self.config.chat_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{ScriptedProvider, adapters};
    use snapstudy_domain::ContextBudget;
    use std::time::Duration;

    fn question(text: &str) -> Question {
        Question::new(text).unwrap()
    }

    fn document(len: usize) -> SourceContext {
        SourceContext::document("report.txt", "d".repeat(len))
    }

    #[tokio::test]
    async fn test_no_providers_is_configuration_error() {
        let use_case = AnswerUseCase::new(vec![], OrchestrationConfig::default());
        let err = use_case
            .execute(AnswerInput::new(question("hi")).with_context(document(500)))
            .await
            .unwrap_err();
        assert_eq!(err, AnswerError::Configuration);
    }

    #[tokio::test]
    async fn test_two_of_four_succeed_and_are_synthesized() {
        let openai = ScriptedProvider::ok(ProviderId::OpenAi, "openai says").arc();
        let openrouter = ScriptedProvider::failing(ProviderId::OpenRouter, "401").arc();
        let groq = ScriptedProvider::ok(ProviderId::Groq, "groq says")
            .synthesizes("combined")
            .arc();
        let gemini = ScriptedProvider::failing(ProviderId::Gemini, "quota").arc();
        let providers = vec![openai, openrouter, groq.clone(), gemini];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let output = use_case
            .execute_with_progress(
                AnswerInput::new(question("Summarize")).with_context(document(500)),
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer.text, "combined");
        assert_eq!(
            output.answer.resolution,
            Resolution::Synthesized {
                synthesizer: ProviderId::Groq,
                sources: 2
            }
        );
        assert_eq!(
            output.trail,
            vec![QueryPhase::Idle, QueryPhase::FanningOut, QueryPhase::AwaitingSynthesis, QueryPhase::Done]
        );

        let prompt = &groq.synthesis_requests()[0].message;
        assert_eq!(prompt.matches("--- Response ").count(), 2);
        assert!(prompt.contains("openai says"));
        assert!(prompt.contains("groq says"));
    }

    #[tokio::test]
    async fn test_one_of_four_succeeds_verbatim() {
        let providers = vec![
            ScriptedProvider::failing(ProviderId::OpenAi, "x").arc(),
            ScriptedProvider::failing(ProviderId::OpenRouter, "x").arc(),
            ScriptedProvider::failing(ProviderId::Groq, "x").arc(),
            ScriptedProvider::ok(ProviderId::Gemini, "**Gemini** only\n").arc(),
        ];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let answer = use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(500)))
            .await
            .unwrap();

        assert_eq!(answer.text, "**Gemini** only\n");
        assert_eq!(answer.resolution, Resolution::Direct { provider: ProviderId::Gemini });
    }

    #[tokio::test]
    async fn test_zero_successes_propagates_all_failed() {
        let providers = vec![
            ScriptedProvider::failing(ProviderId::OpenAi, "x").arc(),
            ScriptedProvider::failing(ProviderId::Groq, "y").arc(),
        ];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let err = use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(500)))
            .await
            .unwrap_err();

        assert_eq!(err, AnswerError::AllProvidersFailed);
    }

    #[tokio::test]
    async fn test_context_truncated_to_primary_budget_before_fan_out() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "a").arc(),
            ScriptedProvider::ok(ProviderId::Groq, "b").arc(),
        ];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(20_000)))
            .await
            .unwrap();

        for provider in &providers {
            let request = &provider.answer_requests()[0];
            let context = request.context.as_ref().unwrap();
            assert_eq!(context.char_len(), 12_000);
            assert_eq!(request.context_total_chars, 20_000);
        }
    }

    #[tokio::test]
    async fn test_custom_budget_is_honoured() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, "b").arc()];
        let config = OrchestrationConfig::default()
            .with_budget(ContextBudget::default().with_primary_chars(300));
        let use_case = AnswerUseCase::new(adapters(&providers), config);

        use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(1_000)))
            .await
            .unwrap();

        let request = &providers[0].answer_requests()[0];
        assert_eq!(request.context.as_ref().unwrap().char_len(), 300);
    }

    #[tokio::test]
    async fn test_short_context_goes_to_direct_provider() {
        let openai = ScriptedProvider::ok(ProviderId::OpenAi, "openai").arc();
        let groq = ScriptedProvider::ok(ProviderId::Groq, "groq").arc();
        let providers = vec![openai.clone(), groq.clone()];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let output = use_case
            .execute_with_progress(
                AnswerInput::new(question("hello")).with_context(document(100)),
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer.text, "groq");
        assert_eq!(output.answer.resolution, Resolution::SingleProvider { provider: ProviderId::Groq });
        assert_eq!(
            output.trail,
            vec![QueryPhase::Idle, QueryPhase::SingleProvider, QueryPhase::DirectReturn]
        );
        assert_eq!(openai.request_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_provider_defaults_to_first_when_missing() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::Gemini, "gemini").arc(),
            ScriptedProvider::ok(ProviderId::OpenAi, "openai").arc(),
        ];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let answer = use_case.execute(AnswerInput::new(question("hello"))).await.unwrap();

        assert_eq!(answer.text, "gemini");
    }

    #[tokio::test]
    async fn test_history_is_forwarded() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, "ok").arc()];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());
        let history = vec![ConversationTurn::user("q1"), ConversationTurn::assistant("a1")];

        use_case
            .execute(AnswerInput::new(question("q2")).with_history(history.clone()))
            .await
            .unwrap();

        assert_eq!(providers[0].answer_requests()[0].history, history);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_timeout_falls_back_to_single_provider() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "late")
                .with_delay(Duration::from_secs(200))
                .arc(),
            ScriptedProvider::ok(ProviderId::Groq, "groq")
                .with_delay(Duration::from_secs(5))
                .arc(),
        ];
        let config = OrchestrationConfig::default()
            .with_fanout_timeout(Duration::from_secs(1))
            .with_chat_timeout(Duration::from_secs(30));
        let use_case = AnswerUseCase::new(adapters(&providers), config);

        let output = use_case
            .execute_with_progress(
                AnswerInput::new(question("Summarize")).with_context(document(500)),
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer.text, "groq");
        assert_eq!(output.answer.resolution, Resolution::SingleProvider { provider: ProviderId::Groq });
        assert_eq!(
            output.trail,
            vec![
                QueryPhase::Idle,
                QueryPhase::FanningOut,
                QueryPhase::SingleProvider,
                QueryPhase::DirectReturn
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_timeout_completes_in_bounded_time() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "a")
                .with_delay(Duration::from_secs(600))
                .arc(),
            ScriptedProvider::ok(ProviderId::Groq, "b")
                .with_delay(Duration::from_secs(600))
                .arc(),
        ];
        let config = OrchestrationConfig::default()
            .with_fanout_timeout(Duration::from_secs(2))
            .with_chat_timeout(Duration::from_secs(3));
        let use_case = AnswerUseCase::new(adapters(&providers), config);
        let started = tokio::time::Instant::now();

        let err = use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(500)))
            .await
            .unwrap_err();

        assert_eq!(err, AnswerError::AllProvidersFailed);
        assert!(started.elapsed() <= Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_synthesizer_not_configured_uses_longest() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "short").arc(),
            ScriptedProvider::ok(ProviderId::Gemini, "much longer").arc(),
        ];
        let use_case = AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default());

        let answer = use_case
            .execute(AnswerInput::new(question("Summarize")).with_context(document(500)))
            .await
            .unwrap();

        assert_eq!(answer.text, "much longer");
        assert_eq!(
            answer.resolution,
            Resolution::LongestFallback {
                provider: ProviderId::Gemini,
                sources: 2
            }
        );
    }
}
