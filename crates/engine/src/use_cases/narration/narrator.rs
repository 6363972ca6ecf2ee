//! Generator-backed narrator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::infrastructure::ports::{LlmError, LlmPort, RandomPort};

use super::{NarrationRequest, Narrator, PromptStrategy};

/// Fixed lines shown instead of prose when the generator cannot help.
/// Each failure class has its own wording so players (and operators reading
/// chat logs) can tell them apart; details only go to the server log.
pub mod degraded {
    pub const MISSING_CREDENTIALS: &str =
        "[Narrator offline] The storyteller has no key to the archive. The tale pauses here.";
    pub const UNAUTHORIZED: &str =
        "[Narrator unavailable] The storyteller's credentials were refused.";
    pub const RATE_LIMITED: &str =
        "[Narrator resting] Too many tales at once. Give the storyteller a moment.";
    pub const TIMEOUT: &str =
        "[Narrator silent] The storyteller took too long to answer. Try again.";
    pub const FAILED: &str = "[Narrator unavailable] The storyteller could not be reached.";
    pub const INVALID_RESPONSE: &str =
        "[Narrator confused] The storyteller's reply was lost in the fog.";
}

/// Degraded line for a generator failure.
pub fn degraded_text(error: &LlmError) -> &'static str {
    match error {
        LlmError::MissingCredentials => degraded::MISSING_CREDENTIALS,
        LlmError::Unauthorized(_) => degraded::UNAUTHORIZED,
        LlmError::RateLimited => degraded::RATE_LIMITED,
        LlmError::Timeout => degraded::TIMEOUT,
        LlmError::RequestFailed(_) => degraded::FAILED,
        LlmError::InvalidResponse(_) => degraded::INVALID_RESPONSE,
    }
}

/// Narrator backed by an [`LlmPort`]. One attempt per request, no retries.
pub struct LlmNarrator {
    llm: Arc<dyn LlmPort>,
    random: Arc<dyn RandomPort>,
}

impl LlmNarrator {
    pub fn new(llm: Arc<dyn LlmPort>, random: Arc<dyn RandomPort>) -> Self {
        Self { llm, random }
    }
}

#[async_trait]
impl Narrator for LlmNarrator {
    async fn narrate(&self, request: NarrationRequest) -> String {
        let strategy = PromptStrategy::for_mode(request.mode());
        let correlation_id = self.random.gen_uuid();

        match self.llm.generate(strategy.build(&request)).await {
            Ok(response) => {
                tracing::debug!(
                    correlation_id = %correlation_id,
                    mode = ?strategy.mode,
                    finish_reason = ?response.finish_reason,
                    "Narration generated"
                );
                response.content
            }
            Err(LlmError::MissingCredentials) => {
                tracing::debug!(correlation_id = %correlation_id, "Narrator has no API key");
                degraded::MISSING_CREDENTIALS.to_string()
            }
            Err(error) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    mode = ?strategy.mode,
                    error = %error,
                    "Narration failed, returning degraded text"
                );
                degraded_text(&error).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{FinishReason, LlmResponse, MockLlmPort};
    use crate::use_cases::narration::{ExplorationFacts, NarrationMode};
    use chrono::Utc;
    use shadowfire_domain::{CharacterClass, PlayerId, PlayerName, PlayerRecord};

    fn request() -> NarrationRequest {
        let record = PlayerRecord::new(
            PlayerId::new("p").unwrap(),
            PlayerName::wanderer(),
            CharacterClass::Rogue,
            Utc::now(),
        );
        NarrationRequest::Exploration {
            facts: ExplorationFacts::for_player(&record),
            history: vec![],
            action: "look around".to_string(),
        }
    }

    fn narrator(llm: MockLlmPort) -> LlmNarrator {
        LlmNarrator::new(
            Arc::new(llm),
            Arc::new(FixedRandom {
                offset: 0,
                chance: false,
            }),
        )
    }

    #[tokio::test]
    async fn success_returns_generated_text_with_mode_sampling() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|req| req.temperature == Some(0.85) && req.max_tokens == Some(500))
            .times(1)
            .returning(|_| {
                Ok(LlmResponse {
                    content: "Fog curls over the bog.".to_string(),
                    finish_reason: FinishReason::Stop,
                    usage: None,
                })
            });

        let text = narrator(llm).narrate(request()).await;
        assert_eq!(text, "Fog curls over the bog.");
    }

    #[tokio::test]
    async fn missing_key_yields_fixed_line() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Err(LlmError::MissingCredentials));

        let text = narrator(llm).narrate(request()).await;
        assert_eq!(text, degraded::MISSING_CREDENTIALS);
    }

    #[tokio::test]
    async fn each_failure_class_has_distinct_text_and_no_retry() {
        let failures = [
            LlmError::Unauthorized(401),
            LlmError::RateLimited,
            LlmError::Timeout,
            LlmError::RequestFailed("boom at /srv/secret".into()),
            LlmError::InvalidResponse("garbage".into()),
        ];
        let mut seen = std::collections::HashSet::new();
        for failure in failures {
            let mut llm = MockLlmPort::new();
            let returned = failure.clone();
            llm.expect_generate()
                .times(1)
                .returning(move |_| Err(returned.clone()));

            let text = narrator(llm).narrate(request()).await;
            assert_eq!(text, degraded_text(&failure));
            assert!(!text.contains("/srv/secret"));
            seen.insert(text);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn request_mode_selects_strategy() {
        assert_eq!(request().mode(), NarrationMode::Exploration);
    }
}
