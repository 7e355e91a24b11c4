use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Offline stand-in for the real transport. Returns canned raw content for
/// prompts containing a registered substring, which also lets tests feed
/// the validator malformed output on purpose.
pub struct MockProvider {
    responses: HashMap<String, String>,
    default_content: String,
    call_count: AtomicUsize,
    should_fail: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Self::default_responses(),
            default_content:
                r#"{"type": "genuine", "reason": "No fraud indicators present."}"#.to_string(),
            call_count: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// A provider whose every call fails at the transport level.
    pub fn failing() -> Self {
        let mut provider = Self::new();
        provider.should_fail = true;
        provider
    }

    pub fn with_response(mut self, pattern: &str, content: &str) -> Self {
        self.responses.insert(pattern.to_lowercase(), content.to_string());
        self
    }

    pub fn with_default(mut self, content: &str) -> Self {
        self.default_content = content.to_string();
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn default_responses() -> HashMap<String, String> {
        let mut responses = HashMap::new();

        responses.insert(
            "guaranteed".to_string(),
            r#"{"type": "fraud", "reason": "Guaranteed-return claims with no credible developer identity."}"#
                .to_string(),
        );

        responses
    }

    // Matches only the user prompt: the system prompt carries few-shot
    // examples that would otherwise trip every pattern.
    fn content_for(&self, request: &LLMRequest) -> String {
        let user = request.user_prompt.to_lowercase();

        for (pattern, content) in &self.responses {
            if user.contains(pattern) {
                return content.clone();
            }
        }

        self.default_content.clone()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(LLMError::ApiError(
                "Mock provider configured to fail".to_string(),
            ));
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;

        Ok(LLMResponse {
            content: self.content_for(&request),
            model: "mock-model".to_string(),
            usage: TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            },
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
