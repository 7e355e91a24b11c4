//! LLM integration infrastructure for listing classification.
//!
//! The prompt module turns a record and its indicators into a deterministic
//! instruction payload, the provider abstraction switches between the real
//! transport and an offline mock, and the validator guarantees a well-formed
//! classification out of whatever text the model returns.

pub mod mock_provider;
pub mod prompt;
pub mod provider;
pub mod validator;

pub use mock_provider::MockProvider;
pub use prompt::{build_prompt, Prompt};
pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, OpenAIProvider, TokenUsage};
pub use validator::{validate_response, ValidationOutcome};
