//! Detection orchestrator: drives one app through extraction, prompting,
//! the external model call and validation, and batches many apps.
//!
//! The pipeline is sequential and stateless across apps; the only blocking
//! step is the provider call, and a failure analyzing one app never affects
//! its neighbors. Batches always come back order- and length-preserving
//! (up to the configured cap).

use crate::core::{AppRecord, Classification, DetectionConfig};
use crate::indicators::IndicatorBundle;
use crate::llm::{
    build_prompt,
    provider::{LLMProvider, LLMRequest},
    validator::{self, TRANSPORT_FALLBACK_REASON},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DetectionEngine {
    provider: Arc<dyn LLMProvider>,
    config: DetectionConfig,
}

impl DetectionEngine {
    pub fn new(provider: Arc<dyn LLMProvider>, config: DetectionConfig) -> Self {
        info!(
            "Detection engine initialized with model {}",
            provider.model_name()
        );
        Self { provider, config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyzes a single app end to end. Transport errors are converted to
    /// the fallback classification here so a bad call never aborts a batch.
    pub async fn analyze_one(&self, app: &AppRecord) -> Classification {
        let indicators = IndicatorBundle::extract(app, &self.config);
        let prompt = build_prompt(app, &indicators, &self.config);

        let request = LLMRequest {
            system_prompt: prompt.system,
            user_prompt: prompt.user,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        match self.provider.generate(request).await {
            Ok(response) => {
                debug!(
                    "Model {} returned {} tokens for {}",
                    response.model, response.usage.total_tokens, app.app_id
                );
                let outcome = validator::validate_response(&response.content, app, &self.config);
                if outcome.is_fallback() {
                    warn!("Falling back to manual-review verdict for {}", app.app_id);
                }
                outcome.into_classification()
            }
            Err(e) => {
                warn!("Model call failed for {}: {}", app.app_id, e);
                validator::fallback_classification(app, TRANSPORT_FALLBACK_REASON)
            }
        }
    }

    /// Analyzes at most `config.max_apps` records (a deterministic prefix,
    /// so runs are reproducible), one at a time, preserving input order.
    pub async fn analyze_batch(&self, apps: &[AppRecord]) -> Vec<Classification> {
        let selected = &apps[..apps.len().min(self.config.max_apps)];
        if selected.len() < apps.len() {
            info!(
                "Capping batch at {} of {} records",
                selected.len(),
                apps.len()
            );
        }

        let mut results = Vec::with_capacity(selected.len());
        for (i, app) in selected.iter().enumerate() {
            info!("Processing app {}/{}: {}", i + 1, selected.len(), app.app_id);
            results.push(self.analyze_one(app).await);
        }

        results
    }
}
