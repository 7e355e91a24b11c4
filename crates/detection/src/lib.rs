//! Detection and validation engine for mobile app listing fraud analysis.
//!
//! The pipeline is explicit function composition with typed intermediate
//! values: an [`AppRecord`] becomes an [`IndicatorBundle`] of deterministic
//! suspicion signals, the prompt module turns both into a model instruction
//! payload, and the validator turns whatever text comes back into a
//! guaranteed well-formed [`Classification`] (falling back to a conservative
//! `suspected` verdict whenever the model misbehaves). The metrics module
//! scores batches of classifications against labeled ground truth.
//!
//! Marketplace fetching and result persistence live outside this crate; the
//! only external capability it touches is the [`LLMProvider`] transport.

pub mod core;
pub mod detector;
pub mod indicators;
pub mod llm;
pub mod metrics;

pub use crate::core::{AppRecord, Classification, DetectionConfig, DeveloperProfile, Review, Verdict};
pub use detector::DetectionEngine;
pub use indicators::IndicatorBundle;
pub use llm::{LLMError, LLMProvider, MockProvider, OpenAIProvider};
pub use metrics::{evaluate, align_labels, ConfusionMatrix, MetricsReport, TruthLabel};
