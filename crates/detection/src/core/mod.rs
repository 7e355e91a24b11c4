pub mod app;
pub mod classification;
pub mod config;

pub use app::{AppRecord, DeveloperProfile, Review};
pub use classification::{Classification, Verdict};
pub use config::{DetectionConfig, Thresholds, DEFAULT_DANGEROUS_PERMISSIONS};
