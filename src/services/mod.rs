// Services module

pub mod config_store;
pub mod fingerprint;
pub mod rewrite;
pub mod scoring;
pub mod text_normalizer;

pub use config_store::{AppConfig, ConfigStore};
pub use fingerprint::fingerprint;
pub use rewrite::{BuiltinThesaurus, RewriteEngine, RewriteOptions, SynonymProvider};
pub use scoring::{
    AiMarkerEngine, ConfigError, MarkerWeights, OrchestratorConfig, ScoringOrchestrator,
    SimilarityEngine, SimilarityWeights,
};
pub use text_normalizer::TextUnit;
