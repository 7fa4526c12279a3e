//! Merge rules: defaults, override order, conflict handling.

use crate::pipeline::PipelineMode;
use crate::reply::DEFAULT_MAX_PROMPTS;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override earlier ones key by key; tables merge.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("generation.max_prompts", DEFAULT_MAX_PROMPTS as i64)?
        .set_default("generation.timeout_secs", 120i64)?
        .set_default("generation.pipeline_mode", PipelineMode::default().as_str())?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
