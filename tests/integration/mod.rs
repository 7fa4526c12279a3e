//! Integration tests for the ideate prompt generation pipeline

mod classification;
mod cli_commands;
mod model_providers;
mod pipeline_end_to_end;
mod test_utils;
