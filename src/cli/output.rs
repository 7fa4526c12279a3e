//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::IdeateError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &IdeateError) -> String {
    if e.is_generation_unavailable() {
        format!("{}\nThe generator could not be reached; try again later.", e)
    } else {
        e.to_string()
    }
}
