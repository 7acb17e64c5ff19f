//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("CSV serialization failed: {0}")]
    CsvError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scenario_display_names_the_input() {
        let error = DomainError::UnknownScenario("banter".to_string());
        assert_eq!(error.to_string(), "Unknown scenario: banter");
    }
}
