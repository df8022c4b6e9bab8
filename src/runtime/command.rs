//! Discrete commands consumed from the UI collaborator
//!
//! The core never sees raw key events; the collaborator decodes them into
//! these textual command semantics and applies them between ticks.

use thiserror::Error;

/// One discrete user command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append a digit or decimal point to the pending frequency entry
    AppendDigit(char),
    /// Parse the pending entry and set the forcing frequency
    CommitFrequency,
    /// Flip the pause flag consulted on every tick
    TogglePause,
    /// Grow every energy-history capacity by the fixed ratio
    IncreaseHistory,
    /// Shrink every energy-history capacity by the fixed ratio
    DecreaseHistory,
    /// Grow the number of physics steps per tick
    IncreaseSteps,
    /// Shrink the number of physics steps per tick
    DecreaseSteps,
    /// Flip between a pinned running energy scale and a per-tick rescale
    ToggleRescale,
    /// Stop tick scheduling
    Quit,
}

/// The one recoverable runtime failure: malformed frequency text on commit
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("not a number: {input:?}")]
    InvalidFrequency {
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Parse a pending frequency-entry buffer as an angular frequency
pub fn parse_frequency(text: &str) -> Result<f64, CommandError> {
    text.parse::<f64>().map_err(|source| CommandError::InvalidFrequency {
        input: text.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_frequency("1.5").unwrap(), 1.5);
        assert_eq!(parse_frequency("2").unwrap(), 2.0);
    }

    #[test]
    fn rejects_garbage_with_the_offending_input() {
        let err = parse_frequency("1.2.3").unwrap_err();
        assert!(err.to_string().contains("1.2.3"));
        assert!(parse_frequency("").is_err());
    }
}
