//! Graph construction errors.
//!
//! These represent invalid input data handed to the graph builder. The
//! builder never constructs a partial graph: any of these aborts the whole
//! construction.

/// Errors raised while validating and building a network graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Two stop records share the same id
    #[error("duplicate stop id: {0}")]
    DuplicateStop(String),

    /// A line timetable references a stop id that was never declared
    #[error("line {line} references unknown stop id: {stop}")]
    UnknownStop { line: String, stop: String },

    /// A line has no timepoints at all
    #[error("line {0} has no timepoints")]
    EmptyLine(String),

    /// Scheduled times along a line go backwards
    #[error("line {line} has a decreasing scheduled time at stop {stop}")]
    TimesNotOrdered { line: String, stop: String },

    /// A negative walking-distance threshold was requested
    #[error("walking distance threshold must be non-negative, got {0}")]
    NegativeWalkingDistance(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::DuplicateStop("5000".into());
        assert_eq!(err.to_string(), "duplicate stop id: 5000");

        let err = GraphError::UnknownStop {
            line: "WEX_1".into(),
            stop: "9999".into(),
        };
        assert_eq!(
            err.to_string(),
            "line WEX_1 references unknown stop id: 9999"
        );

        let err = GraphError::EmptyLine("WEX_1".into());
        assert_eq!(err.to_string(), "line WEX_1 has no timepoints");

        let err = GraphError::TimesNotOrdered {
            line: "WEX_1".into(),
            stop: "5000".into(),
        };
        assert_eq!(
            err.to_string(),
            "line WEX_1 has a decreasing scheduled time at stop 5000"
        );

        let err = GraphError::NegativeWalkingDistance(-5.0);
        assert_eq!(
            err.to_string(),
            "walking distance threshold must be non-negative, got -5"
        );
    }
}
