use thiserror::Error;

use crate::model::{EdgeId, FloorId, NodeId};

/// Convenient result alias for the Wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of library errors.
///
/// Transports (CLI, HTTP) use this to pick an exit status or response code
/// without inspecting error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied malformed or missing input.
    Validation,
    /// A referenced floor, node, edge, or room does not exist.
    NotFound,
    /// Every referenced entity exists but no walkable route satisfies the request.
    Infeasible,
    /// Storage or platform failure.
    Internal,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a request field is missing or malformed.
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Raised when a floor id does not exist in the store.
    #[error("unknown floor: {id}")]
    UnknownFloor { id: FloorId },

    /// Raised when a node id does not exist (on the requested floor, if any).
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when an edge id does not exist.
    #[error("unknown edge: {id}")]
    UnknownEdge { id: EdgeId },

    /// Raised when a room code has no location.
    #[error("room location not found: {code}{}", format_suggestions(.suggestions))]
    RoomLocationNotFound {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a floor has no graph nodes to snap onto.
    #[error("no graph nodes on {floor}")]
    NoGraphNodes { floor: String },

    /// Raised when either floor lacks labelled stairs/elevator nodes.
    #[error("no stairs/elevator connectors with labels found on one of the floors")]
    NoConnectors,

    /// Raised when the two floors share no connector key.
    #[error("no matching connector labels between the two floors")]
    NoMatchingConnectors,

    /// Raised when the pathfinder cannot reach the room on a single floor.
    #[error("no route found")]
    NoRoute,

    /// Raised when no connector pair yields two feasible sub-paths.
    #[error("no route found via available connectors")]
    NoRouteViaConnectors,

    /// Raised when an auto-connect heuristic is run on fewer than two nodes.
    #[error("floor {floor} needs at least 2 nodes, found {found}")]
    NotEnoughNodes { floor: FloorId, found: usize },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the graph database")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error following the validation / not-found / infeasible taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInput { .. } => ErrorCategory::Validation,
            Error::UnknownFloor { .. }
            | Error::UnknownNode { .. }
            | Error::UnknownEdge { .. }
            | Error::RoomLocationNotFound { .. } => ErrorCategory::NotFound,
            Error::NoGraphNodes { .. }
            | Error::NoConnectors
            | Error::NoMatchingConnectors
            | Error::NoRoute
            | Error::NoRouteViaConnectors
            | Error::NotEnoughNodes { .. } => ErrorCategory::Infeasible,
            Error::ProjectDirsUnavailable | Error::Sqlite(_) | Error::Io(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_not_found_lists_suggestions() {
        let err = Error::RoomLocationNotFound {
            code: "11117".to_string(),
            suggestions: vec!["111170".to_string(), "111171".to_string()],
        };
        let message = err.to_string();
        assert!(message.starts_with("room location not found: 11117"));
        assert!(message.contains("'111170', '111171'"));
    }

    #[test]
    fn room_not_found_without_suggestions_is_terse() {
        let err = Error::RoomLocationNotFound {
            code: "X".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "room location not found: X");
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            Error::invalid("fromX", "not a number").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            Error::UnknownFloor { id: 3 }.category(),
            ErrorCategory::NotFound
        );
        assert_eq!(Error::NoConnectors.category(), ErrorCategory::Infeasible);
        assert_eq!(
            Error::NoGraphNodes {
                floor: "floor 2".to_string()
            }
            .category(),
            ErrorCategory::Infeasible
        );
        assert_eq!(
            Error::ProjectDirsUnavailable.category(),
            ErrorCategory::Internal
        );
    }
}
