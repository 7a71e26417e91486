//! Structural errors raised by block accessors.

use thiserror::Error;

/// A block is missing something its type requires, or carries it in the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// A required field is absent.
    #[error("block '{block_type}' has no {field} field")]
    MissingField { block_type: String, field: String },

    /// A required value or statement socket is absent.
    #[error("block '{block_type}' has no {socket} socket")]
    MissingSocket { block_type: String, socket: String },

    /// A value socket holds zero or several blocks instead of one.
    #[error("socket {socket} of block '{block_type}' should hold exactly one block, found {found}")]
    SocketArity {
        block_type: String,
        socket: String,
        found: usize,
    },

    /// Mutation metadata is required but absent.
    #[error("block '{block_type}' has no mutation")]
    MissingMutation { block_type: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_error_display() {
        let err = BlockError::MissingField {
            block_type: "controls_for".into(),
            field: "VAR".into(),
        };
        assert_eq!(err.to_string(), "block 'controls_for' has no VAR field");

        let err = BlockError::SocketArity {
            block_type: "text_print".into(),
            socket: "TEXT".into(),
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "socket TEXT of block 'text_print' should hold exactly one block, found 2"
        );
    }
}
