//! Runtime error and control-signal types for the evaluator.

use crate::value::Value;
use blockly_types::BlockError;
use std::fmt;
use thiserror::Error;

/// Fatal evaluation error. Every variant terminates the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A required field is absent.
    #[error("block '{block_type}' has no {field} field")]
    MissingField { block_type: String, field: String },

    /// A value socket is absent or does not hold exactly one block.
    #[error("block '{block_type}' needs exactly one block in socket {socket}, found {found}")]
    MissingSocket {
        block_type: String,
        socket: String,
        found: usize,
    },

    /// Mutation metadata is required but absent.
    #[error("block '{block_type}' has no mutation")]
    MissingMutation { block_type: String },

    /// No handler matches the block's type tag.
    #[error("no evaluator for block '{0}'")]
    UnknownBlockType(String),

    /// An operator or mode field holds an unrecognised value.
    #[error("unknown {field} '{value}' in block '{block_type}'")]
    UnknownOperator {
        block_type: String,
        field: String,
        value: String,
    },

    /// A value could not be converted to the type a handler required.
    #[error("type coercion: {0}")]
    TypeCoercion(String),

    /// Read of a variable with no current binding.
    #[error("no variable named '{0}'")]
    UnknownVariable(String),

    /// Call of a procedure that was never registered.
    #[error("unknown procedure '{0}'")]
    UnknownProcedure(String),

    /// A break/continue reached the top level without an enclosing loop.
    #[error("{0} outside of loop")]
    ControlEscape(LoopExit),

    /// The configured step limit was exceeded.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    /// Procedure calls nested deeper than the configured limit.
    #[error("call depth limit of {0} exceeded")]
    CallDepthExceeded(usize),
}

impl From<BlockError> for EvalError {
    fn from(err: BlockError) -> Self {
        match err {
            BlockError::MissingField { block_type, field } => {
                EvalError::MissingField { block_type, field }
            }
            BlockError::MissingSocket { block_type, socket } => EvalError::MissingSocket {
                block_type,
                socket,
                found: 0,
            },
            BlockError::SocketArity {
                block_type,
                socket,
                found,
            } => EvalError::MissingSocket {
                block_type,
                socket,
                found,
            },
            BlockError::MissingMutation { block_type } => EvalError::MissingMutation { block_type },
        }
    }
}

/// Which loop exit a flow statement requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Break,
    Continue,
}

impl fmt::Display for LoopExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopExit::Break => f.write_str("break"),
            LoopExit::Continue => f.write_str("continue"),
        }
    }
}

/// Non-local outcome of evaluating a block.
///
/// Loop boundaries intercept `Break` and `Continue`; `Fatal` passes through
/// every boundary up to the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Break,
    Continue,
    Fatal(EvalError),
}

impl Signal {
    /// Collapse a signal that escaped every loop into the error reported for it.
    pub fn into_error(self) -> EvalError {
        match self {
            Signal::Break => EvalError::ControlEscape(LoopExit::Break),
            Signal::Continue => EvalError::ControlEscape(LoopExit::Continue),
            Signal::Fatal(err) => err,
        }
    }
}

impl From<EvalError> for Signal {
    fn from(err: EvalError) -> Self {
        Signal::Fatal(err)
    }
}

impl From<BlockError> for Signal {
    fn from(err: BlockError) -> Self {
        Signal::Fatal(err.into())
    }
}

/// Result alias for operations that can only fail fatally.
pub type EvalResult<T> = Result<T, EvalError>;

/// Result alias for block evaluation, which may also unwind with break/continue.
pub type Flow<T = Value> = Result<T, Signal>;
