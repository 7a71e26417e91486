//! Tree-walking evaluator for block programs.
//!
//! An [`Interpreter`] holds the long-lived pieces (configuration, registered
//! procedures and prefix handlers); each call to [`Interpreter::execute`] or
//! [`Interpreter::run`] creates a fresh [`ExecutionContext`] with an empty
//! namespace and walks the block tree from the given root.
//!
//! ```ignore
//! let interpreter = Interpreter::new();
//! let mut out = BufferSink::new();
//! let value = interpreter.execute(&program, &mut out)?;
//! ```

mod blocks;
mod config;
mod error;
mod interpreter;
mod namespace;
mod output;
mod procedure;
mod value;

pub use config::{EvalConfig, DEFAULT_MAX_CALL_DEPTH};
pub use error::{EvalError, EvalResult, Flow, LoopExit, Signal};
pub use interpreter::{unknown_operator, ExecutionContext, Handler, Interpreter};
pub use namespace::{Namespace, Shadowed};
pub use output::{BufferSink, OutputSink, StdoutSink, WriterSink};
pub use procedure::{Procedure, ProcedureTable};
pub use value::{format_number, Colour, ListRef, Value};

pub use blockly_types::{Block, BlockKind, Mutation, Workspace};
