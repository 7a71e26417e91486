//! Shared types for the block interpreter.
//!
//! This crate defines the block tree consumed by the evaluator, the closed
//! set of built-in block kinds, and the structural errors raised when a block
//! lacks a field, socket or mutation its type requires.

mod block;
mod error;
mod kind;

pub use block::{Block, Chain, Field, Mutation, MutationArg, StatementInput, ValueInput, Workspace};
pub use error::BlockError;
pub use kind::{BlockKind, ALL_BLOCK_TYPES};
