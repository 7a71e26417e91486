//! The block tree.
//!
//! A program is a tree of [`Block`]s. Each block carries a type tag, named
//! string fields, named value sockets (nested expressions), named statement
//! sockets (nested statement chains), optional [`Mutation`] metadata and an
//! optional `next` link to the following statement.
//!
//! The evaluator only reads blocks. Construction happens in whatever
//! collaborator materialises the tree; the `with_*` builders below exist for
//! hosts and tests that assemble trees by hand.

use crate::error::BlockError;
use crate::kind::BlockKind;
use serde::{Deserialize, Serialize};

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// One node of a program.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<StatementInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation: Option<Mutation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Block>>,
}

/// `name → string` configuration on a block (operator selectors, variable names, literals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// A value socket: a named slot holding a nested expression.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueInput {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A statement socket: a named slot holding a nested statement chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatementInput {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Block-specific structured configuration.
///
/// Conditionals use `else_if` / `else_count`; procedure definitions and
/// calls use `name` / `args`; joins and list constructors record `items`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mutation {
    #[serde(default, rename = "elseif")]
    pub else_if: usize,
    #[serde(default, rename = "else")]
    pub else_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<MutationArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

/// A formal parameter recorded in a procedure mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationArg {
    pub name: String,
}

/// The top-level blocks of a serialised program, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Accessors
// ══════════════════════════════════════════════════════════════════════════════

impl Block {
    /// Create a block with the given type tag and nothing attached.
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            ..Self::default()
        }
    }

    /// The built-in kind for this block's tag, if any.
    pub fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_tag(&self.block_type)
    }

    /// The string value of a field, or `None` when absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// The string value of a field that must be present.
    pub fn require_field(&self, name: &str) -> Result<&str, BlockError> {
        self.field(name).ok_or_else(|| BlockError::MissingField {
            block_type: self.block_type.clone(),
            field: name.to_string(),
        })
    }

    /// A value socket by name, or `None` when absent.
    pub fn value_input(&self, name: &str) -> Option<&ValueInput> {
        self.values.iter().find(|v| v.name == name)
    }

    /// The single block attached to a value socket.
    ///
    /// Fails when the socket is absent or does not hold exactly one block.
    pub fn single_value(&self, name: &str) -> Result<&Block, BlockError> {
        let input = self
            .value_input(name)
            .ok_or_else(|| BlockError::MissingSocket {
                block_type: self.block_type.clone(),
                socket: name.to_string(),
            })?;
        match input.blocks.as_slice() {
            [block] => Ok(block),
            blocks => Err(BlockError::SocketArity {
                block_type: self.block_type.clone(),
                socket: name.to_string(),
                found: blocks.len(),
            }),
        }
    }

    /// The first block of a statement socket, or `None` when the socket is absent or empty.
    pub fn statement(&self, name: &str) -> Option<&Block> {
        self.statements
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.blocks.first())
    }

    /// Mutation metadata that must be present.
    pub fn require_mutation(&self) -> Result<&Mutation, BlockError> {
        self.mutation
            .as_ref()
            .ok_or_else(|| BlockError::MissingMutation {
                block_type: self.block_type.clone(),
            })
    }

    /// The following statement in this block's chain.
    pub fn next(&self) -> Option<&Block> {
        self.next.as_deref()
    }

    /// Iterate this block and every block reachable through `next`.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            current: Some(self),
        }
    }

    /// The last block of this block's chain.
    pub fn last_in_chain(&self) -> &Block {
        let mut block = self;
        while let Some(next) = block.next() {
            block = next;
        }
        block
    }

    // ── Builders ─────────────────────────────────────────────────────────

    /// Attach a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Attach a value socket holding one block.
    pub fn with_value(mut self, name: impl Into<String>, block: Block) -> Self {
        self.values.push(ValueInput {
            name: name.into(),
            blocks: vec![block],
        });
        self
    }

    /// Attach a statement socket holding one chain.
    pub fn with_statement(mut self, name: impl Into<String>, block: Block) -> Self {
        self.statements.push(StatementInput {
            name: name.into(),
            blocks: vec![block],
        });
        self
    }

    /// Attach mutation metadata.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Append `block` to the end of this block's chain.
    pub fn then(mut self, block: Block) -> Self {
        self.next = Some(Box::new(match self.next.take() {
            Some(next) => (*next).then(block),
            None => block,
        }));
        self
    }

    /// Link a sequence of statements into one chain. Returns `None` for an empty sequence.
    pub fn sequence(blocks: impl IntoIterator<Item = Block>) -> Option<Block> {
        let mut blocks: Vec<Block> = blocks.into_iter().collect();
        let mut chain = blocks.pop()?;
        while let Some(mut prev) = blocks.pop() {
            prev.next = Some(Box::new(chain));
            chain = prev;
        }
        Some(chain)
    }
}

/// Iterator over a statement chain. See [`Block::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    current: Option<&'a Block>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let block = self.current?;
        self.current = block.next();
        Some(block)
    }
}

impl Mutation {
    /// Conditional branch counts.
    pub fn branches(else_if: usize, else_count: usize) -> Self {
        Self {
            else_if,
            else_count,
            ..Self::default()
        }
    }

    /// A procedure signature: name plus ordered parameter names.
    pub fn procedure<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            args: args
                .into_iter()
                .map(|a| MutationArg { name: a.into() })
                .collect(),
            ..Self::default()
        }
    }

    /// Parameter names in declaration order.
    pub fn arg_names(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.name.as_str())
    }
}

impl Workspace {
    /// Top-level blocks that define procedures.
    pub fn procedure_definitions(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| b.kind().is_some_and(BlockKind::is_procedure_definition))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
