//! Evaluator registry, dispatch loop and per-run execution context.

use crate::blocks;
use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult, Flow, Signal};
use crate::namespace::Namespace;
use crate::output::OutputSink;
use crate::procedure::{Procedure, ProcedureTable};
use crate::value::{ListRef, Value};
use blockly_types::{Block, Workspace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;

/// A host-supplied block handler.
///
/// Receives the running context so it can evaluate nested sockets through
/// [`ExecutionContext::value_of`] and friends.
pub type Handler = Arc<dyn Fn(&mut ExecutionContext<'_>, &Block) -> Flow + Send + Sync>;

struct PrefixHandler {
    prefix: String,
    handler: Handler,
}

/// Long-lived interpreter state shared by every run: configuration,
/// registered procedures and prefix handlers.
///
/// Read-only while a run is in progress.
pub struct Interpreter {
    config: EvalConfig,
    procedures: ProcedureTable,
    prefix_handlers: Vec<PrefixHandler>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            procedures: ProcedureTable::new(),
            prefix_handlers: Vec::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn procedures(&self) -> &ProcedureTable {
        &self.procedures
    }

    // ══════════════════════════════════════════════════════════════════════
    // Registration
    // ══════════════════════════════════════════════════════════════════════

    /// Register a procedure, replacing any earlier one with the same name.
    pub fn register_procedure(&mut self, procedure: Procedure) {
        tracing::debug!(name = %procedure.name, params = procedure.params.len(), "register procedure");
        self.procedures.insert(procedure);
    }

    /// Register every procedure definition among a workspace's top-level blocks.
    /// Returns how many were registered.
    pub fn register_definitions(&mut self, workspace: &Workspace) -> EvalResult<usize> {
        let mut count = 0;
        for block in workspace.procedure_definitions() {
            self.register_procedure(Procedure::from_definition(block)?);
            count += 1;
        }
        Ok(count)
    }

    /// Route every block whose type tag starts with `prefix` to `handler`.
    ///
    /// Prefix handlers are consulted before the built-in blocks, in
    /// registration order; the first match wins.
    pub fn register_prefix_handler<F>(&mut self, prefix: impl Into<String>, handler: F)
    where
        F: Fn(&mut ExecutionContext<'_>, &Block) -> Flow + Send + Sync + 'static,
    {
        self.prefix_handlers.push(PrefixHandler {
            prefix: prefix.into(),
            handler: Arc::new(handler),
        });
    }

    fn prefix_handler(&self, block_type: &str) -> Option<&Handler> {
        self.prefix_handlers
            .iter()
            .find(|p| block_type.starts_with(p.prefix.as_str()))
            .map(|p| &p.handler)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Running
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate `root` with a fresh namespace and return its value.
    ///
    /// Any error, including a break/continue that escaped every loop, ends
    /// the run. Output written before the failure stays written.
    pub fn execute(&self, root: &Block, output: &mut dyn OutputSink) -> EvalResult<Value> {
        ExecutionContext::new(self, output).run(root)
    }

    /// Evaluate `root`, reporting a failure through `on_failure` exactly once.
    ///
    /// Returns `None` when the run failed.
    pub fn run<F>(&self, root: &Block, output: &mut dyn OutputSink, on_failure: F) -> Option<Value>
    where
        F: FnOnce(String),
    {
        match self.execute(root, output) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(root = %root.block_type, error = %err, "run failed");
                on_failure(err.to_string());
                None
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("config", &self.config)
            .field("procedures", &self.procedures)
            .field(
                "prefix_handlers",
                &self
                    .prefix_handlers
                    .iter()
                    .map(|p| p.prefix.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Execution context
// ══════════════════════════════════════════════════════════════════════════════

/// Mutable state of one run: namespace, output, step and call-depth counters
/// and the random source.
pub struct ExecutionContext<'a> {
    interpreter: &'a Interpreter,
    namespace: Namespace,
    output: &'a mut dyn OutputSink,
    steps: u64,
    depth: usize,
    rng: StdRng,
}

impl<'a> ExecutionContext<'a> {
    /// A context with an empty namespace.
    pub fn new(interpreter: &'a Interpreter, output: &'a mut dyn OutputSink) -> Self {
        let rng = match interpreter.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            interpreter,
            namespace: Namespace::new(),
            output,
            steps: 0,
            depth: 0,
            rng,
        }
    }

    pub fn interpreter(&self) -> &'a Interpreter {
        self.interpreter
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Blocks evaluated so far in this run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn write_line(&mut self, line: &str) {
        self.output.write_line(line);
    }

    /// Evaluate `root` under the top-level boundary: escaped break/continue
    /// signals become [`EvalError::ControlEscape`].
    pub fn run(&mut self, root: &Block) -> EvalResult<Value> {
        tracing::debug!(root = %root.block_type, "run started");
        let value = self.evaluate(root).map_err(Signal::into_error)?;
        tracing::debug!(steps = self.steps, "run finished");
        Ok(value)
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Evaluate a block and every block chained after it; the chain's value is
    /// the value of its last block.
    pub fn evaluate(&mut self, block: &Block) -> Flow {
        let mut result = Value::Nil;
        for link in block.chain() {
            result = self.dispatch(link)?;
        }
        Ok(result)
    }

    /// Evaluate one block, ignoring its `next` link.
    fn dispatch(&mut self, block: &Block) -> Flow {
        self.tick()?;
        tracing::trace!(block_type = %block.block_type, step = self.steps, "evaluate");

        let interpreter = self.interpreter;
        if let Some(handler) = interpreter.prefix_handler(&block.block_type) {
            return handler(self, block);
        }
        match block.kind() {
            Some(kind) => blocks::evaluate_builtin(self, kind, block),
            None => Err(EvalError::UnknownBlockType(block.block_type.clone()).into()),
        }
    }

    fn tick(&mut self) -> EvalResult<()> {
        self.steps += 1;
        match self.interpreter.config.step_limit {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded(limit)),
            _ => Ok(()),
        }
    }

    // ── Call depth ───────────────────────────────────────────────────────

    pub(crate) fn enter_call(&mut self) -> EvalResult<()> {
        let limit = self.interpreter.config.max_call_depth;
        if self.depth >= limit {
            return Err(EvalError::CallDepthExceeded(limit));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ══════════════════════════════════════════════════════════════════════
    // Socket helpers
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate the single block in value socket `name`.
    pub fn value_of(&mut self, block: &Block, name: &str) -> Flow {
        let input = block.single_value(name)?;
        self.evaluate(input)
    }

    /// Evaluate the chain in statement socket `name`; an empty socket yields Nil.
    pub fn statement_of(&mut self, block: &Block, name: &str) -> Flow {
        match block.statement(name) {
            Some(body) => self.evaluate(body),
            None => Ok(Value::Nil),
        }
    }

    pub fn number_of(&mut self, block: &Block, name: &str) -> Flow<f64> {
        Ok(self.value_of(block, name)?.as_number()?)
    }

    pub fn string_of(&mut self, block: &Block, name: &str) -> Flow<String> {
        Ok(self.value_of(block, name)?.as_string())
    }

    pub fn boolean_of(&mut self, block: &Block, name: &str) -> Flow<bool> {
        Ok(self.value_of(block, name)?.as_boolean()?)
    }

    pub fn list_of(&mut self, block: &Block, name: &str) -> Flow<ListRef> {
        Ok(self.value_of(block, name)?.as_list()?)
    }

    /// Read a variable.
    pub fn variable(&self, name: &str) -> EvalResult<Value> {
        self.namespace
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownVariable(name.to_string()))
    }
}

/// Error for an operator or mode field holding an unrecognised value.
pub fn unknown_operator(block: &Block, field: &str, value: &str) -> Signal {
    Signal::Fatal(EvalError::UnknownOperator {
        block_type: block.block_type.clone(),
        field: field.to_string(),
        value: value.to_string(),
    })
}
