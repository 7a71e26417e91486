//! Procedure definition and call blocks.

use crate::error::{EvalError, Flow};
use crate::interpreter::ExecutionContext;
use crate::value::Value;
use blockly_types::Block;

/// Definitions are registered on the interpreter ahead of a run; meeting one
/// in a chain does nothing.
pub(super) fn procedures_definition(_ctx: &mut ExecutionContext<'_>, _block: &Block) -> Flow {
    Ok(Value::Nil)
}

/// Call the procedure named by the mutation.
///
/// Arguments `ARG0`, `ARG1`, … are evaluated in the caller's scope, then bound
/// to the mutation's argument names for the duration of the call. The
/// previous bindings come back however the call ends, including through a
/// `break` or `continue` that escapes the body.
pub(super) fn procedures_call(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mutation = block.require_mutation()?;
    let name = mutation
        .name
        .as_deref()
        .ok_or_else(|| EvalError::MissingMutation {
            block_type: block.block_type.clone(),
        })?;
    let Some(procedure) = ctx.interpreter().procedures().get(name) else {
        tracing::debug!(name, "call to unknown procedure");
        return Err(EvalError::UnknownProcedure(name.to_string()).into());
    };

    let mut bindings = Vec::with_capacity(mutation.args.len());
    for (idx, arg) in mutation.args.iter().enumerate() {
        let value = ctx.value_of(block, &format!("ARG{idx}"))?;
        bindings.push((arg.name.clone(), value));
    }

    ctx.enter_call()?;
    tracing::debug!(name, args = bindings.len(), "call procedure");
    let shadowed = ctx.namespace_mut().shadow(bindings);

    let outcome = match &procedure.body {
        Some(body) => ctx.evaluate(body).map(|_| ()),
        None => Ok(()),
    };
    let outcome = outcome.and_then(|()| match &procedure.return_expr {
        Some(expr) => ctx.evaluate(expr),
        None => Ok(Value::Nil),
    });

    ctx.namespace_mut().unshadow(shadowed);
    ctx.exit_call();
    outcome
}
