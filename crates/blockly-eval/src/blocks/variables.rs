//! Variable blocks.

use crate::error::Flow;
use crate::interpreter::ExecutionContext;
use crate::value::Value;
use blockly_types::Block;

/// Read `VAR`. Reading an unbound name is an error.
pub(super) fn variables_get(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    Ok(ctx.variable(var)?)
}

pub(super) fn variables_set(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    let value = ctx.value_of(block, "VALUE")?;
    ctx.namespace_mut().set(var, value);
    Ok(Value::Nil)
}
