//! Logic blocks: comparison, boolean operators, ternary.

use crate::error::Flow;
use crate::interpreter::{unknown_operator, ExecutionContext};
use crate::value::Value;
use blockly_types::Block;

/// `A <OP> B` for `OP` in `EQ NEQ LT LTE GT GTE`.
///
/// The ordering operators are built from `equals` and `is_less_than` only:
/// `GT` is "neither less nor equal", `GTE` is "not less".
pub(super) fn logic_compare(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let op = block.require_field("OP")?;
    let a = ctx.value_of(block, "A")?;
    let b = ctx.value_of(block, "B")?;

    let result = match op {
        "EQ" => a.equals(&b),
        "NEQ" => !a.equals(&b),
        "LT" => a.is_less_than(&b)?,
        "LTE" => a.is_less_than(&b)? || a.equals(&b),
        "GT" => !a.is_less_than(&b)? && !a.equals(&b),
        "GTE" => !a.is_less_than(&b)?,
        other => return Err(unknown_operator(block, "OP", other)),
    };
    Ok(Value::Boolean(result))
}

/// `AND` / `OR`. Both operands are always evaluated.
pub(super) fn logic_operation(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let op = block.require_field("OP")?;
    let a = ctx.boolean_of(block, "A")?;
    let b = ctx.boolean_of(block, "B")?;
    match op {
        "AND" => Ok(Value::Boolean(a && b)),
        "OR" => Ok(Value::Boolean(a || b)),
        other => Err(unknown_operator(block, "OP", other)),
    }
}

pub(super) fn logic_negate(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Boolean(!ctx.boolean_of(block, "BOOL")?))
}

/// `BOOL` field: `TRUE` is true, anything else false.
pub(super) fn logic_boolean(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Boolean(block.require_field("BOOL")? == "TRUE"))
}

pub(super) fn logic_null(_ctx: &mut ExecutionContext<'_>, _block: &Block) -> Flow {
    Ok(Value::Nil)
}

/// Only the selected branch is evaluated.
pub(super) fn logic_ternary(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    if ctx.boolean_of(block, "IF")? {
        ctx.value_of(block, "THEN")
    } else {
        ctx.value_of(block, "ELSE")
    }
}
