//! Conditionals, loops and flow statements.
//!
//! Every loop runs its body through [`iterate`], which is the only place a
//! `Break` or `Continue` signal is caught. One pass catches at most one
//! signal; fatal errors go straight through.

use crate::error::{EvalResult, Flow, Signal};
use crate::interpreter::{unknown_operator, ExecutionContext};
use crate::value::Value;
use blockly_types::Block;

/// How one pass through a loop body ended.
#[derive(Debug)]
enum Pass {
    Completed(Value),
    Continued,
    Broken,
}

/// Run one pass of a loop body. An absent body completes with Nil.
fn iterate(ctx: &mut ExecutionContext<'_>, body: Option<&Block>) -> EvalResult<Pass> {
    let Some(body) = body else {
        return Ok(Pass::Completed(Value::Nil));
    };
    match ctx.evaluate(body) {
        Ok(value) => Ok(Pass::Completed(value)),
        Err(Signal::Continue) => Ok(Pass::Continued),
        Err(Signal::Break) => Ok(Pass::Broken),
        Err(Signal::Fatal(err)) => Err(err),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Conditionals
// ══════════════════════════════════════════════════════════════════════════════

/// `IF0`/`DO0` … `IFn`/`DOn`, then `ELSE` when the mutation declares one.
pub(super) fn controls_if(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let (else_ifs, has_else) = block
        .mutation
        .as_ref()
        .map_or((0, false), |m| (m.else_if, m.else_count > 0));

    for idx in 0..=else_ifs {
        if ctx.boolean_of(block, &format!("IF{idx}"))? {
            return ctx.statement_of(block, &format!("DO{idx}"));
        }
    }
    if has_else {
        return ctx.statement_of(block, "ELSE");
    }
    Ok(Value::Nil)
}

// ══════════════════════════════════════════════════════════════════════════════
// Loops
// ══════════════════════════════════════════════════════════════════════════════

/// Repeat with the count as a `TIMES` field.
pub(super) fn controls_repeat(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let times = Value::String(block.require_field("TIMES")?.to_string()).as_number()?;
    repeat(ctx, block, times)
}

/// Repeat with the count as a `TIMES` expression, evaluated once.
pub(super) fn controls_repeat_ext(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let times = ctx.number_of(block, "TIMES")?;
    repeat(ctx, block, times)
}

fn repeat(ctx: &mut ExecutionContext<'_>, block: &Block, times: f64) -> Flow {
    let body = block.statement("DO");
    let mut result = Value::Nil;
    // Fractional counts truncate toward zero; NaN runs nothing.
    let mut remaining = times as i64;
    while remaining > 0 {
        match iterate(ctx, body)? {
            Pass::Completed(value) => result = value,
            Pass::Continued => {}
            Pass::Broken => break,
        }
        remaining -= 1;
    }
    Ok(result)
}

/// `MODE` `WHILE` loops while `BOOL` is true, `UNTIL` while it is false.
/// The condition is checked before every pass, including the first.
pub(super) fn controls_while_until(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let until = match block.require_field("MODE")? {
        "WHILE" => false,
        "UNTIL" => true,
        other => return Err(unknown_operator(block, "MODE", other)),
    };
    let body = block.statement("DO");
    let mut result = Value::Nil;
    loop {
        if ctx.boolean_of(block, "BOOL")? == until {
            break;
        }
        match iterate(ctx, body)? {
            Pass::Completed(value) => result = value,
            Pass::Continued => {}
            Pass::Broken => break,
        }
    }
    Ok(result)
}

/// Counted loop. `FROM`, `TO` and `BY` are evaluated once.
///
/// The loop variable is a plain namespace entry: it keeps its last value
/// after the loop ends.
pub(super) fn controls_for(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    let mut current = ctx.number_of(block, "FROM")?;
    let to = ctx.number_of(block, "TO")?;
    let by = ctx.number_of(block, "BY")?;
    let body = block.statement("DO");

    let mut result = Value::Nil;
    while current <= to {
        ctx.namespace_mut().set(var, Value::Number(current));
        match iterate(ctx, body)? {
            Pass::Completed(value) => result = value,
            Pass::Continued => {}
            Pass::Broken => break,
        }
        current += by;
    }
    Ok(result)
}

/// Bind `VAR` to each element of `LIST`. The length is fixed at loop entry;
/// the loop stops early if the body shrinks the list below it.
pub(super) fn controls_for_each(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    let list = ctx.list_of(block, "LIST")?;
    let body = block.statement("DO");

    let len = list.len();
    for idx in 0..len {
        let Some(item) = list.get(idx) else {
            break;
        };
        ctx.namespace_mut().set(var, item);
        if let Pass::Broken = iterate(ctx, body)? {
            break;
        }
    }
    Ok(Value::Nil)
}

/// `FLOW` `BREAK` or `CONTINUE`. Never returns normally.
pub(super) fn controls_flow_statements(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    match block.require_field("FLOW")? {
        "BREAK" => Err(Signal::Break),
        "CONTINUE" => Err(Signal::Continue),
        other => Err(unknown_operator(block, "FLOW", other)),
    }
}
