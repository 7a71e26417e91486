//! List blocks.
//!
//! Lists are shared: handlers that modify a list modify it in place, and the
//! change is visible through every value aliasing it. Positions are 1-based.

use super::slot_values;
use crate::error::{EvalError, Flow};
use crate::interpreter::{unknown_operator, ExecutionContext};
use crate::value::{format_number, Value};
use blockly_types::Block;
use rand::Rng;

pub(super) fn lists_create_empty(_ctx: &mut ExecutionContext<'_>, _block: &Block) -> Flow {
    Ok(Value::list(Vec::new()))
}

/// A new list of the values in `ADD0`, `ADD1`, …. An empty slot holds Nil.
pub(super) fn lists_create_with(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::list(slot_values(ctx, block, "ADD", Value::Nil)?))
}

/// `ITEM` repeated `NUM` times. A count the allocator refuses is an error.
pub(super) fn lists_repeat(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let item = ctx.value_of(block, "ITEM")?;
    let count = ctx.number_of(block, "NUM")?;
    let refuse = || {
        EvalError::TypeCoercion(format!("cannot repeat an item {} times", format_number(count)))
    };
    if !(count >= 0.0) || !count.is_finite() {
        return Err(refuse().into());
    }
    let len = count as usize;
    let mut items = Vec::new();
    items.try_reserve_exact(len).map_err(|_| refuse())?;
    items.resize(len, item);
    Ok(Value::list(items))
}

pub(super) fn lists_length(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Number(ctx.list_of(block, "VALUE")?.len() as f64))
}

pub(super) fn lists_is_empty(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Boolean(ctx.list_of(block, "VALUE")?.is_empty()))
}

/// 1-based position of the first or last element equal to `FIND`, or 0.
pub(super) fn lists_index_of(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let end = block.require_field("END")?;
    let list = ctx.list_of(block, "VALUE")?;
    let needle = ctx.value_of(block, "FIND")?;
    let items = list.borrow();
    let found = match end {
        "FIRST" => items.iter().position(|v| v.equals(&needle)),
        "LAST" => items.iter().rposition(|v| v.equals(&needle)),
        other => return Err(unknown_operator(block, "END", other)),
    };
    Ok(Value::Number(found.map_or(0.0, |i| (i + 1) as f64)))
}

/// `MODE` `GET`, `GET_REMOVE` or `REMOVE` on the element picked by `WHERE`.
/// `REMOVE` yields Nil.
pub(super) fn lists_get_index(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mode = block.require_field("MODE")?;
    let place = block.require_field("WHERE")?;
    let list = ctx.list_of(block, "VALUE")?;
    let remove = match mode {
        "GET" => false,
        "GET_REMOVE" | "REMOVE" => true,
        other => return Err(unknown_operator(block, "MODE", other)),
    };

    let index = element_index(ctx, block, place, "AT", list.len())?;
    let item = list.get(index).ok_or_else(|| out_of_range(index))?;
    if remove {
        list.borrow_mut().remove(index);
    }
    Ok(if mode == "REMOVE" { Value::Nil } else { item })
}

/// `MODE` `SET` replaces the element picked by `WHERE` with `TO`; `INSERT`
/// puts `TO` before it (`LAST` appends).
pub(super) fn lists_set_index(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mode = block.require_field("MODE")?;
    let place = block.require_field("WHERE")?;
    let list = ctx.list_of(block, "LIST")?;
    let len = list.len();

    match mode {
        "SET" => {
            let index = element_index(ctx, block, place, "AT", len)?;
            let item = ctx.value_of(block, "TO")?;
            let mut items = list.borrow_mut();
            let slot = items.get_mut(index).ok_or_else(|| out_of_range(index))?;
            *slot = item;
        }
        "INSERT" => {
            let index = match place {
                "FIRST" => 0,
                "LAST" => len,
                "RANDOM" => ctx.rng().gen_range(0..=len),
                _ => element_index(ctx, block, place, "AT", len)?,
            };
            let item = ctx.value_of(block, "TO")?;
            let mut items = list.borrow_mut();
            let index = index.min(items.len());
            items.insert(index, item);
        }
        other => return Err(unknown_operator(block, "MODE", other)),
    }
    Ok(Value::Nil)
}

/// A new list holding the inclusive range `WHERE1`/`AT1` ..= `WHERE2`/`AT2`.
/// An inverted range yields an empty list.
pub(super) fn lists_get_sublist(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let list = ctx.list_of(block, "LIST")?;
    let len = list.len();

    let start = match block.require_field("WHERE1")? {
        "FIRST" => 0,
        place @ ("FROM_START" | "FROM_END") => element_index(ctx, block, place, "AT1", len)?,
        other => return Err(unknown_operator(block, "WHERE1", other)),
    };
    let end = match block.require_field("WHERE2")? {
        "LAST" if len == 0 => return Ok(Value::list(Vec::new())),
        "LAST" => len - 1,
        place @ ("FROM_START" | "FROM_END") => element_index(ctx, block, place, "AT2", len)?,
        other => return Err(unknown_operator(block, "WHERE2", other)),
    };

    let items = list.borrow();
    let slice = if start <= end && end < items.len() {
        items[start..=end].to_vec()
    } else {
        Vec::new()
    };
    Ok(Value::list(slice))
}

/// `SPLIT` text `INPUT` on `DELIM` into a list, or `JOIN` list `INPUT` with it.
pub(super) fn lists_split(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mode = block.require_field("MODE")?;
    match mode {
        "SPLIT" => {
            let input = ctx.string_of(block, "INPUT")?;
            let delim = ctx.string_of(block, "DELIM")?;
            let parts: Vec<Value> = if delim.is_empty() {
                input.chars().map(|c| Value::String(c.to_string())).collect()
            } else {
                input
                    .split(delim.as_str())
                    .map(|part| Value::String(part.to_string()))
                    .collect()
            };
            Ok(Value::list(parts))
        }
        "JOIN" => {
            let list = ctx.list_of(block, "INPUT")?;
            let delim = ctx.string_of(block, "DELIM")?;
            Ok(Value::String(list.join(&delim)))
        }
        other => Err(unknown_operator(block, "MODE", other)),
    }
}

/// The list changed size while a socket was being evaluated.
fn out_of_range(index: usize) -> EvalError {
    EvalError::TypeCoercion(format!("position {} is no longer in the list", index + 1))
}

/// 0-based index of an existing element named by a `WHERE`-style selector.
fn element_index(
    ctx: &mut ExecutionContext<'_>,
    block: &Block,
    place: &str,
    at: &str,
    len: usize,
) -> Flow<usize> {
    if len == 0 && matches!(place, "FIRST" | "LAST" | "RANDOM") {
        return Err(EvalError::TypeCoercion("no element in empty list".to_string()).into());
    }
    let index = match place {
        "FROM_START" => ctx.value_of(block, at)?.as_index(len)?,
        "FROM_END" => len - 1 - ctx.value_of(block, at)?.as_index(len)?,
        "FIRST" => 0,
        "LAST" => len - 1,
        "RANDOM" => ctx.rng().gen_range(0..len),
        other => return Err(unknown_operator(block, "WHERE", other)),
    };
    Ok(index)
}
