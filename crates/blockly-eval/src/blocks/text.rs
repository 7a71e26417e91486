//! Text blocks.
//!
//! Lengths and positions count bytes, not characters.

use super::slot_values;
use crate::error::{EvalError, Flow};
use crate::interpreter::{unknown_operator, ExecutionContext};
use crate::value::Value;
use blockly_types::Block;
use rand::Rng;

pub(super) fn text(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::String(block.require_field("TEXT")?.to_string()))
}

/// Concatenate the string form of every item slot, in order. An empty slot adds nothing.
pub(super) fn text_join(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let parts = slot_values(ctx, block, "", Value::String(String::new()))?;
    Ok(Value::String(parts.iter().map(Value::as_string).collect()))
}

pub(super) fn text_print(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let line = ctx.string_of(block, "TEXT")?;
    ctx.write_line(&line);
    Ok(Value::Nil)
}

pub(super) fn text_length(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Number(ctx.string_of(block, "VALUE")?.len() as f64))
}

pub(super) fn text_is_empty(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    Ok(Value::Boolean(ctx.string_of(block, "VALUE")?.is_empty()))
}

/// One byte of `VALUE`, picked by `WHERE`. `FROM_START` and `FROM_END` read a
/// 1-based position from `AT`. A byte outside ASCII yields U+FFFD.
pub(super) fn text_char_at(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mode = block.require_field("WHERE")?;
    let text = ctx.string_of(block, "VALUE")?;
    let bytes = text.as_bytes();
    let len = bytes.len();

    let index = match mode {
        "FROM_START" => ctx.value_of(block, "AT")?.as_index(len)?,
        "FROM_END" => len - 1 - ctx.value_of(block, "AT")?.as_index(len)?,
        "FIRST" | "LAST" | "RANDOM" if len == 0 => {
            return Err(EvalError::TypeCoercion("no character in empty text".to_string()).into());
        }
        "FIRST" => 0,
        "LAST" => len - 1,
        "RANDOM" => ctx.rng().gen_range(0..len),
        other => return Err(unknown_operator(block, "WHERE", other)),
    };
    Ok(Value::String(String::from_utf8_lossy(&bytes[index..=index]).into_owned()))
}

/// Append `TEXT` to variable `VAR`. An unbound variable counts as empty text.
pub(super) fn text_append(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    let suffix = ctx.string_of(block, "TEXT")?;
    let mut current = ctx
        .namespace()
        .get(var)
        .map(Value::as_string)
        .unwrap_or_default();
    current.push_str(&suffix);
    ctx.namespace_mut().set(var, Value::String(current));
    Ok(Value::Nil)
}

/// 1-based byte position of `FIND` in `VALUE`, or 0 when absent.
pub(super) fn text_index_of(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let end = block.require_field("END")?;
    let haystack = ctx.string_of(block, "VALUE")?;
    let needle = ctx.string_of(block, "FIND")?;
    let found = match end {
        "FIRST" => haystack.find(&needle),
        "LAST" => haystack.rfind(&needle),
        other => return Err(unknown_operator(block, "END", other)),
    };
    Ok(Value::Number(found.map_or(0.0, |i| (i + 1) as f64)))
}

pub(super) fn text_change_case(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let case = block.require_field("CASE")?;
    let text = ctx.string_of(block, "TEXT")?;
    let changed = match case {
        "UPPERCASE" => text.to_uppercase(),
        "LOWERCASE" => text.to_lowercase(),
        "TITLECASE" => title_case(&text),
        other => return Err(unknown_operator(block, "CASE", other)),
    };
    Ok(Value::String(changed))
}

/// Upper-case the first letter of every space-separated word, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c == ' ' {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

pub(super) fn text_trim(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let mode = block.require_field("MODE")?;
    let text = ctx.string_of(block, "TEXT")?;
    let trimmed = match mode {
        "BOTH" => text.trim(),
        "LEFT" => text.trim_start(),
        "RIGHT" => text.trim_end(),
        other => return Err(unknown_operator(block, "MODE", other)),
    };
    Ok(Value::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello wORLD"), "Hello World");
        assert_eq!(title_case("  two  spaces"), "  Two  Spaces");
        assert_eq!(title_case(""), "");
    }
}
