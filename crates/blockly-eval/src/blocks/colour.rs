//! Colour blocks.

use crate::error::{EvalError, EvalResult, Flow};
use crate::interpreter::ExecutionContext;
use crate::value::{Colour, Value};
use blockly_types::Block;
use rand::Rng;

/// `COLOUR` field holding `#rrggbb`.
pub(super) fn colour_picker(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let hex = block.require_field("COLOUR")?;
    Ok(Value::Colour(parse(hex)?))
}

pub(super) fn colour_random(ctx: &mut ExecutionContext<'_>, _block: &Block) -> Flow {
    let rng = ctx.rng();
    Ok(Value::Colour(Colour::new(rng.gen(), rng.gen(), rng.gen())))
}

/// `RED`, `GREEN` and `BLUE` are percentages, clamped to 0..=100.
pub(super) fn colour_rgb(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let r = ctx.number_of(block, "RED")?;
    let g = ctx.number_of(block, "GREEN")?;
    let b = ctx.number_of(block, "BLUE")?;
    Ok(Value::Colour(Colour::new(channel(r), channel(g), channel(b))))
}

fn channel(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    (percent.clamp(0.0, 100.0) * 255.0 / 100.0).round() as u8
}

/// Mix `COLOUR1` towards `COLOUR2` by `RATIO` (0..=1).
pub(super) fn colour_blend(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let c1 = as_colour(&ctx.value_of(block, "COLOUR1")?)?;
    let c2 = as_colour(&ctx.value_of(block, "COLOUR2")?)?;
    let ratio = ctx.number_of(block, "RATIO")?;
    Ok(Value::Colour(c1.blend(c2, ratio)))
}

/// Colours pass through; strings are read as `#rrggbb`.
fn as_colour(value: &Value) -> EvalResult<Colour> {
    match value {
        Value::Colour(c) => Ok(*c),
        Value::String(s) => parse(s),
        other => Err(EvalError::TypeCoercion(format!(
            "cannot convert {} to colour",
            other.type_name()
        ))),
    }
}

fn parse(hex: &str) -> EvalResult<Colour> {
    Colour::parse_hex(hex)
        .ok_or_else(|| EvalError::TypeCoercion(format!("'{hex}' is not a #rrggbb colour")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_percentages() {
        assert_eq!(channel(0.0), 0);
        assert_eq!(channel(100.0), 255);
        assert_eq!(channel(50.0), 128);
        assert_eq!(channel(250.0), 255);
        assert_eq!(channel(-4.0), 0);
        assert_eq!(channel(f64::NAN), 0);
    }

    #[test]
    fn test_as_colour() {
        assert_eq!(as_colour(&Value::String("#000000".into())), Ok(Colour::new(0, 0, 0)));
        assert!(as_colour(&Value::Number(1.0)).is_err());
        assert!(as_colour(&Value::String("red".into())).is_err());
    }
}
