//! Number blocks.
//!
//! Arithmetic is plain IEEE-754: division by zero yields an infinity and
//! invalid operations yield NaN rather than an error.

use crate::error::{EvalError, Flow};
use crate::interpreter::{unknown_operator, ExecutionContext};
use crate::value::{format_number, Value};
use blockly_types::Block;
use rand::Rng;
use std::f64::consts;

pub(super) fn math_number(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let num = block.require_field("NUM")?;
    Ok(Value::Number(Value::String(num.to_string()).as_number()?))
}

/// `A <OP> B` for `OP` in `ADD MINUS MULTIPLY DIVIDE POWER`.
pub(super) fn math_arithmetic(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let op = block.require_field("OP")?;
    let a = ctx.number_of(block, "A")?;
    let b = ctx.number_of(block, "B")?;
    let result = match op {
        "ADD" => a + b,
        "MINUS" => a - b,
        "MULTIPLY" => a * b,
        "DIVIDE" => a / b,
        "POWER" => a.powf(b),
        other => return Err(unknown_operator(block, "OP", other)),
    };
    Ok(Value::Number(result))
}

/// Single-operand functions on `NUM`.
pub(super) fn math_single(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let op = block.require_field("OP")?;
    let n = ctx.number_of(block, "NUM")?;
    let result = match op {
        "ROOT" => n.sqrt(),
        "ABS" => n.abs(),
        "NEG" => -n,
        "LN" => n.ln(),
        "LOG10" => n.log10(),
        "EXP" => n.exp(),
        "POW10" => 10f64.powf(n),
        other => return Err(unknown_operator(block, "OP", other)),
    };
    Ok(Value::Number(result))
}

/// `ROUND` rounds half away from zero.
pub(super) fn math_round(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let op = block.require_field("OP")?;
    let n = ctx.number_of(block, "NUM")?;
    let result = match op {
        "ROUND" => n.round(),
        "ROUNDUP" => n.ceil(),
        "ROUNDDOWN" => n.floor(),
        other => return Err(unknown_operator(block, "OP", other)),
    };
    Ok(Value::Number(result))
}

/// Remainder with the sign of the dividend.
pub(super) fn math_modulo(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let dividend = ctx.number_of(block, "DIVIDEND")?;
    let divisor = ctx.number_of(block, "DIVISOR")?;
    Ok(Value::Number(dividend % divisor))
}

pub(super) fn math_constant(_ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let result = match block.require_field("CONSTANT")? {
        "PI" => consts::PI,
        "E" => consts::E,
        "GOLDEN_RATIO" => (1.0 + 5f64.sqrt()) / 2.0,
        "SQRT2" => consts::SQRT_2,
        "SQRT1_2" => consts::FRAC_1_SQRT_2,
        "INFINITY" => f64::INFINITY,
        other => return Err(unknown_operator(block, "CONSTANT", other)),
    };
    Ok(Value::Number(result))
}

/// Test `NUMBER_TO_CHECK` for `PROPERTY`. `DIVISIBLE_BY` also reads `DIVISOR`.
pub(super) fn math_number_property(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let property = block.require_field("PROPERTY")?;
    let n = ctx.number_of(block, "NUMBER_TO_CHECK")?;
    let result = match property {
        "EVEN" => n % 2.0 == 0.0,
        "ODD" => n % 2.0 == 1.0 || n % 2.0 == -1.0,
        "PRIME" => is_prime(n),
        "WHOLE" => n % 1.0 == 0.0,
        "POSITIVE" => n > 0.0,
        "NEGATIVE" => n < 0.0,
        "DIVISIBLE_BY" => {
            let divisor = ctx.number_of(block, "DIVISOR")?;
            divisor != 0.0 && n % divisor == 0.0
        }
        other => return Err(unknown_operator(block, "PROPERTY", other)),
    };
    Ok(Value::Boolean(result))
}

fn is_prime(n: f64) -> bool {
    if n < 2.0 || n.fract() != 0.0 || !n.is_finite() {
        return false;
    }
    if n == 2.0 || n == 3.0 {
        return true;
    }
    if n % 2.0 == 0.0 || n % 3.0 == 0.0 {
        return false;
    }
    let mut x = 6.0;
    while x - 1.0 <= n.sqrt() {
        if n % (x - 1.0) == 0.0 || n % (x + 1.0) == 0.0 {
            return false;
        }
        x += 6.0;
    }
    true
}

/// Add `DELTA` to variable `VAR`. An unbound variable counts as 0.
pub(super) fn math_change(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let var = block.require_field("VAR")?;
    let delta = ctx.number_of(block, "DELTA")?;
    let current = match ctx.namespace().get(var) {
        Some(value) => value.as_number()?,
        None => 0.0,
    };
    ctx.namespace_mut().set(var, Value::Number(current + delta));
    Ok(Value::Nil)
}

/// Uniform integer between `FROM` and `TO`, inclusive, in either order.
pub(super) fn math_random_int(ctx: &mut ExecutionContext<'_>, block: &Block) -> Flow {
    let from = ctx.number_of(block, "FROM")?;
    let to = ctx.number_of(block, "TO")?;
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    let (lo, hi) = (lo.ceil(), hi.floor());
    if !(lo <= hi) || !lo.is_finite() || !hi.is_finite() {
        return Err(EvalError::TypeCoercion(format!(
            "no integer between {} and {}",
            format_number(from),
            format_number(to)
        ))
        .into());
    }
    let picked = ctx.rng().gen_range(lo as i64..=hi as i64);
    Ok(Value::Number(picked as f64))
}

/// Uniform float in `[0, 1)`.
pub(super) fn math_random_float(ctx: &mut ExecutionContext<'_>, _block: &Block) -> Flow {
    Ok(Value::Number(ctx.rng().gen::<f64>()))
}
