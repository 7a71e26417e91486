//! Built-in block handlers, grouped by block family.

mod colour;
mod control;
mod lists;
mod logic;
mod math;
mod procedures;
mod text;
mod variables;

use crate::error::Flow;
use crate::interpreter::ExecutionContext;
use crate::value::Value;
use blockly_types::{Block, BlockKind};

/// Run the built-in handler for `kind`.
pub(crate) fn evaluate_builtin(ctx: &mut ExecutionContext<'_>, kind: BlockKind, block: &Block) -> Flow {
    match kind {
        BlockKind::ControlsIf => control::controls_if(ctx, block),
        BlockKind::ControlsRepeat => control::controls_repeat(ctx, block),
        BlockKind::ControlsRepeatExt => control::controls_repeat_ext(ctx, block),
        BlockKind::ControlsWhileUntil => control::controls_while_until(ctx, block),
        BlockKind::ControlsFor => control::controls_for(ctx, block),
        BlockKind::ControlsForEach => control::controls_for_each(ctx, block),
        BlockKind::ControlsFlowStatements => control::controls_flow_statements(ctx, block),

        BlockKind::LogicCompare => logic::logic_compare(ctx, block),
        BlockKind::LogicOperation => logic::logic_operation(ctx, block),
        BlockKind::LogicNegate => logic::logic_negate(ctx, block),
        BlockKind::LogicBoolean => logic::logic_boolean(ctx, block),
        BlockKind::LogicNull => logic::logic_null(ctx, block),
        BlockKind::LogicTernary => logic::logic_ternary(ctx, block),

        BlockKind::MathNumber => math::math_number(ctx, block),
        BlockKind::MathArithmetic => math::math_arithmetic(ctx, block),
        BlockKind::MathSingle => math::math_single(ctx, block),
        BlockKind::MathRound => math::math_round(ctx, block),
        BlockKind::MathModulo => math::math_modulo(ctx, block),
        BlockKind::MathConstant => math::math_constant(ctx, block),
        BlockKind::MathNumberProperty => math::math_number_property(ctx, block),
        BlockKind::MathChange => math::math_change(ctx, block),
        BlockKind::MathRandomInt => math::math_random_int(ctx, block),
        BlockKind::MathRandomFloat => math::math_random_float(ctx, block),

        BlockKind::Text => text::text(ctx, block),
        BlockKind::TextJoin => text::text_join(ctx, block),
        BlockKind::TextPrint => text::text_print(ctx, block),
        BlockKind::TextLength => text::text_length(ctx, block),
        BlockKind::TextIsEmpty => text::text_is_empty(ctx, block),
        BlockKind::TextCharAt => text::text_char_at(ctx, block),
        BlockKind::TextAppend => text::text_append(ctx, block),
        BlockKind::TextIndexOf => text::text_index_of(ctx, block),
        BlockKind::TextChangeCase => text::text_change_case(ctx, block),
        BlockKind::TextTrim => text::text_trim(ctx, block),

        BlockKind::ListsCreateEmpty => lists::lists_create_empty(ctx, block),
        BlockKind::ListsCreateWith => lists::lists_create_with(ctx, block),
        BlockKind::ListsRepeat => lists::lists_repeat(ctx, block),
        BlockKind::ListsLength => lists::lists_length(ctx, block),
        BlockKind::ListsIsEmpty => lists::lists_is_empty(ctx, block),
        BlockKind::ListsIndexOf => lists::lists_index_of(ctx, block),
        BlockKind::ListsGetIndex => lists::lists_get_index(ctx, block),
        BlockKind::ListsSetIndex => lists::lists_set_index(ctx, block),
        BlockKind::ListsGetSublist => lists::lists_get_sublist(ctx, block),
        BlockKind::ListsSplit => lists::lists_split(ctx, block),

        BlockKind::ColourPicker => colour::colour_picker(ctx, block),
        BlockKind::ColourRandom => colour::colour_random(ctx, block),
        BlockKind::ColourRgb => colour::colour_rgb(ctx, block),
        BlockKind::ColourBlend => colour::colour_blend(ctx, block),

        BlockKind::VariablesGet => variables::variables_get(ctx, block),
        BlockKind::VariablesSet => variables::variables_set(ctx, block),

        BlockKind::ProceduresDefNoReturn | BlockKind::ProceduresDefReturn => {
            procedures::procedures_definition(ctx, block)
        }
        BlockKind::ProceduresCallNoReturn | BlockKind::ProceduresCallReturn => {
            procedures::procedures_call(ctx, block)
        }
    }
}

/// Value sockets whose name starts with `prefix`, in declaration order
/// (`ADD0`, `ADD1`, … on joins and list constructors).
fn numbered_inputs<'b>(block: &'b Block, prefix: &'b str) -> impl Iterator<Item = &'b str> + 'b {
    block
        .values
        .iter()
        .filter(move |v| v.name.starts_with(prefix))
        .map(|v| v.name.as_str())
}

/// Values of the item slots on a join or list constructor, in order.
///
/// With a mutation recording `items`, exactly that many `ADDn` slots are
/// read and a slot with nothing attached yields `empty`. Otherwise every
/// socket named with `prefix` is read.
fn slot_values(
    ctx: &mut ExecutionContext<'_>,
    block: &Block,
    prefix: &str,
    empty: Value,
) -> Flow<Vec<Value>> {
    let Some(count) = block.mutation.as_ref().and_then(|m| m.items) else {
        return numbered_inputs(block, prefix)
            .map(|name| ctx.value_of(block, name))
            .collect();
    };
    let mut values = Vec::new();
    for idx in 0..count {
        let name = format!("ADD{idx}");
        match block.value_input(&name) {
            Some(input) if !input.blocks.is_empty() => {
                values.push(ctx.value_of(block, &name)?);
            }
            _ => values.push(empty.clone()),
        }
    }
    Ok(values)
}
