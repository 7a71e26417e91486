//! Built-in block kinds.
//!
//! Defines [`BlockKind`], the closed set of block type tags the evaluator
//! ships handlers for. Tags outside this set can still be evaluated through
//! host-registered prefix handlers.

use std::fmt;

/// All 53 built-in block type tags.
pub const ALL_BLOCK_TYPES: &[&str] = &[
    // Control (7)
    "controls_if", "controls_repeat", "controls_repeat_ext", "controls_whileUntil",
    "controls_for", "controls_forEach", "controls_flow_statements",
    // Logic (6)
    "logic_compare", "logic_operation", "logic_negate", "logic_boolean", "logic_null",
    "logic_ternary",
    // Math (10)
    "math_number", "math_arithmetic", "math_single", "math_round", "math_modulo",
    "math_constant", "math_number_property", "math_change", "math_random_int",
    "math_random_float",
    // Text (10)
    "text", "text_join", "text_print", "text_length", "text_isEmpty", "text_charAt",
    "text_append", "text_indexOf", "text_changeCase", "text_trim",
    // Lists (10)
    "lists_create_empty", "lists_create_with", "lists_repeat", "lists_length",
    "lists_isEmpty", "lists_indexOf", "lists_getIndex", "lists_setIndex",
    "lists_getSublist", "lists_split",
    // Colour (4)
    "colour_picker", "colour_random", "colour_rgb", "colour_blend",
    // Variables (2)
    "variables_get", "variables_set",
    // Procedures (4)
    "procedures_defnoreturn", "procedures_defreturn", "procedures_callnoreturn",
    "procedures_callreturn",
];

/// A built-in block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    // Control
    ControlsIf,
    ControlsRepeat,
    ControlsRepeatExt,
    ControlsWhileUntil,
    ControlsFor,
    ControlsForEach,
    ControlsFlowStatements,
    // Logic
    LogicCompare,
    LogicOperation,
    LogicNegate,
    LogicBoolean,
    LogicNull,
    LogicTernary,
    // Math
    MathNumber,
    MathArithmetic,
    MathSingle,
    MathRound,
    MathModulo,
    MathConstant,
    MathNumberProperty,
    MathChange,
    MathRandomInt,
    MathRandomFloat,
    // Text
    Text,
    TextJoin,
    TextPrint,
    TextLength,
    TextIsEmpty,
    TextCharAt,
    TextAppend,
    TextIndexOf,
    TextChangeCase,
    TextTrim,
    // Lists
    ListsCreateEmpty,
    ListsCreateWith,
    ListsRepeat,
    ListsLength,
    ListsIsEmpty,
    ListsIndexOf,
    ListsGetIndex,
    ListsSetIndex,
    ListsGetSublist,
    ListsSplit,
    // Colour
    ColourPicker,
    ColourRandom,
    ColourRgb,
    ColourBlend,
    // Variables
    VariablesGet,
    VariablesSet,
    // Procedures
    ProceduresDefNoReturn,
    ProceduresDefReturn,
    ProceduresCallNoReturn,
    ProceduresCallReturn,
}

impl BlockKind {
    /// Look up a built-in block type by its tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<BlockKind> {
        Some(match tag {
            "controls_if" => BlockKind::ControlsIf,
            "controls_repeat" => BlockKind::ControlsRepeat,
            "controls_repeat_ext" => BlockKind::ControlsRepeatExt,
            "controls_whileUntil" => BlockKind::ControlsWhileUntil,
            "controls_for" => BlockKind::ControlsFor,
            "controls_forEach" => BlockKind::ControlsForEach,
            "controls_flow_statements" => BlockKind::ControlsFlowStatements,

            "logic_compare" => BlockKind::LogicCompare,
            "logic_operation" => BlockKind::LogicOperation,
            "logic_negate" => BlockKind::LogicNegate,
            "logic_boolean" => BlockKind::LogicBoolean,
            "logic_null" => BlockKind::LogicNull,
            "logic_ternary" => BlockKind::LogicTernary,

            "math_number" => BlockKind::MathNumber,
            "math_arithmetic" => BlockKind::MathArithmetic,
            "math_single" => BlockKind::MathSingle,
            "math_round" => BlockKind::MathRound,
            "math_modulo" => BlockKind::MathModulo,
            "math_constant" => BlockKind::MathConstant,
            "math_number_property" => BlockKind::MathNumberProperty,
            "math_change" => BlockKind::MathChange,
            "math_random_int" => BlockKind::MathRandomInt,
            "math_random_float" => BlockKind::MathRandomFloat,

            "text" => BlockKind::Text,
            "text_join" => BlockKind::TextJoin,
            "text_print" => BlockKind::TextPrint,
            "text_length" => BlockKind::TextLength,
            "text_isEmpty" => BlockKind::TextIsEmpty,
            "text_charAt" => BlockKind::TextCharAt,
            "text_append" => BlockKind::TextAppend,
            "text_indexOf" => BlockKind::TextIndexOf,
            "text_changeCase" => BlockKind::TextChangeCase,
            "text_trim" => BlockKind::TextTrim,

            "lists_create_empty" => BlockKind::ListsCreateEmpty,
            "lists_create_with" => BlockKind::ListsCreateWith,
            "lists_repeat" => BlockKind::ListsRepeat,
            "lists_length" => BlockKind::ListsLength,
            "lists_isEmpty" => BlockKind::ListsIsEmpty,
            "lists_indexOf" => BlockKind::ListsIndexOf,
            "lists_getIndex" => BlockKind::ListsGetIndex,
            "lists_setIndex" => BlockKind::ListsSetIndex,
            "lists_getSublist" => BlockKind::ListsGetSublist,
            "lists_split" => BlockKind::ListsSplit,

            "colour_picker" => BlockKind::ColourPicker,
            "colour_random" => BlockKind::ColourRandom,
            "colour_rgb" => BlockKind::ColourRgb,
            "colour_blend" => BlockKind::ColourBlend,

            "variables_get" => BlockKind::VariablesGet,
            "variables_set" => BlockKind::VariablesSet,

            "procedures_defnoreturn" => BlockKind::ProceduresDefNoReturn,
            "procedures_defreturn" => BlockKind::ProceduresDefReturn,
            "procedures_callnoreturn" => BlockKind::ProceduresCallNoReturn,
            "procedures_callreturn" => BlockKind::ProceduresCallReturn,

            _ => return None,
        })
    }

    /// The tag this kind is serialised under.
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::ControlsIf => "controls_if",
            BlockKind::ControlsRepeat => "controls_repeat",
            BlockKind::ControlsRepeatExt => "controls_repeat_ext",
            BlockKind::ControlsWhileUntil => "controls_whileUntil",
            BlockKind::ControlsFor => "controls_for",
            BlockKind::ControlsForEach => "controls_forEach",
            BlockKind::ControlsFlowStatements => "controls_flow_statements",

            BlockKind::LogicCompare => "logic_compare",
            BlockKind::LogicOperation => "logic_operation",
            BlockKind::LogicNegate => "logic_negate",
            BlockKind::LogicBoolean => "logic_boolean",
            BlockKind::LogicNull => "logic_null",
            BlockKind::LogicTernary => "logic_ternary",

            BlockKind::MathNumber => "math_number",
            BlockKind::MathArithmetic => "math_arithmetic",
            BlockKind::MathSingle => "math_single",
            BlockKind::MathRound => "math_round",
            BlockKind::MathModulo => "math_modulo",
            BlockKind::MathConstant => "math_constant",
            BlockKind::MathNumberProperty => "math_number_property",
            BlockKind::MathChange => "math_change",
            BlockKind::MathRandomInt => "math_random_int",
            BlockKind::MathRandomFloat => "math_random_float",

            BlockKind::Text => "text",
            BlockKind::TextJoin => "text_join",
            BlockKind::TextPrint => "text_print",
            BlockKind::TextLength => "text_length",
            BlockKind::TextIsEmpty => "text_isEmpty",
            BlockKind::TextCharAt => "text_charAt",
            BlockKind::TextAppend => "text_append",
            BlockKind::TextIndexOf => "text_indexOf",
            BlockKind::TextChangeCase => "text_changeCase",
            BlockKind::TextTrim => "text_trim",

            BlockKind::ListsCreateEmpty => "lists_create_empty",
            BlockKind::ListsCreateWith => "lists_create_with",
            BlockKind::ListsRepeat => "lists_repeat",
            BlockKind::ListsLength => "lists_length",
            BlockKind::ListsIsEmpty => "lists_isEmpty",
            BlockKind::ListsIndexOf => "lists_indexOf",
            BlockKind::ListsGetIndex => "lists_getIndex",
            BlockKind::ListsSetIndex => "lists_setIndex",
            BlockKind::ListsGetSublist => "lists_getSublist",
            BlockKind::ListsSplit => "lists_split",

            BlockKind::ColourPicker => "colour_picker",
            BlockKind::ColourRandom => "colour_random",
            BlockKind::ColourRgb => "colour_rgb",
            BlockKind::ColourBlend => "colour_blend",

            BlockKind::VariablesGet => "variables_get",
            BlockKind::VariablesSet => "variables_set",

            BlockKind::ProceduresDefNoReturn => "procedures_defnoreturn",
            BlockKind::ProceduresDefReturn => "procedures_defreturn",
            BlockKind::ProceduresCallNoReturn => "procedures_callnoreturn",
            BlockKind::ProceduresCallReturn => "procedures_callreturn",
        }
    }

    /// Procedure definitions are registered ahead of a run rather than executed.
    pub fn is_procedure_definition(self) -> bool {
        matches!(
            self,
            BlockKind::ProceduresDefNoReturn | BlockKind::ProceduresDefReturn
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_block_types_count() {
        assert_eq!(ALL_BLOCK_TYPES.len(), 53);
    }

    #[test]
    fn test_from_tag_recognises_all() {
        for &tag in ALL_BLOCK_TYPES {
            let kind = BlockKind::from_tag(tag);
            assert!(kind.is_some(), "from_tag should recognise '{tag}'");
            assert_eq!(kind.map(BlockKind::tag), Some(tag));
        }
    }

    #[test]
    fn test_from_tag_is_case_sensitive() {
        for tag in ["Controls_if", "TEXT", "text_isempty", "controls_whileuntil", ""] {
            assert!(
                BlockKind::from_tag(tag).is_none(),
                "from_tag should not recognise '{tag}'"
            );
        }
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(format!("{}", BlockKind::ControlsWhileUntil), "controls_whileUntil");
        assert_eq!(format!("{}", BlockKind::MathNumber), "math_number");
    }
}
