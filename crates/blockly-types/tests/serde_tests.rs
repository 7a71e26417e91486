//! JSON form of the block tree.
//!
//! Hosts that do not speak the XML form hand programs over as JSON. These
//! tests pin the field names and the defaults for omitted collections.

use blockly_types::{Block, BlockKind, Mutation, Workspace};
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════════════════════════
// Deserialisation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn deserialize_print_hello() {
    let json = r#"
{
  "type": "text_print",
  "values": [
    { "name": "TEXT", "blocks": [ { "type": "text", "fields": [ { "name": "TEXT", "value": "hello, world" } ] } ] }
  ]
}
"#;
    let block: Block = serde_json::from_str(json).expect("valid block json");
    let expected = Block::new("text_print")
        .with_value("TEXT", Block::new("text").with_field("TEXT", "hello, world"));
    assert_eq!(block, expected);
    assert_eq!(block.kind(), Some(BlockKind::TextPrint));
}

#[test]
fn deserialize_if_mutation() {
    let json = r#"
{
  "type": "controls_if",
  "mutation": { "elseif": 2, "else": 1 }
}
"#;
    let block: Block = serde_json::from_str(json).expect("valid block json");
    assert_eq!(block.mutation, Some(Mutation::branches(2, 1)));
}

#[test]
fn deserialize_call_mutation_and_next() {
    let json = r#"
{
  "type": "procedures_callnoreturn",
  "mutation": { "name": "greet", "args": [ { "name": "who" } ] },
  "values": [ { "name": "ARG0", "blocks": [ { "type": "text", "fields": [ { "name": "TEXT", "value": "Ada" } ] } ] } ],
  "next": { "type": "logic_null" }
}
"#;
    let block: Block = serde_json::from_str(json).expect("valid block json");
    let mutation = block.require_mutation().expect("mutation");
    assert_eq!(mutation.name.as_deref(), Some("greet"));
    assert_eq!(mutation.arg_names().collect::<Vec<_>>(), vec!["who"]);
    assert_eq!(block.next().map(|n| n.block_type.as_str()), Some("logic_null"));
}

#[test]
fn deserialize_workspace() {
    let json = r#"
{
  "blocks": [
    { "type": "procedures_defnoreturn", "fields": [ { "name": "NAME", "value": "noop" } ] },
    { "type": "logic_boolean", "fields": [ { "name": "BOOL", "value": "TRUE" } ] }
  ]
}
"#;
    let ws: Workspace = serde_json::from_str(json).expect("valid workspace json");
    assert_eq!(ws.blocks.len(), 2);
    assert_eq!(ws.procedure_definitions().count(), 1);
}

// ══════════════════════════════════════════════════════════════════════════════
// Serialisation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn serialize_omits_empty_collections() {
    let block = Block::new("logic_null");
    let json = serde_json::to_string(&block).expect("serialize");
    assert_eq!(json, r#"{"type":"logic_null"}"#);
}

#[test]
fn serialize_then_deserialize_chain() {
    let chain = Block::new("variables_set")
        .with_field("VAR", "x")
        .with_value("VALUE", Block::new("math_number").with_field("NUM", "3"))
        .then(Block::new("variables_get").with_field("VAR", "x"));
    let json = serde_json::to_string(&chain).expect("serialize");
    let back: Block = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, chain);
    assert_eq!(back.chain().count(), 2);
}
