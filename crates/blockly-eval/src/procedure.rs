//! User-defined procedures.

use crate::error::{EvalError, EvalResult};
use blockly_types::{Block, BlockKind};
use std::collections::BTreeMap;

/// A named procedure: parameters, an optional body and an optional return expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: String,
    pub params: Vec<String>,
    pub body: Option<Block>,
    pub return_expr: Option<Block>,
}

impl Procedure {
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            body: None,
            return_expr: None,
        }
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_return(mut self, expr: Block) -> Self {
        self.return_expr = Some(expr);
        self
    }

    /// Build a procedure from a `procedures_defnoreturn` / `procedures_defreturn` block.
    ///
    /// Reads the `NAME` field, parameter names from the mutation (none when
    /// absent), the `STACK` statement as body and, for `procedures_defreturn`,
    /// the `RETURN` value when one is attached.
    pub fn from_definition(block: &Block) -> EvalResult<Procedure> {
        let kind = block
            .kind()
            .filter(|k| k.is_procedure_definition())
            .ok_or_else(|| EvalError::UnknownBlockType(block.block_type.clone()))?;

        let name = block.require_field("NAME")?;
        let params = block
            .mutation
            .as_ref()
            .map(|m| m.arg_names().map(str::to_string).collect())
            .unwrap_or_default();

        let return_expr = match kind {
            BlockKind::ProceduresDefReturn if block.value_input("RETURN").is_some() => {
                Some(block.single_value("RETURN")?.clone())
            }
            _ => None,
        };

        Ok(Procedure {
            name: name.to_string(),
            params,
            body: block.statement("STACK").cloned(),
            return_expr,
        })
    }
}

/// Procedures by name. Later registrations replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ProcedureTable {
    procedures: BTreeMap<String, Procedure>,
}

impl ProcedureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, procedure: Procedure) -> Option<Procedure> {
        self.procedures.insert(procedure.name.clone(), procedure)
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockly_types::Mutation;

    fn number(n: &str) -> Block {
        Block::new("math_number").with_field("NUM", n)
    }

    #[test]
    fn test_from_defreturn() {
        let def = Block::new("procedures_defreturn")
            .with_field("NAME", "double")
            .with_mutation(Mutation::procedure("double", ["x"]))
            .with_statement("STACK", Block::new("logic_null"))
            .with_value("RETURN", number("2"));
        let proc = Procedure::from_definition(&def).expect("valid definition");
        assert_eq!(proc.name, "double");
        assert_eq!(proc.params, vec!["x".to_string()]);
        assert_eq!(proc.body, Some(Block::new("logic_null")));
        assert_eq!(proc.return_expr, Some(number("2")));
    }

    #[test]
    fn test_from_defnoreturn_without_mutation() {
        let def = Block::new("procedures_defnoreturn").with_field("NAME", "noop");
        let proc = Procedure::from_definition(&def).expect("valid definition");
        assert!(proc.params.is_empty());
        assert!(proc.body.is_none());
        assert!(proc.return_expr.is_none());
    }

    #[test]
    fn test_defnoreturn_ignores_return_socket() {
        let def = Block::new("procedures_defnoreturn")
            .with_field("NAME", "p")
            .with_value("RETURN", number("1"));
        let proc = Procedure::from_definition(&def).expect("valid definition");
        assert!(proc.return_expr.is_none());
    }

    #[test]
    fn test_from_definition_rejects_other_blocks() {
        let err = Procedure::from_definition(&Block::new("text_print"));
        assert_eq!(err, Err(EvalError::UnknownBlockType("text_print".into())));
    }

    #[test]
    fn test_from_definition_requires_name() {
        let err = Procedure::from_definition(&Block::new("procedures_defnoreturn"));
        assert!(matches!(err, Err(EvalError::MissingField { .. })));
    }

    #[test]
    fn test_table_replaces_by_name() {
        let mut table = ProcedureTable::new();
        assert!(table.insert(Procedure::new("f", ["a"])).is_none());
        let old = table.insert(Procedure::new("f", ["a", "b"]));
        assert_eq!(old.map(|p| p.params.len()), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("f").map(|p| p.params.len()), Some(2));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["f"]);
    }
}
