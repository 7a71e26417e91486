//! Runtime values.
//!
//! [`Value`] is the closed set of variants a block can evaluate to. Lists are
//! shared by reference: cloning a `Value::List` aliases its storage, so a
//! mutation through one variable is visible through every other.
//!
//! Conversions follow one table for every handler:
//!
//! | from \ to | number | string | boolean |
//! |-----------|--------|--------|---------|
//! | Number    | itself | shortest round-trip decimal | `!= 0`, NaN is false |
//! | String    | trimmed decimal parse, else error | itself | non-empty |
//! | Boolean   | 1 / 0  | `true` / `false` | itself |
//! | List      | error  | elements joined by `,` | error |
//! | Colour    | error  | `#rrggbb` | error |
//! | Nil       | error  | `nil` | false |

use crate::error::{EvalError, EvalResult};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    List(ListRef),
    Colour(Colour),
    Nil,
}

impl Value {
    /// Wrap owned items in a fresh list.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(ListRef::new(items))
    }

    /// Variant name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Colour(_) => "colour",
            Value::Nil => "nil",
        }
    }

    // ── Conversions ──────────────────────────────────────────────────────

    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
                EvalError::TypeCoercion(format!("cannot convert string '{s}' to number"))
            }),
            other => Err(coercion(other, "number")),
        }
    }

    /// String form of any value. Total: every variant has one.
    ///
    /// Lists render their elements comma-separated. A list met again while
    /// it is still being rendered contributes empty text.
    pub fn as_string(&self) -> String {
        let mut out = String::new();
        self.write_string(&mut out, &mut Vec::new());
        out
    }

    fn write_string(&self, out: &mut String, open: &mut Vec<ListRef>) {
        match self {
            Value::Number(n) => out.push_str(&format_number(*n)),
            Value::String(s) => out.push_str(s),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::List(list) => list.write_joined(",", out, open),
            Value::Colour(c) => out.push_str(&c.to_string()),
            Value::Nil => out.push_str("nil"),
        }
    }

    pub fn as_boolean(&self) -> EvalResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0 && !n.is_nan()),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Nil => Ok(false),
            other => Err(coercion(other, "boolean")),
        }
    }

    /// The list behind this value. The returned handle aliases the original.
    pub fn as_list(&self) -> EvalResult<ListRef> {
        match self {
            Value::List(items) => Ok(items.clone()),
            other => Err(coercion(other, "list")),
        }
    }

    /// Convert a 1-based position into a 0-based index below `len`.
    pub fn as_index(&self, len: usize) -> EvalResult<usize> {
        let n = self.as_number()?;
        if n.fract() != 0.0 || n < 1.0 || n > len as f64 {
            return Err(EvalError::TypeCoercion(format!(
                "position {} is out of range 1..={len}",
                format_number(n)
            )));
        }
        Ok(n as usize - 1)
    }

    // ── Comparison ───────────────────────────────────────────────────────

    /// Language-level equality.
    ///
    /// Lists compare by identity. `Nil` equals only `Nil`. A Number against a
    /// value that converts to a number compares numerically; any other mixed
    /// pair compares string forms.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Colour(a), Value::Colour(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, _) | (_, Value::Nil) | (Value::List(_), _) | (_, Value::List(_)) => false,
            _ => match self.numeric_pair(other) {
                Some((a, b)) => a == b,
                None => self.as_string() == other.as_string(),
            },
        }
    }

    /// Language-level ordering. Lists and `Nil` cannot be ordered.
    pub fn is_less_than(&self, other: &Value) -> EvalResult<bool> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a < b),
            (Value::String(a), Value::String(b)) => Ok(a.as_bytes() < b.as_bytes()),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(!a & b),
            (Value::Colour(a), Value::Colour(b)) => Ok(a < b),
            (Value::Nil, _) | (_, Value::Nil) | (Value::List(_), _) | (_, Value::List(_)) => {
                Err(EvalError::TypeCoercion(format!(
                    "cannot order {} against {}",
                    self.type_name(),
                    other.type_name()
                )))
            }
            _ => Ok(match self.numeric_pair(other) {
                Some((a, b)) => a < b,
                None => self.as_string().as_bytes() < other.as_string().as_bytes(),
            }),
        }
    }

    fn numeric_pair(&self, other: &Value) -> Option<(f64, f64)> {
        match (self, other) {
            (Value::Number(a), rhs) => rhs.as_number().ok().map(|b| (*a, b)),
            (lhs, Value::Number(b)) => lhs.as_number().ok().map(|a| (a, *b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

fn coercion(value: &Value, target: &str) -> EvalError {
    EvalError::TypeCoercion(format!("cannot convert {} to {target}", value.type_name()))
}

/// Render a number the way the text blocks show it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Lists
// ══════════════════════════════════════════════════════════════════════════════

/// Shared, mutable list storage.
#[derive(Debug, Clone, Default)]
pub struct ListRef(Rc<RefCell<Vec<Value>>>);

impl ListRef {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at a 0-based index.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Copy of the current elements. Later mutations are not reflected.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same storage.
    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// String forms of the elements separated by `delim`.
    pub fn join(&self, delim: &str) -> String {
        let mut out = String::new();
        self.write_joined(delim, &mut out, &mut Vec::new());
        out
    }

    fn write_joined(&self, delim: &str, out: &mut String, open: &mut Vec<ListRef>) {
        if open.iter().any(|seen| seen.ptr_eq(self)) {
            return;
        }
        open.push(self.clone());
        for (idx, item) in self.0.borrow().iter().enumerate() {
            if idx > 0 {
                out.push_str(delim);
            }
            item.write_string(out, open);
        }
        open.pop();
    }
}

/// Structural, for assertions. Language equality on lists is [`ListRef::ptr_eq`].
impl PartialEq for ListRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Colours
// ══════════════════════════════════════════════════════════════════════════════

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Colour> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Mix towards `other`; `ratio` 0 keeps `self`, 1 yields `other`.
    pub fn blend(self, other: Colour, ratio: f64) -> Colour {
        let ratio = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - ratio) + b as f64 * ratio).round() as u8;
        Colour::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(Value::Number(10.0).as_string(), "10");
        assert_eq!(Value::Number(-0.0).as_string(), "0");
        assert_eq!(Value::Number(2.5).as_string(), "2.5");
        assert_eq!(Value::Number(f64::INFINITY).as_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).as_string(), "-Infinity");
        assert_eq!(Value::Number(f64::NAN).as_string(), "NaN");
    }

    #[test]
    fn test_number_string_round_trip() {
        for n in [0.0, 1.0, -7.0, 0.1, 0.30000000000000004, 1e21, 9007199254740991.0, 1e-7] {
            let text = Value::Number(n).as_string();
            assert_eq!(s(&text).as_number(), Ok(n), "round trip failed for {text}");
        }
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(s(" 42 ").as_number(), Ok(42.0));
        assert_eq!(s("-1.5").as_number(), Ok(-1.5));
        assert!(matches!(s("abc").as_number(), Err(EvalError::TypeCoercion(_))));
        assert!(matches!(s("").as_number(), Err(EvalError::TypeCoercion(_))));
    }

    #[test]
    fn test_boolean_conversions() {
        assert_eq!(Value::Boolean(true).as_number(), Ok(1.0));
        assert_eq!(Value::Number(0.0).as_boolean(), Ok(false));
        assert_eq!(Value::Number(f64::NAN).as_boolean(), Ok(false));
        assert_eq!(Value::Number(-3.0).as_boolean(), Ok(true));
        assert_eq!(s("").as_boolean(), Ok(false));
        assert_eq!(s("false").as_boolean(), Ok(true));
        assert_eq!(Value::Nil.as_boolean(), Ok(false));
        assert!(Value::list(vec![]).as_boolean().is_err());
    }

    #[test]
    fn test_as_list_only_for_lists() {
        assert!(matches!(
            Value::Number(1.0).as_list(),
            Err(EvalError::TypeCoercion(_))
        ));
        assert!(matches!(s("a,b").as_list(), Err(EvalError::TypeCoercion(_))));
        assert_eq!(Value::list(vec![Value::Nil]).as_list().map(|l| l.len()), Ok(1));
    }

    #[test]
    fn test_as_index() {
        assert_eq!(Value::Number(1.0).as_index(3), Ok(0));
        assert_eq!(Value::Number(3.0).as_index(3), Ok(2));
        assert!(Value::Number(0.0).as_index(3).is_err());
        assert!(Value::Number(4.0).as_index(3).is_err());
        assert!(Value::Number(1.5).as_index(3).is_err());
        assert!(Value::Number(1.0).as_index(0).is_err());
    }

    #[test]
    fn test_list_string_form() {
        let list = Value::list(vec![Value::Number(1.0), s("a"), Value::Boolean(false)]);
        assert_eq!(list.as_string(), "1,a,false");
    }

    #[test]
    fn test_self_containing_list_renders_finitely() {
        let list = Value::list(vec![Value::Number(1.0)]);
        let items = list.as_list().unwrap();
        items.borrow_mut().push(list.clone());
        let nested = Value::list(vec![list.clone(), list.clone()]);
        assert_eq!(list.as_string(), "1,");
        assert_eq!(nested.as_string(), "1,,1,");
    }

    #[test]
    fn test_list_aliasing() {
        let a = Value::list(vec![Value::Number(1.0)]);
        let b = a.clone();
        if let Ok(items) = b.as_list() {
            items.borrow_mut().push(Value::Number(2.0));
        }
        assert_eq!(a.as_list().map(|l| l.len()), Ok(2));
        assert!(a.equals(&b));
        assert!(!a.equals(&Value::list(vec![Value::Number(1.0), Value::Number(2.0)])));
    }

    #[test]
    fn test_equals_same_variant() {
        assert!(Value::Number(2.0).equals(&Value::Number(2.0)));
        assert!(!Value::Number(f64::NAN).equals(&Value::Number(f64::NAN)));
        assert!(s("abc").equals(&s("abc")));
        assert!(Value::Nil.equals(&Value::Nil));
        assert!(Value::Colour(Colour::new(1, 2, 3)).equals(&Value::Colour(Colour::new(1, 2, 3))));
    }

    #[test]
    fn test_equals_mixed_variants() {
        assert!(Value::Number(1.0).equals(&s("1")));
        assert!(s("1.0").equals(&Value::Number(1.0)));
        assert!(Value::Number(1.0).equals(&Value::Boolean(true)));
        assert!(!Value::Number(1.0).equals(&s("one")));
        assert!(s("true").equals(&Value::Boolean(true)));
        assert!(!Value::Nil.equals(&s("nil")));
        assert!(!Value::Nil.equals(&Value::Number(0.0)));
    }

    #[test]
    fn test_is_less_than() {
        assert_eq!(Value::Number(1.0).is_less_than(&Value::Number(2.0)), Ok(true));
        assert_eq!(s("apple").is_less_than(&s("banana")), Ok(true));
        assert_eq!(s("Z").is_less_than(&s("a")), Ok(true));
        assert_eq!(Value::Boolean(false).is_less_than(&Value::Boolean(true)), Ok(true));
        assert_eq!(Value::Number(9.0).is_less_than(&s("10")), Ok(true));
        assert_eq!(s("abc").is_less_than(&Value::Number(1.0)), Ok(false));
        assert!(Value::Nil.is_less_than(&Value::Number(1.0)).is_err());
        assert!(Value::list(vec![]).is_less_than(&Value::list(vec![])).is_err());
    }

    #[test]
    fn test_colour_hex() {
        let c = Colour::parse_hex("#ff8000");
        assert_eq!(c, Some(Colour::new(255, 128, 0)));
        assert_eq!(Colour::new(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Colour::parse_hex("ff8000"), Some(Colour::new(255, 128, 0)));
        assert_eq!(Colour::parse_hex("#ff80"), None);
        assert_eq!(Colour::parse_hex("#gg0000"), None);
    }

    #[test]
    fn test_colour_blend() {
        let black = Colour::new(0, 0, 0);
        let white = Colour::new(255, 255, 255);
        assert_eq!(black.blend(white, 0.0), black);
        assert_eq!(black.blend(white, 1.0), white);
        assert_eq!(black.blend(white, 0.5), Colour::new(128, 128, 128));
    }
}
