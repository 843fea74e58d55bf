//! The kinds of child a node may produce.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::error::{GenError, GenResult};
use crate::leaf::{LeafGenerator, RanBool, RanDate, RanDigits, RanInt, RanStr};
use crate::node::Node;

/// A caller-supplied leaf producer
pub type LeafFn = Arc<dyn Fn(&mut dyn RngCore) -> Node + Send + Sync>;

/// One entry of a child-kind candidate set
#[derive(Clone)]
pub enum ChildKind {
    /// Recurse into another node of the strategy's own shape
    Recurse,
    /// Recurse into a nested object-shaped sub-generator
    Object,
    /// `[min, max)` integer leaf
    Int(RanInt),
    /// Fixed-digit integer leaf
    Digits(RanDigits),
    /// Alphanumeric string leaf
    Str(RanStr),
    /// Boolean leaf
    Bool(RanBool),
    /// Date string leaf
    Date(RanDate),
    /// Caller-supplied leaf producer
    Custom(LeafFn),
}

impl ChildKind {
    /// Names accepted by [`ChildKind::from_name`]
    pub const NAMES: [&'static str; 7] =
        ["recurse", "object", "int", "digits", "string", "bool", "date"];

    /// Resolve a kind by name, using default leaf parameters
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "recurse" | "node" => ChildKind::Recurse,
            "object" | "obj" => ChildKind::Object,
            "int" => ChildKind::Int(RanInt::default()),
            "digits" => ChildKind::Digits(RanDigits::default()),
            "string" | "str" => ChildKind::Str(RanStr::default()),
            "bool" => ChildKind::Bool(RanBool::default()),
            "date" => ChildKind::Date(RanDate::default()),
            _ => return None,
        };
        Some(kind)
    }

    /// Wrap a closure as a custom leaf kind
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> Node + Send + Sync + 'static,
    {
        ChildKind::Custom(Arc::new(f))
    }

    /// True for kinds that build a container rather than a leaf
    pub fn is_container(&self) -> bool {
        matches!(self, ChildKind::Recurse | ChildKind::Object)
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ChildKind::Recurse => "recurse",
            ChildKind::Object => "object",
            ChildKind::Int(_) => "int",
            ChildKind::Digits(_) => "digits",
            ChildKind::Str(_) => "string",
            ChildKind::Bool(_) => "bool",
            ChildKind::Date(_) => "date",
            ChildKind::Custom(_) => "custom",
        }
    }

    /// Produce a leaf; `None` for container kinds
    pub fn leaf(&self, rng: &mut dyn RngCore) -> Option<Node> {
        let node = match self {
            ChildKind::Recurse | ChildKind::Object => return None,
            ChildKind::Int(g) => g.generate_node(rng),
            ChildKind::Digits(g) => g.generate_node(rng),
            ChildKind::Str(g) => g.generate_node(rng),
            ChildKind::Bool(g) => g.generate_node(rng),
            ChildKind::Date(g) => g.generate_node(rng),
            ChildKind::Custom(f) => f(rng),
        };
        Some(node)
    }
}

impl fmt::Debug for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKind::Int(g) => f.debug_tuple("Int").field(g).finish(),
            ChildKind::Digits(g) => f.debug_tuple("Digits").field(g).finish(),
            ChildKind::Str(g) => f.debug_tuple("Str").field(g).finish(),
            ChildKind::Bool(g) => f.debug_tuple("Bool").field(g).finish(),
            ChildKind::Date(g) => f.debug_tuple("Date").field(g).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Resolve kind names into a candidate set, failing on the first entry that names nothing invocable
pub fn resolve_kinds<S: AsRef<str>>(names: &[S]) -> GenResult<Vec<ChildKind>> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            ChildKind::from_name(name.as_ref())
                .ok_or_else(|| GenError::not_callable(index, name.as_ref()))
        })
        .collect()
}

/// Resolve JSON kind entries; only strings naming a known kind are invocable.
#[cfg(feature = "serde")]
pub fn resolve_kind_values(values: &[serde_json::Value]) -> GenResult<Vec<ChildKind>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_str()
                .and_then(ChildKind::from_name)
                .ok_or_else(|| GenError::not_callable(index, value.to_string()))
        })
        .collect()
}

/// Split out the non-container kinds, keeping their weights aligned.
///
/// An absent or empty weight slice stays uniform.
pub fn leaf_mix(kinds: &[ChildKind], weights: Option<&[f64]>) -> (Vec<ChildKind>, Option<Vec<f64>>) {
    let keep: Vec<usize> = (0..kinds.len())
        .filter(|&i| !kinds[i].is_container())
        .collect();
    let leaf_kinds = keep.iter().map(|&i| kinds[i].clone()).collect();
    let leaf_weights = weights
        .filter(|w| !w.is_empty())
        .map(|w| keep.iter().filter_map(|&i| w.get(i).copied()).collect());
    (leaf_kinds, leaf_weights)
}

/// Default mix for object and tree shapes: recurse, then the four leaf kinds
pub fn object_kinds() -> Vec<ChildKind> {
    vec![
        ChildKind::Recurse,
        ChildKind::Digits(RanDigits::default()),
        ChildKind::Str(RanStr::default()),
        ChildKind::Bool(RanBool::default()),
        ChildKind::Date(RanDate::default()),
    ]
}

/// Default weights for [`object_kinds`]
pub const OBJECT_WEIGHTS: [f64; 5] = [3.0, 1.0, 1.0, 1.0, 1.0];

/// Default mix for the array shape: recurse, nested object, then the four leaf kinds
pub fn array_kinds() -> Vec<ChildKind> {
    vec![
        ChildKind::Recurse,
        ChildKind::Object,
        ChildKind::Digits(RanDigits::default()),
        ChildKind::Str(RanStr::default()),
        ChildKind::Bool(RanBool::default()),
        ChildKind::Date(RanDate::default()),
    ]
}

/// Default weights for [`array_kinds`]
pub const ARRAY_WEIGHTS: [f64; 6] = [5.0, 3.0, 1.0, 1.0, 1.0, 1.0];
