//! Generated output: leaves and the three container shapes.

use std::collections::BTreeMap;
use std::fmt;

/// One unit of generated output, container or leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Integer leaf
    Int(i64),
    /// Alphanumeric string leaf
    Str(String),
    /// Boolean leaf
    Bool(bool),
    /// Date string leaf, `MM/DD/YYYY`
    Date(String),
    /// Property bag keyed by generated names
    Object(BTreeMap<String, Node>),
    /// Named node with ordered children
    Tree(TreeNode),
    /// Ordered sequence
    Array(Vec<Node>),
}

/// A named node whose children keep generation order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<Node>,
}

impl Node {
    /// An empty property bag
    pub fn empty_object() -> Self {
        Node::Object(BTreeMap::new())
    }

    /// An empty ordered sequence
    pub fn empty_array() -> Self {
        Node::Array(Vec::new())
    }

    /// True for primitive values
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Node::Int(_) | Node::Str(_) | Node::Bool(_) | Node::Date(_)
        )
    }

    /// Number of container levels; a leaf has depth 0 and an empty container has depth 1
    pub fn nesting_depth(&self) -> usize {
        let children = match self {
            Node::Object(map) => map.values().map(Node::nesting_depth).max(),
            Node::Tree(tree) => tree.children.iter().map(Node::nesting_depth).max(),
            Node::Array(items) => items.iter().map(Node::nesting_depth).max(),
            _ => return 0,
        };
        1 + children.unwrap_or(0)
    }

    /// Total number of nodes, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    /// Direct children, in storage order
    pub fn children(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            Node::Object(map) => Box::new(map.values()),
            Node::Tree(tree) => Box::new(tree.children.iter()),
            Node::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Short name of the variant, used in logs and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Int(_) => "int",
            Node::Str(_) => "string",
            Node::Bool(_) => "bool",
            Node::Date(_) => "date",
            Node::Object(_) => "object",
            Node::Tree(_) => "tree",
            Node::Array(_) => "array",
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = " ".repeat(depth * 3);
        let (open, close, entries): (char, char, Vec<(String, &Node)>) = match self {
            Node::Object(map) => ('{', '}', map.iter().map(|(k, v)| (k.clone(), v)).collect()),
            Node::Array(items) => (
                '[',
                ']',
                items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            ),
            Node::Tree(tree) => {
                write!(f, "{{\n  {}name: {}", indent, tree.name)?;
                write!(f, "\n  {}children: ", indent)?;
                write_children(f, &tree.children, depth + 1)?;
                return write!(f, " \n{}}}", indent);
            }
            leaf => return write_leaf(f, leaf),
        };

        if entries.is_empty() {
            return write!(f, "{}{}", open, close);
        }
        write!(f, "{}", open)?;
        for (key, value) in entries {
            write!(f, "\n  {}{}: ", indent, key)?;
            value.write_indented(f, depth + 1)?;
        }
        write!(f, " \n{}{}", indent, close)
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Node], depth: usize) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "[]");
    }
    let indent = " ".repeat(depth * 3);
    write!(f, "[")?;
    for (i, child) in children.iter().enumerate() {
        write!(f, "\n  {}{}: ", indent, i)?;
        child.write_indented(f, depth + 1)?;
    }
    write!(f, " \n{}]", indent)
}

fn write_leaf(f: &mut fmt::Formatter<'_>, leaf: &Node) -> fmt::Result {
    match leaf {
        Node::Int(n) => write!(f, "{}", n),
        Node::Str(s) | Node::Date(s) => write!(f, "{}", s),
        Node::Bool(b) => write!(f, "{}", b),
        _ => Ok(()),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use super::{Node, TreeNode};
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeStruct, Serializer};

    impl Serialize for Node {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Node::Int(n) => serializer.serialize_i64(*n),
                Node::Str(s) | Node::Date(s) => serializer.serialize_str(s),
                Node::Bool(b) => serializer.serialize_bool(*b),
                Node::Object(map) => {
                    let mut out = serializer.serialize_map(Some(map.len()))?;
                    for (key, value) in map {
                        out.serialize_entry(key, value)?;
                    }
                    out.end()
                }
                Node::Tree(tree) => tree.serialize(serializer),
                Node::Array(items) => {
                    let mut out = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        out.serialize_element(item)?;
                    }
                    out.end()
                }
            }
        }
    }

    impl Serialize for TreeNode {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut out = serializer.serialize_struct("TreeNode", 2)?;
            out.serialize_field("name", &self.name)?;
            out.serialize_field("children", &self.children)?;
            out.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> Node {
        let mut inner = BTreeMap::new();
        inner.insert("b".to_string(), Node::Bool(true));
        let mut outer = BTreeMap::new();
        outer.insert("a".to_string(), Node::Int(42));
        outer.insert("c".to_string(), Node::Object(inner));
        Node::Object(outer)
    }

    #[test]
    fn test_leaf_classification() {
        assert!(Node::Int(1).is_leaf());
        assert!(Node::Str("x".into()).is_leaf());
        assert!(Node::Bool(false).is_leaf());
        assert!(Node::Date("01/02/2003".into()).is_leaf());
        assert!(!Node::empty_object().is_leaf());
        assert!(!Node::empty_array().is_leaf());
        assert!(!Node::Tree(TreeNode::default()).is_leaf());
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(Node::Int(1).nesting_depth(), 0);
        assert_eq!(Node::empty_object().nesting_depth(), 1);
        assert_eq!(sample_object().nesting_depth(), 2);

        let tree = Node::Tree(TreeNode {
            name: "root".into(),
            children: vec![Node::Array(vec![Node::empty_array()])],
        });
        assert_eq!(tree.nesting_depth(), 3);
    }

    #[test]
    fn test_node_count() {
        assert_eq!(Node::Bool(true).node_count(), 1);
        assert_eq!(sample_object().node_count(), 4);
    }

    #[test]
    fn test_display_empty_containers() {
        assert_eq!(Node::empty_object().to_string(), "{}");
        assert_eq!(Node::empty_array().to_string(), "[]");
    }

    #[test]
    fn test_display_nested_object() {
        let expected = "{\n  a: 42\n  c: {\n     b: true \n   } \n}";
        assert_eq!(sample_object().to_string(), expected);
    }

    #[test]
    fn test_display_array_uses_indices() {
        let node = Node::Array(vec![Node::Str("abc".into()), Node::Int(7)]);
        assert_eq!(node.to_string(), "[\n  0: abc\n  1: 7 \n]");
    }

    #[test]
    fn test_display_tree() {
        let node = Node::Tree(TreeNode {
            name: "root".into(),
            children: vec![Node::Int(5)],
        });
        assert_eq!(
            node.to_string(),
            "{\n  name: root\n  children: [\n     0: 5 \n   ] \n}"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_to_json() {
        let tree = Node::Tree(TreeNode {
            name: "n".into(),
            children: vec![sample_object(), Node::Array(vec![Node::Date("01/01/2000".into())])],
        });
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "n",
                "children": [{"a": 42, "c": {"b": true}}, ["01/01/2000"]]
            })
        );
    }
}
