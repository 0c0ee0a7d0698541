//! Expression trees and the individuals that own them.
//!
//! A tree is made of three node kinds: constants and variables at the leaves,
//! and function calls at the branches. Nodes carry no type information of
//! their own; types come from the registry and the position in the tree.

mod persistence;

pub use persistence::{
    MAX_PERSISTED_HEIGHT, from_text, load, load_from_path, save, save_to_path, to_text,
};

use crate::error::{InterpreterError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Tag used for constant leaves in the persisted format.
pub const CONSTANT_TAG: &str = "constant";

/// Tag used for variable leaves in the persisted format.
pub const VARIABLE_TAG: &str = "variable";

/// A node of an expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal leaf, parsed against the expected type when evaluated.
    Constant {
        /// Raw literal text.
        literal: String,
    },
    /// Named leaf, resolved against the caller's bindings.
    Variable {
        /// Variable name.
        name: String,
    },
    /// Function application.
    Call {
        /// Registered function name.
        function: String,
        /// Arguments in declared parameter order.
        children: Vec<Node>,
    },
}

impl Node {
    /// Build a constant leaf.
    #[must_use]
    pub fn constant(literal: impl Into<String>) -> Self {
        Self::Constant {
            literal: literal.into(),
        }
    }

    /// Build a variable leaf.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    /// Build a call node.
    #[must_use]
    pub fn call(function: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Call {
            function: function.into(),
            children,
        }
    }

    /// Whether this node is a leaf.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Call { .. })
    }

    /// Height of the subtree rooted here. Leaves have height 0.
    ///
    /// A call without children also has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable { .. } => 0,
            Self::Call { children, .. } => children
                .iter()
                .map(|c| c.height() + 1)
                .max()
                .unwrap_or(0),
        }
    }

    /// Count the number of nodes in this subtree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable { .. } => 1,
            Self::Call { children, .. } => 1 + children.iter().map(Node::node_count).sum::<usize>(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { literal } => write!(f, "{literal}"),
            Self::Variable { name } => write!(f, "{name}"),
            Self::Call { function, children } => {
                write!(f, "({function}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// Each node persists as a single-entry map: {"constant": "2"},
// {"variable": "x"} or {"<function>": [children]}.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Constant { literal } => map.serialize_entry(CONSTANT_TAG, literal)?,
            Self::Variable { name } => map.serialize_entry(VARIABLE_TAG, name)?,
            Self::Call { function, children } => map.serialize_entry(function, children)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a single-entry map tagged `constant`, `variable` or a function name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Node, A::Error> {
        let Some(tag) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };

        let node = match tag.as_str() {
            CONSTANT_TAG => Node::Constant {
                literal: map.next_value()?,
            },
            VARIABLE_TAG => Node::Variable {
                name: map.next_value()?,
            },
            _ => Node::Call {
                children: map.next_value()?,
                function: tag,
            },
        };

        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }

        Ok(node)
    }
}

/// One candidate program.
///
/// The tree sits under a container that should hold exactly one head node.
/// Loaded individuals are not validated, so the container may hold any
/// number of children until [`Individual::head`] is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Individual {
    #[serde(rename = "individual")]
    children: Vec<Node>,
}

impl Individual {
    /// Wrap a head node into a new individual.
    #[must_use]
    pub fn new(head: Node) -> Self {
        Self {
            children: vec![head],
        }
    }

    /// Build an individual from raw container children, without validation.
    #[must_use]
    pub fn from_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// The raw container children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The head of the expression tree.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Structural`] if the container does not hold
    /// exactly one child.
    pub fn head(&self) -> Result<&Node> {
        match self.children.as_slice() {
            [head] => Ok(head),
            other => Err(InterpreterError::Structural(format!(
                "the individual root must have exactly one child, found {}",
                other.len()
            ))),
        }
    }

    /// Replace the whole tree with a new head.
    pub fn replace_head(&mut self, head: Node) {
        self.children = vec![head];
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.head() {
            Ok(head) => write!(f, "{head}"),
            Err(_) => write!(f, "<{} roots>", self.children.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::call(
            "addition_float",
            vec![
                Node::constant("2"),
                Node::call(
                    "multiplication_float",
                    vec![Node::variable("x"), Node::constant("0.5")],
                ),
            ],
        )
    }

    #[test]
    fn test_node_height_and_count() {
        let tree = sample();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(Node::constant("1").height(), 0);
        assert!(Node::variable("x").is_terminal());
        assert!(!tree.is_terminal());
    }

    #[test]
    fn test_node_display() {
        assert_eq!(
            sample().to_string(),
            "(addition_float 2 (multiplication_float x 0.5))"
        );
    }

    #[test]
    fn test_node_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "addition_float": [
                    { "constant": "2" },
                    { "multiplication_float": [
                        { "variable": "x" },
                        { "constant": "0.5" }
                    ] }
                ]
            })
        );
    }

    #[test]
    fn test_node_rejects_multi_entry_map() {
        let result = serde_json::from_str::<Node>(r#"{"constant": "1", "variable": "x"}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<Node>("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_individual_head() {
        let individual = Individual::new(sample());
        assert_eq!(individual.head().unwrap(), &sample());

        let empty = Individual::from_children(Vec::new());
        assert!(matches!(empty.head(), Err(InterpreterError::Structural(_))));

        let two = Individual::from_children(vec![Node::constant("1"), Node::constant("2")]);
        assert!(matches!(two.head(), Err(InterpreterError::Structural(_))));
        assert_eq!(two.to_string(), "<2 roots>");
    }

    #[test]
    fn test_replace_head() {
        let mut individual = Individual::from_children(Vec::new());
        individual.replace_head(Node::variable("y"));
        assert_eq!(individual.children().len(), 1);
        assert_eq!(individual.to_string(), "y");
    }
}
