use std::sync::OnceLock;

use rand::RngCore;

use super::{ObjectShape, Shape};
use crate::config::{NameFn, StrategyConfig, random_names};
use crate::error::{GenError, GenResult};
use crate::kinds::ChildKind;
use crate::node::{Node, TreeNode};
use crate::protocol::{ChildSpawner, NodeBuilder, specialize};

/// Named nodes with an ordered `children` list.
///
/// Configuration and the child mix come from an inner [`ObjectShape`]; only the container and
/// the way children are attached differ. Node names come from one name generator fixed when the
/// strategy is created.
pub struct TreeShape {
    object: ObjectShape,
    node_name: NameFn,
    spawner: OnceLock<ChildSpawner<TreeShape>>,
}

impl TreeShape {
    /// Validate `config` and create the strategy
    pub fn new(config: StrategyConfig) -> GenResult<Self> {
        Ok(Self {
            object: ObjectShape::new(config)?,
            node_name: random_names(6)?,
            spawner: OnceLock::new(),
        })
    }

    /// The object strategy this tree delegates to
    pub fn object(&self) -> &ObjectShape {
        &self.object
    }
}

impl NodeBuilder for TreeShape {
    fn config(&self) -> &StrategyConfig {
        self.object.config()
    }

    fn empty_node(&self, rng: &mut dyn RngCore) -> GenResult<Node> {
        Ok(Node::Tree(TreeNode {
            name: (self.node_name)(rng),
            children: Vec::new(),
        }))
    }

    fn attach_children(
        &self,
        node: &mut Node,
        children: Vec<Node>,
        _rng: &mut dyn RngCore,
    ) -> GenResult<()> {
        let Node::Tree(tree) = node else {
            return Err(GenError::invalid_input(format!(
                "tree shape cannot attach children to {}",
                node.kind_name()
            )));
        };
        tree.children = children;
        Ok(())
    }

    fn generate_children(
        &self,
        count: usize,
        depth: i64,
        rng: &mut dyn RngCore,
    ) -> GenResult<Vec<Node>> {
        specialize(&self.spawner, self)?.spawn(self, count, depth, rng)
    }

    fn child_kinds(&self) -> GenResult<&[ChildKind]> {
        self.object.child_kinds()
    }

    fn child_weights(&self) -> GenResult<Option<&[f64]>> {
        self.object.child_weights()
    }
}

impl Shape for TreeShape {
    const NAME: &'static str = "tree";

    fn defaults() -> StrategyConfig {
        ObjectShape::defaults()
    }

    fn from_config(config: StrategyConfig) -> GenResult<Self> {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::rng::create_seeded_rng;

    fn shape(overrides: GeneratorConfig) -> TreeShape {
        TreeShape::from_config(StrategyConfig::merge(TreeShape::defaults(), overrides)).unwrap()
    }

    fn assert_tree(node: &Node) {
        let Node::Tree(tree) = node else {
            panic!("expected tree, got {:?}", node);
        };
        assert_eq!(tree.name.len(), 6);
        for child in &tree.children {
            if !child.is_leaf() {
                assert_tree(child);
            }
        }
    }

    #[test]
    fn test_every_container_is_a_named_tree() {
        let tree = shape(GeneratorConfig::new().with_max_width(4.0));
        let mut rng = create_seeded_rng(10);

        for _ in 0..30 {
            assert_tree(&tree.build(3, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_attach_replaces_children_in_order() {
        let tree = shape(GeneratorConfig::new());
        let mut rng = create_seeded_rng(11);
        let mut node = tree.empty_node(&mut rng).unwrap();

        let children = vec![Node::Int(1), Node::Bool(false), Node::Str("x".into())];
        tree
            .attach_children(&mut node, children.clone(), &mut rng)
            .unwrap();
        assert_eq!(node.children().cloned().collect::<Vec<_>>(), children);
    }

    #[test]
    fn test_delegates_configuration_to_object() {
        let tree = shape(GeneratorConfig::new().with_max_depth(2));
        assert_eq!(tree.config().max_depth, 2);
        assert_eq!(tree.child_kinds().unwrap().len(), 5);
        assert_eq!(tree.object().config().max_depth, 2);
    }

    #[test]
    fn test_empty_tree_has_empty_children() {
        let tree = shape(GeneratorConfig::new().with_max_width(0.0));
        let mut rng = create_seeded_rng(12);
        let Node::Tree(node) = tree.build(2, &mut rng).unwrap() else {
            panic!("expected tree");
        };
        assert!(node.children.is_empty());
    }
}
