use std::sync::OnceLock;

use rand::RngCore;

use super::Shape;
use crate::config::StrategyConfig;
use crate::error::{GenError, GenResult};
use crate::kinds::{ChildKind, OBJECT_WEIGHTS, object_kinds};
use crate::node::Node;
use crate::protocol::{ChildSpawner, NodeBuilder, specialize};

/// Property bags keyed by generated names.
///
/// Each child is stored under a freshly generated key; a colliding key overwrites the earlier
/// child.
pub struct ObjectShape {
    config: StrategyConfig,
    spawner: OnceLock<ChildSpawner<ObjectShape>>,
}

impl ObjectShape {
    /// Validate `config` and create the strategy
    pub fn new(config: StrategyConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            spawner: OnceLock::new(),
        })
    }

    /// Store `children` in `node` under generated keys
    pub(crate) fn assign_properties(
        &self,
        node: &mut Node,
        children: Vec<Node>,
        rng: &mut dyn RngCore,
    ) -> GenResult<()> {
        let Node::Object(map) = node else {
            return Err(GenError::invalid_input(format!(
                "object shape cannot attach children to {}",
                node.kind_name()
            )));
        };
        for child in children {
            map.insert((self.config.property_name)(rng), child);
        }
        Ok(())
    }
}

impl NodeBuilder for ObjectShape {
    fn config(&self) -> &StrategyConfig {
        &self.config
    }

    fn empty_node(&self, _rng: &mut dyn RngCore) -> GenResult<Node> {
        Ok(Node::empty_object())
    }

    fn attach_children(
        &self,
        node: &mut Node,
        children: Vec<Node>,
        rng: &mut dyn RngCore,
    ) -> GenResult<()> {
        self.assign_properties(node, children, rng)
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
        Ok(&self.config.child_kinds)
    }

    fn child_weights(&self) -> GenResult<Option<&[f64]>> {
        Ok(self.config.child_weights.as_deref())
    }
}

impl Shape for ObjectShape {
    const NAME: &'static str = "object";

    fn defaults() -> StrategyConfig {
        StrategyConfig::with_kinds(object_kinds(), Some(OBJECT_WEIGHTS.to_vec()))
    }

    fn from_config(config: StrategyConfig) -> GenResult<Self> {
        Self::new(config)
    }
}
