use std::sync::OnceLock;

use rand::RngCore;

use super::Shape;
use crate::config::StrategyConfig;
use crate::error::{GenError, GenResult};
use crate::kinds::{ARRAY_WEIGHTS, ChildKind, array_kinds};
use crate::node::Node;
use crate::protocol::{ChildSpawner, NodeBuilder, specialize};

/// Ordered sequences.
///
/// Besides nested arrays and leaves, the default mix produces nested objects through an
/// object-shaped sub-generator with the same bounds.
pub struct ArrayShape {
    config: StrategyConfig,
    spawner: OnceLock<ChildSpawner<ArrayShape>>,
}

impl ArrayShape {
    /// Validate `config` and create the strategy
    pub fn new(config: StrategyConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            spawner: OnceLock::new(),
        })
    }
}

impl NodeBuilder for ArrayShape {
    fn config(&self) -> &StrategyConfig {
        &self.config
    }

    fn empty_node(&self, _rng: &mut dyn RngCore) -> GenResult<Node> {
        Ok(Node::empty_array())
    }

    fn attach_children(
        &self,
        node: &mut Node,
        children: Vec<Node>,
        _rng: &mut dyn RngCore,
    ) -> GenResult<()> {
        if children.is_empty() {
            return Ok(());
        }
        let Node::Array(items) = node else {
            return Err(GenError::invalid_input(format!(
                "array shape cannot attach children to {}",
                node.kind_name()
            )));
        };
        items.extend(children);
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
        Ok(&self.config.child_kinds)
    }

    fn child_weights(&self) -> GenResult<Option<&[f64]>> {
        Ok(self.config.child_weights.as_deref())
    }
}

impl Shape for ArrayShape {
    const NAME: &'static str = "array";

    fn defaults() -> StrategyConfig {
        StrategyConfig::with_kinds(array_kinds(), Some(ARRAY_WEIGHTS.to_vec()))
    }

    fn from_config(config: StrategyConfig) -> GenResult<Self> {
        Self::new(config)
    }
}
