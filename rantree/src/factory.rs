//! Generator factories: configure a shape strategy once, then produce structures on demand.

use rand::RngCore;
use tracing::debug;

use crate::config::{GeneratorConfig, StrategyConfig};
use crate::error::{GenError, GenResult};
use crate::node::Node;
use crate::protocol::NodeBuilder;
use crate::shape::{ArrayShape, ObjectShape, Shape, TreeShape};

/// Produces independent random structures of one shape.
///
/// The root counts as the first level, so it is built with `max_depth - 1` levels below it. With
/// `max_depth == 0` every call yields a single leaf.
pub struct NodeGenerator<S> {
    strategy: S,
}

impl<S: Shape> NodeGenerator<S> {
    /// Generate one structure using the ambient thread RNG
    pub fn generate(&self) -> GenResult<Node> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate one structure using the given random source
    pub fn generate_with(&self, rng: &mut dyn RngCore) -> GenResult<Node> {
        match self.strategy.config().max_depth {
            0 => self
                .strategy
                .generate_children(1, -1, rng)?
                .pop()
                .ok_or_else(|| GenError::invalid_input("no leaf produced for a zero-depth root")),
            max_depth => self.strategy.build(max_depth as i64 - 1, rng),
        }
    }

    /// Generate a root with an explicit number of levels below it
    pub fn generate_at(&self, depth: i64, rng: &mut dyn RngCore) -> GenResult<Node> {
        self.strategy.build(depth, rng)
    }

    /// The configured strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Turn the generator into a zero-argument producer backed by the thread RNG
    pub fn into_fn(self) -> impl Fn() -> GenResult<Node> {
        move || self.generate()
    }
}

/// Configure shape `S` with `config` layered over its defaults
pub fn create_generator<S: Shape>(config: GeneratorConfig) -> GenResult<NodeGenerator<S>> {
    let resolved = StrategyConfig::merge(S::defaults(), config);
    debug!(
        shape = S::NAME,
        max_depth = resolved.max_depth,
        max_width = resolved.max_width,
        kinds = resolved.child_kinds.len(),
        "creating generator"
    );
    Ok(NodeGenerator {
        strategy: S::from_config(resolved)?,
    })
}

/// Generator of random property bags
pub fn create_object_generator(config: GeneratorConfig) -> GenResult<NodeGenerator<ObjectShape>> {
    create_generator(config)
}

/// Generator of random named trees
pub fn create_tree_generator(config: GeneratorConfig) -> GenResult<NodeGenerator<TreeShape>> {
    create_generator(config)
}

/// Generator of random arrays
pub fn create_array_generator(config: GeneratorConfig) -> GenResult<NodeGenerator<ArrayShape>> {
    create_generator(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_seeded_rng;

    #[test]
    fn test_default_bounds() {
        let generator = create_object_generator(GeneratorConfig::new()).unwrap();
        assert_eq!(generator.strategy().config().max_depth, 5);
        assert_eq!(generator.strategy().config().max_width, 5.0);

        let mut rng = create_seeded_rng(1);
        for _ in 0..20 {
            let node = generator.generate_with(&mut rng).unwrap();
            assert!(matches!(node, Node::Object(_)));
            assert!(node.nesting_depth() <= 5);
        }
    }

    #[test]
    fn test_zero_depth_yields_leaf() {
        let generator =
            create_tree_generator(GeneratorConfig::new().with_max_depth(0).with_max_width(10.0))
                .unwrap();
        let mut rng = create_seeded_rng(2);
        for _ in 0..50 {
            assert!(generator.generate_with(&mut rng).unwrap().is_leaf());
        }
    }

    #[test]
    fn test_depth_one_object_has_leaf_properties() {
        let generator =
            create_object_generator(GeneratorConfig::new().with_max_depth(1).with_max_width(3.0))
                .unwrap();
        let mut rng = create_seeded_rng(3);

        for _ in 0..100 {
            let Node::Object(map) = generator.generate_with(&mut rng).unwrap() else {
                panic!("expected object root");
            };
            assert!(map.len() <= 3);
            assert!(map.values().all(Node::is_leaf));
        }
    }

    #[test]
    fn test_generate_at_explicit_depth() {
        let generator = create_array_generator(GeneratorConfig::new()).unwrap();
        let mut rng = create_seeded_rng(4);
        assert_eq!(generator.generate_at(-1, &mut rng).unwrap(), Node::empty_array());
        assert!(generator.generate_at(1, &mut rng).unwrap().nesting_depth() <= 2);
    }

    #[test]
    fn test_invalid_config_fails_at_creation() {
        let result = create_object_generator(GeneratorConfig::new().with_max_width(-2.0));
        assert!(matches!(result, Err(GenError::InvalidConfig { .. })));

        // finite but far too wide to allocate
        for result in [
            create_object_generator(GeneratorConfig::new().with_max_width(1e300)).map(|_| ()),
            create_tree_generator(GeneratorConfig::new().with_max_width(1e300)).map(|_| ()),
            create_array_generator(GeneratorConfig::new().with_max_width(1e300)).map(|_| ()),
        ] {
            assert!(matches!(
                result,
                Err(GenError::InvalidConfig {
                    field: "max_width",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_into_fn() {
        let produce = create_tree_generator(GeneratorConfig::new().with_max_depth(2))
            .unwrap()
            .into_fn();
        assert!(matches!(produce().unwrap(), Node::Tree(_)));
        assert!(matches!(produce().unwrap(), Node::Tree(_)));
    }
}
