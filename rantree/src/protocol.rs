//! The shape-agnostic node-building protocol.
//!
//! A shape strategy supplies an empty container, a way to attach children, and a child-kind
//! candidate set. [`NodeBuilder::build`] runs the depth-bounded recursion on top of those hooks.
//! Hooks a strategy does not override fail with [`GenError::UnimplementedStrategy`] on first use.
//!
//! `depth` is the number of container levels still allowed below the node being built. A child
//! requested at negative depth is always a leaf.

use std::sync::{Arc, OnceLock};

use rand::RngCore;
use tracing::trace;

use crate::config::StrategyConfig;
use crate::error::{GenError, GenResult};
use crate::invoker::{Callable, WeightedInvoker, callable};
use crate::kinds::{ChildKind, OBJECT_WEIGHTS, leaf_mix, object_kinds};
use crate::node::Node;
use crate::rng::uniform;
use crate::shape::ObjectShape;
use crate::util::try_fill_with;

/// Extension points of the recursive builder
pub trait NodeBuilder: Send + Sync {
    /// The resolved configuration of this strategy
    fn config(&self) -> &StrategyConfig;

    /// A fresh, empty container of this strategy's shape
    fn empty_node(&self, _rng: &mut dyn RngCore) -> GenResult<Node> {
        Err(GenError::unimplemented("empty_node"))
    }

    /// Incorporate `children` into `node`
    fn attach_children(
        &self,
        _node: &mut Node,
        _children: Vec<Node>,
        _rng: &mut dyn RngCore,
    ) -> GenResult<()> {
        Err(GenError::unimplemented("attach_children"))
    }

    /// Produce `count` children at remaining depth `depth`
    fn generate_children(
        &self,
        _count: usize,
        _depth: i64,
        _rng: &mut dyn RngCore,
    ) -> GenResult<Vec<Node>> {
        Err(GenError::unimplemented("generate_children"))
    }

    /// Candidate set of child kinds
    fn child_kinds(&self) -> GenResult<&[ChildKind]> {
        Err(GenError::unimplemented("child_kinds"))
    }

    /// Weights parallel to [`NodeBuilder::child_kinds`]; `None` is uniform
    fn child_weights(&self) -> GenResult<Option<&[f64]>> {
        Err(GenError::unimplemented("child_weights"))
    }

    /// Number of children for one node: `round(uniform * max_width)`
    fn width(&self, rng: &mut dyn RngCore) -> usize {
        (uniform(rng) * self.config().max_width).round() as usize
    }

    /// Build one node with `depth` container levels allowed below it
    fn build(&self, depth: i64, rng: &mut dyn RngCore) -> GenResult<Node> {
        let mut node = self.empty_node(rng)?;
        if depth < 0 {
            return Ok(node);
        }

        let width = self.width(rng);
        let children = self.generate_children(width, depth - 1, rng)?;
        self.attach_children(&mut node, children, rng)?;
        Ok(node)
    }
}

type KindInvoker<S> = WeightedInvoker<S, i64, GenResult<Node>>;

/// Child producer specialized once per strategy instance.
///
/// Holds two invokers over the strategy's child kinds: the full mix, and the leaf-only mix used
/// when no container levels remain.
pub struct ChildSpawner<S> {
    all: KindInvoker<S>,
    leaves: KindInvoker<S>,
}

impl<S: NodeBuilder + 'static> ChildSpawner<S> {
    /// Bind every kind of `strategy` to a callable
    pub fn new(strategy: &S) -> GenResult<Self> {
        let kinds = strategy.child_kinds()?;
        let weights = strategy.child_weights()?;
        let config = strategy.config();

        let nested = if kinds.iter().any(|k| matches!(k, ChildKind::Object)) {
            Some(Arc::new(nested_object(config)?))
        } else {
            None
        };

        let all = kinds
            .iter()
            .map(|kind| kind_callable(kind.clone(), nested.clone()))
            .collect::<GenResult<Vec<_>>>()?;

        let (leaf_kinds, leaf_weights) = leaf_mix(kinds, weights);
        if leaf_kinds.is_empty() {
            return Err(GenError::invalid_config(
                "child_kinds",
                "at least one leaf kind is required to terminate recursion",
            ));
        }
        let leaves = leaf_kinds
            .into_iter()
            .map(|kind| kind_callable(kind, None))
            .collect::<GenResult<Vec<_>>>()?;

        Ok(Self {
            all: WeightedInvoker::new(all, weights)?,
            leaves: WeightedInvoker::new(leaves, leaf_weights.as_deref())?,
        })
    }

    /// Produce `count` children of `strategy` at remaining depth `depth`
    pub fn spawn(
        &self,
        strategy: &S,
        count: usize,
        depth: i64,
        rng: &mut dyn RngCore,
    ) -> GenResult<Vec<Node>> {
        let invoker = if depth < 0 { &self.leaves } else { &self.all };
        try_fill_with(count, || invoker.invoke(strategy, rng, depth))
    }
}

/// Return the cached spawner, building it on first use.
///
/// Concurrent first calls may each build a spawner; exactly one is kept.
pub fn specialize<'a, S: NodeBuilder + 'static>(
    cell: &'a OnceLock<ChildSpawner<S>>,
    strategy: &S,
) -> GenResult<&'a ChildSpawner<S>> {
    if let Some(spawner) = cell.get() {
        return Ok(spawner);
    }

    let spawner = ChildSpawner::new(strategy)?;
    trace!(
        kinds = spawner.all.len(),
        leaf_kinds = spawner.leaves.len(),
        "specialized child spawner"
    );
    Ok(cell.get_or_init(|| spawner))
}

fn kind_callable<S: NodeBuilder + 'static>(
    kind: ChildKind,
    nested: Option<Arc<ObjectShape>>,
) -> GenResult<Callable<S, i64, GenResult<Node>>> {
    let bound = match kind {
        ChildKind::Recurse => callable(|strategy: &S, rng, depth: i64| strategy.build(depth, rng)),
        ChildKind::Object => {
            let nested = nested.ok_or_else(|| {
                GenError::invalid_config("child_kinds", "nested object kind has no sub-generator")
            })?;
            callable(move |_: &S, rng, depth: i64| nested.build(depth, rng))
        }
        leaf => callable(move |_: &S, rng, _: i64| {
            leaf.leaf(rng)
                .ok_or_else(|| GenError::invalid_input("container kind used as a leaf"))
        }),
    };
    Ok(bound)
}

/// Object-shaped sub-generator sharing the outer strategy's bounds and naming
fn nested_object(config: &StrategyConfig) -> GenResult<ObjectShape> {
    let mut nested = StrategyConfig::with_kinds(object_kinds(), Some(OBJECT_WEIGHTS.to_vec()));
    nested.max_depth = config.max_depth;
    nested.max_width = config.max_width;
    nested.property_name = config.property_name.clone();
    ObjectShape::new(nested)
}
