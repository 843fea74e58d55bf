//! # rantree - random structured fixtures
//!
//! rantree builds randomly shaped objects, named trees and arrays of bounded depth and width,
//! for use as test data. One recursive builder drives all three shapes; each shape only
//! supplies its empty container, its way of attaching children and its weighted mix of child
//! kinds.
//!
//! ## Quick Start
//!
//! ```rust
//! use rantree::{GeneratorConfig, Node, create_object_generator, create_seeded_rng};
//!
//! let generator = create_object_generator(
//!     GeneratorConfig::new().with_max_depth(1).with_max_width(3.0),
//! )
//! .unwrap();
//!
//! let mut rng = create_seeded_rng(7);
//! let Node::Object(props) = generator.generate_with(&mut rng).unwrap() else {
//!     unreachable!()
//! };
//! assert!(props.len() <= 3);
//! assert!(props.values().all(Node::is_leaf));
//! ```
//!
//! ## Weighted sampling
//!
//! ```rust
//! use rantree::{create_seeded_rng, weighted_sample};
//!
//! let sampler = weighted_sample(vec!["a", "b"], Some(&[3, 1][..])).unwrap();
//! let mut rng = create_seeded_rng(1);
//! let picked = sampler.sample_with(&mut rng);
//! assert!(*picked == "a" || *picked == "b");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod factory;
pub mod invoker;
pub mod kinds;
pub mod leaf;
pub mod node;
pub mod protocol;
pub mod rng;
pub mod sampler;
pub mod shape;
pub mod util;

// Re-export the main public API
pub use batch::{BatchConfig, generate_batch};
pub use config::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_WIDTH, GeneratorConfig, MAX_WIDTH_LIMIT, NameFn, StrategyConfig,
    random_names,
};
pub use error::{GenError, GenResult};
pub use factory::{
    NodeGenerator, create_array_generator, create_generator, create_object_generator,
    create_tree_generator,
};
pub use invoker::{BoundInvoker, Callable, WeightedInvoker, callable, weighted_invoke};
pub use kinds::{ChildKind, resolve_kinds};
pub use leaf::{LeafGenerator, RanBool, RanDate, RanDigits, RanInt, RanStr};
pub use node::{Node, TreeNode};
pub use protocol::{ChildSpawner, NodeBuilder};
pub use rng::{
    DefaultRngProvider, RngProvider, SeededRngProvider, SequenceRng, create_rng,
    create_seeded_rng,
};
pub use sampler::{WeightedSampler, weighted_sample};
pub use shape::{ArrayShape, ObjectShape, Shape, TreeShape};
