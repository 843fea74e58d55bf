//! Shape strategies: object, tree and array.

mod array;
mod object;
mod tree;

pub use array::ArrayShape;
pub use object::ObjectShape;
pub use tree::TreeShape;

use crate::config::StrategyConfig;
use crate::error::GenResult;
use crate::protocol::NodeBuilder;

/// A concrete strategy that the generator factory can instantiate
pub trait Shape: NodeBuilder + Sized + 'static {
    /// Name used in logs and on the command line
    const NAME: &'static str;

    /// Default configuration, before caller overrides
    fn defaults() -> StrategyConfig;

    /// Build a strategy instance from a resolved configuration
    fn from_config(config: StrategyConfig) -> GenResult<Self>;
}
