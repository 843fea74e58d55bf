//! Configuration for shape strategies and generator factories.
//!
//! [`GeneratorConfig`] holds caller overrides, every field optional. [`StrategyConfig`] is the
//! resolved set owned by one strategy instance, produced by [`StrategyConfig::merge`] with the
//! caller's values winning over the shape's defaults.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::error::{GenError, GenResult};
use crate::kinds::{ChildKind, leaf_mix};
use crate::leaf::RanStr;
use crate::sampler::WeightedSampler;

/// Default recursion ceiling
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default upper bound on children per node
pub const DEFAULT_MAX_WIDTH: f64 = 5.0;

/// Largest accepted `max_width`; one node never holds more children than this
pub const MAX_WIDTH_LIMIT: f64 = 1_000_000.0;

/// Produces property keys (object shape) or node names (tree shape)
pub type NameFn = Arc<dyn Fn(&mut dyn RngCore) -> String + Send + Sync>;

/// A name function producing random alphanumeric strings of `n_chars` characters
pub fn random_names(n_chars: usize) -> GenResult<NameFn> {
    let names = RanStr::new(n_chars)?;
    Ok(Arc::new(move |rng: &mut dyn RngCore| names.generate(rng)))
}

fn default_names() -> NameFn {
    let names = RanStr::default();
    Arc::new(move |rng: &mut dyn RngCore| names.generate(rng))
}

/// Resolved configuration owned by one strategy instance
#[derive(Clone)]
pub struct StrategyConfig {
    /// Recursion ceiling
    pub max_depth: usize,
    /// Upper bound on children per node; each node draws `round(uniform * max_width)`
    pub max_width: f64,
    /// Key generator for object properties
    pub property_name: NameFn,
    /// Candidate set of child kinds
    pub child_kinds: Vec<ChildKind>,
    /// Relative weights of `child_kinds`; `None` is uniform
    pub child_weights: Option<Vec<f64>>,
}

impl StrategyConfig {
    /// Shape defaults with the given child mix
    pub fn with_kinds(child_kinds: Vec<ChildKind>, child_weights: Option<Vec<f64>>) -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_width: DEFAULT_MAX_WIDTH,
            property_name: default_names(),
            child_kinds,
            child_weights,
        }
    }

    /// Apply caller overrides onto `defaults`; later values win.
    ///
    /// Overriding `child_kinds` without `child_weights` resets the weights to uniform, since the
    /// default weights describe the default mix.
    pub fn merge(defaults: StrategyConfig, overrides: GeneratorConfig) -> Self {
        let child_weights = match (&overrides.child_kinds, overrides.child_weights) {
            (_, Some(weights)) => Some(weights),
            (Some(_), None) => None,
            (None, None) => defaults.child_weights,
        };

        Self {
            max_depth: overrides.max_depth.unwrap_or(defaults.max_depth),
            max_width: overrides.max_width.unwrap_or(defaults.max_width),
            property_name: overrides.property_name.unwrap_or(defaults.property_name),
            child_kinds: overrides.child_kinds.unwrap_or(defaults.child_kinds),
            child_weights,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenResult<()> {
        if !self.max_width.is_finite() || self.max_width < 0.0 {
            return Err(GenError::invalid_config(
                "max_width",
                format!("{} is not a finite, non-negative number", self.max_width),
            ));
        }
        if self.max_width > MAX_WIDTH_LIMIT {
            return Err(GenError::invalid_config(
                "max_width",
                format!("{} exceeds the limit of {}", self.max_width, MAX_WIDTH_LIMIT),
            ));
        }

        let indices: Vec<usize> = (0..self.child_kinds.len()).collect();
        WeightedSampler::new(indices, self.child_weights.as_deref())?;

        let (leaf_kinds, leaf_weights) = self.leaf_kinds();
        if leaf_kinds.is_empty() {
            return Err(GenError::invalid_config(
                "child_kinds",
                "at least one leaf kind is required to terminate recursion",
            ));
        }
        if let Some(weights) = &leaf_weights
            && weights.iter().sum::<f64>() <= 0.0
        {
            return Err(GenError::invalid_config(
                "child_weights",
                "leaf kinds must have a positive total weight",
            ));
        }

        Ok(())
    }

    /// The non-container kinds with their weights, in candidate order
    pub fn leaf_kinds(&self) -> (Vec<ChildKind>, Option<Vec<f64>>) {
        leaf_mix(&self.child_kinds, self.child_weights.as_deref())
    }
}

impl fmt::Debug for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyConfig")
            .field("max_depth", &self.max_depth)
            .field("max_width", &self.max_width)
            .field("child_kinds", &self.child_kinds)
            .field("child_weights", &self.child_weights)
            .finish_non_exhaustive()
    }
}

/// Caller overrides for a generator; unset fields keep the shape's defaults
#[derive(Clone, Default)]
pub struct GeneratorConfig {
    pub max_depth: Option<usize>,
    pub max_width: Option<f64>,
    pub property_name: Option<NameFn>,
    pub child_kinds: Option<Vec<ChildKind>>,
    pub child_weights: Option<Vec<f64>>,
}

impl GeneratorConfig {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_property_name(mut self, property_name: NameFn) -> Self {
        self.property_name = Some(property_name);
        self
    }

    pub fn with_child_kinds(mut self, child_kinds: Vec<ChildKind>) -> Self {
        self.child_kinds = Some(child_kinds);
        self
    }

    pub fn with_child_weights(mut self, child_weights: Vec<f64>) -> Self {
        self.child_weights = Some(child_weights);
        self
    }

    /// Overlay `other` on top of this config; fields set in `other` win.
    ///
    /// Kinds set in `other` without weights drop this config's weights, so they stay uniform.
    pub fn merge_with(self, other: GeneratorConfig) -> Self {
        let child_weights = match (&other.child_kinds, other.child_weights) {
            (Some(_), None) => None,
            (_, Some(weights)) => Some(weights),
            (None, None) => self.child_weights,
        };
        Self {
            max_depth: other.max_depth.or(self.max_depth),
            max_width: other.max_width.or(self.max_width),
            property_name: other.property_name.or(self.property_name),
            child_kinds: other.child_kinds.or(self.child_kinds),
            child_weights,
        }
    }

    /// Parse overrides from JSON.
    ///
    /// Keys: `max_depth`, `max_width`, `name_length`, `child_kinds` (kind names), `child_weights`.
    /// The camelCase spellings `maxDepth`, `maxWidth`, `childKinds`, `childWeights` are accepted.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> GenResult<Self> {
        let file: ConfigFile = serde_json::from_str(json)
            .map_err(|e| GenError::invalid_config("json", e.to_string()))?;

        let child_kinds = file
            .child_kinds
            .as_deref()
            .map(crate::kinds::resolve_kind_values)
            .transpose()?;
        let property_name = file.name_length.map(random_names).transpose()?;

        Ok(Self {
            max_depth: file.max_depth,
            max_width: file.max_width,
            property_name,
            child_kinds,
            child_weights: file.child_weights,
        })
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("max_depth", &self.max_depth)
            .field("max_width", &self.max_width)
            .field("property_name", &self.property_name.as_ref().map(|_| "<fn>"))
            .field("child_kinds", &self.child_kinds)
            .field("child_weights", &self.child_weights)
            .finish()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, alias = "maxDepth")]
    max_depth: Option<usize>,
    #[serde(default, alias = "maxWidth")]
    max_width: Option<f64>,
    #[serde(default, alias = "nameLength")]
    name_length: Option<usize>,
    #[serde(default, alias = "childKinds")]
    child_kinds: Option<Vec<serde_json::Value>>,
    #[serde(default, alias = "childWeights")]
    child_weights: Option<Vec<f64>>,
}
