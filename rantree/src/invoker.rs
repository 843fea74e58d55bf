//! Weighted selection and invocation of callables.

use std::fmt;

use num_traits::ToPrimitive;
use rand::RngCore;

use crate::error::GenResult;
use crate::sampler::WeightedSampler;

/// A callable candidate: receives the invocation context, the random source and the arguments.
pub type Callable<C, A, R> = Box<dyn Fn(&C, &mut dyn RngCore, A) -> R + Send + Sync>;

/// Box a closure as a [`Callable`]
pub fn callable<C, A, R, F>(f: F) -> Callable<C, A, R>
where
    F: Fn(&C, &mut dyn RngCore, A) -> R + Send + Sync + 'static,
{
    Box::new(f)
}

/// Picks one callable per invocation, by weight, and calls it.
///
/// The context is supplied per call, which lets a strategy cache an invoker in its own state and
/// pass itself as the context. Use [`weighted_invoke`] for an invoker bound to a fixed context.
pub struct WeightedInvoker<C, A, R> {
    sampler: WeightedSampler<Callable<C, A, R>>,
}

impl<C, A, R> WeightedInvoker<C, A, R> {
    /// Build an invoker over `callables`, with the same weight rules as [`WeightedSampler`]
    pub fn new<W: ToPrimitive>(
        callables: Vec<Callable<C, A, R>>,
        weights: Option<&[W]>,
    ) -> GenResult<Self> {
        Ok(Self {
            sampler: WeightedSampler::new(callables, weights)?,
        })
    }

    /// Sample one callable and invoke it against `context`
    pub fn invoke(&self, context: &C, rng: &mut dyn RngCore, args: A) -> R {
        let index = self.sampler.sample_index(rng);
        (self.sampler.candidates()[index])(context, rng, args)
    }

    /// Number of callables
    pub fn len(&self) -> usize {
        self.sampler.len()
    }

    /// Always false; an invoker cannot be built without callables
    pub fn is_empty(&self) -> bool {
        self.sampler.is_empty()
    }

    /// Selection probability of each callable
    pub fn probabilities(&self) -> Vec<f64> {
        self.sampler.probabilities()
    }
}

impl<C, A, R> fmt::Debug for WeightedInvoker<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedInvoker")
            .field("callables", &self.sampler.len())
            .field("probabilities", &self.sampler.probabilities())
            .finish()
    }
}

/// An invoker bound to one context for its whole lifetime
pub struct BoundInvoker<C, A, R> {
    context: C,
    invoker: WeightedInvoker<C, A, R>,
}

impl<C, A, R> BoundInvoker<C, A, R> {
    /// Sample one callable and invoke it against the bound context
    pub fn invoke(&self, rng: &mut dyn RngCore, args: A) -> R {
        self.invoker.invoke(&self.context, rng, args)
    }

    /// The bound context
    pub fn context(&self) -> &C {
        &self.context
    }
}

/// Build an invoker bound to `context`. Pass `()` for unbound invocation.
pub fn weighted_invoke<C, A, R, W: ToPrimitive>(
    context: C,
    callables: Vec<Callable<C, A, R>>,
    weights: Option<&[W]>,
) -> GenResult<BoundInvoker<C, A, R>> {
    Ok(BoundInvoker {
        context,
        invoker: WeightedInvoker::new(callables, weights)?,
    })
}
