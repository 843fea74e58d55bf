//! Weighted random selection over a candidate set.
//!
//! Weights are folded into a normalized cumulative distribution once, when the sampler is built.
//! Each draw then maps one uniform value `r` in `[0, 1)` to the first candidate whose cumulative
//! weight is strictly greater than `r`.

use num_traits::ToPrimitive;
use rand::RngCore;

use crate::error::{GenError, GenResult};
use crate::rng::uniform;

/// Samples one candidate per call, uniformly or by relative weight.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    candidates: Vec<T>,
    cdf: Option<Vec<f64>>,
}

impl<T> WeightedSampler<T> {
    /// Build a sampler over `candidates`.
    ///
    /// `None` or an empty weight slice selects uniform weighting. Otherwise the weights must match
    /// the candidates in length, be finite and non-negative, and have a positive sum.
    pub fn new<W: ToPrimitive>(candidates: Vec<T>, weights: Option<&[W]>) -> GenResult<Self> {
        if candidates.is_empty() {
            return Err(GenError::invalid_input("candidate set is undefined or empty"));
        }

        let cdf = match weights {
            Some(weights) if !weights.is_empty() => Some(build_cdf(candidates.len(), weights)?),
            _ => None,
        };

        Ok(Self { candidates, cdf })
    }

    /// Draw one candidate using the given random source
    pub fn sample_with(&self, rng: &mut dyn RngCore) -> &T {
        &self.candidates[self.sample_index(rng)]
    }

    /// Draw one candidate using the ambient thread RNG
    pub fn sample(&self) -> &T {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draw the index of one candidate
    pub fn sample_index(&self, rng: &mut dyn RngCore) -> usize {
        let r = uniform(rng);
        let last = self.candidates.len() - 1;
        match &self.cdf {
            None => ((r * self.candidates.len() as f64) as usize).min(last),
            Some(cdf) => cdf.partition_point(|&c| c <= r).min(last),
        }
    }

    /// The candidate set, in construction order
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Selection probability of each candidate
    pub fn probabilities(&self) -> Vec<f64> {
        match &self.cdf {
            None => vec![1.0 / self.candidates.len() as f64; self.candidates.len()],
            Some(cdf) => {
                let mut previous = 0.0;
                cdf.iter()
                    .map(|&c| {
                        let p = c - previous;
                        previous = c;
                        p
                    })
                    .collect()
            }
        }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false; a sampler cannot be built over an empty set
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<T: Clone> WeightedSampler<T> {
    /// Turn the sampler into a zero-argument producer backed by the thread RNG
    pub fn into_fn(self) -> impl Fn() -> T {
        move || self.sample().clone()
    }
}

/// Build a weighted sampler; see [`WeightedSampler::new`].
pub fn weighted_sample<T, W: ToPrimitive>(
    candidates: Vec<T>,
    weights: Option<&[W]>,
) -> GenResult<WeightedSampler<T>> {
    WeightedSampler::new(candidates, weights)
}

/// Validate weights and fold them into a normalized CDF.
///
/// Entries whose cumulative weight has reached the total are pinned to exactly 1.0, so rounding
/// never leaves a draw without a match and trailing zero weights stay unreachable.
fn build_cdf<W: ToPrimitive>(len: usize, weights: &[W]) -> GenResult<Vec<f64>> {
    if weights.len() != len {
        return Err(GenError::DimensionMismatch {
            candidates: len,
            weights: weights.len(),
        });
    }

    let mut cumulative = Vec::with_capacity(len);
    let mut sum = 0.0;
    for (i, w) in weights.iter().enumerate() {
        let w = w.to_f64().filter(|w| w.is_finite() && *w >= 0.0).ok_or_else(|| {
            GenError::invalid_config(
                "weights",
                format!("weight at index {} must be finite and non-negative", i),
            )
        })?;
        sum += w;
        cumulative.push(sum);
    }

    if sum <= 0.0 {
        return Err(GenError::invalid_config(
            "weights",
            "weights must have a positive sum",
        ));
    }

    Ok(cumulative
        .into_iter()
        .map(|c| if c >= sum { 1.0 } else { c / sum })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SequenceRng, create_seeded_rng};

    const NO_WEIGHTS: Option<&[f64]> = None;

    #[test]
    fn test_empty_candidates_rejected() {
        let result = weighted_sample(Vec::<i32>::new(), NO_WEIGHTS);
        assert!(matches!(result, Err(GenError::InvalidInput { .. })));

        let result = weighted_sample(Vec::<i32>::new(), Some(&[1, 2][..]));
        assert!(matches!(result, Err(GenError::InvalidInput { .. })));
    }

    #[test]
    fn test_weight_length_mismatch_rejected() {
        let result = weighted_sample(vec!['a', 'b', 'c'], Some(&[1, 2][..]));
        assert_eq!(
            result.unwrap_err(),
            GenError::DimensionMismatch {
                candidates: 3,
                weights: 2
            }
        );
    }

    #[test]
    fn test_bad_weights_rejected() {
        let result = weighted_sample(vec![1, 2], Some(&[0.0, 0.0][..]));
        assert!(matches!(result, Err(GenError::InvalidConfig { .. })));

        let result = weighted_sample(vec![1, 2], Some(&[1.0, -1.0][..]));
        assert!(matches!(result, Err(GenError::InvalidConfig { .. })));

        let result = weighted_sample(vec![1, 2], Some(&[1.0, f64::NAN][..]));
        assert!(matches!(result, Err(GenError::InvalidConfig { .. })));
    }

    #[test]
    fn test_empty_weights_mean_uniform() {
        let sampler = weighted_sample(vec![1, 2, 3, 4], Some(&[] as &[u32])).unwrap();
        assert_eq!(sampler.probabilities(), vec![0.25; 4]);
    }

    #[test]
    fn test_uniform_draws_index_by_floor() {
        let sampler = weighted_sample(vec!["a", "b", "c", "d"], NO_WEIGHTS).unwrap();
        let mut rng = SequenceRng::new(&[0.0, 0.24, 0.25, 0.5, 0.99]);

        let drawn: Vec<_> = (0..5).map(|_| *sampler.sample_with(&mut rng)).collect();
        assert_eq!(drawn, vec!["a", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_weighted_draws_follow_cdf() {
        // cdf = [0.5, 0.75, 1.0]
        let sampler = weighted_sample(vec!['x', 'y', 'z'], Some(&[2, 1, 1][..])).unwrap();
        let mut rng = SequenceRng::new(&[0.0, 0.49, 0.5, 0.74, 0.75, 0.999]);

        let drawn: Vec<_> = (0..6).map(|_| *sampler.sample_with(&mut rng)).collect();
        assert_eq!(drawn, vec!['x', 'x', 'y', 'y', 'z', 'z']);
    }

    #[test]
    fn test_zero_weight_is_unreachable() {
        let sampler = weighted_sample(vec![0, 1, 2, 3], Some(&[0, 1, 0, 1][..])).unwrap();
        let mut rng = create_seeded_rng(7);

        for _ in 0..2000 {
            let value = *sampler.sample_with(&mut rng);
            assert!(value == 1 || value == 3, "drew zero-weight candidate {}", value);
        }

        // a trailing zero weight must not catch draws close to 1
        let sampler = weighted_sample(vec!['a', 'b'], Some(&[1, 0][..])).unwrap();
        let mut rng = SequenceRng::new(&[0.999_999]);
        assert_eq!(*sampler.sample_with(&mut rng), 'a');
    }

    #[test]
    fn test_single_candidate_always_returned() {
        let sampler = weighted_sample(vec!["only"], Some(&[0.001][..])).unwrap();
        let mut rng = create_seeded_rng(1);
        for _ in 0..100 {
            assert_eq!(*sampler.sample_with(&mut rng), "only");
        }
    }

    #[test]
    fn test_probabilities_are_normalized() {
        let sampler = weighted_sample(vec![1, 2, 3, 4, 5], Some(&[3, 1, 1, 1, 1][..])).unwrap();
        let probabilities = sampler.probabilities();

        assert!((probabilities[0] - 3.0 / 7.0).abs() < 1e-12);
        for p in &probabilities[1..] {
            assert!((p - 1.0 / 7.0).abs() < 1e-12);
        }
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_into_fn_produces_candidates() {
        let produce = weighted_sample(vec![10, 20], Some(&[1, 1][..])).unwrap().into_fn();
        for _ in 0..20 {
            let value = produce();
            assert!(value == 10 || value == 20);
        }
    }
}
