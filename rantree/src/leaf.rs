//! Primitive leaf generators.
//!
//! Each generator validates its parameters once in `new` and then produces values from any
//! random source. [`LeafGenerator`] converts a generator's output into a leaf [`Node`].

use chrono::{Duration, NaiveDate};
use rand::RngCore;

use crate::error::{GenError, GenResult};
use crate::node::Node;
use crate::rng::uniform;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Anything that yields one leaf node per call
pub trait LeafGenerator: Send + Sync {
    /// Produce one leaf
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node;
}

/// Random boolean, `true` with probability `p_true`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanBool {
    p_true: f64,
}

impl RanBool {
    pub fn new(p_true: f64) -> GenResult<Self> {
        if !(0.0..=1.0).contains(&p_true) {
            return Err(GenError::invalid_input(format!(
                "probability {} is outside [0, 1]",
                p_true
            )));
        }
        Ok(Self { p_true })
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> bool {
        uniform(rng) < self.p_true
    }
}

impl Default for RanBool {
    fn default() -> Self {
        Self { p_true: 0.5 }
    }
}

impl LeafGenerator for RanBool {
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node {
        Node::Bool(self.generate(rng))
    }
}

/// Random lowercase alphanumeric string of a fixed length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanStr {
    n_chars: usize,
}

impl RanStr {
    pub fn new(n_chars: usize) -> GenResult<Self> {
        if n_chars == 0 {
            return Err(GenError::invalid_input("string length must be at least 1"));
        }
        Ok(Self { n_chars })
    }

    pub fn len(&self) -> usize {
        self.n_chars
    }

    pub fn is_empty(&self) -> bool {
        self.n_chars == 0
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> String {
        (0..self.n_chars)
            .map(|_| {
                let index = ((uniform(rng) * BASE36.len() as f64) as usize).min(BASE36.len() - 1);
                BASE36[index] as char
            })
            .collect()
    }
}

impl Default for RanStr {
    fn default() -> Self {
        Self { n_chars: 6 }
    }
}

impl LeafGenerator for RanStr {
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node {
        Node::Str(self.generate(rng))
    }
}

/// Random integer with exactly `n_digits` digits and a non-zero leading digit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanDigits {
    scale: f64,
}

impl RanDigits {
    pub fn new(n_digits: u32) -> GenResult<Self> {
        if !(1..=18).contains(&n_digits) {
            return Err(GenError::invalid_input(format!(
                "digit count {} is outside 1..=18",
                n_digits
            )));
        }
        Ok(Self {
            scale: 10f64.powi(n_digits as i32),
        })
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> i64 {
        // r < 0.1 would drop the leading digit
        let mut r = uniform(rng);
        while r < 0.1 {
            r = uniform(rng);
        }
        ((r * self.scale).floor() as i64).min(self.scale as i64 - 1)
    }
}

impl Default for RanDigits {
    fn default() -> Self {
        Self { scale: 1e6 }
    }
}

impl LeafGenerator for RanDigits {
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node {
        Node::Int(self.generate(rng))
    }
}

/// Random integer in `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanInt {
    min: i64,
    max: i64,
}

impl RanInt {
    pub fn new(min: i64, max: i64) -> GenResult<Self> {
        if min > max {
            return Err(GenError::invalid_input(format!(
                "min {} is greater than max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> i64 {
        let span = self.max as f64 - self.min as f64;
        let value = (self.min as f64 + uniform(rng) * span).floor() as i64;
        if self.max > self.min {
            value.clamp(self.min, self.max - 1)
        } else {
            self.min
        }
    }
}

impl Default for RanInt {
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

impl LeafGenerator for RanInt {
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node {
        Node::Int(self.generate(rng))
    }
}

/// Random `MM/DD/YYYY` date string in `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanDate {
    start: NaiveDate,
    span_days: i64,
}

impl RanDate {
    pub fn new(start: NaiveDate, end: NaiveDate) -> GenResult<Self> {
        if end < start {
            return Err(GenError::invalid_input(format!(
                "date range end {} precedes start {}",
                end, start
            )));
        }
        Ok(Self {
            start,
            span_days: (end - start).num_days(),
        })
    }

    pub fn generate_date(&self, rng: &mut dyn RngCore) -> NaiveDate {
        let offset = (uniform(rng) * self.span_days as f64).floor() as i64;
        self.start + Duration::days(offset)
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> String {
        self.generate_date(rng).format("%m/%d/%Y").to_string()
    }
}

impl Default for RanDate {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(3000, 1, 1).unwrap_or(NaiveDate::MAX);
        Self {
            start,
            span_days: (end - start).num_days(),
        }
    }
}

impl LeafGenerator for RanDate {
    fn generate_node(&self, rng: &mut dyn RngCore) -> Node {
        Node::Date(self.generate(rng))
    }
}
