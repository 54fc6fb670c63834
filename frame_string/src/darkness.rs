use serde::{Deserialize, Serialize};

use crate::Float;

/// How much ink demand is left on a pixel once a string crosses it.
pub trait Darkness<S>: Send + Sync {
    fn compute(&self, weight: S) -> S;
}

/// Removes a constant amount per string, never going below zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatDarkness<S>(pub S);

impl<T: Float> Darkness<T> for FlatDarkness<T> {
    fn compute(&self, weight: T) -> T {
        (weight - self.0).max(T::ZERO)
    }
}

impl<T: Float> Default for FlatDarkness<T> {
    fn default() -> Self {
        Self(T::TWENTY_FIVE)
    }
}

/// Keeps a fixed share of the remaining demand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentageDarkness<S>(pub S);

impl<S: Float> Darkness<S> for PercentageDarkness<S> {
    fn compute(&self, weight: S) -> S {
        self.0 * weight
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum DarknessMode<S> {
    Flat(S),
    Percentage(S),
}

impl<S: Float> DarknessMode<S> {
    pub fn value(&self) -> S {
        match *self {
            Self::Flat(value) | Self::Percentage(value) => value,
        }
    }
}

impl<S: Float> Default for DarknessMode<S> {
    fn default() -> Self {
        Self::Flat(S::TWENTY_FIVE)
    }
}

impl<S: Float> Darkness<S> for DarknessMode<S> {
    fn compute(&self, weight: S) -> S {
        match *self {
            Self::Flat(amount) => FlatDarkness(amount).compute(weight),
            Self::Percentage(factor) => PercentageDarkness(factor).compute(weight),
        }
    }
}
