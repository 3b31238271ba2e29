//! Distributed load models acting on the beam.
//!
//! A concentrated load cannot be sampled on a grid, so it is regularised as a
//! normalised Gaussian bump of width `spread` centred on the load position:
//!
//! ```text
//! w(x) = P · exp(−(x − a)² / 2σ²) / (σ √(2π))
//! ```
//!
//! The bump integrates to `P` over the real line and tends to a point load as
//! `σ → 0`. The spread is a numerical regularisation, not a physical width.

use std::f64::consts::PI;

use crate::errors::LoadError;

/// Anything that maps a position along the span to a load intensity in N/m.
pub trait DistributedLoad {
    /// Load intensity at `x` in newtons per metre.
    fn intensity(&self, x: f64) -> f64;
}

impl<F> DistributedLoad for F
where
    F: Fn(f64) -> f64,
{
    fn intensity(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Gaussian approximation of a point load.
///
/// # Examples
/// ```
/// use beamx::{DistributedLoad, GaussianLoad};
///
/// let load = GaussianLoad::new(1_000.0, 5.0, 0.1).expect("positive spread");
/// assert!(load.intensity(5.0) > load.intensity(5.1));
/// assert!(GaussianLoad::new(1_000.0, 5.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianLoad {
    /// Total load in newtons.
    magnitude: f64,
    /// Centre of the bump in metres.
    position: f64,
    /// Standard deviation of the bump in metres.
    spread: f64,
}

impl GaussianLoad {
    /// Create a Gaussian load after checking the spread.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NonPositiveSpread`] when `spread` is zero, negative
    /// or not finite.
    pub fn new(magnitude: f64, position: f64, spread: f64) -> Result<Self, LoadError> {
        if !(spread.is_finite() && spread > 0.0) {
            return Err(LoadError::NonPositiveSpread { spread });
        }
        Ok(Self {
            magnitude,
            position,
            spread,
        })
    }

    /// Total load in newtons.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Centre of the bump in metres.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Standard deviation of the bump in metres.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }
}

impl DistributedLoad for GaussianLoad {
    fn intensity(&self, x: f64) -> f64 {
        let offset = (x - self.position) / self.spread;
        self.magnitude * (-0.5 * offset * offset).exp() / (self.spread * (2.0 * PI).sqrt())
    }
}

/// Evaluate the Gaussian point-load approximation at a single position.
///
/// # Errors
///
/// Returns [`LoadError::NonPositiveSpread`] when `spread` is zero, negative or
/// not finite.
pub fn gaussian_load(x: f64, magnitude: f64, position: f64, spread: f64) -> Result<f64, LoadError> {
    Ok(GaussianLoad::new(magnitude, position, spread)?.intensity(x))
}

/// Constant load intensity over the whole span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformLoad {
    /// Intensity in newtons per metre.
    pub intensity: f64,
}

impl DistributedLoad for UniformLoad {
    fn intensity(&self, _x: f64) -> f64 {
        self.intensity
    }
}

/// Load cases understood by the beam solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadModel {
    /// Regularised point load.
    Gaussian(GaussianLoad),
    /// Uniformly distributed load.
    Uniform(UniformLoad),
}

impl DistributedLoad for LoadModel {
    fn intensity(&self, x: f64) -> f64 {
        match self {
            LoadModel::Gaussian(load) => load.intensity(x),
            LoadModel::Uniform(load) => load.intensity(x),
        }
    }
}

impl From<GaussianLoad> for LoadModel {
    fn from(value: GaussianLoad) -> Self {
        LoadModel::Gaussian(value)
    }
}

impl From<UniformLoad> for LoadModel {
    fn from(value: UniformLoad) -> Self {
        LoadModel::Uniform(value)
    }
}

/// Integrate a load over `[start, end]` with the composite Simpson rule.
///
/// An odd `intervals` is rounded up to the next even count.
///
/// # Errors
///
/// Returns [`LoadError::NoIntervals`] when `intervals` is zero.
pub fn total_load<L>(load: &L, start: f64, end: f64, intervals: usize) -> Result<f64, LoadError>
where
    L: DistributedLoad + ?Sized,
{
    if intervals == 0 {
        return Err(LoadError::NoIntervals);
    }
    let intervals = intervals + intervals % 2;
    let h = (end - start) / intervals as f64;
    let interior: f64 = (1..intervals)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * load.intensity(start + i as f64 * h)
        })
        .sum();
    Ok(h / 3.0 * (load.intensity(start) + interior + load.intensity(end)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn non_positive_spread_is_a_domain_error() {
        for spread in [0.0, -0.05, f64::NAN, f64::INFINITY] {
            let error = gaussian_load(5.0, 1_000.0, 5.0, spread).expect_err("spread rejected");
            assert!(matches!(error, LoadError::NonPositiveSpread { .. }));
        }
    }

    #[test]
    fn peak_intensity_matches_closed_form() {
        let peak = gaussian_load(5.0, 1_000.0, 5.0, 0.05).expect("valid spread");
        assert_relative_eq!(peak, 1_000.0 / (0.05 * (2.0 * PI).sqrt()), max_relative = 1.0e-12);
    }

    #[test]
    fn intensity_is_finite_far_from_the_load() {
        let load = GaussianLoad::new(1_000.0, 5.0, 0.05).expect("valid spread");
        let far = load.intensity(1.0e6);
        assert!(far.is_finite());
        assert_eq!(far, 0.0);
    }

    #[test]
    fn bump_integrates_to_the_point_load() {
        for spread in [0.05, 0.1, 0.5] {
            let load = GaussianLoad::new(1_000.0, 5.0, spread).expect("valid spread");
            let total = total_load(&load, 0.0, 10.0, 4_000).expect("intervals given");
            assert_relative_eq!(total, 1_000.0, max_relative = 0.02);
        }
    }

    #[test]
    fn uniform_load_integrates_exactly() {
        let load = LoadModel::from(UniformLoad { intensity: 250.0 });
        let total = total_load(&load, 0.0, 4.0, 3).expect("intervals given");
        assert_relative_eq!(total, 1_000.0, max_relative = 1.0e-12);
        assert_eq!(total_load(&load, 0.0, 4.0, 0), Err(LoadError::NoIntervals));
    }

    #[test]
    fn closures_act_as_loads() {
        let ramp = |x: f64| 2.0 * x;
        let total = total_load(&ramp, 0.0, 1.0, 2).expect("intervals given");
        assert_relative_eq!(total, 1.0, max_relative = 1.0e-12);
    }
}
