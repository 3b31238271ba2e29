//! Sampled deflection curves produced by the solvers.

use serde::Serialize;

/// A single sample of a deflection curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// Distance from the left support in metres.
    pub position: f64,
    /// Transverse deflection in metres.
    pub deflection: f64,
}

impl Sample {
    /// Create a [`Sample`] with explicit values.
    #[must_use]
    pub const fn new(position: f64, deflection: f64) -> Self {
        Self {
            position,
            deflection,
        }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((position, deflection): (f64, f64)) -> Self {
        Self::new(position, deflection)
    }
}

/// Ordered sequence of deflection samples along the span.
///
/// Samples are stored in increasing position order. A curve is produced once
/// per solve and is read-only afterwards.
///
/// # Examples
/// ```
/// use beamx::DeflectionCurve;
///
/// let curve = DeflectionCurve::from_parts(&[0.0, 1.0, 2.0], &[0.0, -0.5, 0.0]);
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve.peak().map(|sample| sample.position), Some(1.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeflectionCurve {
    /// Samples in increasing position order.
    samples: Vec<Sample>,
}

impl DeflectionCurve {
    /// Build a curve from samples that are already ordered by position.
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        debug_assert!(samples
            .windows(2)
            .all(|pair| pair[0].position <= pair[1].position));
        Self { samples }
    }

    /// Pair matching slices of positions and deflections.
    ///
    /// Extra entries in the longer slice are ignored.
    #[must_use]
    pub fn from_parts(positions: &[f64], deflections: &[f64]) -> Self {
        Self::new(
            positions
                .iter()
                .zip(deflections)
                .map(|(&x, &y)| Sample::new(x, y))
                .collect(),
        )
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the curve holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the underlying samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over the sampled positions.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.position)
    }

    /// Iterate over the sampled deflections.
    pub fn deflections(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.deflection)
    }

    /// First sample, at the left end of the span.
    #[must_use]
    pub fn first(&self) -> Option<Sample> {
        self.samples.first().copied()
    }

    /// Last sample, at the right end of the span.
    #[must_use]
    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Sample with the largest deflection magnitude.
    ///
    /// Ties resolve to the sample closest to the left support.
    #[must_use]
    pub fn peak(&self) -> Option<Sample> {
        self.samples.iter().copied().fold(None, |best, sample| match best {
            Some(best) if best.deflection.abs() >= sample.deflection.abs() => Some(best),
            _ => Some(sample),
        })
    }

    /// Linearly interpolate the deflection at `position`.
    ///
    /// Returns `None` when the curve is empty or `position` lies outside the
    /// sampled range.
    #[must_use]
    pub fn interpolate(&self, position: f64) -> Option<f64> {
        let first = self.first()?;
        let last = self.last()?;
        if position < first.position || position > last.position {
            return None;
        }
        let upper = self
            .samples
            .partition_point(|sample| sample.position < position);
        if upper == 0 {
            return Some(first.deflection);
        }
        let right = self.samples[upper];
        let left = self.samples[upper - 1];
        let width = right.position - left.position;
        if width == 0.0 {
            return Some(right.deflection);
        }
        let t = (position - left.position) / width;
        Some(left.deflection + t * (right.deflection - left.deflection))
    }
}

impl FromIterator<Sample> for DeflectionCurve {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
