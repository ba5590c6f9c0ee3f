use xr_core::{DacCode, DacPoint};

use crate::decimate::decimate;

/// Ordered XY samples in DAC code space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleStream {
    points: Vec<DacPoint>,
}

impl SampleStream {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<DacPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DacPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<DacPoint> {
        self.points.last().copied()
    }

    pub fn push(&mut self, p: DacPoint) {
        self.points.push(p);
    }

    pub fn extend_from_slice(&mut self, points: &[DacPoint]) {
        self.points.extend_from_slice(points);
    }

    /// X channel, one code per sample.
    pub fn xs(&self) -> Vec<DacCode> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y channel, one code per sample.
    pub fn ys(&self) -> Vec<DacCode> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Keeps every `stride`-th sample starting at index 0.
    ///
    /// # Panics
    /// Panics if `stride == 0`.
    pub fn decimated(&self, stride: usize) -> Self {
        Self {
            points: decimate(&self.points, stride),
        }
    }

    pub fn into_points(self) -> Vec<DacPoint> {
        self.points
    }
}
