//! Per-point retention state.

use crate::error::{Result, ThinError};
use crate::points::Coordinates;

/// One boolean per point; `true` means the point is retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RetentionMask {
    keep: Vec<bool>,
}

impl RetentionMask {
    pub fn all_retained(n: usize) -> Self {
        Self {
            keep: vec![true; n],
        }
    }

    pub fn len(&self) -> usize {
        self.keep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    #[inline]
    pub fn is_retained(&self, idx: usize) -> bool {
        self.keep[idx]
    }

    #[inline]
    pub fn suppress(&mut self, idx: usize) {
        self.keep[idx] = false;
    }

    pub fn retained_count(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    pub fn retained_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.keep
            .iter()
            .enumerate()
            .filter_map(|(idx, &k)| k.then_some(idx))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.keep
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.keep
    }

    /// Keep only the retained points, preserving order.
    pub fn apply(&self, points: &Coordinates) -> Result<Coordinates> {
        self.check_len(points.len())?;
        Ok(self.retained_indices().map(|idx| points.get(idx)).collect())
    }

    /// Fail unless the mask has exactly one entry per point.
    pub fn check_len(&self, n: usize) -> Result<()> {
        if self.len() != n {
            return Err(ThinError::DimensionMismatch {
                expected: n,
                got: self.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<bool>> for RetentionMask {
    fn from(keep: Vec<bool>) -> Self {
        Self { keep }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_indices() {
        let mut mask = RetentionMask::all_retained(4);
        assert_eq!(mask.retained_count(), 4);
        mask.suppress(1);
        mask.suppress(3);
        assert_eq!(mask.retained_count(), 2);
        assert_eq!(mask.retained_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(mask.as_slice(), &[true, false, true, false]);
    }

    #[test]
    fn apply_filters_points() {
        let points = Coordinates::from_pairs(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        let mask = RetentionMask::from(vec![false, true, true]);
        assert_eq!(mask.apply(&points).unwrap().as_slice(), &[[1.0, 1.0], [2.0, 2.0]]);
    }

    #[test]
    fn apply_rejects_length_mismatch() {
        let points = Coordinates::from_pairs(vec![[0.0, 0.0]]);
        assert!(matches!(
            RetentionMask::all_retained(2).apply(&points),
            Err(ThinError::DimensionMismatch { expected: 1, got: 2 })
        ));
        assert!(matches!(
            RetentionMask::default().apply(&points),
            Err(ThinError::DimensionMismatch { expected: 1, got: 0 })
        ));
    }
}
