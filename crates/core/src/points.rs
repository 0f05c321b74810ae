//! Coordinate storage and delimited-text input.
//!
//! Points are stored as `[x, y]` pairs (longitude/latitude or planar x/y).
//! A point's identity is its index in the container.

use std::io::BufRead;

use crate::error::{Result, ThinError};

/// Immutable-after-construction list of `[x, y]` points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    points: Vec<[f64; 2]>,
}

impl Coordinates {
    pub fn from_pairs(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    /// Build from a row-major flat buffer `[x0, y0, x1, y1, ...]`.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(ThinError::DimensionMismatch {
                expected: values.len() + 1,
                got: values.len(),
            });
        }
        let points = values.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
        Ok(Self { points })
    }

    /// Build from a column-major `nrow x 2` matrix buffer: all x values
    /// followed by all y values.
    pub fn from_column_major(values: &[f64], nrow: usize) -> Result<Self> {
        let Some(expected) = nrow.checked_mul(2) else {
            return Err(ThinError::DimensionMismatch {
                expected: usize::MAX,
                got: values.len(),
            });
        };
        if values.len() != expected {
            return Err(ThinError::DimensionMismatch {
                expected,
                got: values.len(),
            });
        }
        let (xs, ys) = values.split_at(nrow);
        Self::from_columns(xs, ys)
    }

    /// Build from separate x and y columns of equal length.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(ThinError::DimensionMismatch {
                expected: xs.len(),
                got: ys.len(),
            });
        }
        let points = xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect();
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> [f64; 2] {
        self.points[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.points.iter().copied()
    }

    pub fn as_slice(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn extend(&mut self, other: Coordinates) {
        self.points.extend(other.points);
    }

    /// Reject NaN and infinite coordinates, which have no grid cell.
    pub fn validate_finite(&self) -> Result<()> {
        match self
            .points
            .iter()
            .position(|p| !(p[0].is_finite() && p[1].is_finite()))
        {
            Some(idx) => Err(ThinError::invalid(format!(
                "coordinate {idx} is not finite: {:?}",
                self.points[idx]
            ))),
            None => Ok(()),
        }
    }
}

impl From<Vec<[f64; 2]>> for Coordinates {
    fn from(points: Vec<[f64; 2]>) -> Self {
        Self::from_pairs(points)
    }
}

impl FromIterator<[f64; 2]> for Coordinates {
    fn from_iter<I: IntoIterator<Item = [f64; 2]>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Read two numeric columns per line from delimited text.
///
/// Blank lines and lines starting with `#` are skipped. A row with other
/// than two fields is a dimension mismatch. Line numbers in parse errors are
/// 1-based.
pub fn read_delimited<R: BufRead>(
    reader: R,
    delimiter: char,
    has_header: bool,
) -> Result<Coordinates> {
    let mut points = Vec::new();
    let mut header_pending = has_header;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }

        let fields: Vec<&str> = trimmed.split(delimiter).map(str::trim).collect();
        let &[x, y] = fields.as_slice() else {
            return Err(ThinError::DimensionMismatch {
                expected: 2,
                got: fields.len(),
            });
        };
        points.push([parse_field(x, lineno)?, parse_field(y, lineno)?]);
    }

    Ok(Coordinates { points })
}

fn parse_field(field: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|_| ThinError::Parse {
        line,
        msg: format!("invalid number: {field:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_buffer_must_hold_pairs() {
        let coords = Coordinates::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(coords.as_slice(), &[[1.0, 2.0], [3.0, 4.0]]);
        assert!(matches!(
            Coordinates::from_flat(&[1.0, 2.0, 3.0]),
            Err(ThinError::DimensionMismatch { got: 3, .. })
        ));
    }

    #[test]
    fn column_major_matches_matrix_layout() {
        // 3 x 2 matrix: x column then y column.
        let coords = Coordinates::from_column_major(&[1.0, 2.0, 3.0, 10.0, 20.0, 30.0], 3).unwrap();
        assert_eq!(coords.get(0), [1.0, 10.0]);
        assert_eq!(coords.get(2), [3.0, 30.0]);
        assert!(Coordinates::from_column_major(&[1.0, 2.0, 3.0], 2).is_err());
        assert!(matches!(
            Coordinates::from_column_major(&[], usize::MAX / 2 + 1),
            Err(ThinError::DimensionMismatch { got: 0, .. })
        ));
    }

    #[test]
    fn columns_must_have_equal_length() {
        assert!(Coordinates::from_columns(&[1.0, 2.0], &[1.0]).is_err());
        assert!(Coordinates::from_columns(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let coords = Coordinates::from_pairs(vec![[0.0, 0.0], [f64::NAN, 1.0]]);
        assert!(matches!(
            coords.validate_finite(),
            Err(ThinError::InvalidArgument(_))
        ));
    }

    #[test]
    fn read_delimited_skips_header_comments_and_blanks() {
        let text = "lon,lat\n# comment\n\n1.5, 2.5\n-3,4\n";
        let coords = read_delimited(text.as_bytes(), ',', true).unwrap();
        assert_eq!(coords.as_slice(), &[[1.5, 2.5], [-3.0, 4.0]]);
    }

    #[test]
    fn read_delimited_requires_two_fields_per_row() {
        match read_delimited("1,2\n3;4\n".as_bytes(), ',', false) {
            Err(ThinError::DimensionMismatch { expected, got }) => {
                assert_eq!((expected, got), (2, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        match read_delimited("1,2\n-3,4,extra\n".as_bytes(), ',', false) {
            Err(ThinError::DimensionMismatch { expected, got }) => {
                assert_eq!((expected, got), (2, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn read_delimited_reports_line_numbers() {
        let text = "1,2\n\n3,abc\n";
        match read_delimited(text.as_bytes(), ',', false) {
            Err(ThinError::Parse { line, msg }) => {
                assert_eq!(line, 3);
                assert!(msg.contains("abc"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn read_delimited_accepts_tabs() {
        let coords = read_delimited("0\t0\n1\t1\n".as_bytes(), '\t', false).unwrap();
        assert_eq!(coords.len(), 2);
    }
}
