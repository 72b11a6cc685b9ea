//! Dense row-major matrix used for centers, directions, projections and points.

use crate::{Result, error::ClugenError};

/// A dense, row-major matrix of `f64` values.
///
/// Rows are points or clusters; columns are dimensions.
///
/// # Examples
/// ```
/// use clugen_core::Matrix;
///
/// let matrix = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
/// assert_eq!(matrix.rows(), 2);
/// assert_eq!(matrix.cols(), 2);
/// assert_eq!(matrix.row(1), Some(&[3.0, 4.0][..]));
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix filled with zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows.saturating_mul(cols)],
        }
    }

    /// Wraps row-major data in a matrix.
    ///
    /// # Errors
    /// Returns [`ClugenError::MatrixShape`] when `data.len() != rows * cols`.
    ///
    /// # Examples
    /// ```
    /// use clugen_core::{ClugenError, Matrix};
    ///
    /// let matrix = Matrix::from_row_major(1, 3, vec![0.0, 1.0, 2.0])?;
    /// assert_eq!(matrix.row(0), Some(&[0.0, 1.0, 2.0][..]));
    ///
    /// let err = Matrix::from_row_major(2, 2, vec![0.0]).unwrap_err();
    /// assert!(matches!(err, ClugenError::MatrixShape { rows: 2, cols: 2, len: 1 }));
    /// # Ok::<(), ClugenError>(())
    /// ```
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ClugenError::MatrixShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of equally sized rows.
    ///
    /// An empty list yields a `0 x 0` matrix.
    ///
    /// # Errors
    /// Returns [`ClugenError::RaggedRows`] when the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let count = rows.len();
        let mut data = Vec::with_capacity(count.saturating_mul(cols));
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(ClugenError::RaggedRows {
                    row: index,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: count,
            cols,
            data,
        })
    }

    /// Stacks matrices vertically.
    ///
    /// Every block must have `cols` columns; empty blocks contribute nothing.
    ///
    /// # Errors
    /// Returns [`ClugenError::RaggedRows`] when a non-empty block has a
    /// different column count.
    pub fn vstack<'a, I>(cols: usize, blocks: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut rows = 0_usize;
        let mut data = Vec::new();
        for block in blocks {
            if block.rows == 0 {
                continue;
            }
            if block.cols != cols {
                return Err(ClugenError::RaggedRows {
                    row: rows,
                    expected: cols,
                    got: block.cols,
                });
            }
            rows += block.rows;
            data.extend_from_slice(&block.data);
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns row `index`, or `None` when it is out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Returns a mutable view of row `index`, or `None` when it is out of bounds.
    #[must_use]
    pub fn row_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        self.data.get_mut(start..start + self.cols)
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        RowIter {
            data: &self.data,
            cols: self.cols,
            remaining: self.rows,
        }
    }

    /// Iterates mutably over the rows in order.
    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [f64]> + '_ {
        let cols = self.cols.max(1);
        let take = if self.cols == 0 { 0 } else { self.rows };
        self.data.chunks_exact_mut(cols).take(take)
    }

    /// Returns the row-major backing slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major data.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copies the matrix into a vector of rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Returns a matrix holding rows `start..end`, or `None` when the range
    /// is out of bounds.
    #[must_use]
    pub fn slice_rows(&self, start: usize, end: usize) -> Option<Self> {
        if start > end || end > self.rows {
            return None;
        }
        let data = self.data.get(start * self.cols..end * self.cols)?.to_vec();
        Some(Self {
            rows: end - start,
            cols: self.cols,
            data,
        })
    }
}

struct RowIter<'a> {
    data: &'a [f64],
    cols: usize,
    remaining: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = &'a [f64];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (row, rest) = self.data.split_at(self.cols.min(self.data.len()));
        self.data = rest;
        self.remaining -= 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RowIter<'_> {}
