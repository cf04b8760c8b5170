use std::ops::Index;

/// Flat data that does not fit the requested shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot reshape {found} values into a {rows}x{cols} matrix")]
pub struct ShapeError {
    pub rows: usize,
    pub cols: usize,
    pub found: usize,
}

/// Dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Interpret `flat` as a `rows x cols` matrix in row-major order, so
    /// element (r, c) is `flat[r * cols + c]`.
    pub fn reshape(flat: Vec<T>, rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let error = ShapeError {
            rows,
            cols,
            found: flat.len(),
        };
        match rows.checked_mul(cols) {
            Some(len) if len == flat.len() => Ok(Self {
                rows,
                cols,
                data: flat,
            }),
            _ => Err(error),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Panics if `row >= rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {} out of range ({} rows)", row, self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Panics if `col >= cols()`.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        assert!(col < self.cols, "column {} out of range ({} columns)", col, self.cols);
        self.data.iter().skip(col).step_by(self.cols)
    }

    /// Row-major view of all elements
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}
