// Dense n×n matrix stored row-major in a single Vec
//
// Used for all-pairs distances and path counts. One allocation instead of n
// separate rows keeps the O(n²) pair loops cache-friendly.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareMatrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: Clone> SquareMatrix<T> {
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }

    /// Build from rows. Panics if any row length differs from the row count.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "row length must equal row count");
            data.extend(row);
        }
        Self { size, data }
    }
}

impl<T> SquareMatrix<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.size..(i + 1) * self.size]
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.size && j < self.size);
        &self.data[i * self.size + j]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.size && j < self.size);
        &mut self.data[i * self.size + j]
    }
}
