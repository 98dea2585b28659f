// Copyright 2026 @TwoCookingMice

use super::constants::{ Float, Vector3f };

use std::ops;
use std::vec::Vec;

/// Dense row-major per-pixel buffer over a fixed width x height image,
/// indexed by (x, y).
#[derive(Debug, Clone)]
pub struct Grid<T> {
    data: Vec<T>,
    height: usize,
    width: usize
}

pub type ScalarGrid = Grid<Float>;
pub type VectorGrid = Grid<Vector3f>;

impl<T> ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &T {
        let transformed_index = index.0 + self.width * index.1;
        &self.data[transformed_index]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T {
        let transformed_index = index.0 + self.width * index.1;
        &mut self.data[transformed_index]
    }
}

impl<T: Copy> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { data: vec![fill; width * height],
               width,
               height }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self { data, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }
}

impl VectorGrid {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(width, height, Vector3f::zeros())
    }
}

/* Tests for Grid */

#[cfg(test)]
mod tests {
    use super::Grid;
    use super::{ Vector3f };

    #[test]
    fn test_grid_basic_functions() {
        let mut grid = Grid::new(256usize, 256usize, Vector3f::zeros());
        assert_eq!(grid.width(), 256);
        assert_eq!(grid.height(), 256);

        grid[(5, 6)] = Vector3f::new(1.0, 0.5, 0.6);
        assert!((grid[(5, 6)][0] - 1.0).abs() < 0.000001);
        assert!((grid[(2, 6)][0] - 0.0).abs() < 0.000001);
    }

    #[test]
    fn test_grid_from_vec_rejects_bad_length() {
        let data = vec![0.0f32; 7];
        assert!(Grid::from_vec(4, 2, data).is_none());
    }
}
