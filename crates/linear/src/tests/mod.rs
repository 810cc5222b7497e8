use std::cell::Cell;

use crate::{ColumnArray, Error, LinearSystem, SystemConfig};


/// Wraps a backend, counting element writes and optionally overriding the nonzero enumeration
/// with a fixed per-row column pattern. Default operations run against the wrapper, so they only
/// see the required methods.
pub struct Recorder<S> {
    inner: S,
    pattern: Option<Vec<ColumnArray>>,
    writes: Cell<usize>,
}

impl<S> Recorder<S>
where
    S: LinearSystem<f64>,
{
    pub fn new(inner: S) -> Self {
        Recorder {
            inner,
            pattern: None,
            writes: Cell::new(0),
        }
    }

    pub fn with_pattern(inner: S, pattern: Vec<ColumnArray>) -> Self {
        Recorder {
            inner,
            pattern: Some(pattern),
            writes: Cell::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn reset_writes(&self) {
        self.writes.set(0);
    }

    fn record_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl<S> LinearSystem<f64> for Recorder<S>
where
    S: LinearSystem<f64>,
{
    fn config(&self) -> &SystemConfig {
        self.inner.config()
    }

    fn initialize_matrix(&mut self, matrix_index: usize) -> Result<(), Error> {
        self.inner.initialize_matrix(matrix_index)
    }

    fn is_matrix_initialized(&self, matrix_index: usize) -> bool {
        self.inner.is_matrix_initialized(matrix_index)
    }

    fn destroy_matrix(&mut self, matrix_index: usize) -> Result<(), Error> {
        self.inner.destroy_matrix(matrix_index)
    }

    fn initialize_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        self.inner.initialize_vector(vector_index)
    }

    fn is_vector_initialized(&self, vector_index: usize) -> bool {
        self.inner.is_vector_initialized(vector_index)
    }

    fn destroy_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        self.inner.destroy_vector(vector_index)
    }

    fn initialize_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        self.inner.initialize_solution(solution_index)
    }

    fn is_solution_initialized(&self, solution_index: usize) -> bool {
        self.inner.is_solution_initialized(solution_index)
    }

    fn destroy_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        self.inner.destroy_solution(solution_index)
    }

    fn get_matrix_value(&self, i: usize, j: usize, matrix_index: usize) -> Result<f64, Error> {
        self.inner.get_matrix_value(i, j, matrix_index)
    }

    fn set_matrix_value(
        &mut self,
        i: usize,
        j: usize,
        value: f64,
        matrix_index: usize,
    ) -> Result<(), Error> {
        self.record_write();
        self.inner.set_matrix_value(i, j, value, matrix_index)
    }

    fn get_vector_value(&self, i: usize, vector_index: usize) -> Result<f64, Error> {
        self.inner.get_vector_value(i, vector_index)
    }

    fn set_vector_value(&mut self, i: usize, value: f64, vector_index: usize) -> Result<(), Error> {
        self.record_write();
        self.inner.set_vector_value(i, value, vector_index)
    }

    fn get_solution_value(&self, i: usize, solution_index: usize) -> Result<f64, Error> {
        self.inner.get_solution_value(i, solution_index)
    }

    fn set_solution_value(
        &mut self,
        i: usize,
        value: f64,
        solution_index: usize,
    ) -> Result<(), Error> {
        self.record_write();
        self.inner.set_solution_value(i, value, solution_index)
    }

    fn swap_matrices(&mut self, matrix_index_a: usize, matrix_index_b: usize) -> Result<(), Error> {
        self.inner.swap_matrices(matrix_index_a, matrix_index_b)
    }

    fn swap_vectors(&mut self, vector_index_a: usize, vector_index_b: usize) -> Result<(), Error> {
        self.inner.swap_vectors(vector_index_a, vector_index_b)
    }

    fn swap_solutions(
        &mut self,
        solution_index_a: usize,
        solution_index_b: usize,
    ) -> Result<(), Error> {
        self.inner.swap_solutions(solution_index_a, solution_index_b)
    }

    fn columns_of_nonzero_elements_in_row(
        &self,
        row: usize,
        matrix_index: usize,
    ) -> Result<ColumnArray, Error> {
        match &self.pattern {
            Some(pattern) => Ok(pattern[row].clone()),
            None => self
                .inner
                .columns_of_nonzero_elements_in_row(row, matrix_index),
        }
    }
}

/// Initializes a matrix slot and fills it with `value(i, j) = 10 * i + j + 1`.
pub fn fill_matrix<S: LinearSystem<f64>>(ls: &mut S, matrix_index: usize) {
    ls.initialize_matrix(matrix_index).unwrap();
    let n = ls.order();
    for i in 0..n {
        for j in 0..n {
            ls.set_matrix_value(i, j, (10 * i + j + 1) as f64, matrix_index)
                .unwrap();
        }
    }
}
