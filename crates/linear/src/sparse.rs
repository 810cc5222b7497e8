//! Sparse backend storing each matrix row as a sorted list of `(column, value)` entries.

use log::debug;
use nalgebra::{DVector, RealField};

use crate::{
    check_index, check_position,
    slots::{SlotKind, Slots},
    ColumnArray, Error, LinearSystem, SystemConfig,
};

/// Row-list storage for one N x N matrix. Each row is sorted by column.
#[derive(Clone, Debug, PartialEq)]
pub struct RowListMatrix<T> {
    rows: Vec<Vec<(usize, T)>>,
}

impl<T> RowListMatrix<T>
where
    T: RealField + Copy,
{
    pub fn new(order: usize) -> Self {
        RowListMatrix {
            rows: (0..order).map(|_| Vec::new()).collect(),
        }
    }

    pub fn row(&self, i: usize) -> &[(usize, T)] {
        &self.rows[i]
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        let row = &self.rows[i];
        match row.binary_search_by_key(&j, |&(column, _)| column) {
            Ok(pos) => row[pos].1,
            Err(_) => T::zero(),
        }
    }

    /// Stores `value` at `(i, j)`. Writing zero over an existing entry keeps it stored as an
    /// explicit zero; writing zero where nothing is stored does nothing.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let row = &mut self.rows[i];
        match row.binary_search_by_key(&j, |&(column, _)| column) {
            Ok(pos) => row[pos].1 = value,
            Err(pos) => {
                if value != T::zero() {
                    row.insert(pos, (j, value));
                }
            }
        }
    }

    /// Number of stored entries, explicit zeros included.
    pub fn stored_len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Linear system backed by row-list sparse matrices and dense vectors.
///
/// The nonzero enumeration reports stored entries whose value is nonzero, so explicit zeros
/// written during assembly stay in storage until `optimize_matrix_storage` drops them.
#[derive(Clone, Debug)]
pub struct SparseSystem<T>
where
    T: RealField + Copy,
{
    config: SystemConfig,
    matrices: Slots<RowListMatrix<T>>,
    vectors: Slots<DVector<T>>,
    solutions: Slots<DVector<T>>,
}

impl<T> SparseSystem<T>
where
    T: RealField + Copy,
{
    pub fn new(order: usize) -> Result<Self, Error> {
        Self::with_config(SystemConfig::new(order))
    }

    pub fn with_config(config: SystemConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(SparseSystem {
            config,
            matrices: Slots::new(SlotKind::Matrix, config.number_of_matrices),
            vectors: Slots::new(SlotKind::Vector, config.number_of_vectors),
            solutions: Slots::new(SlotKind::Solution, config.number_of_solutions),
        })
    }

    /// Raw stored entries of a row, explicit zeros included.
    pub fn stored_entries(&self, row: usize, matrix_index: usize) -> Result<&[(usize, T)], Error> {
        const LOCATION: &str = "SparseSystem::stored_entries";
        check_index(row, self.config.order, "matrix row", LOCATION)?;
        Ok(self.matrices.get(matrix_index, LOCATION)?.row(row))
    }

    pub fn stored_len(&self, matrix_index: usize) -> Result<usize, Error> {
        Ok(self
            .matrices
            .get(matrix_index, "SparseSystem::stored_len")?
            .stored_len())
    }
}

impl<T> LinearSystem<T> for SparseSystem<T>
where
    T: RealField + Copy,
{
    fn config(&self) -> &SystemConfig {
        &self.config
    }

    fn initialize_matrix(&mut self, matrix_index: usize) -> Result<(), Error> {
        let n = self.config.order;
        self.matrices.insert(
            matrix_index,
            RowListMatrix::new(n),
            "SparseSystem::initialize_matrix",
        )
    }

    fn is_matrix_initialized(&self, matrix_index: usize) -> bool {
        self.matrices.is_initialized(matrix_index)
    }

    fn destroy_matrix(&mut self, matrix_index: usize) -> Result<(), Error> {
        self.matrices
            .remove(matrix_index, "SparseSystem::destroy_matrix")
    }

    fn initialize_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        let n = self.config.order;
        self.vectors.insert(
            vector_index,
            DVector::zeros(n),
            "SparseSystem::initialize_vector",
        )
    }

    fn is_vector_initialized(&self, vector_index: usize) -> bool {
        self.vectors.is_initialized(vector_index)
    }

    fn destroy_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        self.vectors
            .remove(vector_index, "SparseSystem::destroy_vector")
    }

    fn initialize_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        let n = self.config.order;
        self.solutions.insert(
            solution_index,
            DVector::zeros(n),
            "SparseSystem::initialize_solution",
        )
    }

    fn is_solution_initialized(&self, solution_index: usize) -> bool {
        self.solutions.is_initialized(solution_index)
    }

    fn destroy_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        self.solutions
            .remove(solution_index, "SparseSystem::destroy_solution")
    }

    fn get_matrix_value(&self, i: usize, j: usize, matrix_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "SparseSystem::get_matrix_value";
        check_position(i, j, self.config.order, LOCATION)?;
        Ok(self.matrices.get(matrix_index, LOCATION)?.get(i, j))
    }

    fn set_matrix_value(
        &mut self,
        i: usize,
        j: usize,
        value: T,
        matrix_index: usize,
    ) -> Result<(), Error> {
        const LOCATION: &str = "SparseSystem::set_matrix_value";
        check_position(i, j, self.config.order, LOCATION)?;
        self.matrices.get_mut(matrix_index, LOCATION)?.set(i, j, value);
        Ok(())
    }

    fn get_vector_value(&self, i: usize, vector_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "SparseSystem::get_vector_value";
        check_index(i, self.config.order, "vector", LOCATION)?;
        Ok(self.vectors.get(vector_index, LOCATION)?[i])
    }

    fn set_vector_value(&mut self, i: usize, value: T, vector_index: usize) -> Result<(), Error> {
        const LOCATION: &str = "SparseSystem::set_vector_value";
        check_index(i, self.config.order, "vector", LOCATION)?;
        self.vectors.get_mut(vector_index, LOCATION)?[i] = value;
        Ok(())
    }

    fn get_solution_value(&self, i: usize, solution_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "SparseSystem::get_solution_value";
        check_index(i, self.config.order, "solution", LOCATION)?;
        Ok(self.solutions.get(solution_index, LOCATION)?[i])
    }

    fn set_solution_value(
        &mut self,
        i: usize,
        value: T,
        solution_index: usize,
    ) -> Result<(), Error> {
        const LOCATION: &str = "SparseSystem::set_solution_value";
        check_index(i, self.config.order, "solution", LOCATION)?;
        self.solutions.get_mut(solution_index, LOCATION)?[i] = value;
        Ok(())
    }

    fn swap_matrices(
        &mut self,
        matrix_index_a: usize,
        matrix_index_b: usize,
    ) -> Result<(), Error> {
        self.matrices
            .swap(matrix_index_a, matrix_index_b, "SparseSystem::swap_matrices")
    }

    fn swap_vectors(&mut self, vector_index_a: usize, vector_index_b: usize) -> Result<(), Error> {
        self.vectors
            .swap(vector_index_a, vector_index_b, "SparseSystem::swap_vectors")
    }

    fn swap_solutions(
        &mut self,
        solution_index_a: usize,
        solution_index_b: usize,
    ) -> Result<(), Error> {
        self.solutions.swap(
            solution_index_a,
            solution_index_b,
            "SparseSystem::swap_solutions",
        )
    }

    fn columns_of_nonzero_elements_in_row(
        &self,
        row: usize,
        matrix_index: usize,
    ) -> Result<ColumnArray, Error> {
        Ok(self
            .stored_entries(row, matrix_index)?
            .iter()
            .filter(|(_, value)| *value != T::zero())
            .map(|&(column, _)| column)
            .collect())
    }

    /// Scales stored entries only; absent entries are zero either way.
    fn scale_matrix(&mut self, scale: T, matrix_index: usize) -> Result<(), Error> {
        if scale == T::one() {
            return Ok(());
        }
        let matrix = self
            .matrices
            .get_mut(matrix_index, "SparseSystem::scale_matrix")?;
        for row in matrix.rows.iter_mut() {
            for (_, value) in row.iter_mut() {
                *value *= scale;
            }
        }
        Ok(())
    }

    fn multiply_matrix_vector(
        &mut self,
        result_vector_index: usize,
        matrix_index: usize,
        vector_index: usize,
    ) -> Result<(), Error> {
        const LOCATION: &str = "SparseSystem::multiply_matrix_vector";
        if result_vector_index == vector_index {
            return Err(Error::linear_system(
                LOCATION,
                format!("result vector {result_vector_index} aliases the operand vector"),
            ));
        }
        let matrix = self.matrices.get(matrix_index, LOCATION)?;
        let vector = self.vectors.get(vector_index, LOCATION)?;
        let result = DVector::from_iterator(
            self.config.order,
            matrix.rows.iter().map(|row| {
                row.iter()
                    .fold(T::zero(), |acc, &(j, value)| acc + value * vector[j])
            }),
        );
        debug!("sparse product into vector {result_vector_index}");
        self.vectors.insert(result_vector_index, result, LOCATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn tridiagonal(order: usize) -> SparseSystem<f64> {
        let mut ls = SparseSystem::with_config(SystemConfig::new(order).with_vectors(2)).unwrap();
        ls.initialize_matrix(0).unwrap();
        for i in 0..order {
            ls.set_matrix_value(i, i, 2.0, 0).unwrap();
            if i > 0 {
                ls.set_matrix_value(i, i - 1, -1.0, 0).unwrap();
            }
            if i + 1 < order {
                ls.set_matrix_value(i, i + 1, -1.0, 0).unwrap();
            }
        }
        ls
    }

    #[test]
    fn test_row_list_sorted() {
        let mut m = RowListMatrix::<f64>::new(3);
        m.set(0, 2, 1.0);
        m.set(0, 0, 3.0);
        m.set(0, 1, 2.0);
        assert_eq!(m.row(0), &[(0, 3.0), (1, 2.0), (2, 1.0)]);
        m.set(1, 1, 0.0);
        assert!(m.row(1).is_empty());
    }

    #[test]
    fn test_enumeration_skips_explicit_zeros() {
        let mut ls = tridiagonal(4);
        assert_eq!(ls.columns_of_nonzero_elements_in_row(0, 0).unwrap(), vec![0, 1]);
        assert_eq!(
            ls.columns_of_nonzero_elements_in_row(2, 0).unwrap(),
            vec![1, 2, 3]
        );
        ls.set_matrix_value(2, 3, 0.0, 0).unwrap();
        assert_eq!(ls.stored_entries(2, 0).unwrap().len(), 3);
        assert_eq!(ls.columns_of_nonzero_elements_in_row(2, 0).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_sparse_product() {
        let mut ls = tridiagonal(4);
        ls.initialize_vector(0).unwrap();
        for i in 0..4 {
            ls.set_vector_value(i, 1.0, 0).unwrap();
        }
        ls.multiply_matrix_vector(1, 0, 0).unwrap();
        let result: Vec<f64> = (0..4).map(|i| ls.get_vector_value(i, 1).unwrap()).collect();
        assert_eq!(result, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_scale_stored_entries() {
        let mut ls = tridiagonal(3);
        ls.scale_matrix(-0.5, 0).unwrap();
        assert_eq!(ls.get_matrix_value(1, 1, 0).unwrap(), -1.0);
        assert_eq!(ls.get_matrix_value(1, 0, 0).unwrap(), 0.5);
        assert_eq!(ls.get_matrix_value(0, 2, 0).unwrap(), 0.0);
        assert_eq!(ls.stored_len(0).unwrap(), 7);
    }

    #[test]
    fn test_swap_vectors_and_solutions() {
        let mut ls =
            SparseSystem::<f64>::with_config(SystemConfig::new(3).with_vectors(2).with_solutions(2))
                .unwrap();
        ls.initialize_vector(1).unwrap();
        ls.set_vector_value(2, 8.0, 1).unwrap();
        ls.swap_vectors(0, 1).unwrap();
        assert_eq!(ls.get_vector_value(2, 0).unwrap(), 8.0);
        assert!(!ls.is_vector_initialized(1));

        ls.initialize_solution(0).unwrap();
        ls.initialize_solution(1).unwrap();
        ls.set_solution_value(0, 1.5, 0).unwrap();
        ls.set_solution_value(1, -2.5, 1).unwrap();
        ls.swap_solutions(1, 0).unwrap();
        assert_eq!(ls.get_solution_value(1, 0).unwrap(), -2.5);
        assert_eq!(ls.get_solution_value(0, 0).unwrap(), 0.0);
        assert_eq!(ls.get_solution_value(0, 1).unwrap(), 1.5);

        assert!(matches!(
            ls.swap_solutions(0, 5).unwrap_err().kind,
            ErrorKind::LinearSystemBounds { index: 5, .. }
        ));
    }

    #[test]
    fn test_bounds() {
        let ls = tridiagonal(3);
        let err = ls.columns_of_nonzero_elements_in_row(3, 0).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::LinearSystemBounds {
                field: "matrix row".into(),
                index: 3
            }
        );
    }
}
