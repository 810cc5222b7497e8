//! Dense backend storing every slot as a full nalgebra matrix or vector.

use nalgebra::{DMatrix, DVector, RealField};

use crate::{
    check_index, check_position,
    slots::{SlotKind, Slots},
    ColumnArray, Error, LinearSystem, SystemConfig,
};

/// Linear system backed by dense `DMatrix`/`DVector` storage.
///
/// Every row of an initialized matrix reports all N columns as nonzero.
#[derive(Clone, Debug)]
pub struct DenseSystem<T>
where
    T: RealField + Copy,
{
    config: SystemConfig,
    matrices: Slots<DMatrix<T>>,
    vectors: Slots<DVector<T>>,
    solutions: Slots<DVector<T>>,
}

impl<T> DenseSystem<T>
where
    T: RealField + Copy,
{
    /// Creates a system of the given order with one slot of each kind.
    pub fn new(order: usize) -> Result<Self, Error> {
        Self::with_config(SystemConfig::new(order))
    }

    pub fn with_config(config: SystemConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(DenseSystem {
            config,
            matrices: Slots::new(SlotKind::Matrix, config.number_of_matrices),
            vectors: Slots::new(SlotKind::Vector, config.number_of_vectors),
            solutions: Slots::new(SlotKind::Solution, config.number_of_solutions),
        })
    }

    /// Borrows the raw storage of a matrix slot.
    pub fn matrix(&self, matrix_index: usize) -> Result<&DMatrix<T>, Error> {
        self.matrices.get(matrix_index, "DenseSystem::matrix")
    }

    pub fn vector(&self, vector_index: usize) -> Result<&DVector<T>, Error> {
        self.vectors.get(vector_index, "DenseSystem::vector")
    }

    pub fn solution(&self, solution_index: usize) -> Result<&DVector<T>, Error> {
        self.solutions.get(solution_index, "DenseSystem::solution")
    }
}

impl<T> LinearSystem<T> for DenseSystem<T>
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
            DMatrix::zeros(n, n),
            "DenseSystem::initialize_matrix",
        )
    }

    fn is_matrix_initialized(&self, matrix_index: usize) -> bool {
        self.matrices.is_initialized(matrix_index)
    }

    fn destroy_matrix(&mut self, matrix_index: usize) -> Result<(), Error> {
        self.matrices
            .remove(matrix_index, "DenseSystem::destroy_matrix")
    }

    fn initialize_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        let n = self.config.order;
        self.vectors.insert(
            vector_index,
            DVector::zeros(n),
            "DenseSystem::initialize_vector",
        )
    }

    fn is_vector_initialized(&self, vector_index: usize) -> bool {
        self.vectors.is_initialized(vector_index)
    }

    fn destroy_vector(&mut self, vector_index: usize) -> Result<(), Error> {
        self.vectors.remove(vector_index, "DenseSystem::destroy_vector")
    }

    fn initialize_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        let n = self.config.order;
        self.solutions.insert(
            solution_index,
            DVector::zeros(n),
            "DenseSystem::initialize_solution",
        )
    }

    fn is_solution_initialized(&self, solution_index: usize) -> bool {
        self.solutions.is_initialized(solution_index)
    }

    fn destroy_solution(&mut self, solution_index: usize) -> Result<(), Error> {
        self.solutions
            .remove(solution_index, "DenseSystem::destroy_solution")
    }

    fn get_matrix_value(&self, i: usize, j: usize, matrix_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "DenseSystem::get_matrix_value";
        check_position(i, j, self.config.order, LOCATION)?;
        Ok(self.matrices.get(matrix_index, LOCATION)?[(i, j)])
    }

    fn set_matrix_value(
        &mut self,
        i: usize,
        j: usize,
        value: T,
        matrix_index: usize,
    ) -> Result<(), Error> {
        const LOCATION: &str = "DenseSystem::set_matrix_value";
        check_position(i, j, self.config.order, LOCATION)?;
        self.matrices.get_mut(matrix_index, LOCATION)?[(i, j)] = value;
        Ok(())
    }

    fn get_vector_value(&self, i: usize, vector_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "DenseSystem::get_vector_value";
        check_index(i, self.config.order, "vector", LOCATION)?;
        Ok(self.vectors.get(vector_index, LOCATION)?[i])
    }

    fn set_vector_value(&mut self, i: usize, value: T, vector_index: usize) -> Result<(), Error> {
        const LOCATION: &str = "DenseSystem::set_vector_value";
        check_index(i, self.config.order, "vector", LOCATION)?;
        self.vectors.get_mut(vector_index, LOCATION)?[i] = value;
        Ok(())
    }

    fn get_solution_value(&self, i: usize, solution_index: usize) -> Result<T, Error> {
        const LOCATION: &str = "DenseSystem::get_solution_value";
        check_index(i, self.config.order, "solution", LOCATION)?;
        Ok(self.solutions.get(solution_index, LOCATION)?[i])
    }

    fn set_solution_value(
        &mut self,
        i: usize,
        value: T,
        solution_index: usize,
    ) -> Result<(), Error> {
        const LOCATION: &str = "DenseSystem::set_solution_value";
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
            .swap(matrix_index_a, matrix_index_b, "DenseSystem::swap_matrices")
    }

    fn swap_vectors(&mut self, vector_index_a: usize, vector_index_b: usize) -> Result<(), Error> {
        self.vectors
            .swap(vector_index_a, vector_index_b, "DenseSystem::swap_vectors")
    }

    fn swap_solutions(
        &mut self,
        solution_index_a: usize,
        solution_index_b: usize,
    ) -> Result<(), Error> {
        self.solutions.swap(
            solution_index_a,
            solution_index_b,
            "DenseSystem::swap_solutions",
        )
    }

    fn columns_of_nonzero_elements_in_row(
        &self,
        row: usize,
        matrix_index: usize,
    ) -> Result<ColumnArray, Error> {
        const LOCATION: &str = "DenseSystem::columns_of_nonzero_elements_in_row";
        check_index(row, self.config.order, "matrix row", LOCATION)?;
        self.matrices.get(matrix_index, LOCATION)?;
        Ok((0..self.config.order).collect())
    }
}
