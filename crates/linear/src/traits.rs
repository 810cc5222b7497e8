use log::debug;
use nalgebra::{DMatrix, DVector, RealField, Scalar};
use num_traits::Zero;

use crate::{check_index, lu::LuSolver, Error, SystemConfig};

/// Column indices of the nonzero entries of one matrix row, in enumeration order.
pub type ColumnArray = Vec<usize>;

/// Capability set of a linear-system backend of fixed order N.
///
/// A backend owns any number of matrix, vector and solution slots, each addressed by a
/// caller-chosen index. Every matrix slot is N x N and every vector/solution slot has length N.
/// All positions are zero-based and must lie in `[0, N)`; a backend reports violations as
/// `LinearSystemBounds` errors.
///
/// Only storage access and slot lifecycle are required. Everything else (scaling, accumulation,
/// products, storage compaction, solving) has a default built purely on the required methods,
/// with dense semantics. Backends with real sparsity override
/// [`columns_of_nonzero_elements_in_row`](LinearSystem::columns_of_nonzero_elements_in_row) and
/// may override the defaults for speed.
///
/// No method is safe to call concurrently on the same slot; accumulation and scaling are
/// read-modify-write.
pub trait LinearSystem<T>
where
    T: Scalar + RealField + Zero + Copy,
{
    fn config(&self) -> &SystemConfig;

    /// System order N.
    fn order(&self) -> usize {
        self.config().order
    }

    /// Allocates a zeroed N x N matrix in `matrix_index`, replacing any previous contents.
    fn initialize_matrix(&mut self, matrix_index: usize) -> Result<(), Error>;

    fn is_matrix_initialized(&self, matrix_index: usize) -> bool;

    /// Frees the matrix in `matrix_index`. Destroying an empty slot does nothing.
    fn destroy_matrix(&mut self, matrix_index: usize) -> Result<(), Error>;

    /// Allocates a zeroed vector of length N in `vector_index`.
    fn initialize_vector(&mut self, vector_index: usize) -> Result<(), Error>;

    fn is_vector_initialized(&self, vector_index: usize) -> bool;

    fn destroy_vector(&mut self, vector_index: usize) -> Result<(), Error>;

    /// Allocates a zeroed solution of length N in `solution_index`.
    fn initialize_solution(&mut self, solution_index: usize) -> Result<(), Error>;

    fn is_solution_initialized(&self, solution_index: usize) -> bool;

    fn destroy_solution(&mut self, solution_index: usize) -> Result<(), Error>;

    fn get_matrix_value(&self, i: usize, j: usize, matrix_index: usize) -> Result<T, Error>;

    fn set_matrix_value(
        &mut self,
        i: usize,
        j: usize,
        value: T,
        matrix_index: usize,
    ) -> Result<(), Error>;

    fn get_vector_value(&self, i: usize, vector_index: usize) -> Result<T, Error>;

    fn set_vector_value(&mut self, i: usize, value: T, vector_index: usize) -> Result<(), Error>;

    fn get_solution_value(&self, i: usize, solution_index: usize) -> Result<T, Error>;

    fn set_solution_value(
        &mut self,
        i: usize,
        value: T,
        solution_index: usize,
    ) -> Result<(), Error>;

    /// Exchanges the storage behind two matrix slots without copying elements.
    fn swap_matrices(&mut self, matrix_index_a: usize, matrix_index_b: usize)
        -> Result<(), Error>;

    fn swap_vectors(&mut self, vector_index_a: usize, vector_index_b: usize) -> Result<(), Error>;

    fn swap_solutions(
        &mut self,
        solution_index_a: usize,
        solution_index_b: usize,
    ) -> Result<(), Error>;

    /// Columns holding a nonzero entry in `row`.
    ///
    /// The default assumes a full matrix and returns every column `0..N` in ascending order.
    fn columns_of_nonzero_elements_in_row(
        &self,
        row: usize,
        _matrix_index: usize,
    ) -> Result<ColumnArray, Error> {
        check_index(
            row,
            self.order(),
            "matrix row",
            "LinearSystem::columns_of_nonzero_elements_in_row",
        )?;
        Ok((0..self.order()).collect())
    }

    /// Destroys every initialized slot.
    fn clean(&mut self) -> Result<(), Error> {
        let config = *self.config();
        for index in 0..config.number_of_matrices {
            self.destroy_matrix(index)?;
        }
        for index in 0..config.number_of_vectors {
            self.destroy_vector(index)?;
        }
        for index in 0..config.number_of_solutions {
            self.destroy_solution(index)?;
        }
        Ok(())
    }

    /// Multiplies every element of a matrix by `scale`.
    ///
    /// Scaling by exactly one is a no-op. Otherwise this touches all N² positions, whatever the
    /// sparsity of the backend.
    fn scale_matrix(&mut self, scale: T, matrix_index: usize) -> Result<(), Error> {
        if scale == T::one() {
            return Ok(());
        }
        let order = self.order();
        for i in 0..order {
            for j in 0..order {
                let value = self.get_matrix_value(i, j, matrix_index)?;
                self.set_matrix_value(i, j, scale * value, matrix_index)?;
            }
        }
        Ok(())
    }

    fn scale_vector(&mut self, scale: T, vector_index: usize) -> Result<(), Error> {
        if scale == T::one() {
            return Ok(());
        }
        for i in 0..self.order() {
            let value = self.get_vector_value(i, vector_index)?;
            self.set_vector_value(i, scale * value, vector_index)?;
        }
        Ok(())
    }

    fn scale_solution(&mut self, scale: T, solution_index: usize) -> Result<(), Error> {
        if scale == T::one() {
            return Ok(());
        }
        for i in 0..self.order() {
            let value = self.get_solution_value(i, solution_index)?;
            self.set_solution_value(i, scale * value, solution_index)?;
        }
        Ok(())
    }

    fn add_matrix_value(
        &mut self,
        i: usize,
        j: usize,
        value: T,
        matrix_index: usize,
    ) -> Result<(), Error> {
        let current = self.get_matrix_value(i, j, matrix_index)?;
        self.set_matrix_value(i, j, value + current, matrix_index)
    }

    fn add_vector_value(&mut self, i: usize, value: T, vector_index: usize) -> Result<(), Error> {
        let current = self.get_vector_value(i, vector_index)?;
        self.set_vector_value(i, value + current, vector_index)
    }

    fn add_solution_value(
        &mut self,
        i: usize,
        value: T,
        solution_index: usize,
    ) -> Result<(), Error> {
        let current = self.get_solution_value(i, solution_index)?;
        self.set_solution_value(i, value + current, solution_index)
    }

    /// `result = matrix * vector`, computed densely over all N² positions.
    ///
    /// `result_vector_index` is reinitialized to zero first, so it must differ from
    /// `vector_index`.
    fn multiply_matrix_vector(
        &mut self,
        result_vector_index: usize,
        matrix_index: usize,
        vector_index: usize,
    ) -> Result<(), Error> {
        if result_vector_index == vector_index {
            return Err(Error::linear_system(
                "LinearSystem::multiply_matrix_vector",
                format!("result vector {result_vector_index} aliases the operand vector"),
            ));
        }
        // both operands must be readable before the result slot is wiped
        self.get_matrix_value(0, 0, matrix_index)?;
        self.get_vector_value(0, vector_index)?;
        self.initialize_vector(result_vector_index)?;

        let order = self.order();
        for i in 0..order {
            for j in 0..order {
                let product =
                    self.get_matrix_value(i, j, matrix_index)? * self.get_vector_value(j, vector_index)?;
                self.add_vector_value(i, product, result_vector_index)?;
            }
        }
        Ok(())
    }

    /// `result = left * right`, computed densely. `result_matrix_index` is reinitialized first and
    /// must differ from both operands.
    fn multiply_matrix_matrix(
        &mut self,
        result_matrix_index: usize,
        left_matrix_index: usize,
        right_matrix_index: usize,
    ) -> Result<(), Error> {
        if result_matrix_index == left_matrix_index || result_matrix_index == right_matrix_index {
            return Err(Error::linear_system(
                "LinearSystem::multiply_matrix_matrix",
                format!("result matrix {result_matrix_index} aliases an operand matrix"),
            ));
        }
        self.initialize_matrix(result_matrix_index)?;

        let order = self.order();
        for i in 0..order {
            for j in 0..order {
                let mut sum = T::zero();
                for k in 0..order {
                    sum += self.get_matrix_value(i, k, left_matrix_index)?
                        * self.get_matrix_value(k, j, right_matrix_index)?;
                }
                if !sum.is_zero() {
                    self.set_matrix_value(i, j, sum, result_matrix_index)?;
                }
            }
        }
        Ok(())
    }

    /// Compacts a matrix to the entries its nonzero enumeration reports.
    ///
    /// The matrix is moved to `temp_matrix_index`, `matrix_index` is reinitialized, every
    /// enumerated entry is copied back, and the temporary slot is destroyed. Values at positions
    /// the enumeration never reports are dropped. Between the reinitialization and the copy the
    /// matrix is transiently empty.
    fn optimize_matrix_storage(
        &mut self,
        matrix_index: usize,
        temp_matrix_index: usize,
    ) -> Result<(), Error> {
        if matrix_index == temp_matrix_index {
            return Err(Error::linear_system(
                "LinearSystem::optimize_matrix_storage",
                format!("temporary matrix {temp_matrix_index} aliases the matrix being optimized"),
            ));
        }
        if !self.is_matrix_initialized(matrix_index) {
            return Err(Error::linear_system(
                "LinearSystem::optimize_matrix_storage",
                format!("matrix slot {matrix_index} is not initialized"),
            ));
        }
        debug!("optimize storage of matrix {matrix_index} via temporary {temp_matrix_index}");

        self.swap_matrices(matrix_index, temp_matrix_index)?;
        self.initialize_matrix(matrix_index)?;

        for i in 0..self.order() {
            for j in self.columns_of_nonzero_elements_in_row(i, temp_matrix_index)? {
                let value = self.get_matrix_value(i, j, temp_matrix_index)?;
                self.set_matrix_value(i, j, value, matrix_index)?;
            }
        }

        self.destroy_matrix(temp_matrix_index)
    }

    /// Replaces `destination` with the enumerated nonzero entries of `source`.
    fn copy_matrix(
        &mut self,
        source_matrix_index: usize,
        destination_matrix_index: usize,
    ) -> Result<(), Error> {
        if source_matrix_index == destination_matrix_index {
            return Ok(());
        }
        self.initialize_matrix(destination_matrix_index)?;
        for i in 0..self.order() {
            for j in self.columns_of_nonzero_elements_in_row(i, source_matrix_index)? {
                let value = self.get_matrix_value(i, j, source_matrix_index)?;
                self.set_matrix_value(i, j, value, destination_matrix_index)?;
            }
        }
        Ok(())
    }

    /// `left += right`, visiting the enumerated nonzero entries of `right`.
    fn add_matrix_matrix(
        &mut self,
        left_matrix_index: usize,
        right_matrix_index: usize,
    ) -> Result<(), Error> {
        for i in 0..self.order() {
            for j in self.columns_of_nonzero_elements_in_row(i, right_matrix_index)? {
                let value = self.get_matrix_value(i, j, right_matrix_index)?;
                self.add_matrix_value(i, j, value, left_matrix_index)?;
            }
        }
        Ok(())
    }

    fn copy_vector(
        &mut self,
        source_vector_index: usize,
        destination_vector_index: usize,
    ) -> Result<(), Error> {
        if source_vector_index == destination_vector_index {
            return Ok(());
        }
        self.initialize_vector(destination_vector_index)?;
        for i in 0..self.order() {
            let value = self.get_vector_value(i, source_vector_index)?;
            self.set_vector_value(i, value, destination_vector_index)?;
        }
        Ok(())
    }

    fn copy_solution_to_vector(
        &mut self,
        solution_index: usize,
        vector_index: usize,
    ) -> Result<(), Error> {
        self.initialize_vector(vector_index)?;
        for i in 0..self.order() {
            let value = self.get_solution_value(i, solution_index)?;
            self.set_vector_value(i, value, vector_index)?;
        }
        Ok(())
    }

    fn copy_vector_to_solution(
        &mut self,
        vector_index: usize,
        solution_index: usize,
    ) -> Result<(), Error> {
        self.initialize_solution(solution_index)?;
        for i in 0..self.order() {
            let value = self.get_vector_value(i, vector_index)?;
            self.set_solution_value(i, value, solution_index)?;
        }
        Ok(())
    }

    /// Solves `matrix * solution = vector` with a dense LU factorization and writes the result to
    /// the reinitialized `solution_index`. A singular matrix is reported as a `Solution` error.
    fn solve(
        &mut self,
        matrix_index: usize,
        vector_index: usize,
        solution_index: usize,
    ) -> Result<(), Error> {
        let order = self.order();

        let mut mat_a = DMatrix::<T>::zeros(order, order);
        for i in 0..order {
            for j in self.columns_of_nonzero_elements_in_row(i, matrix_index)? {
                check_index(j, order, "matrix column", "LinearSystem::solve")?;
                mat_a[(i, j)] = self.get_matrix_value(i, j, matrix_index)?;
            }
        }
        let mut x = DVector::<T>::zeros(order);
        for i in 0..order {
            x[i] = self.get_vector_value(i, vector_index)?;
        }

        let mut lu = LuSolver::new(order);
        lu.factor(&mut mat_a)?;
        lu.solve(&mat_a, &mut x);

        self.initialize_solution(solution_index)?;
        for (i, &value) in x.iter().enumerate() {
            self.set_solution_value(i, value, solution_index)?;
        }
        Ok(())
    }
}
