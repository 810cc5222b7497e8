use linear::{ColumnArray, Error, LinearSystem, SparseSystem, SystemConfig};


/// Builds a sparse system whose matrix slot 0 has a nonzero diagonal plus the symmetric
/// off-diagonal entries given by `edges`. Two matrix slots are available.
pub fn adjacency(order: usize, edges: &[(usize, usize)]) -> SparseSystem<f64> {
    let mut ls = SparseSystem::with_config(SystemConfig::new(order).with_matrices(2)).unwrap();
    ls.initialize_matrix(0).unwrap();
    for i in 0..order {
        ls.set_matrix_value(i, i, 4.0, 0).unwrap();
    }
    for &(i, j) in edges {
        ls.set_matrix_value(i, j, -1.0, 0).unwrap();
        ls.set_matrix_value(j, i, -1.0, 0).unwrap();
    }
    ls
}

pub fn chain(order: usize) -> SparseSystem<f64> {
    let edges: Vec<_> = (1..order).map(|i| (i - 1, i)).collect();
    adjacency(order, &edges)
}

/// Checks that every index `0..N` appears exactly once.
pub fn assert_bijection(numbering: &[usize], order: usize) {
    assert_eq!(numbering.len(), order);
    let mut seen = vec![false; order];
    for &row in numbering {
        assert!(row < order, "{row} out of range in {numbering:?}");
        assert!(!seen[row], "{row} repeated in {numbering:?}");
        seen[row] = true;
    }
}

/// Sparse system whose enumeration of `row` also reports a column past the matrix order, as a
/// misbehaving backend would.
pub struct StrayColumn {
    pub inner: SparseSystem<f64>,
    pub row: usize,
}

impl LinearSystem<f64> for StrayColumn {
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
        self.inner.set_matrix_value(i, j, value, matrix_index)
    }

    fn get_vector_value(&self, i: usize, vector_index: usize) -> Result<f64, Error> {
        self.inner.get_vector_value(i, vector_index)
    }

    fn set_vector_value(&mut self, i: usize, value: f64, vector_index: usize) -> Result<(), Error> {
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
        let mut columns = self
            .inner
            .columns_of_nonzero_elements_in_row(row, matrix_index)?;
        if row == self.row {
            columns.push(self.order());
        }
        Ok(columns)
    }
}
