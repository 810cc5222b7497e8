//! Bandwidth-reducing row reordering for [`linear::LinearSystem`] backends.
//!
//! The [`Reordering`] extension trait is implemented for every linear system, so any backend
//! gains `cuthill_mckee_ordering`, `reverse_cuthill_mckee_ordering`, `bandwidth` and
//! `permute_matrix` as methods.

use nalgebra::RealField;

use linear::{ColumnArray, Error, LinearSystem};

mod cuthill_mckee;
mod permutation;

pub use cuthill_mckee::{cuthill_mckee_ordering, reverse_cuthill_mckee_ordering, row_degrees};
pub use permutation::{bandwidth, invert_permutation, permute_matrix};

#[cfg(test)]
mod tests;

pub trait Reordering<T>: LinearSystem<T>
where
    T: RealField + Copy,
{
    /// See [`cuthill_mckee_ordering`]. Returns `new_numbering[new] = old`.
    fn cuthill_mckee_ordering(
        &self,
        starting_row: Option<usize>,
        matrix_index: usize,
    ) -> Result<ColumnArray, Error> {
        cuthill_mckee_ordering::<T, Self>(self, starting_row, matrix_index)
    }

    fn reverse_cuthill_mckee_ordering(&self, matrix_index: usize) -> Result<ColumnArray, Error> {
        reverse_cuthill_mckee_ordering::<T, Self>(self, matrix_index)
    }

    fn row_degrees(&self, matrix_index: usize) -> Result<Vec<usize>, Error> {
        row_degrees::<T, Self>(self, matrix_index)
    }

    fn bandwidth(&self, matrix_index: usize) -> Result<usize, Error> {
        bandwidth::<T, Self>(self, matrix_index)
    }

    fn permute_matrix(
        &mut self,
        new_numbering: &[usize],
        source_matrix_index: usize,
        destination_matrix_index: usize,
    ) -> Result<(), Error> {
        permute_matrix::<T, Self>(
            self,
            new_numbering,
            source_matrix_index,
            destination_matrix_index,
        )
    }
}

impl<T, S> Reordering<T> for S
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
}
