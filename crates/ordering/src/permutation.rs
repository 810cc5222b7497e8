use nalgebra::RealField;

use linear::{check_index, ColumnArray, Error, LinearSystem};

/// Inverts a permutation of `0..N`, e.g. `new_numbering[new] = old` into
/// `reverse_mapping[old] = new`. Fails if `permutation` is not a bijection.
pub fn invert_permutation(permutation: &[usize]) -> Result<ColumnArray, Error> {
    const LOCATION: &str = "invert_permutation";
    let n = permutation.len();
    let mut inverse = vec![n; n];
    for (position, &value) in permutation.iter().enumerate() {
        if value >= n {
            return Err(Error::bounds(LOCATION, "permutation entry", value));
        }
        if inverse[value] != n {
            return Err(Error::linear_system(
                LOCATION,
                format!("{value} appears more than once, not a permutation"),
            ));
        }
        inverse[value] = position;
    }
    Ok(inverse)
}

/// Largest `|i - j|` over the entries the matrix enumerates as nonzero.
pub fn bandwidth<T, S>(system: &S, matrix_index: usize) -> Result<usize, Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    let mut width = 0;
    for i in 0..system.order() {
        for j in system.columns_of_nonzero_elements_in_row(i, matrix_index)? {
            width = width.max(i.abs_diff(j));
        }
    }
    Ok(width)
}

/// Renumbers rows and columns of `source` into `destination`:
/// `destination[p][q] = source[new_numbering[p]][new_numbering[q]]`.
///
/// Only enumerated nonzero entries of `source` are copied. `destination` is reinitialized and
/// must differ from `source`.
pub fn permute_matrix<T, S>(
    system: &mut S,
    new_numbering: &[usize],
    source_matrix_index: usize,
    destination_matrix_index: usize,
) -> Result<(), Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    const LOCATION: &str = "permute_matrix";
    if new_numbering.len() != system.order() {
        return Err(Error::linear_system(
            LOCATION,
            format!(
                "numbering has {} entries, system order is {}",
                new_numbering.len(),
                system.order()
            ),
        ));
    }
    if source_matrix_index == destination_matrix_index {
        return Err(Error::linear_system(
            LOCATION,
            format!("destination matrix {destination_matrix_index} aliases the source"),
        ));
    }
    let reverse_mapping = invert_permutation(new_numbering)?;

    system.initialize_matrix(destination_matrix_index)?;
    for (p, &old_row) in new_numbering.iter().enumerate() {
        for old_column in system.columns_of_nonzero_elements_in_row(old_row, source_matrix_index)? {
            check_index(old_column, new_numbering.len(), "matrix column", LOCATION)?;
            let value = system.get_matrix_value(old_row, old_column, source_matrix_index)?;
            system.set_matrix_value(
                p,
                reverse_mapping[old_column],
                value,
                destination_matrix_index,
            )?;
        }
    }
    Ok(())
}
