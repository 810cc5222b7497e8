//! Cuthill-McKee bandwidth-reducing row reordering.
//!
//! Rows are treated as vertices of the adjacency graph given by the matrix's nonzero
//! enumeration. Numbering starts at one row and spreads level by level; within a level each row's
//! unnumbered neighbours are taken in ascending degree order (stable, so equal degrees keep their
//! enumeration order) and duplicates across the level keep their first position.

use log::{debug, trace};
use nalgebra::RealField;

use linear::{check_index, ColumnArray, Error, LinearSystem};

use crate::invert_permutation;

const LOCATION: &str = "cuthill_mckee_ordering";

/// Degree of every row: the number of enumerated nonzero columns minus one for the diagonal.
///
/// A row whose enumeration is empty has degree zero.
pub fn row_degrees<T, S>(system: &S, matrix_index: usize) -> Result<Vec<usize>, Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    (0..system.order())
        .map(|row| {
            system
                .columns_of_nonzero_elements_in_row(row, matrix_index)
                .map(|columns| columns.len().saturating_sub(1))
        })
        .collect()
}

/// Computes a Cuthill-McKee numbering of the rows of a matrix slot.
///
/// Returns `new_numbering` with `new_numbering[new] = old`. With `starting_row == None` the
/// traversal starts at the lowest-degree row, ties going to the lowest index.
///
/// Rows unreachable from the start (a disconnected matrix) are numbered by restarting from the
/// lowest-degree unnumbered row, so the result is always a permutation of `0..N`.
pub fn cuthill_mckee_ordering<T, S>(
    system: &S,
    starting_row: Option<usize>,
    matrix_index: usize,
) -> Result<ColumnArray, Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    let order = system.order();
    let degrees = row_degrees::<T, S>(system, matrix_index)?;

    // old -> new; `None` marks rows not yet numbered
    let mut reverse_mapping: Vec<Option<usize>> = vec![None; order];
    let mut next_row_number = 0;

    let mut start = match starting_row {
        Some(row) => {
            check_index(row, order, "starting row", LOCATION)?;
            Some(row)
        }
        None => lowest_degree_row(&degrees, &reverse_mapping),
    };
    debug!("Cuthill-McKee on matrix {matrix_index} starting at row {start:?}");

    while let Some(row) = start {
        reverse_mapping[row] = Some(next_row_number);
        next_row_number += 1;

        follow_connections::<T, S>(
            system,
            row,
            &degrees,
            &mut reverse_mapping,
            &mut next_row_number,
            matrix_index,
        )?;

        start = lowest_degree_row(&degrees, &reverse_mapping);
        if let Some(row) = start {
            debug!("matrix {matrix_index} is disconnected, restarting at row {row}");
        }
    }

    // the restart loop only ends once every row has a number
    let reverse_mapping: ColumnArray = reverse_mapping.into_iter().flatten().collect();
    invert_permutation(&reverse_mapping)
}

/// Reverse Cuthill-McKee: the Cuthill-McKee numbering from an automatically chosen start, read
/// backwards.
pub fn reverse_cuthill_mckee_ordering<T, S>(
    system: &S,
    matrix_index: usize,
) -> Result<ColumnArray, Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    let mut new_numbering = cuthill_mckee_ordering::<T, S>(system, None, matrix_index)?;
    new_numbering.reverse();
    Ok(new_numbering)
}

fn lowest_degree_row(degrees: &[usize], reverse_mapping: &[Option<usize>]) -> Option<usize> {
    (0..degrees.len())
        .filter(|&row| reverse_mapping[row].is_none())
        .min_by_key(|&row| degrees[row])
}

/// Numbers everything reachable from the already numbered `start_row`, one level at a time.
fn follow_connections<T, S>(
    system: &S,
    start_row: usize,
    degrees: &[usize],
    reverse_mapping: &mut [Option<usize>],
    next_row_number: &mut usize,
    matrix_index: usize,
) -> Result<(), Error>
where
    T: RealField + Copy,
    S: LinearSystem<T> + ?Sized,
{
    let order = degrees.len();
    let mut queued = vec![false; order];
    let mut frontier = vec![start_row];
    let mut level = 0;

    while !frontier.is_empty() && *next_row_number < order {
        let mut next_rows = ColumnArray::new();

        for &row in &frontier {
            let mut connections = ColumnArray::new();
            for column in system.columns_of_nonzero_elements_in_row(row, matrix_index)? {
                check_index(column, order, "matrix column", LOCATION)?;
                if reverse_mapping[column].is_none() {
                    connections.push(column);
                }
            }
            connections.sort_by_key(|&column| degrees[column]);

            for column in connections {
                if !queued[column] {
                    queued[column] = true;
                    next_rows.push(column);
                }
            }
        }

        for &row in &next_rows {
            reverse_mapping[row] = Some(*next_row_number);
            *next_row_number += 1;
        }

        level += 1;
        trace!("level {level}: numbered rows {next_rows:?}");
        frontier = next_rows;
    }

    Ok(())
}
