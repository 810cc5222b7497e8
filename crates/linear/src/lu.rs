//! Dense LU factorization with partial pivoting, used by the default `solve`.
//!
//! The factors overwrite the matrix they were computed from, and the row interchanges are kept
//! in a pivot array, so a factored matrix can be reused for any number of right-hand sides.
use nalgebra::{DMatrix, DVector, Dim, Matrix, RealField, Storage, StorageMut, U1};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Holds the pivot array of the last factorization. The factors themselves live in the matrix
/// passed to [`LuSolver::factor`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct LuSolver {
    pivots: DVector<usize>,
}

impl LuSolver {
    pub fn new(order: usize) -> Self {
        LuSolver {
            pivots: DVector::zeros(order),
        }
    }

    /// Factors the N by N matrix `mat_a` in place, leaving U in its upper triangle and the
    /// multipliers of L below the diagonal.
    ///
    /// A matrix whose shape does not match the solver order is a `LinearSystem` error; a zero
    /// pivot is a `Solution` error naming the zero-based column where elimination stopped. On
    /// failure `mat_a` is partially eliminated and must not be handed to [`LuSolver::solve`].
    pub fn factor<T>(&mut self, mat_a: &mut DMatrix<T>) -> Result<(), Error>
    where
        T: RealField + Copy,
    {
        if !mat_a.is_square() || mat_a.nrows() != self.pivots.len() {
            return Err(Error::linear_system(
                "LuSolver::factor",
                format!(
                    "expected a {0}x{0} matrix, got {1}x{2}",
                    self.pivots.len(),
                    mat_a.nrows(),
                    mat_a.ncols()
                ),
            ));
        }
        get_rf(mat_a, &mut self.pivots).map_err(|col| {
            Error::solution(
                "LuSolver::factor",
                format!("singular matrix (zero pivot in column {col})"),
            )
        })
    }

    /// Solves `A x = b` with the factors left in `mat_a` by a successful [`LuSolver::factor`].
    /// The solution overwrites `b`.
    pub fn solve<T>(&self, mat_a: &DMatrix<T>, b: &mut DVector<T>)
    where
        T: RealField + Copy,
    {
        get_rs(mat_a, &self.pivots, b);
    }
}

/// LU factorization of the M by N matrix A by Gaussian elimination with partial (row) pivoting.
/// Meaningful only for M >= N and full column rank.
///
/// After a successful factorization:
///
/// 1. `pivot[k]` is the row whose entry was chosen as pivot at the start of elimination step k,
///     k = 0, 1, ..., N-1. Rows are swapped as they are chosen, so applying the swaps
///     `k <-> pivot[k]` in increasing k reproduces P.
///
/// 2. Writing the factorization as PA = LU, with P a permutation matrix, L lower trapezoidal with
///     a unit diagonal and U upper triangular, the upper triangle of A (diagonal included) holds
///     U and the strict lower part holds the multipliers of L. The unit diagonal of L is not
///     stored.
///
/// When M = N, L is unit lower triangular.
///
/// On a zero pivot the elimination stops and the zero-based column index of that pivot is
/// returned as the error; A and `pivot` are then only partially updated.
fn get_rf<T, R, C, SA, SB>(
    mat_a: &mut Matrix<T, R, C, SA>,
    pivot: &mut Matrix<usize, C, U1, SB>,
) -> Result<(), usize>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    SA: StorageMut<T, R, C>,
    SB: StorageMut<usize, C>,
{
    let m = mat_a.nrows();
    let n = mat_a.ncols();

    for k in 0..n {
        // find l = pivot row number
        let mut l = k;
        for i in (k + 1)..m {
            if mat_a[(i, k)].abs() > mat_a[(l, k)].abs() {
                l = i;
            }
        }
        pivot[k] = l;

        if mat_a[(l, k)] == T::zero() {
            return Err(k);
        }

        if l != k {
            mat_a.swap_rows(k, l);
        }

        // store the multipliers a(i,k)/a(k,k) below the diagonal
        let mult = mat_a[(k, k)].recip();
        for i in (k + 1)..m {
            mat_a[(i, k)] *= mult;
        }

        // row_i -= a(i,k)/a(k,k) * row_k, one column at a time
        for j in (k + 1)..n {
            let a_kj = mat_a[(k, j)];
            if a_kj != T::zero() {
                for i in (k + 1)..m {
                    let a_ik = mat_a[(i, k)];
                    mat_a[(i, j)] -= a_kj * a_ik;
                }
            }
        }
    }

    Ok(())
}

/// Solves the N-dimensional system A x = b given the factors and pivot array produced by
/// [`get_rf`]. `b` is permuted by the recorded row swaps, then overwritten by forward
/// substitution with L (Ly = Pb) and back substitution with U (Ux = y), so it holds x on return.
///
/// Cannot fail if the matching `get_rf` call succeeded. Does NOT check for a square matrix, and
/// N must be at least one.
fn get_rs<T, R, C, SA, SB, SC>(
    mat_a: &Matrix<T, R, C, SA>,
    pivot: &Matrix<usize, C, U1, SB>,
    b: &mut Matrix<T, C, U1, SC>,
) where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    SA: Storage<T, R, C>,
    SB: Storage<usize, C>,
    SC: StorageMut<T, C>,
{
    let n = mat_a.ncols();

    // permute b, based on pivot information
    for (k, &pk) in pivot.iter().enumerate().take(n) {
        if pk != k {
            b.swap((k, 0), (pk, 0));
        }
    }

    // solve Ly = b, store y in b
    for k in 0..(n - 1) {
        let bk = b[k];
        for i in (k + 1)..n {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }

    // solve Ux = y, store x in b
    for k in (1..n).rev() {
        b[k] /= mat_a[(k, k)];
        let bk = b[k];
        for i in 0..k {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }
    b[0] /= mat_a[(0, 0)];
}
