//! Linear system solvers.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Solve a linear system Ax = b using LU decomposition with partial pivoting.
///
/// Rows are scaled to unit max-norm before factoring, so a pivot is judged
/// against the size of its own equation rather than the largest entry in the
/// matrix. Reports [`Error::SingularSystem`] when a row is empty, when a
/// scaled pivot is zero to working precision, or when the solution is not
/// finite.
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }

    let n = a.nrows();
    let mut scaled = a.clone();
    let mut rhs = b.clone();
    for i in 0..n {
        let scale = a.row(i).iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if scale == 0.0 {
            return Err(Error::SingularSystem(format!("row {i} has no coefficients")));
        }
        scaled.row_mut(i).scale_mut(1.0 / scale);
        rhs[i] /= scale;
    }

    let lu = scaled.lu();

    let tolerance = f64::EPSILON * n as f64;
    if let Some(i) = lu.u().diagonal().iter().position(|p| p.abs() <= tolerance) {
        return Err(Error::SingularSystem(format!("pivot {i} is zero to working precision")));
    }

    let x = lu
        .solve(&rhs)
        .ok_or_else(|| Error::SingularSystem("zero pivot in LU factorization".to_string()))?;

    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(Error::SingularSystem(format!("non-finite solution in slot {i}")));
    }
    Ok(x)
}
