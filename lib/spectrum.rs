//! Eigensolver seam and the eigensystem value type.
//!
//! The qubit never talks to LAPACK directly: it hands its sparse Hamiltonian
//! to an [`Eigensolver`] and receives `k` eigenpairs nearest a target shift,
//! which are then put in ascending order with [`order_eigensystem`].

use std::time::Instant;
use log::debug;
use ndarray::{ self as nd, s };
use ndarray_linalg::{ EighInto, UPLO };
use num_complex::Complex64 as C64;
use crate::{
    error::{ Cos2PhiError, Cos2PhiResult },
    nd_utils::SpMat,
};

/// Eigenvalues with their eigenvectors stored column-wise.
#[derive(Clone, Debug, PartialEq)]
pub struct Eigensystem {
    pub evals: nd::Array1<f64>,
    pub evecs: nd::Array2<C64>,
}

impl Eigensystem {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize { self.evals.len() }

    pub fn is_empty(&self) -> bool { self.evals.is_empty() }

    /// Dimension of the space the eigenvectors live in.
    pub fn space_dim(&self) -> usize { self.evecs.nrows() }

    /// Return the eigenvalue of state `which`.
    pub fn energy(&self, which: usize) -> Cos2PhiResult<f64> {
        self.evals.get(which).copied()
            .ok_or(Cos2PhiError::EigenIndex { index: which, count: self.len() })
    }

    /// Return a view of the eigenvector of state `which`.
    pub fn state(&self, which: usize) -> Cos2PhiResult<nd::ArrayView1<C64>> {
        if which >= self.len() {
            return Err(
                Cos2PhiError::EigenIndex { index: which, count: self.len() });
        }
        Ok(self.evecs.slice(s![.., which]))
    }

    /// Keep only the first `count` eigenpairs.
    pub fn truncated(&self, count: usize) -> Self {
        let count = count.min(self.len());
        Self {
            evals: self.evals.slice(s![..count]).to_owned(),
            evecs: self.evecs.slice(s![.., ..count]).to_owned(),
        }
    }

    /// Keep the `count` eigenpairs nearest `shift`, preserving their order.
    pub fn nearest(&self, count: usize, shift: f64) -> Self {
        let mut keep = nearest_indices(&self.evals, count, shift);
        keep.sort_unstable();
        Self {
            evals: keep.iter().map(|&k| self.evals[k]).collect(),
            evecs: self.evecs.select(nd::Axis(1), &keep),
        }
    }
}

/// Indices of the `count` values nearest `shift`, closest first.
///
/// Values at equal distance keep their relative order.
pub fn nearest_indices(evals: &nd::Array1<f64>, count: usize, shift: f64)
    -> Vec<usize>
{
    let mut order: Vec<usize> = (0..evals.len()).collect();
    order.sort_by(|&a, &b| {
        (evals[a] - shift).abs().total_cmp(&(evals[b] - shift).abs())
    });
    order.truncate(count);
    order
}

/// Sort eigenvalues into ascending order, permuting eigenvector columns to
/// match.
pub fn order_eigensystem(
    evals: nd::Array1<f64>,
    evecs: nd::Array2<C64>,
) -> Eigensystem
{
    let mut order: Vec<usize> = (0..evals.len()).collect();
    order.sort_by(|&a, &b| evals[a].total_cmp(&evals[b]));
    let evals: nd::Array1<f64> = order.iter().map(|&k| evals[k]).collect();
    let evecs: nd::Array2<C64> = evecs.select(nd::Axis(1), &order);
    Eigensystem { evals, evecs }
}

/// Fix the global phase of a state vector so that its largest-magnitude
/// component is real and positive.
///
/// Ties between components of equal magnitude (to within a relative 1e-10)
/// are broken in favor of the lowest index.
pub fn standardize_phase(v: &mut nd::ArrayViewMut1<C64>) {
    let max = v.iter().map(|x| x.norm()).fold(0.0, f64::max);
    if max == 0.0 { return; }
    let Some(pivot)
        = v.iter().find(|x| x.norm() >= max * (1.0 - 1e-10)).copied()
        else { return; };
    let phase = pivot.conj() / pivot.norm();
    v.mapv_inplace(|x| x * phase);
}

/// Anything that can produce the `k` eigenpairs of a Hermitian operator
/// nearest to a target value.
///
/// Implementations may return eigenpairs in any order; callers pass the
/// result through [`order_eigensystem`].
pub trait Eigensolver {
    /// Compute `k` eigenvalues nearest `shift`.
    fn eigenvalues(&self, matrix: &SpMat, k: usize, shift: f64)
        -> Cos2PhiResult<nd::Array1<f64>>
    {
        Ok(self.eigensystem(matrix, k, shift)?.evals)
    }

    /// Compute `k` eigenpairs nearest `shift`.
    fn eigensystem(&self, matrix: &SpMat, k: usize, shift: f64)
        -> Cos2PhiResult<Eigensystem>;
}

/// Exact eigensolver that densifies the operator and calls LAPACK's
/// Hermitian driver, then keeps the `k` eigenpairs closest to the shift.
#[derive(Copy, Clone, Debug, Default)]
pub struct DenseEigensolver;

impl DenseEigensolver {
    fn check_count(matrix: &SpMat, k: usize) -> Cos2PhiResult<()> {
        if k == 0 || k > matrix.rows() {
            return Err(
                Cos2PhiError::EigenCount { requested: k, dim: matrix.rows() });
        }
        Ok(())
    }
}

impl Eigensolver for DenseEigensolver {
    fn eigensystem(&self, matrix: &SpMat, k: usize, shift: f64)
        -> Cos2PhiResult<Eigensystem>
    {
        Self::check_count(matrix, k)?;
        let t0 = Instant::now();
        let (E, V): (nd::Array1<f64>, nd::Array2<C64>)
            = matrix.to_dense().eigh_into(UPLO::Lower)?;
        let keep = nearest_indices(&E, k, shift);
        let evals: nd::Array1<f64> = keep.iter().map(|&j| E[j]).collect();
        let mut evecs: nd::Array2<C64> = V.select(nd::Axis(1), &keep);
        evecs.axis_iter_mut(nd::Axis(1))
            .for_each(|mut v| standardize_phase(&mut v));
        debug!(
            "dense eigensolve: dim = {}, k = {}, shift = {}, {:.3?}",
            matrix.rows(), k, shift, t0.elapsed(),
        );
        Ok(Eigensystem { evals, evecs })
    }
}
