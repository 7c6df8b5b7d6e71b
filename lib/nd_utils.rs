//! Linear-algebra glue between sparse (`sprs`) and dense (`ndarray`)
//! representations of operators.
//!
//! All sparse matrices produced here are in CSR storage.

use ndarray as nd;
use ndarray_linalg::{ Eigh, UPLO };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use sprs::{ CsMat, TriMat };
use crate::error::Cos2PhiResult;

/// Complex sparse matrix used for every native-basis operator.
pub type SpMat = CsMat<C64>;

/// Sparse identity of dimension `dim`.
pub fn sp_eye(dim: usize) -> SpMat { CsMat::eye(dim) }

/// Build a square sparse matrix with a single diagonal filled from `diag`.
///
/// Positive `offset` selects a super-diagonal, negative a sub-diagonal. Values
/// are placed along the diagonal starting from its top-left end; surplus
/// values are ignored and exact zeros are not stored.
pub fn sp_diag<I>(diag: I, offset: isize, dim: usize) -> SpMat
where I: IntoIterator<Item = C64>
{
    let shift = offset.unsigned_abs();
    let (r0, c0) = if offset >= 0 { (0, shift) } else { (shift, 0) };
    let mut tri: TriMat<C64> = TriMat::new((dim, dim));
    diag.into_iter()
        .zip((r0..dim).zip(c0..dim))
        .filter(|(x, _)| !x.is_zero())
        .for_each(|(x, (r, c))| { tri.add_triplet(r, c, x); });
    tri.to_csr()
}

/// Convert a dense complex matrix to sparse form, dropping exact zeros.
pub fn sp_from_dense(a: &nd::Array2<C64>) -> SpMat {
    let mut tri: TriMat<C64> = TriMat::new(a.dim());
    a.indexed_iter()
        .filter(|(_, x)| !x.is_zero())
        .for_each(|((r, c), x)| { tri.add_triplet(r, c, *x); });
    tri.to_csr()
}

/// Convert a dense real matrix to complex sparse form, dropping exact zeros.
pub fn sp_from_real(a: &nd::Array2<f64>) -> SpMat {
    sp_from_dense(&a.mapv(C64::from))
}

/// Kronecker product `a ⊗ b`.
pub fn sp_kron(a: &SpMat, b: &SpMat) -> SpMat {
    let (rb, cb) = (b.rows(), b.cols());
    let mut tri: TriMat<C64>
        = TriMat::with_capacity(
            (a.rows() * rb, a.cols() * cb),
            a.nnz() * b.nnz(),
        );
    for (&x, (i, j)) in a.iter() {
        for (&y, (k, l)) in b.iter() {
            tri.add_triplet(i * rb + k, j * cb + l, x * y);
        }
    }
    tri.to_csr()
}

/// Multiply every stored entry by `s`.
pub fn sp_scale(a: &SpMat, s: C64) -> SpMat { a.map(|x| *x * s) }

/// Conjugate transpose.
pub fn sp_adjoint(a: &SpMat) -> SpMat {
    let mut tri: TriMat<C64>
        = TriMat::with_capacity((a.cols(), a.rows()), a.nnz());
    for (&x, (i, j)) in a.iter() {
        tri.add_triplet(j, i, x.conj());
    }
    tri.to_csr()
}

/// Sparse-times-dense product `a · v`.
pub fn sp_apply<S>(a: &SpMat, v: &nd::ArrayBase<S, nd::Ix2>)
    -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    let mut out: nd::Array2<C64> = nd::Array2::zeros((a.rows(), v.ncols()));
    for (&x, (i, j)) in a.iter() {
        out.row_mut(i).scaled_add(x, &v.row(j));
    }
    out
}

/// Project a sparse operator onto the span of the columns of `evecs`,
/// returning the dense matrix `evecs† · a · evecs`.
pub fn project<S>(a: &SpMat, evecs: &nd::ArrayBase<S, nd::Ix2>)
    -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    let av = sp_apply(a, evecs);
    evecs.t().mapv(|x| x.conj()).dot(&av)
}

/// Matrix element `⟨u|a|v⟩`.
pub fn matrix_element<S1, S2>(
    a: &SpMat,
    u: &nd::ArrayBase<S1, nd::Ix1>,
    v: &nd::ArrayBase<S2, nd::Ix1>,
) -> C64
where
    S1: nd::Data<Elem = C64>,
    S2: nd::Data<Elem = C64>,
{
    a.iter()
        .map(|(&x, (i, j))| u[i].conj() * x * v[j])
        .sum()
}

/// Largest absolute entry-wise deviation of `a` from its conjugate transpose.
pub fn hermitian_defect(a: &nd::Array2<C64>) -> f64 {
    a.iter().zip(a.t().iter())
        .map(|(aij, aji)| (*aij - aji.conj()).norm())
        .fold(0.0, f64::max)
}

/// Largest absolute entry-wise difference between two dense matrices, or
/// `None` if their shapes differ.
pub fn max_abs_diff(a: &nd::Array2<C64>, b: &nd::Array2<C64>) -> Option<f64> {
    (a.dim() == b.dim()).then(|| {
        a.iter().zip(b.iter())
            .map(|(x, y)| (*x - *y).norm())
            .fold(0.0, f64::max)
    })
}

/// Evaluate `f(a)` for a real symmetric matrix `a` through its spectral
/// decomposition, `V · f(Λ) · Vᵀ`.
pub fn symmetric_fn<F>(a: &nd::Array2<f64>, f: F)
    -> Cos2PhiResult<nd::Array2<f64>>
where F: Fn(f64) -> f64
{
    let (w, V): (nd::Array1<f64>, nd::Array2<f64>) = a.eigh(UPLO::Lower)?;
    let fw: nd::Array2<f64> = nd::Array2::from_diag(&w.mapv(f));
    Ok(V.dot(&fw).dot(&V.t()))
}

/// Matrix exponential `exp(i a)` for a real symmetric matrix `a`.
pub fn expi_symmetric(a: &nd::Array2<f64>)
    -> Cos2PhiResult<nd::Array2<C64>>
{
    let (w, V): (nd::Array1<f64>, nd::Array2<f64>) = a.eigh(UPLO::Lower)?;
    let V: nd::Array2<C64> = V.mapv(C64::from);
    let ew: nd::Array2<C64>
        = nd::Array2::from_diag(&w.mapv(|wk| C64::from_polar(1.0, wk)));
    Ok(V.dot(&ew).dot(&V.t()))
}
