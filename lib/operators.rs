//! Elementary operators on a single truncated Fock space, plus the 2×2 Pauli
//! set.
//!
//! Dense forms are returned as real or complex `ndarray` matrices; `*_sparse`
//! forms are complex CSR matrices (see [`SpMat`]).

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::Cos2PhiResult,
    nd_utils::{ SpMat, sp_diag, sp_adjoint, sp_scale, symmetric_fn },
};

/// Annihilation operator `a` in the number basis, with `sqrt(1), ...,
/// sqrt(dim - 1)` on the first super-diagonal.
pub fn annihilation(dim: usize) -> nd::Array2<f64> {
    let mut a: nd::Array2<f64> = nd::Array2::zeros((dim, dim));
    (1..dim).for_each(|k| { a[[k - 1, k]] = (k as f64).sqrt(); });
    a
}

/// Sparse form of [`annihilation`].
pub fn annihilation_sparse(dim: usize) -> SpMat {
    sp_diag((1..dim).map(|k| C64::from((k as f64).sqrt())), 1, dim)
}

/// Creation operator `a†`, the transpose of [`annihilation`].
pub fn creation(dim: usize) -> nd::Array2<f64> {
    annihilation(dim).reversed_axes()
}

/// Sparse form of [`creation`].
pub fn creation_sparse(dim: usize) -> SpMat {
    sp_adjoint(&annihilation_sparse(dim))
}

/// Number operator `a†a`, optionally scaled by `prefactor`.
pub fn number(dim: usize, prefactor: Option<f64>) -> nd::Array2<f64> {
    let p = prefactor.unwrap_or(1.0);
    nd::Array2::from_diag(
        &(0..dim).map(|k| p * k as f64).collect::<nd::Array1<f64>>()
    )
}

/// Sparse form of [`number`].
pub fn number_sparse(dim: usize, prefactor: Option<f64>) -> SpMat {
    let p = prefactor.unwrap_or(1.0);
    sp_diag((0..dim).map(|k| C64::from(p * k as f64)), 0, dim)
}

/// Projector-like Hubbard operator `|j1⟩⟨j2|`.
pub fn hubbard_sparse(j1: usize, j2: usize, dim: usize) -> SpMat {
    let mut tri: sprs::TriMat<C64> = sprs::TriMat::new((dim, dim));
    tri.add_triplet(j1, j2, C64::from(1.0));
    tri.to_csr()
}

/// `prefactor · (a + a†)`.
pub fn a_plus_adag(dim: usize, prefactor: Option<f64>) -> nd::Array2<f64> {
    let a = annihilation(dim);
    (&a + &a.t()) * prefactor.unwrap_or(1.0)
}

/// Sparse form of [`a_plus_adag`].
pub fn a_plus_adag_sparse(dim: usize, prefactor: Option<f64>) -> SpMat {
    let apad = &annihilation_sparse(dim) + &creation_sparse(dim);
    sp_scale(&apad, C64::from(prefactor.unwrap_or(1.0)))
}

/// `prefactor · (i a† - i a)`.
pub fn iadag_minus_ia(dim: usize, prefactor: Option<f64>) -> nd::Array2<C64> {
    let a = annihilation(dim);
    (&a.t() - &a).mapv(|x| C64::i() * x * prefactor.unwrap_or(1.0))
}

/// Sparse form of [`iadag_minus_ia`].
pub fn iadag_minus_ia_sparse(dim: usize, prefactor: Option<f64>) -> SpMat {
    let diff = &creation_sparse(dim) - &annihilation_sparse(dim);
    sp_scale(&diff, C64::i() * prefactor.unwrap_or(1.0))
}

/// `cos(prefactor · (a + a†))` as a matrix function.
pub fn cos_theta_harmonic(dim: usize, prefactor: Option<f64>)
    -> Cos2PhiResult<nd::Array2<f64>>
{
    symmetric_fn(&a_plus_adag(dim, prefactor), f64::cos)
}

/// `sin(prefactor · (a + a†))` as a matrix function.
pub fn sin_theta_harmonic(dim: usize, prefactor: Option<f64>)
    -> Cos2PhiResult<nd::Array2<f64>>
{
    symmetric_fn(&a_plus_adag(dim, prefactor), f64::sin)
}

pub fn sigma_plus() -> nd::Array2<C64> {
    nd::array![
        [C64::from(0.0), C64::from(1.0)],
        [C64::from(0.0), C64::from(0.0)],
    ]
}

pub fn sigma_minus() -> nd::Array2<C64> { sigma_plus().reversed_axes() }

pub fn sigma_x() -> nd::Array2<C64> {
    nd::array![
        [C64::from(0.0), C64::from(1.0)],
        [C64::from(1.0), C64::from(0.0)],
    ]
}

pub fn sigma_y() -> nd::Array2<C64> {
    nd::array![
        [C64::from(0.0), -C64::i()],
        [C64::i(), C64::from(0.0)],
    ]
}

pub fn sigma_z() -> nd::Array2<C64> {
    nd::array![
        [C64::from(1.0), C64::from(0.0)],
        [C64::from(0.0), C64::from(-1.0)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nd_utils::max_abs_diff;

    #[test]
    fn ladder_entries() {
        let a = annihilation(4);
        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[2, 3]], 3.0_f64.sqrt());
        assert_eq!(a.iter().filter(|x| **x != 0.0).count(), 3);
        assert_eq!(creation(4), a.t());

        let a_sp = annihilation_sparse(4).to_dense();
        assert!(max_abs_diff(&a_sp, &a.mapv(C64::from)).unwrap() < 1e-15);
        let adag_sp = creation_sparse(4).to_dense();
        assert!(max_abs_diff(&adag_sp, &creation(4).mapv(C64::from)).unwrap() < 1e-15);
    }

    #[test]
    fn number_is_adag_a() {
        let n = creation(5).dot(&annihilation(5));
        assert!((&n - &number(5, None)).iter().all(|x| x.abs() < 1e-14));
        let n3 = number_sparse(5, Some(3.0)).to_dense();
        assert_eq!(n3[[4, 4]], C64::from(12.0));
        assert_eq!(n3[[0, 0]], C64::from(0.0));
    }

    #[test]
    fn quadratures() {
        let x = a_plus_adag_sparse(6, Some(0.5)).to_dense();
        assert!(max_abs_diff(&x, &a_plus_adag(6, Some(0.5)).mapv(C64::from)).unwrap() < 1e-15);
        let p = iadag_minus_ia_sparse(6, None).to_dense();
        assert!(max_abs_diff(&p, &iadag_minus_ia(6, None)).unwrap() < 1e-15);
        assert_eq!(hubbard_sparse(1, 2, 3).to_dense()[[1, 2]], C64::from(1.0));
    }

    #[test]
    fn pauli_algebra() {
        let (x, y, z) = (sigma_x(), sigma_y(), sigma_z());
        // σx σy = i σz
        let xy = x.dot(&y);
        assert!(max_abs_diff(&xy, &z.mapv(|v| C64::i() * v)).unwrap() < 1e-15);
        let sx = &sigma_plus() + &sigma_minus();
        assert!(max_abs_diff(&sx, &x).unwrap() < 1e-15);
    }

    #[test]
    fn harmonic_trig_identity() {
        let c = cos_theta_harmonic(5, Some(0.4)).unwrap();
        let s = sin_theta_harmonic(5, Some(0.4)).unwrap();
        let id = c.dot(&c) + s.dot(&s);
        for ((i, j), v) in id.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((v - expected).abs() < 1e-12);
        }
    }
}
