//! The three-mode product space of the cos2φ circuit and the embedding of
//! single-mode operators into it.
//!
//! Subspaces are always ordered φ ⊗ ζ ⊗ θ: φ and ζ in truncated
//! harmonic-oscillator bases, θ in the charge basis `-ncut..=ncut`.

use itertools::iproduct;
use crate::{
    error::{ Cos2PhiError, Cos2PhiResult },
    nd_utils::{ SpMat, sp_eye, sp_kron },
};

/* Subspaces ******************************************************************/

/// Names one factor of the product space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subspace {
    /// Harmonic-oscillator mode φ.
    Phi,
    /// Harmonic-oscillator mode ζ.
    Zeta,
    /// Charge-basis mode θ.
    Theta,
}

/// A single product basis state `|i⟩_φ ⊗ |j⟩_ζ ⊗ |n⟩_θ`.
///
/// `theta` holds the charge label `n`, not the array index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProductState {
    pub phi: usize,
    pub zeta: usize,
    pub theta: i64,
}

/* Product space **************************************************************/

/// Dimensions of the three subspaces and the operations that depend only on
/// them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProductSpace {
    phi_cut: usize,
    zeta_cut: usize,
    ncut: usize,
}

impl ProductSpace {
    /// Create a new product space with `phi_cut` and `zeta_cut` oscillator
    /// levels and charges `-ncut..=ncut`.
    pub fn new(phi_cut: usize, zeta_cut: usize, ncut: usize) -> Self {
        Self { phi_cut, zeta_cut, ncut }
    }

    pub fn ncut(&self) -> usize { self.ncut }

    /// Dimension of a single subspace.
    pub fn dim(&self, sub: Subspace) -> usize {
        match sub {
            Subspace::Phi => self.phi_cut,
            Subspace::Zeta => self.zeta_cut,
            Subspace::Theta => 2 * self.ncut + 1,
        }
    }

    /// Dimensions of all subspaces in Kronecker order.
    pub fn dims(&self) -> [usize; 3] {
        [
            self.dim(Subspace::Phi),
            self.dim(Subspace::Zeta),
            self.dim(Subspace::Theta),
        ]
    }

    /// Total dimension of the product space.
    pub fn total_dim(&self) -> usize { self.dims().iter().product() }

    /// Sparse identity on a single subspace.
    pub fn identity(&self, sub: Subspace) -> SpMat { sp_eye(self.dim(sub)) }

    /// Sparse identity on the full space.
    pub fn total_identity(&self) -> SpMat { sp_eye(self.total_dim()) }

    /// Ordered Kronecker product `a ⊗ b ⊗ c`.
    pub fn kron3(a: &SpMat, b: &SpMat, c: &SpMat) -> SpMat {
        sp_kron(&sp_kron(a, b), c)
    }

    /// Kronecker product of one operator per subspace, checking that each
    /// matches its subspace dimension.
    pub fn embed(&self, op_phi: &SpMat, op_zeta: &SpMat, op_theta: &SpMat)
        -> Cos2PhiResult<SpMat>
    {
        self.check_dim(Subspace::Phi, op_phi)?;
        self.check_dim(Subspace::Zeta, op_zeta)?;
        self.check_dim(Subspace::Theta, op_theta)?;
        Ok(Self::kron3(op_phi, op_zeta, op_theta))
    }

    /// Embed an operator acting on a single subspace, padding the others with
    /// identities.
    pub fn embed_single(&self, sub: Subspace, op: &SpMat)
        -> Cos2PhiResult<SpMat>
    {
        match sub {
            Subspace::Phi => self.embed(
                op, &self.identity(Subspace::Zeta), &self.identity(Subspace::Theta)),
            Subspace::Zeta => self.embed(
                &self.identity(Subspace::Phi), op, &self.identity(Subspace::Theta)),
            Subspace::Theta => self.embed(
                &self.identity(Subspace::Phi), &self.identity(Subspace::Zeta), op),
        }
    }

    fn check_dim(&self, sub: Subspace, op: &SpMat) -> Cos2PhiResult<()> {
        let expected = self.dim(sub);
        if op.rows() != expected || op.cols() != expected {
            return Err(Cos2PhiError::OperatorDim {
                expected,
                found: op.rows().max(op.cols()),
            });
        }
        Ok(())
    }

    /// Flat index of the product state with array indices `(i, j, k)`.
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        let [_, nz, nt] = self.dims();
        (i * nz + j) * nt + k
    }

    /// Charge label carried by θ-index `k`.
    pub fn charge_label(&self, k: usize) -> i64 { k as i64 - self.ncut as i64 }

    /// Enumerate all product states in Kronecker order, so that the `m`-th
    /// element labels the `m`-th row of every native operator.
    pub fn states(&self) -> Vec<ProductState> {
        let [np, nz, nt] = self.dims();
        iproduct!(0..np, 0..nz, 0..nt)
            .map(|(phi, zeta, k)| {
                ProductState { phi, zeta, theta: self.charge_label(k) }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64 as C64;
    use crate::{ nd_utils::sp_diag, operators::number_sparse };

    #[test]
    fn dimensions() {
        let space = ProductSpace::new(7, 30, 7);
        assert_eq!(space.dims(), [7, 30, 15]);
        assert_eq!(space.total_dim(), 3150);
        assert_eq!(space.total_identity().nnz(), 3150);
    }

    #[test]
    fn state_ordering_matches_kron() {
        let space = ProductSpace::new(2, 3, 1);
        let states = space.states();
        assert_eq!(states.len(), space.total_dim());
        assert_eq!(states[0], ProductState { phi: 0, zeta: 0, theta: -1 });
        assert_eq!(states[space.flat_index(1, 2, 2)],
            ProductState { phi: 1, zeta: 2, theta: 1 });

        // the θ label operator embedded in the full space is diagonal in the
        // charge labels of `states`
        let n_theta = sp_diag((-1..=1).map(|n| C64::from(n as f64)), 0, 3);
        let full = space.embed_single(Subspace::Theta, &n_theta).unwrap()
            .to_dense();
        for (m, s) in states.iter().enumerate() {
            assert_eq!(full[[m, m]], C64::from(s.theta as f64));
        }

        let n_zeta = space.embed_single(Subspace::Zeta, &number_sparse(3, None))
            .unwrap()
            .to_dense();
        for (m, s) in states.iter().enumerate() {
            assert_eq!(n_zeta[[m, m]], C64::from(s.zeta as f64));
        }
    }

    #[test]
    fn embed_rejects_wrong_dimension() {
        let space = ProductSpace::new(2, 3, 1);
        let res = space.embed_single(Subspace::Phi, &sp_eye(3));
        assert!(matches!(
            res,
            Err(Cos2PhiError::OperatorDim { expected: 2, found: 3 })
        ));
    }
}
