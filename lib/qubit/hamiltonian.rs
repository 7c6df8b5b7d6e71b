//! Assembly of the native Hamiltonian and its exact parameter derivatives.
//!
//! ```text
//! H = ω_φ n̂_φ + ω_ζ n̂_ζ
//!     + 2 ECJ' (n_θ - n_g - n_ζ)²
//!     - 2 EJ cos(φ + π Φ) cos θ + 2 EJ
//!     - 2 EL' dL φ ζ
//!     + 2 EJ dEJ sin(φ + π Φ) sin θ
//!     - 4 ECJ' dCJ n_φ (n_θ - n_g - n_ζ)
//! ```
//! where `n̂` are oscillator number operators and `Φ` is the external flux in
//! units of the flux quantum.

use std::{ f64::consts::PI, time::Instant };
use log::{ debug, trace };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::Cos2PhiResult,
    hilbert::{ ProductSpace, Subspace },
    nd_utils::{ SpMat, sp_eye, sp_from_dense, sp_kron, sp_scale },
    operators::number_sparse,
    spectrum::Eigensolver,
};
use super::{ Cos2PhiQubit, EnergyEsys, Operator };

fn re(x: f64) -> C64 { C64::from(x) }

impl<S> Cos2PhiQubit<S>
where S: Eigensolver
{
    /// `n_θ - n_g - n_ζ` on the ζ ⊗ θ subspace.
    fn offset_charge_zt(&self) -> SpMat {
        let space = self.space();
        let Iz = space.identity(Subspace::Zeta);
        let It = space.identity(Subspace::Theta);
        let dim = self.dim_zeta() * self.dim_theta();
        let n_theta = sp_kron(&Iz, &self.n_theta_bare());
        let n_zeta = sp_kron(&self.n_zeta_bare(), &It);
        let ng = sp_scale(&sp_eye(dim), re(self.ng()));
        &(&n_theta - &ng) - &n_zeta
    }

    /// `cos(φ + πΦ)` on the φ subspace.
    fn shifted_cos_phi(&self) -> Cos2PhiResult<SpMat> {
        let (s, c) = (PI * self.flux()).sin_cos();
        let cos = sp_scale(&self.cos_phi()?, re(c));
        let sin = sp_scale(&self.sin_phi()?, re(s));
        Ok(&cos - &sin)
    }

    /// `sin(φ + πΦ)` on the φ subspace.
    fn shifted_sin_phi(&self) -> Cos2PhiResult<SpMat> {
        let (s, c) = (PI * self.flux()).sin_cos();
        let sin = sp_scale(&self.sin_phi()?, re(c));
        let cos = sp_scale(&self.cos_phi()?, re(s));
        Ok(&sin + &cos)
    }

    /// Native Hamiltonian as a sparse matrix.
    pub fn hamiltonian_native(&self) -> Cos2PhiResult<SpMat> {
        let t0 = Instant::now();
        let space = self.space();
        let Ip = space.identity(Subspace::Phi);
        let Iz = space.identity(Subspace::Zeta);
        let It = space.identity(Subspace::Theta);
        let EJ = self.EJ();
        let ECJ = self.disordered_ecj();
        let EL = self.disordered_el();

        let phi_osc_mat = ProductSpace::kron3(
            &number_sparse(self.dim_phi(), Some(self.phi_plasma())), &Iz, &It);
        let zeta_osc_mat = ProductSpace::kron3(
            &Ip, &number_sparse(self.dim_zeta(), Some(self.zeta_plasma())), &It);

        // square on the smaller ζ ⊗ θ block before padding with the φ identity
        let Q: nd::Array2<C64> = self.offset_charge_zt().to_dense();
        let Q2 = sp_from_dense(&Q.dot(&Q));
        let cross_kinetic_mat = sp_scale(&sp_kron(&Ip, &Q2), re(2.0 * ECJ));
        trace!("cross-kinetic term: nnz = {}", cross_kinetic_mat.nnz());

        let junction_mat
            = &sp_scale(
                &ProductSpace::kron3(&self.shifted_cos_phi()?, &Iz, &self.cos_theta()),
                re(-2.0 * EJ),
            )
            + &sp_scale(&self.total_identity(), re(2.0 * EJ));

        let disorder_l = sp_scale(
            &ProductSpace::kron3(&self.phi_bare(), &self.zeta_bare(), &It),
            re(-2.0 * EL * self.dL()),
        );

        let disorder_j = sp_scale(
            &ProductSpace::kron3(&self.shifted_sin_phi()?, &Iz, &self.sin_theta()),
            re(2.0 * EJ * self.dEJ()),
        );

        let disorder_c = sp_scale(
            &sp_kron(&self.n_phi_bare(), &self.offset_charge_zt()),
            re(-4.0 * ECJ * self.dCJ()),
        );

        let H = &(&(&(&(&(&phi_osc_mat + &zeta_osc_mat)
            + &cross_kinetic_mat)
            + &junction_mat)
            + &disorder_l)
            + &disorder_j)
            + &disorder_c;
        debug!(
            "assembled hamiltonian: dim = {}, nnz = {}, {:.3?}",
            H.rows(), H.nnz(), t0.elapsed(),
        );
        Ok(H)
    }

    /// Hamiltonian in the basis selected by `energy_esys`.
    ///
    /// [`EnergyEsys::Computed`] returns the diagonal matrix of the lowest
    /// `truncated_dim` eigenvalues.
    pub fn hamiltonian(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        match energy_esys {
            EnergyEsys::Computed => {
                let evals = self.eigenvals(self.truncated_dim())?;
                Ok(Operator::Dense(nd::Array2::from_diag(&evals.mapv(re))))
            },
            other => self.process_op(self.hamiltonian_native()?, other),
        }
    }

    /// ∂H/∂Φ in the native basis.
    pub fn d_hamiltonian_d_flux_native(&self) -> Cos2PhiResult<SpMat> {
        let space = self.space();
        let Iz = space.identity(Subspace::Zeta);
        let EJ = self.EJ();
        let junction = sp_scale(
            &ProductSpace::kron3(&self.shifted_sin_phi()?, &Iz, &self.cos_theta()),
            re(2.0 * EJ * PI),
        );
        let dis_junction = sp_scale(
            &ProductSpace::kron3(&self.shifted_cos_phi()?, &Iz, &self.sin_theta()),
            re(2.0 * self.dEJ() * EJ * PI),
        );
        Ok(&junction + &dis_junction)
    }

    /// ∂H/∂EJ in the native basis, including the constant `2 I` offset.
    pub fn d_hamiltonian_d_EJ_native(&self) -> Cos2PhiResult<SpMat> {
        let space = self.space();
        let Iz = space.identity(Subspace::Zeta);
        let junction
            = &sp_scale(
                &ProductSpace::kron3(&self.shifted_cos_phi()?, &Iz, &self.cos_theta()),
                re(-2.0),
            )
            + &sp_scale(&self.total_identity(), re(2.0));
        let dis_junction = sp_scale(
            &ProductSpace::kron3(&self.shifted_sin_phi()?, &Iz, &self.sin_theta()),
            re(2.0 * self.dEJ()),
        );
        Ok(&junction + &dis_junction)
    }

    /// ∂H/∂n_g in the native basis.
    pub fn d_hamiltonian_d_ng_native(&self) -> Cos2PhiResult<SpMat> {
        let ECJ = self.disordered_ecj();
        let Ip = self.space().identity(Subspace::Phi);
        let kinetic = sp_scale(
            &sp_kron(&Ip, &self.offset_charge_zt()), re(-4.0 * ECJ));
        let disorder = sp_scale(&self.n_phi_native()?, re(4.0 * self.dCJ() * ECJ));
        Ok(&kinetic + &disorder)
    }

    pub fn d_hamiltonian_d_flux(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.d_hamiltonian_d_flux_native()?, energy_esys)
    }

    pub fn d_hamiltonian_d_EJ(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.d_hamiltonian_d_EJ_native()?, energy_esys)
    }

    pub fn d_hamiltonian_d_ng(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.d_hamiltonian_d_ng_native()?, energy_esys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        nd_utils::{ hermitian_defect, max_abs_diff },
        qubit::Cos2PhiParams,
    };

    fn disordered() -> Cos2PhiParams {
        Cos2PhiParams {
            dCJ: 0.1,
            dL: 0.3,
            dEJ: 0.05,
            flux: 0.37,
            ng: 0.2,
            ncut: 2,
            zeta_cut: 5,
            phi_cut: 4,
            truncated_dim: 4,
            ..Cos2PhiParams::default_params()
        }
    }

    #[test]
    fn hermitian_with_disorder() {
        let qubit = Cos2PhiQubit::new(disordered()).unwrap();
        let H = qubit.hamiltonian_native().unwrap();
        assert_eq!(H.shape(), (qubit.hilbertdim(), qubit.hilbertdim()));
        assert!(hermitian_defect(&H.to_dense()) < 1e-10);
        assert!(H.is_csr());
    }

    #[test]
    fn eigenbasis_hamiltonian_is_diagonal() {
        let qubit = Cos2PhiQubit::new(disordered()).unwrap();
        let Hd = qubit.hamiltonian(EnergyEsys::Computed).unwrap().into_dense();
        assert_eq!(Hd.dim(), (4, 4));
        let es = qubit.eigensys(4).unwrap();
        let Hp = qubit.hamiltonian(EnergyEsys::Given(&es)).unwrap().into_dense();
        assert!(max_abs_diff(&Hd, &Hp).unwrap() < 1e-9);
        for k in 1..4 {
            assert!(Hd[[k, k]].re >= Hd[[k - 1, k - 1]].re);
        }
    }

    #[test]
    fn flux_derivative_matches_finite_difference() {
        let h = 1e-5;
        let p = disordered();
        let mut lo = Cos2PhiQubit::new(p).unwrap();
        lo.set_flux(p.flux - h).unwrap();
        let mut hi = Cos2PhiQubit::new(p).unwrap();
        hi.set_flux(p.flux + h).unwrap();
        let fd = (hi.hamiltonian_native().unwrap().to_dense()
            - lo.hamiltonian_native().unwrap().to_dense())
            .mapv(|z| z / (2.0 * h));
        let exact = Cos2PhiQubit::new(p).unwrap()
            .d_hamiltonian_d_flux_native().unwrap()
            .to_dense();
        assert!(max_abs_diff(&fd, &exact).unwrap() < 1e-5);
    }
}
