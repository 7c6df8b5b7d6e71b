//! The cos2φ qubit: circuit parameters, the memoized eigensystem, and every
//! physical operator in the native φ ⊗ ζ ⊗ θ product basis or an energy
//! eigenbasis.

use std::{
    cell::RefCell,
    f64::consts::{ PI, SQRT_2 },
};
use indexmap::IndexMap;
use log::{ debug, trace };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rustc_hash::FxHashMap as HashMap;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ Cos2PhiError, Cos2PhiResult },
    hilbert::{ ProductSpace, Subspace },
    nd_utils::{
        SpMat,
        expi_symmetric,
        project,
        sp_diag,
        sp_from_dense,
        sp_from_real,
        sp_scale,
        symmetric_fn,
    },
    operators::{ a_plus_adag, a_plus_adag_sparse, iadag_minus_ia_sparse },
    spectrum::{
        DenseEigensolver,
        Eigensolver,
        Eigensystem,
        nearest_indices,
        order_eigensystem,
    },
    units::FrequencyUnit,
    wavefunction::{ self as wf, Grid1d, GridSpec, WaveFunctionOnGrid },
};

pub mod hamiltonian;

/* Parameters *****************************************************************/

/// Circuit parameters of a cos2φ qubit.
///
/// Energies are in the frequency unit carried by the qubit (GHz unless
/// configured otherwise). `dCJ`, `dL`, and `dEJ` are fractional disorders
/// between the two nominally identical junctions or inductors.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cos2PhiParams {
    pub EJ: f64,
    pub ECJ: f64,
    pub EL: f64,
    pub EC: f64,
    pub dCJ: f64,
    pub dL: f64,
    pub dEJ: f64,
    pub flux: f64,
    pub ng: f64,
    pub ncut: usize,
    pub zeta_cut: usize,
    pub phi_cut: usize,
    pub truncated_dim: usize,
}

impl Default for Cos2PhiParams {
    fn default() -> Self { Self::default_params() }
}

impl Cos2PhiParams {
    pub fn default_params() -> Self {
        Self {
            EJ: 15.0,
            ECJ: 2.0,
            EL: 1.0,
            EC: 0.04,
            dCJ: 0.0,
            dL: 0.6,
            dEJ: 0.0,
            flux: 0.5,
            ng: 0.0,
            ncut: 7,
            zeta_cut: 30,
            phi_cut: 7,
            truncated_dim: 6,
        }
    }

    /// Check that every parameter lies in the range where the Hamiltonian is
    /// finite and the product space is non-trivial.
    pub fn validate(&self) -> Cos2PhiResult<()> {
        fn invalid(name: &'static str, value: f64, reason: &'static str)
            -> Cos2PhiError
        {
            Cos2PhiError::InvalidParameter { name, value, reason }
        }

        let energies = [
            ("EJ", self.EJ), ("ECJ", self.ECJ), ("EL", self.EL), ("EC", self.EC),
        ];
        for (name, value) in energies {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(name, value, "must be positive and finite"));
            }
        }
        for (name, value) in [("dCJ", self.dCJ), ("dL", self.dL)] {
            if !value.is_finite() || value.abs() >= 1.0 {
                return Err(invalid(name, value, "must satisfy |d| < 1"));
            }
        }
        if !self.dEJ.is_finite() || self.dEJ.abs() > 1.0 {
            return Err(invalid("dEJ", self.dEJ, "must satisfy |d| <= 1"));
        }
        for (name, value) in [("flux", self.flux), ("ng", self.ng)] {
            if !value.is_finite() {
                return Err(invalid(name, value, "must be finite"));
            }
        }
        if self.zeta_cut == 0 {
            return Err(invalid("zeta_cut", 0.0, "must be at least 1"));
        }
        if self.phi_cut == 0 {
            return Err(invalid("phi_cut", 0.0, "must be at least 1"));
        }
        if self.truncated_dim < 2 {
            return Err(invalid(
                "truncated_dim", self.truncated_dim as f64, "must be at least 2"));
        }
        if self.truncated_dim > self.space().total_dim() {
            return Err(invalid(
                "truncated_dim",
                self.truncated_dim as f64,
                "must not exceed the Hilbert space dimension",
            ));
        }
        Ok(())
    }

    /// Product space described by the three cutoffs.
    pub fn space(&self) -> ProductSpace {
        ProductSpace::new(self.phi_cut, self.zeta_cut, self.ncut)
    }

    /// Ordered name → value listing of every parameter.
    pub fn to_dict(&self) -> IndexMap<&'static str, f64> {
        [
            ("EJ", self.EJ),
            ("ECJ", self.ECJ),
            ("EL", self.EL),
            ("EC", self.EC),
            ("dCJ", self.dCJ),
            ("dL", self.dL),
            ("dEJ", self.dEJ),
            ("flux", self.flux),
            ("ng", self.ng),
            ("ncut", self.ncut as f64),
            ("zeta_cut", self.zeta_cut as f64),
            ("phi_cut", self.phi_cut as f64),
            ("truncated_dim", self.truncated_dim as f64),
        ]
        .into_iter()
        .collect()
    }

    /// Inductive energy renormalized by inductor disorder, `EL / (1 - dL²)`.
    pub fn disordered_el(&self) -> f64 { self.EL / (1.0 - self.dL.powi(2)) }

    /// Junction charging energy renormalized by capacitance disorder,
    /// `ECJ / (1 - dCJ²)`.
    pub fn disordered_ecj(&self) -> f64 { self.ECJ / (1.0 - self.dCJ.powi(2)) }
}

/* Basis selection ************************************************************/

/// Basis in which an operator is returned.
#[derive(Copy, Clone, Debug, Default)]
pub enum EnergyEsys<'a> {
    /// Sparse operator in the native product basis.
    #[default]
    Native,
    /// Dense operator in the eigenbasis of the lowest `truncated_dim` states,
    /// computed (or served from the memo) on demand.
    Computed,
    /// Dense operator in the basis spanned by the given eigenvectors.
    Given(&'a Eigensystem),
}

/// An operator in either representation returned by [`Cos2PhiQubit`]
/// accessors.
#[derive(Clone, Debug, PartialEq)]
pub enum Operator {
    Sparse(SpMat),
    Dense(nd::Array2<C64>),
}

impl Operator {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Sparse(m) => m.shape(),
            Self::Dense(a) => a.dim(),
        }
    }

    pub fn is_sparse(&self) -> bool { matches!(self, Self::Sparse(_)) }

    pub fn to_dense(&self) -> nd::Array2<C64> {
        match self {
            Self::Sparse(m) => m.to_dense(),
            Self::Dense(a) => a.clone(),
        }
    }

    pub fn into_sparse(self) -> Option<SpMat> {
        match self {
            Self::Sparse(m) => Some(m),
            Self::Dense(_) => None,
        }
    }

    pub fn into_dense(self) -> nd::Array2<C64> {
        match self {
            Self::Sparse(m) => m.to_dense(),
            Self::Dense(a) => a,
        }
    }
}

/* Qubit **********************************************************************/

/// A cos2φ qubit with an eigensystem memo that is cleared whenever a
/// parameter changes.
#[derive(Clone, Debug)]
pub struct Cos2PhiQubit<S = DenseEigensolver> {
    params: Cos2PhiParams,
    units: FrequencyUnit,
    solver: S,
    shift: f64,
    generation: u64,
    cache: RefCell<HashMap<usize, Eigensystem>>,
}

impl Cos2PhiQubit<DenseEigensolver> {
    /// Create a new qubit using the dense eigensolver.
    pub fn new(params: Cos2PhiParams) -> Cos2PhiResult<Self> {
        Self::with_solver(params, DenseEigensolver)
    }

    /// Create a new qubit with [`Cos2PhiParams::default_params`].
    pub fn create() -> Self {
        Self {
            params: Cos2PhiParams::default_params(),
            units: FrequencyUnit::default(),
            solver: DenseEigensolver,
            shift: 0.0,
            generation: 0,
            cache: RefCell::new(HashMap::default()),
        }
    }
}

impl<S> Cos2PhiQubit<S>
where S: Eigensolver
{
    /// Create a new qubit backed by a particular eigensolver.
    pub fn with_solver(params: Cos2PhiParams, solver: S) -> Cos2PhiResult<Self>
    {
        params.validate()?;
        Ok(Self {
            params,
            units: FrequencyUnit::default(),
            solver,
            shift: 0.0,
            generation: 0,
            cache: RefCell::new(HashMap::default()),
        })
    }

    /// Set the unit of all energies.
    pub fn with_units(mut self, units: FrequencyUnit) -> Self {
        self.units = units;
        self
    }

    /// Set the target around which eigenvalues are sought.
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self.invalidate("shift");
        self
    }

    pub fn params(&self) -> &Cos2PhiParams { &self.params }

    pub fn units(&self) -> FrequencyUnit { self.units }

    pub fn shift(&self) -> f64 { self.shift }

    pub fn solver(&self) -> &S { &self.solver }

    /// Number of parameter updates seen so far.
    pub fn generation(&self) -> u64 { self.generation }

    /// Replace all parameters at once.
    pub fn set_params(&mut self, params: Cos2PhiParams) -> Cos2PhiResult<()> {
        params.validate()?;
        self.params = params;
        self.invalidate("params");
        Ok(())
    }

    fn invalidate(&mut self, what: &str) {
        self.generation += 1;
        self.cache.get_mut().clear();
        debug!("{} updated; eigensystem cache cleared (gen {})",
            what, self.generation);
    }

    pub fn space(&self) -> ProductSpace { self.params.space() }

    pub fn dim_phi(&self) -> usize { self.space().dim(Subspace::Phi) }

    pub fn dim_zeta(&self) -> usize { self.space().dim(Subspace::Zeta) }

    pub fn dim_theta(&self) -> usize { self.space().dim(Subspace::Theta) }

    /// Total Hilbert space dimension.
    pub fn hilbertdim(&self) -> usize { self.space().total_dim() }

    pub fn disordered_el(&self) -> f64 { self.params.disordered_el() }

    pub fn disordered_ecj(&self) -> f64 { self.params.disordered_ecj() }

    /// Oscillator length of the φ mode, `(2 ECJ' / EL')^(1/4)`.
    pub fn phi_osc(&self) -> f64 {
        (2.0 * self.disordered_ecj() / self.disordered_el()).powf(0.25)
    }

    /// Oscillator length of the ζ mode, `(4 EC / EL')^(1/4)`.
    pub fn zeta_osc(&self) -> f64 {
        (4.0 * self.params.EC / self.disordered_el()).powf(0.25)
    }

    /// Plasma frequency of the φ mode, `sqrt(8 EL' ECJ')`.
    pub fn phi_plasma(&self) -> f64 {
        (8.0 * self.disordered_el() * self.disordered_ecj()).sqrt()
    }

    /// Plasma frequency of the ζ mode, `sqrt(16 EC EL')`.
    pub fn zeta_plasma(&self) -> f64 {
        (16.0 * self.params.EC * self.disordered_el()).sqrt()
    }

    /* Eigensystem ************************************************************/

    /// Compute the `count` eigenvalues nearest the shift, in ascending order,
    /// bypassing the memo.
    pub fn evals_calc(&self, count: usize) -> Cos2PhiResult<nd::Array1<f64>> {
        let H = self.hamiltonian_native()?;
        let mut evals: Vec<f64>
            = self.solver.eigenvalues(&H, count, self.shift)?.to_vec();
        evals.sort_by(f64::total_cmp);
        Ok(nd::Array1::from(evals))
    }

    /// Compute the `count` eigenpairs nearest the shift, in ascending order,
    /// bypassing the memo.
    pub fn esys_calc(&self, count: usize) -> Cos2PhiResult<Eigensystem> {
        let H = self.hamiltonian_native()?;
        let Eigensystem { evals, evecs }
            = self.solver.eigensystem(&H, count, self.shift)?;
        Ok(order_eigensystem(evals, evecs))
    }

    /// Return the `count` eigenpairs nearest the shift, serving from the memo
    /// when a large enough eigensystem has already been computed for the
    /// current parameters.
    ///
    /// A larger memo entry holds the `count` nearest pairs as a subset, so
    /// they are selected by distance to the shift rather than by position.
    pub fn eigensys(&self, count: usize) -> Cos2PhiResult<Eigensystem> {
        let cached: Option<Eigensystem>
            = self.cache.borrow().iter()
            .filter(|(k, _)| **k >= count)
            .min_by_key(|(k, _)| **k)
            .map(|(_, es)| es.nearest(count, self.shift));
        if let Some(es) = cached {
            debug!("eigensystem cache hit: count = {}", count);
            return Ok(es);
        }
        let es = self.esys_calc(count)?;
        self.cache.borrow_mut().insert(count, es.clone());
        Ok(es)
    }

    /// Return the `count` eigenvalues nearest the shift, in ascending order.
    pub fn eigenvals(&self, count: usize) -> Cos2PhiResult<nd::Array1<f64>> {
        let cached: Option<nd::Array1<f64>>
            = self.cache.borrow().iter()
            .filter(|(k, _)| **k >= count)
            .min_by_key(|(k, _)| **k)
            .map(|(_, es)| {
                let mut keep = nearest_indices(&es.evals, count, self.shift);
                keep.sort_unstable();
                keep.iter().map(|&j| es.evals[j]).collect()
            });
        match cached {
            Some(evals) => Ok(evals),
            None => self.evals_calc(count),
        }
    }

    /// Express a native operator in the basis selected by `energy_esys`.
    pub fn process_op(&self, native: SpMat, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        match energy_esys {
            EnergyEsys::Native => Ok(Operator::Sparse(native)),
            EnergyEsys::Computed => {
                let es = self.eigensys(self.params.truncated_dim)?;
                Ok(Operator::Dense(project(&native, &es.evecs)))
            },
            EnergyEsys::Given(es) => {
                if es.space_dim() != native.rows() {
                    return Err(Cos2PhiError::OperatorDim {
                        expected: native.rows(),
                        found: es.space_dim(),
                    });
                }
                Ok(Operator::Dense(project(&native, &es.evecs)))
            },
        }
    }

    /* Single-subspace operators **********************************************/

    /// φ on its own subspace, as a real symmetric matrix.
    fn phi_real(&self) -> nd::Array2<f64> {
        a_plus_adag(self.dim_phi(), Some(self.phi_osc() / SQRT_2))
    }

    /// φ = ℓ_φ (a + a†) / √2 on the φ subspace.
    pub fn phi_bare(&self) -> SpMat {
        a_plus_adag_sparse(self.dim_phi(), Some(self.phi_osc() / SQRT_2))
    }

    /// n_φ = i (a† - a) / (ℓ_φ √2) on the φ subspace.
    pub fn n_phi_bare(&self) -> SpMat {
        iadag_minus_ia_sparse(
            self.dim_phi(), Some(1.0 / (self.phi_osc() * SQRT_2)))
    }

    /// ζ = ℓ_ζ (a + a†) / √2 on the ζ subspace.
    pub fn zeta_bare(&self) -> SpMat {
        a_plus_adag_sparse(self.dim_zeta(), Some(self.zeta_osc() / SQRT_2))
    }

    /// n_ζ = i (a† - a) / (ℓ_ζ √2) on the ζ subspace.
    pub fn n_zeta_bare(&self) -> SpMat {
        iadag_minus_ia_sparse(
            self.dim_zeta(), Some(1.0 / (self.zeta_osc() * SQRT_2)))
    }

    /// Diagonal charge operator with entries `-ncut..=ncut`.
    pub fn n_theta_bare(&self) -> SpMat {
        let ncut = self.params.ncut as i64;
        sp_diag(
            (-ncut..=ncut).map(|n| C64::from(n as f64)),
            0,
            self.dim_theta(),
        )
    }

    /// `exp(i φ)` on the φ subspace.
    pub fn exp_i_phi(&self) -> Cos2PhiResult<SpMat> {
        let E = expi_symmetric(&self.phi_real())?;
        Ok(sp_from_dense(&E))
    }

    /// `cos φ` on the φ subspace.
    pub fn cos_phi(&self) -> Cos2PhiResult<SpMat> {
        Ok(sp_from_real(&symmetric_fn(&self.phi_real(), f64::cos)?))
    }

    /// `sin φ` on the φ subspace.
    pub fn sin_phi(&self) -> Cos2PhiResult<SpMat> {
        Ok(sp_from_real(&symmetric_fn(&self.phi_real(), f64::sin)?))
    }

    /// `cos θ` in the charge basis: `1/2` on both first off-diagonals.
    pub fn cos_theta(&self) -> SpMat {
        let d = self.dim_theta();
        let half = std::iter::repeat(C64::from(0.5));
        &sp_diag(half.clone(), 1, d) + &sp_diag(half, -1, d)
    }

    /// `sin θ` in the charge basis: `i/2` above the diagonal, `-i/2` below.
    pub fn sin_theta(&self) -> SpMat {
        let d = self.dim_theta();
        let up = std::iter::repeat(C64::new(0.0, 0.5));
        let dn = std::iter::repeat(C64::new(0.0, -0.5));
        &sp_diag(up, 1, d) + &sp_diag(dn, -1, d)
    }

    /* Native full-space operators ********************************************/

    pub fn total_identity(&self) -> SpMat { self.space().total_identity() }

    pub fn phi_native(&self) -> Cos2PhiResult<SpMat> {
        self.space().embed_single(Subspace::Phi, &self.phi_bare())
    }

    pub fn n_phi_native(&self) -> Cos2PhiResult<SpMat> {
        self.space().embed_single(Subspace::Phi, &self.n_phi_bare())
    }

    pub fn zeta_native(&self) -> Cos2PhiResult<SpMat> {
        self.space().embed_single(Subspace::Zeta, &self.zeta_bare())
    }

    pub fn n_zeta_native(&self) -> Cos2PhiResult<SpMat> {
        self.space().embed_single(Subspace::Zeta, &self.n_zeta_bare())
    }

    pub fn n_theta_native(&self) -> Cos2PhiResult<SpMat> {
        self.space().embed_single(Subspace::Theta, &self.n_theta_bare())
    }

    /// Phase across inductor 1, `ζ - φ`.
    pub fn phi_1_native(&self) -> Cos2PhiResult<SpMat> {
        Ok(&self.zeta_native()? - &self.phi_native()?)
    }

    /// Phase across inductor 2, `-ζ - φ`.
    pub fn phi_2_native(&self) -> Cos2PhiResult<SpMat> {
        let minus_zeta = sp_scale(&self.zeta_native()?, C64::from(-1.0));
        Ok(&minus_zeta - &self.phi_native()?)
    }

    /// Charge across junction 1, `n_φ / 2 + (n_θ - n_ζ) / 2`.
    pub fn n_1_native(&self) -> Cos2PhiResult<SpMat> {
        let diff = &self.n_theta_native()? - &self.n_zeta_native()?;
        Ok(sp_scale(&(&self.n_phi_native()? + &diff), C64::from(0.5)))
    }

    /// Charge across junction 2, `n_φ / 2 - (n_θ - n_ζ) / 2`.
    pub fn n_2_native(&self) -> Cos2PhiResult<SpMat> {
        let diff = &self.n_theta_native()? - &self.n_zeta_native()?;
        Ok(sp_scale(&(&self.n_phi_native()? - &diff), C64::from(0.5)))
    }

    /* Basis-selectable accessors *********************************************/

    pub fn phi_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.phi_native()?, energy_esys)
    }

    pub fn n_phi_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.n_phi_native()?, energy_esys)
    }

    pub fn zeta_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.zeta_native()?, energy_esys)
    }

    pub fn n_zeta_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.n_zeta_native()?, energy_esys)
    }

    pub fn n_theta_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.n_theta_native()?, energy_esys)
    }

    pub fn phi_1_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.phi_1_native()?, energy_esys)
    }

    pub fn phi_2_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.phi_2_native()?, energy_esys)
    }

    pub fn n_1_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.n_1_native()?, energy_esys)
    }

    pub fn n_2_operator(&self, energy_esys: EnergyEsys)
        -> Cos2PhiResult<Operator>
    {
        self.process_op(self.n_2_native()?, energy_esys)
    }

    /* Potential **************************************************************/

    /// Potential energy at a point in (φ, ζ, θ).
    pub fn potential(&self, phi: f64, zeta: f64, theta: f64) -> f64 {
        let EL = self.disordered_el();
        let EJ = self.params.EJ;
        let dEJ = self.params.dEJ;
        let phase = phi + PI * self.params.flux;
        EL * (phi * phi + zeta * zeta)
            - 2.0 * EJ * theta.cos() * phase.cos()
            + 2.0 * dEJ * EJ * phase.sin() * theta.sin()
    }

    /// Potential energy on the ζ = 0 plane.
    pub fn reduced_potential(&self, phi: f64, theta: f64) -> f64 {
        self.potential(phi, 0.0, theta)
    }

    /// Reduced potential sampled on a φ × θ grid, indexed `[φ, θ]`.
    pub fn potential_on_grid(&self, phi_grid: &Grid1d, theta_grid: &Grid1d)
        -> nd::Array2<f64>
    {
        let phi = phi_grid.make_linspace();
        let theta = theta_grid.make_linspace();
        nd::Array2::from_shape_fn(
            (phi.len(), theta.len()),
            |(a, c)| self.reduced_potential(phi[a], theta[c]),
        )
    }

    /* Wavefunction ***********************************************************/

    /// Real-space wavefunction of eigenstate `which` on a 3D grid.
    ///
    /// If `esys` is `None`, at least three eigenpairs are computed (or taken
    /// from the memo). Default grids are used if `grids` is `None`.
    pub fn wavefunction(
        &self,
        esys: Option<&Eigensystem>,
        which: usize,
        grids: Option<GridSpec>,
    ) -> Cos2PhiResult<WaveFunctionOnGrid>
    {
        let computed: Eigensystem;
        let es: &Eigensystem
            = match esys {
                Some(es) => es,
                None => {
                    let count = (which + 1).max(3).min(self.hilbertdim());
                    computed = self.eigensys(count)?;
                    &computed
                },
            };
        let state = es.state(which)?;
        if state.len() != self.hilbertdim() {
            return Err(Cos2PhiError::OperatorDim {
                expected: self.hilbertdim(),
                found: state.len(),
            });
        }
        let amplitudes: nd::Array3<C64>
            = state.to_owned()
            .into_shape((self.dim_phi(), self.dim_zeta(), self.dim_theta()))?;
        trace!("synthesizing wavefunction for state {}", which);
        Ok(wf::synthesize(
            amplitudes.view(),
            self.phi_osc(),
            self.zeta_osc(),
            self.params.ncut,
            grids.unwrap_or_default(),
        ))
    }
}

macro_rules! watched_params {
    ( $( $field:ident, $setter:ident : $T:ty );* $(;)? ) => {
        impl<S> Cos2PhiQubit<S>
        where S: Eigensolver
        {
            $(
                pub fn $field(&self) -> $T { self.params.$field }

                /// Validate and set the parameter, clearing the eigensystem
                /// memo.
                pub fn $setter(&mut self, value: $T) -> Cos2PhiResult<()> {
                    let mut params = self.params;
                    params.$field = value;
                    params.validate()?;
                    self.params = params;
                    self.invalidate(stringify!($field));
                    Ok(())
                }
            )*
        }
    }
}

watched_params!(
    EJ, set_EJ: f64;
    ECJ, set_ECJ: f64;
    EL, set_EL: f64;
    EC, set_EC: f64;
    dCJ, set_dCJ: f64;
    dL, set_dL: f64;
    dEJ, set_dEJ: f64;
    flux, set_flux: f64;
    ng, set_ng: f64;
    ncut, set_ncut: usize;
    zeta_cut, set_zeta_cut: usize;
    phi_cut, set_phi_cut: usize;
    truncated_dim, set_truncated_dim: usize;
);
