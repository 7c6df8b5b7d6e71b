//! Real-space wavefunctions on φ × ζ × θ grids.
//!
//! A product-basis amplitude array `A[i, j, k]` is mapped to
//!
//! ```text
//! ψ(φ, ζ, θ) = Σ A[i, j, k] ψ_i(φ; ℓ_φ) ψ_j(ζ; ℓ_ζ) e^{-i n_k θ} / sqrt(2π)
//! ```
//!
//! where `ψ_n(x; ℓ)` are harmonic-oscillator eigenfunctions and
//! `n_k = k - ncut`. The sum is evaluated one axis at a time.

use std::f64::consts::{ PI, TAU };
use ndarray::{ self as nd, s };
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };

/* Grids **********************************************************************/

/// Evenly spaced points from `min_val` to `max_val`, inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid1d {
    pub min_val: f64,
    pub max_val: f64,
    pub pt_count: usize,
}

impl Grid1d {
    pub fn new(min_val: f64, max_val: f64, pt_count: usize) -> Self {
        Self { min_val, max_val, pt_count }
    }

    pub fn make_linspace(&self) -> nd::Array1<f64> {
        nd::Array1::linspace(self.min_val, self.max_val, self.pt_count)
    }

    /// Spacing between neighboring points (zero for fewer than two points).
    pub fn grid_spacing(&self) -> f64 {
        if self.pt_count < 2 {
            0.0
        } else {
            (self.max_val - self.min_val) / (self.pt_count - 1) as f64
        }
    }
}

/// One grid per coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub phi: Grid1d,
    pub zeta: Grid1d,
    pub theta: Grid1d,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            phi: Grid1d::new(-4.0 * PI, 4.0 * PI, 100),
            zeta: Grid1d::new(-4.0 * PI, 4.0 * PI, 100),
            theta: Grid1d::new(-0.5 * PI, 1.5 * PI, 100),
        }
    }
}

impl GridSpec {
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.phi.pt_count, self.zeta.pt_count, self.theta.pt_count)
    }
}

/// Complex amplitudes sampled on a [`GridSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct WaveFunctionOnGrid {
    gridspec: GridSpec,
    amplitudes: nd::Array3<C64>,
}

impl WaveFunctionOnGrid {
    pub fn gridspec(&self) -> &GridSpec { &self.gridspec }

    pub fn amplitudes(&self) -> &nd::Array3<C64> { &self.amplitudes }

    pub fn into_amplitudes(self) -> nd::Array3<C64> { self.amplitudes }

    /// Total probability, `Σ |ψ|² dφ dζ dθ`, by a simple Riemann sum.
    pub fn norm_sqr(&self) -> f64 {
        let dV = self.gridspec.phi.grid_spacing()
            * self.gridspec.zeta.grid_spacing()
            * self.gridspec.theta.grid_spacing();
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>() * dV
    }
}

/* Basis functions ************************************************************/

/// Harmonic-oscillator eigenfunction of level `n` with oscillator length
/// `l_osc`, normalized so that `∫ |ψ_n(x)|² dx = 1`.
///
/// Evaluated with the three-term recurrence
/// `ψ_{k+1} = sqrt(2/(k+1)) ξ ψ_k - sqrt(k/(k+1)) ψ_{k-1}`, `ξ = x / l_osc`,
/// which stays finite at levels where Hermite polynomials overflow.
pub fn harm_osc_wavefunction(n: usize, x: &nd::Array1<f64>, l_osc: f64)
    -> nd::Array1<f64>
{
    harm_osc_levels(n + 1, x, l_osc).row(n).to_owned()
}

/// Levels `0..count` of [`harm_osc_wavefunction`], as rows of a
/// `count × x.len()` array.
pub fn harm_osc_levels(count: usize, x: &nd::Array1<f64>, l_osc: f64)
    -> nd::Array2<f64>
{
    let mut psi: nd::Array2<f64> = nd::Array2::zeros((count, x.len()));
    if count == 0 { return psi; }
    let xi: nd::Array1<f64> = x / l_osc;
    let norm = PI.powf(-0.25) / l_osc.sqrt();
    psi.row_mut(0).assign(&xi.mapv(|z| norm * (-0.5 * z * z).exp()));
    if count == 1 { return psi; }
    let psi1: nd::Array1<f64> = &xi * &psi.row(0) * 2.0_f64.sqrt();
    psi.row_mut(1).assign(&psi1);
    for k in 1..count - 1 {
        let kf = k as f64;
        let a = (2.0 / (kf + 1.0)).sqrt();
        let b = (kf / (kf + 1.0)).sqrt();
        let next: nd::Array1<f64>
            = &xi * &psi.row(k) * a - &psi.row(k - 1) * b;
        psi.row_mut(k + 1).assign(&next);
    }
    psi
}

/// Charge-basis plane wave `exp(-i n θ) / sqrt(2π)`.
pub fn planewave(n: i64, theta: &nd::Array1<f64>) -> nd::Array1<C64> {
    let norm = TAU.sqrt().recip();
    theta.mapv(|t| C64::from_polar(norm, -(n as f64) * t))
}

/* Synthesis ******************************************************************/

/// Map product-basis amplitudes `[φ-level, ζ-level, θ-index]` to real space.
pub fn synthesize(
    amplitudes: nd::ArrayView3<C64>,
    phi_osc: f64,
    zeta_osc: f64,
    ncut: usize,
    grids: GridSpec,
) -> WaveFunctionOnGrid
{
    let (np, nz, nt) = amplitudes.dim();
    let (gp, gz, gt) = grids.shape();

    let Phi: nd::Array2<C64>
        = harm_osc_levels(np, &grids.phi.make_linspace(), phi_osc)
        .mapv(C64::from);
    let Zeta: nd::Array2<C64>
        = harm_osc_levels(nz, &grids.zeta.make_linspace(), zeta_osc)
        .mapv(C64::from);
    let theta = grids.theta.make_linspace();
    let mut Theta: nd::Array2<C64> = nd::Array2::zeros((nt, gt));
    Theta.outer_iter_mut()
        .enumerate()
        .for_each(|(k, mut row)| {
            row.assign(&planewave(k as i64 - ncut as i64, &theta));
        });

    // contract θ: B[i, j, c] = Σ_k A[i, j, k] T[k, c]
    let mut B: nd::Array3<C64> = nd::Array3::zeros((np, nz, gt));
    for i in 0..np {
        B.slice_mut(s![i, .., ..])
            .assign(&amplitudes.slice(s![i, .., ..]).dot(&Theta));
    }

    // contract ζ: C[i, b, c] = Σ_j Z[j, b] B[i, j, c]
    let mut C: nd::Array3<C64> = nd::Array3::zeros((np, gz, gt));
    let Zt = Zeta.t();
    for i in 0..np {
        C.slice_mut(s![i, .., ..]).assign(&Zt.dot(&B.slice(s![i, .., ..])));
    }

    // contract φ: W[a, b, c] = Σ_i P[i, a] C[i, b, c]
    let mut W: nd::Array3<C64> = nd::Array3::zeros((gp, gz, gt));
    for (i, Ci) in C.outer_iter().enumerate() {
        for (a, mut Wa) in W.outer_iter_mut().enumerate() {
            Wa.scaled_add(Phi[[i, a]], &Ci);
        }
    }

    WaveFunctionOnGrid { gridspec: grids, amplitudes: W }
}
