//! Decoherence times and rates from golden-rule and 1/f-noise estimates.
//!
//! [`NoisySystem`] supplies the generic integrators for any system that can
//! produce eigensystems; [`NoisyCos2Phi`] adds the cos2φ-specific channels on
//! top of it for anything providing the circuit-branch operators.

use std::f64::consts::TAU;
use log::debug;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ Cos2PhiError, Cos2PhiResult },
    nd_utils::{ SpMat, matrix_element },
    spectrum::Eigensystem,
    units::FrequencyUnit,
};

pub mod cos2phi;
pub use cos2phi::{ Cos2PhiBranches, NoisyCos2Phi };

/// Reduced Planck constant (J s).
pub const HBAR: f64 = 1.054571817e-34;

/// Boltzmann constant (J / K).
pub const K_B: f64 = 1.380649e-23;

/* Channels *******************************************************************/

/// Named noise channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    TphiOneOverFCc,
    TphiOneOverFFlux,
    TphiOneOverFNg,
    T1Capacitive,
    T1Inductive,
    T1Purcell,
}

impl NoiseChannel {
    pub const ALL: [Self; 6] = [
        Self::TphiOneOverFCc,
        Self::TphiOneOverFFlux,
        Self::TphiOneOverFNg,
        Self::T1Capacitive,
        Self::T1Inductive,
        Self::T1Purcell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TphiOneOverFCc => "tphi_1_over_f_cc",
            Self::TphiOneOverFFlux => "tphi_1_over_f_flux",
            Self::TphiOneOverFNg => "tphi_1_over_f_ng",
            Self::T1Capacitive => "t1_capacitive",
            Self::T1Inductive => "t1_inductive",
            Self::T1Purcell => "t1_purcell",
        }
    }
}

impl std::fmt::Display for NoiseChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NoiseChannel {
    type Err = Cos2PhiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|ch| ch.as_str() == s)
            .ok_or_else(|| Cos2PhiError::UnsupportedNoiseChannel(s.to_string()))
    }
}

/* Parameters *****************************************************************/

/// Default noise amplitudes, cutoffs, and temperature.
///
/// `A_flux` is in units of the flux quantum, `A_cc` is relative to the
/// critical current, and `A_ng` is in units of 2e. Angular frequencies are
/// in system units, `t_exp` in inverse system units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub T: f64,
    pub A_flux: f64,
    pub A_cc: f64,
    pub A_ng: f64,
    pub omega_low: f64,
    pub omega_high: f64,
    pub t_exp: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            T: 0.015,
            A_flux: 1e-6,
            A_cc: 1e-7,
            A_ng: 1e-4,
            omega_low: 1e-9 * TAU,
            omega_high: 3.0 * TAU,
            t_exp: 1e4,
        }
    }
}

/// `ħω / k_B T` for an angular frequency `omega` in system units.
pub fn calc_therm_ratio(omega: f64, T: f64, units: FrequencyUnit) -> f64 {
    calc_therm_ratio_standard(units.to_standard_units(omega), T)
}

/// `ħω / k_B T` for an angular frequency `omega` in rad/s.
pub fn calc_therm_ratio_standard(omega: f64, T: f64) -> f64 {
    HBAR * omega / (K_B * T)
}

/// Thermal occupation factor shared by every dissipative spectral density,
/// `coth(|x| / 2) / (1 + e^{-x})`.
pub(crate) fn thermal_factor(therm_ratio: f64) -> f64 {
    (0.5 * therm_ratio.abs()).tanh().recip() / (1.0 + (-therm_ratio).exp())
}

/// A quality factor, either the channel's built-in model, a constant, or a
/// function of angular frequency in system units.
#[derive(Default)]
pub enum QualityFactor {
    #[default]
    Default,
    Constant(f64),
    Function(Box<dyn Fn(f64) -> f64>),
}

impl std::fmt::Debug for QualityFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Constant(q) => write!(f, "Constant({})", q),
            Self::Function(_) => write!(f, "Function(..)"),
        }
    }
}

impl QualityFactor {
    /// Evaluate at `omega`, falling back to `default` for
    /// [`QualityFactor::Default`].
    pub fn eval<F>(&self, omega: f64, default: F) -> f64
    where F: Fn(f64) -> f64
    {
        match self {
            Self::Default => default(omega),
            Self::Constant(q) => *q,
            Self::Function(f) => f(omega),
        }
    }
}

/// Options for relaxation estimates.
#[derive(Copy, Clone, Debug)]
pub struct T1Options<'a> {
    /// Initial state of the transition.
    pub i: usize,
    /// Final state of the transition.
    pub j: usize,
    /// Temperature (K).
    pub T: f64,
    /// Sum both directions of the transition.
    pub total: bool,
    /// Eigensystem to use instead of computing one.
    pub esys: Option<&'a Eigensystem>,
    /// Return a rate instead of a time.
    pub get_rate: bool,
}

impl Default for T1Options<'_> {
    fn default() -> Self {
        Self {
            i: 1,
            j: 0,
            T: NoiseParams::default().T,
            total: true,
            esys: None,
            get_rate: false,
        }
    }
}

/// Options for 1/f dephasing estimates.
#[derive(Copy, Clone, Debug)]
pub struct TphiOptions<'a> {
    pub i: usize,
    pub j: usize,
    /// Noise amplitude; the channel's default from [`NoiseParams`] if `None`.
    pub A_noise: Option<f64>,
    pub omega_low: f64,
    pub t_exp: f64,
    pub esys: Option<&'a Eigensystem>,
    pub get_rate: bool,
}

impl Default for TphiOptions<'_> {
    fn default() -> Self {
        let p = NoiseParams::default();
        Self {
            i: 0,
            j: 1,
            A_noise: None,
            omega_low: p.omega_low,
            t_exp: p.t_exp,
            esys: None,
            get_rate: false,
        }
    }
}

/* Generic integrators ********************************************************/

fn rate_or_time(rate: f64, get_rate: bool) -> f64 {
    if get_rate {
        rate
    } else if rate == 0.0 {
        f64::INFINITY
    } else {
        rate.recip()
    }
}

/// Anything that can produce its own eigensystem, with the generic
/// golden-rule and 1/f integrators built on top.
pub trait NoisySystem {
    /// Channels this system can evaluate.
    fn supported_noise_channels(&self) -> Vec<NoiseChannel>;

    /// Unit of all system energies.
    fn energy_units(&self) -> FrequencyUnit;

    /// Lowest `count` eigenpairs in ascending order.
    fn noise_eigensys(&self, count: usize) -> Cos2PhiResult<Eigensystem>;

    fn check_channel(&self, channel: NoiseChannel) -> Cos2PhiResult<()> {
        if self.supported_noise_channels().contains(&channel) {
            Ok(())
        } else {
            Err(Cos2PhiError::UnsupportedNoiseChannel(channel.to_string()))
        }
    }

    /// Get the eigensystem and check that states `i` and `j` and the noise
    /// operator fit it.
    fn transition_esys(
        &self,
        i: usize,
        j: usize,
        esys: Option<&Eigensystem>,
        noise_op: &SpMat,
    ) -> Cos2PhiResult<Eigensystem>
    {
        let es = match esys {
            Some(es) => es.clone(),
            None => self.noise_eigensys(i.max(j) + 1)?,
        };
        let top = i.max(j);
        if top >= es.len() {
            return Err(Cos2PhiError::EigenIndex { index: top, count: es.len() });
        }
        if noise_op.rows() != es.space_dim() || noise_op.cols() != es.space_dim()
        {
            return Err(Cos2PhiError::OperatorDim {
                expected: es.space_dim(),
                found: noise_op.rows().max(noise_op.cols()),
            });
        }
        Ok(es)
    }

    /// Golden-rule relaxation for the transition `i → j` driven through
    /// `noise_op` with spectral density `spectral_density(ω, T)`.
    ///
    /// `ω = 2π (E_i - E_j)` is an angular frequency in system units. With
    /// `total`, the reverse process `S(-ω)` is included.
    fn t1<F>(
        &self,
        noise_op: &SpMat,
        spectral_density: F,
        opts: &T1Options,
    ) -> Cos2PhiResult<f64>
    where F: Fn(f64, f64) -> f64
    {
        if opts.i == opts.j {
            return Err(Cos2PhiError::InvalidParameter {
                name: "j",
                value: opts.j as f64,
                reason: "relaxation requires two distinct states",
            });
        }
        let es = self.transition_esys(opts.i, opts.j, opts.esys, noise_op)?;
        let omega = TAU * (es.evals[opts.i] - es.evals[opts.j]);
        let s
            = if opts.total {
                spectral_density(omega, opts.T) + spectral_density(-omega, opts.T)
            } else {
                spectral_density(omega, opts.T)
            };
        let elem: C64 = matrix_element(
            noise_op,
            &es.evecs.column(opts.i),
            &es.evecs.column(opts.j),
        );
        let rate = elem.norm_sqr() * s;
        debug!("t1 {} -> {}: omega = {:.6e}, rate = {:.6e}",
            opts.i, opts.j, omega, rate);
        Ok(rate_or_time(rate, opts.get_rate))
    }

    /// Pure dephasing between `i` and `j` from 1/f noise of amplitude
    /// `A_noise` in the parameter λ, where `noise_op` is ∂H/∂λ.
    fn tphi_1_over_f(
        &self,
        A_noise: f64,
        noise_op: &SpMat,
        opts: &TphiOptions,
    ) -> Cos2PhiResult<f64>
    {
        let es = self.transition_esys(opts.i, opts.j, opts.esys, noise_op)?;
        let diag = |k: usize| -> C64 {
            let v: nd::ArrayView1<C64> = es.evecs.column(k);
            matrix_element(noise_op, &v, &v)
        };
        let dEij_d_lambda = (diag(opts.i) - diag(opts.j)).norm();
        let rate
            = dEij_d_lambda * A_noise
            * (2.0 * (opts.omega_low * opts.t_exp).ln().abs()).sqrt()
            * TAU;
        debug!("tphi {} <-> {}: dE/dλ = {:.6e}, rate = {:.6e}",
            opts.i, opts.j, dEij_d_lambda, rate);
        Ok(rate_or_time(rate, opts.get_rate))
    }
}

/* Bessel K0 ******************************************************************/

/// Modified Bessel function of the first kind I₀ for `|x| <= 3.75`
/// (Abramowitz & Stegun 9.8.1).
fn bessel_i0_small(x: f64) -> f64 {
    let t2 = (x / 3.75).powi(2);
    1.0 + t2 * (3.5156229 + t2 * (3.0899424 + t2 * (1.2067492
        + t2 * (0.2659732 + t2 * (0.0360768 + t2 * 0.0045813)))))
}

/// `K₀(x) · sinh(x)` for `x > 0` (Abramowitz & Stegun 9.8.5, 9.8.6), formed
/// without overflow at large `x`.
pub(crate) fn bessel_k0_sinh(x: f64) -> f64 {
    if x <= 2.0 {
        let y = 0.25 * x * x;
        let k0
            = -(0.5 * x).ln() * bessel_i0_small(x)
            + (-0.57721566 + y * (0.42278420 + y * (0.23069756
                + y * (0.03488590 + y * (0.00262698 + y * (0.00010750
                + y * 0.00000740))))));
        k0 * x.sinh()
    } else {
        let y = 2.0 / x;
        let p = 1.25331414 + y * (-0.07832358 + y * (0.02189568
            + y * (-0.01062446 + y * (0.00587872 + y * (-0.00251540
            + y * 0.00053208)))));
        // K0 = p e^{-x} / sqrt(x); sinh = e^{x} (1 - e^{-2x}) / 2
        p / x.sqrt() * 0.5 * (1.0 - (-2.0 * x).exp())
    }
}
