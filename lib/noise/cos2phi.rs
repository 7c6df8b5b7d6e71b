//! Noise channels of the cos2φ circuit.
//!
//! Relaxation through the two superinductors couples via the branch phases
//! φ₁ and φ₂, dielectric loss in the junctions via the branch charges n₁ and
//! n₂, and loss in the shunt capacitor via n_ζ. Each branch carries its own
//! disorder-adjusted spectral density; independent branches add as rates.

use std::f64::consts::TAU;
use num_complex::Complex64 as C64;
use crate::{
    error::Cos2PhiResult,
    nd_utils::{ SpMat, sp_scale },
    qubit::{ Cos2PhiParams, Cos2PhiQubit },
    spectrum::{ Eigensolver, Eigensystem },
    units::FrequencyUnit,
};
use super::{
    NoiseChannel,
    NoiseParams,
    NoisySystem,
    QualityFactor,
    T1Options,
    TphiOptions,
    bessel_k0_sinh,
    calc_therm_ratio,
    calc_therm_ratio_standard,
    rate_or_time,
    thermal_factor,
};

/// Native-basis operators needed by the cos2φ noise channels.
pub trait Cos2PhiBranches {
    fn circuit_params(&self) -> Cos2PhiParams;

    /// Phase across inductor 1.
    fn phi_1_op(&self) -> Cos2PhiResult<SpMat>;

    /// Phase across inductor 2.
    fn phi_2_op(&self) -> Cos2PhiResult<SpMat>;

    /// Charge across junction 1.
    fn n_1_op(&self) -> Cos2PhiResult<SpMat>;

    /// Charge across junction 2.
    fn n_2_op(&self) -> Cos2PhiResult<SpMat>;

    /// Charge conjugate to ζ.
    fn n_zeta_op(&self) -> Cos2PhiResult<SpMat>;

    fn d_hamiltonian_d_flux_op(&self) -> Cos2PhiResult<SpMat>;

    fn d_hamiltonian_d_EJ_op(&self) -> Cos2PhiResult<SpMat>;

    fn d_hamiltonian_d_ng_op(&self) -> Cos2PhiResult<SpMat>;
}

impl<S> Cos2PhiBranches for Cos2PhiQubit<S>
where S: Eigensolver
{
    fn circuit_params(&self) -> Cos2PhiParams { *self.params() }

    fn phi_1_op(&self) -> Cos2PhiResult<SpMat> { self.phi_1_native() }

    fn phi_2_op(&self) -> Cos2PhiResult<SpMat> { self.phi_2_native() }

    fn n_1_op(&self) -> Cos2PhiResult<SpMat> { self.n_1_native() }

    fn n_2_op(&self) -> Cos2PhiResult<SpMat> { self.n_2_native() }

    fn n_zeta_op(&self) -> Cos2PhiResult<SpMat> { self.n_zeta_native() }

    fn d_hamiltonian_d_flux_op(&self) -> Cos2PhiResult<SpMat> {
        self.d_hamiltonian_d_flux_native()
    }

    fn d_hamiltonian_d_EJ_op(&self) -> Cos2PhiResult<SpMat> {
        self.d_hamiltonian_d_EJ_native()
    }

    fn d_hamiltonian_d_ng_op(&self) -> Cos2PhiResult<SpMat> {
        self.d_hamiltonian_d_ng_native()
    }
}

impl<S> NoisySystem for Cos2PhiQubit<S>
where S: Eigensolver
{
    fn supported_noise_channels(&self) -> Vec<NoiseChannel> {
        NoiseChannel::ALL.to_vec()
    }

    fn energy_units(&self) -> FrequencyUnit { self.units() }

    fn noise_eigensys(&self, count: usize) -> Cos2PhiResult<Eigensystem> {
        self.eigensys(count)
    }
}

/// Inductive quality factor calibrated at 500 MHz, with the frequency and
/// temperature dependence of quasiparticle loss.
pub fn default_q_ind(omega: f64, T: f64, units: FrequencyUnit) -> f64 {
    let x = calc_therm_ratio(omega, T, units).abs();
    let x_500MHz = calc_therm_ratio_standard(TAU * 500e6, T);
    500e6 * bessel_k0_sinh(0.5 * x_500MHz) / bessel_k0_sinh(0.5 * x)
}

/// Capacitive quality factor, `10⁶ (2π · 6 GHz / |ω|)^0.7`.
pub fn default_q_cap(omega: f64, units: FrequencyUnit) -> f64 {
    1e6 * (TAU * 6e9 / units.to_standard_units(omega).abs()).powf(0.7)
}

/// Spectral density `2π · prefactor / Q(ω) · coth(|x|/2) / (1 + e^{-x})`,
/// `x = ħω / k_B T`.
fn dissipative_density<'a, Q>(prefactor: f64, q: &'a Q, units: FrequencyUnit)
    -> impl Fn(f64, f64) -> f64 + 'a
where Q: Fn(f64) -> f64
{
    move |omega: f64, T: f64| {
        let x = calc_therm_ratio(omega, T, units);
        TAU * prefactor / q(omega) * thermal_factor(x)
    }
}

/// Decoherence channels of a cos2φ circuit, available to anything that
/// provides its branch operators and eigensystem.
pub trait NoisyCos2Phi: Cos2PhiBranches + NoisySystem {
    /// Relaxation from quasiparticle loss in the two superinductors.
    fn t1_inductive(&self, Q_ind: &QualityFactor, opts: &T1Options)
        -> Cos2PhiResult<f64>
    {
        self.check_channel(NoiseChannel::T1Inductive)?;
        let p = self.circuit_params();
        let units = self.energy_units();
        let T = opts.T;
        let q = |omega: f64| Q_ind.eval(omega, |w| default_q_ind(w, T, units));
        let as_rate = T1Options { get_rate: true, ..*opts };
        let rate_1 = self.t1(
            &self.phi_1_op()?,
            dissipative_density(2.0 * p.EL / (1.0 - p.dL), &q, units),
            &as_rate,
        )?;
        let rate_2 = self.t1(
            &self.phi_2_op()?,
            dissipative_density(2.0 * p.EL / (1.0 + p.dL), &q, units),
            &as_rate,
        )?;
        Ok(rate_or_time(rate_1 + rate_2, opts.get_rate))
    }

    /// Relaxation from dielectric loss in the junction capacitances.
    fn t1_capacitive(&self, Q_cap: &QualityFactor, opts: &T1Options)
        -> Cos2PhiResult<f64>
    {
        self.check_channel(NoiseChannel::T1Capacitive)?;
        let p = self.circuit_params();
        let units = self.energy_units();
        let q = |omega: f64| Q_cap.eval(omega, |w| default_q_cap(w, units));
        let as_rate = T1Options { get_rate: true, ..*opts };
        let rate_1 = self.t1(
            &self.n_1_op()?,
            dissipative_density(16.0 * p.ECJ / (1.0 - p.dCJ), &q, units),
            &as_rate,
        )?;
        let rate_2 = self.t1(
            &self.n_2_op()?,
            dissipative_density(16.0 * p.ECJ / (1.0 + p.dCJ), &q, units),
            &as_rate,
        )?;
        Ok(rate_or_time(rate_1 + rate_2, opts.get_rate))
    }

    /// Relaxation from dielectric loss in the shunt capacitor.
    fn t1_purcell(&self, Q_cap: &QualityFactor, opts: &T1Options)
        -> Cos2PhiResult<f64>
    {
        self.check_channel(NoiseChannel::T1Purcell)?;
        let p = self.circuit_params();
        let units = self.energy_units();
        let q = |omega: f64| Q_cap.eval(omega, |w| default_q_cap(w, units));
        self.t1(
            &self.n_zeta_op()?,
            dissipative_density(16.0 * p.EC, &q, units),
            opts,
        )
    }

    /// Dephasing from 1/f flux noise.
    fn tphi_1_over_f_flux(&self, opts: &TphiOptions) -> Cos2PhiResult<f64> {
        self.check_channel(NoiseChannel::TphiOneOverFFlux)?;
        let A = opts.A_noise.unwrap_or(NoiseParams::default().A_flux);
        self.tphi_1_over_f(A, &self.d_hamiltonian_d_flux_op()?, opts)
    }

    /// Dephasing from 1/f critical-current noise; the amplitude is relative
    /// to EJ.
    fn tphi_1_over_f_cc(&self, opts: &TphiOptions) -> Cos2PhiResult<f64> {
        self.check_channel(NoiseChannel::TphiOneOverFCc)?;
        let A = opts.A_noise.unwrap_or(NoiseParams::default().A_cc);
        let EJ = self.circuit_params().EJ;
        let op = sp_scale(&self.d_hamiltonian_d_EJ_op()?, C64::from(EJ));
        self.tphi_1_over_f(A, &op, opts)
    }

    /// Dephasing from 1/f charge noise.
    fn tphi_1_over_f_ng(&self, opts: &TphiOptions) -> Cos2PhiResult<f64> {
        self.check_channel(NoiseChannel::TphiOneOverFNg)?;
        let A = opts.A_noise.unwrap_or(NoiseParams::default().A_ng);
        self.tphi_1_over_f(A, &self.d_hamiltonian_d_ng_op()?, opts)
    }
}

impl<T> NoisyCos2Phi for T
where T: Cos2PhiBranches + NoisySystem
{ }
