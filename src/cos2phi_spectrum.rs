#![allow(non_snake_case)]

//! Compute the low-lying spectrum, decoherence times, reduced potential, and
//! ground-state wavefunction (on the ζ = 0 plane) of a cos2φ qubit.
//!
//! Usage: `cos2phi_spectrum [config.toml]`

use std::path::PathBuf;
use log::info;
use ndarray as nd;
use cos2phi_sim::{
    mkdir,
    write_npz,
    config::Cos2PhiConfig,
    error::Cos2PhiResult,
    noise::{ NoisyCos2Phi, QualityFactor, T1Options, TphiOptions },
    wavefunction::{ Grid1d, GridSpec },
};

fn main() -> Cos2PhiResult<()> {
    env_logger::init();
    let outdir = PathBuf::from("output");
    mkdir!(outdir);

    let config: Cos2PhiConfig
        = match std::env::args().nth(1) {
            Some(path) => Cos2PhiConfig::load(path)?,
            None => Cos2PhiConfig::default(),
        };
    let qubit = config.build_qubit()?;
    info!("hilbert space dimension: {}", qubit.hilbertdim());

    let esys = qubit.eigensys(qubit.truncated_dim())?;
    println!("energies ({}):", config.units);
    esys.evals.iter().enumerate()
        .for_each(|(k, e)| { println!("  E[{}] = {:.6}", k, e); });

    let t1_opts = T1Options { T: config.noise.T, esys: Some(&esys), ..T1Options::default() };
    let t1: nd::Array1<f64>
        = nd::array![
            qubit.t1_inductive(&QualityFactor::Default, &t1_opts)?,
            qubit.t1_capacitive(&QualityFactor::Default, &t1_opts)?,
            qubit.t1_purcell(&QualityFactor::Default, &t1_opts)?,
        ];
    println!("t1 [inductive, capacitive, purcell]: {:.6e}", t1);

    let tphi_opts = TphiOptions {
        omega_low: config.noise.omega_low,
        t_exp: config.noise.t_exp,
        esys: Some(&esys),
        ..TphiOptions::default()
    };
    let tphi: nd::Array1<f64>
        = nd::array![
            qubit.tphi_1_over_f_flux(
                &TphiOptions { A_noise: Some(config.noise.A_flux), ..tphi_opts })?,
            qubit.tphi_1_over_f_cc(
                &TphiOptions { A_noise: Some(config.noise.A_cc), ..tphi_opts })?,
            qubit.tphi_1_over_f_ng(
                &TphiOptions { A_noise: Some(config.noise.A_ng), ..tphi_opts })?,
        ];
    println!("tphi [flux, cc, ng]: {:.6e}", tphi);

    let defaults = GridSpec::default();
    let grids = GridSpec { zeta: Grid1d::new(0.0, 0.0, 1), ..defaults };
    let psi0: nd::Array2<_>
        = qubit.wavefunction(Some(&esys), 0, Some(grids))?
        .into_amplitudes()
        .index_axis_move(nd::Axis(1), 0);
    let potential = qubit.potential_on_grid(&defaults.phi, &defaults.theta);

    let params: nd::Array1<f64>
        = qubit.params().to_dict().values().copied().collect();
    write_npz!(
        outdir.join("cos2phi.npz"),
        arrays: {
            "params" => &params,
            "evals" => &esys.evals,
            "t1" => &t1,
            "tphi" => &tphi,
            "phi" => &defaults.phi.make_linspace(),
            "theta" => &defaults.theta.make_linspace(),
            "potential" => &potential,
            "psi0" => &psi0,
        }
    )?;

    println!("done");
    Ok(())
}
