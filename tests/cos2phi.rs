#![allow(non_snake_case)]

use std::{ collections::BTreeSet, f64::consts::PI };
use approx::assert_abs_diff_eq;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::{ Rng, SeedableRng, rngs::StdRng };
use cos2phi_sim::{
    Cos2PhiError,
    Cos2PhiParams,
    Cos2PhiQubit,
    Cos2PhiResult,
    EnergyEsys,
    nd_utils::{ SpMat, hermitian_defect, max_abs_diff },
    noise::{
        Cos2PhiBranches,
        NoiseChannel,
        NoisyCos2Phi,
        NoisySystem,
        QualityFactor,
        T1Options,
    },
    spectrum::Eigensystem,
    units::FrequencyUnit,
    wavefunction::{ Grid1d, GridSpec, harm_osc_wavefunction, planewave },
};

fn small(ncut: usize, zeta_cut: usize, phi_cut: usize) -> Cos2PhiParams {
    Cos2PhiParams {
        ncut,
        zeta_cut,
        phi_cut,
        truncated_dim: 4,
        ..Cos2PhiParams::default_params()
    }
}

fn random_params(rng: &mut StdRng) -> Cos2PhiParams {
    Cos2PhiParams {
        EJ: rng.gen_range(5.0..20.0),
        ECJ: rng.gen_range(0.5..3.0),
        EL: rng.gen_range(0.3..2.0),
        EC: rng.gen_range(0.01..0.1),
        dCJ: rng.gen_range(-0.3..0.3),
        dL: rng.gen_range(-0.7..0.7),
        dEJ: rng.gen_range(-0.2..0.2),
        flux: rng.gen_range(0.0..1.0),
        ng: rng.gen_range(-0.5..0.5),
        ..small(2, 5, 4)
    }
}

#[test]
fn default_qubit_end_to_end() {
    let qubit = Cos2PhiQubit::create();
    assert_eq!(qubit.hilbertdim(), 7 * 30 * 15);
    assert_eq!(qubit.hilbertdim(), 3150);

    let esys = qubit.eigensys(6).unwrap();
    let evals = qubit.eigenvals(6).unwrap();
    assert_eq!(evals.len(), 6);
    assert_eq!(evals, esys.evals);
    assert!(evals.iter().all(|e| e.is_finite()));
    for k in 1..6 {
        assert!(evals[k] >= evals[k - 1]);
    }
    // the lowest doublet is split, by a small fraction of EJ
    let gap = evals[1] - evals[0];
    assert!(gap > 0.0);
    assert!(gap < qubit.EJ());

    let opts = T1Options {
        T: 0.015,
        esys: Some(&esys),
        get_rate: true,
        ..T1Options::default()
    };
    for rate in [
        qubit.t1_inductive(&QualityFactor::Default, &opts).unwrap(),
        qubit.t1_capacitive(&QualityFactor::Default, &opts).unwrap(),
        qubit.t1_purcell(&QualityFactor::Default, &opts).unwrap(),
    ] {
        assert!(rate.is_finite());
        assert!(rate > 0.0);
    }
}

#[test]
fn hamiltonian_is_hermitian() {
    let mut rng = StdRng::seed_from_u64(10546);
    for _ in 0..6 {
        let qubit = Cos2PhiQubit::new(random_params(&mut rng)).unwrap();
        let H = qubit.hamiltonian_native().unwrap().to_dense();
        let scale = H.iter().map(|z| z.norm()).fold(0.0, f64::max);
        assert!(hermitian_defect(&H) <= 1e-10 * scale);
    }
}

#[test]
fn eigensystem_is_ordered_and_orthonormal() {
    let mut rng = StdRng::seed_from_u64(2718);
    let qubit = Cos2PhiQubit::new(random_params(&mut rng)).unwrap();
    let es = qubit.eigensys(5).unwrap();
    for k in 1..5 {
        assert!(es.evals[k] >= es.evals[k - 1]);
    }
    let overlap = es.evecs.t().mapv(|z| z.conj()).dot(&es.evecs);
    let eye: nd::Array2<C64> = nd::Array2::eye(5);
    assert!(max_abs_diff(&overlap, &eye).unwrap() < 1e-10);
}

fn central_difference<F>(params: Cos2PhiParams, x0: f64, h: f64, set: F)
    -> nd::Array2<C64>
where F: Fn(&mut Cos2PhiQubit, f64) -> Cos2PhiResult<()>
{
    let mut qubit = Cos2PhiQubit::new(params).unwrap();
    set(&mut qubit, x0 + h).unwrap();
    let hi = qubit.hamiltonian_native().unwrap().to_dense();
    set(&mut qubit, x0 - h).unwrap();
    let lo = qubit.hamiltonian_native().unwrap().to_dense();
    (hi - lo).mapv(|z| z / (2.0 * h))
}

#[test]
fn derivatives_match_finite_differences() {
    let mut rng = StdRng::seed_from_u64(31415);
    for _ in 0..3 {
        let p = random_params(&mut rng);
        let qubit = Cos2PhiQubit::new(p).unwrap();

        let fd = central_difference(p, p.flux, 1e-5, Cos2PhiQubit::set_flux);
        let exact = qubit.d_hamiltonian_d_flux_native().unwrap().to_dense();
        assert!(max_abs_diff(&fd, &exact).unwrap() < 1e-5);

        let fd = central_difference(p, p.EJ, 1e-4, Cos2PhiQubit::set_EJ);
        let exact = qubit.d_hamiltonian_d_EJ_native().unwrap().to_dense();
        assert!(max_abs_diff(&fd, &exact).unwrap() < 1e-6);

        let fd = central_difference(p, p.ng, 1e-4, Cos2PhiQubit::set_ng);
        let exact = qubit.d_hamiltonian_d_ng_native().unwrap().to_dense();
        assert!(max_abs_diff(&fd, &exact).unwrap() < 1e-6);
    }
}

#[test]
fn branch_operator_identities() {
    let mut rng = StdRng::seed_from_u64(42);
    let qubit = Cos2PhiQubit::new(random_params(&mut rng)).unwrap();
    let dense = |op: Cos2PhiResult<cos2phi_sim::Operator>| op.unwrap().into_dense();

    let n_sum = dense(qubit.n_1_operator(EnergyEsys::Native))
        + dense(qubit.n_2_operator(EnergyEsys::Native));
    let n_phi = dense(qubit.n_phi_operator(EnergyEsys::Native));
    assert!(max_abs_diff(&n_sum, &n_phi).unwrap() < 1e-12);

    let phi_sum = dense(qubit.phi_1_operator(EnergyEsys::Native))
        + dense(qubit.phi_2_operator(EnergyEsys::Native));
    let phi = dense(qubit.phi_operator(EnergyEsys::Native))
        .mapv(|z| -2.0 * z);
    assert!(max_abs_diff(&phi_sum, &phi).unwrap() < 1e-12);

    let n_diff = dense(qubit.n_1_operator(EnergyEsys::Native))
        - dense(qubit.n_2_operator(EnergyEsys::Native));
    let n_theta_minus_zeta = dense(qubit.n_theta_operator(EnergyEsys::Native))
        - dense(qubit.n_zeta_operator(EnergyEsys::Native));
    assert!(max_abs_diff(&n_diff, &n_theta_minus_zeta).unwrap() < 1e-12);

    let zeta = dense(qubit.zeta_operator(EnergyEsys::Native));
    assert!(hermitian_defect(&zeta) < 1e-15);
}

#[test]
fn canonical_commutators() {
    let qubit = Cos2PhiQubit::new(small(1, 6, 5)).unwrap();
    for (x, p, dim) in [
        (qubit.phi_bare(), qubit.n_phi_bare(), qubit.dim_phi()),
        (qubit.zeta_bare(), qubit.n_zeta_bare(), qubit.dim_zeta()),
    ] {
        let (x, p) = (x.to_dense(), p.to_dense());
        let comm = x.dot(&p) - p.dot(&x);
        for k in 0..dim - 1 {
            assert_abs_diff_eq!((comm[[k, k]] - C64::i()).norm(), 0.0, epsilon = 1e-12);
        }
        let last = comm[[dim - 1, dim - 1]];
        assert_abs_diff_eq!(
            (last - C64::new(0.0, 1.0 - dim as f64)).norm(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn basis_transform_contract() {
    let qubit = Cos2PhiQubit::new(small(2, 6, 4)).unwrap();
    let es = qubit.eigensys(qubit.truncated_dim()).unwrap();
    let computed = qubit.n_1_operator(EnergyEsys::Computed).unwrap();
    let given = qubit.n_1_operator(EnergyEsys::Given(&es)).unwrap();
    assert!(!computed.is_sparse());
    assert_eq!(computed.shape(), (4, 4));
    assert!(max_abs_diff(&computed.to_dense(), &given.to_dense()).unwrap() < 1e-12);

    let native = qubit.n_1_operator(EnergyEsys::Native).unwrap();
    assert!(native.is_sparse());
    assert_eq!(native.shape(), (qubit.hilbertdim(), qubit.hilbertdim()));

    let es2 = es.truncated(2);
    let op = qubit.phi_operator(EnergyEsys::Given(&es2)).unwrap();
    assert_eq!(op.shape(), (2, 2));

    let wrong = Eigensystem {
        evals: nd::array![0.0],
        evecs: nd::Array2::zeros((3, 1)),
    };
    assert!(matches!(
        qubit.phi_operator(EnergyEsys::Given(&wrong)),
        Err(Cos2PhiError::OperatorDim { .. })
    ));
}

/// Wrapper that withdraws the junction-capacitance channel.
struct NoCapacitive(Cos2PhiQubit);

impl NoisySystem for NoCapacitive {
    fn supported_noise_channels(&self) -> Vec<NoiseChannel> {
        self.0.supported_noise_channels().into_iter()
            .filter(|ch| *ch != NoiseChannel::T1Capacitive)
            .collect()
    }

    fn energy_units(&self) -> FrequencyUnit { self.0.energy_units() }

    fn noise_eigensys(&self, count: usize) -> Cos2PhiResult<Eigensystem> {
        self.0.noise_eigensys(count)
    }
}

impl Cos2PhiBranches for NoCapacitive {
    fn circuit_params(&self) -> Cos2PhiParams { self.0.circuit_params() }
    fn phi_1_op(&self) -> Cos2PhiResult<SpMat> { self.0.phi_1_op() }
    fn phi_2_op(&self) -> Cos2PhiResult<SpMat> { self.0.phi_2_op() }
    fn n_1_op(&self) -> Cos2PhiResult<SpMat> { self.0.n_1_op() }
    fn n_2_op(&self) -> Cos2PhiResult<SpMat> { self.0.n_2_op() }
    fn n_zeta_op(&self) -> Cos2PhiResult<SpMat> { self.0.n_zeta_op() }
    fn d_hamiltonian_d_flux_op(&self) -> Cos2PhiResult<SpMat> {
        self.0.d_hamiltonian_d_flux_op()
    }
    fn d_hamiltonian_d_EJ_op(&self) -> Cos2PhiResult<SpMat> {
        self.0.d_hamiltonian_d_EJ_op()
    }
    fn d_hamiltonian_d_ng_op(&self) -> Cos2PhiResult<SpMat> {
        self.0.d_hamiltonian_d_ng_op()
    }
}

#[test]
fn supported_noise_channels() {
    let qubit = Cos2PhiQubit::new(small(2, 5, 4)).unwrap();
    let names: BTreeSet<&str>
        = qubit.supported_noise_channels().iter().map(|ch| ch.as_str()).collect();
    let expected: BTreeSet<&str>
        = [
            "tphi_1_over_f_cc",
            "tphi_1_over_f_flux",
            "tphi_1_over_f_ng",
            "t1_capacitive",
            "t1_inductive",
            "t1_purcell",
        ]
        .into_iter()
        .collect();
    assert_eq!(names, expected);

    let restricted = NoCapacitive(qubit);
    let opts = T1Options { get_rate: true, ..T1Options::default() };
    assert!(matches!(
        restricted.t1_capacitive(&QualityFactor::Default, &opts),
        Err(Cos2PhiError::UnsupportedNoiseChannel(ref name)) if name == "t1_capacitive"
    ));
    assert!(restricted.t1_inductive(&QualityFactor::Default, &opts).unwrap() > 0.0);
}

#[test]
fn wavefunction_single_basis_state() {
    let qubit = Cos2PhiQubit::new(small(2, 4, 3)).unwrap();
    let mut evecs: nd::Array2<C64> = nd::Array2::zeros((qubit.hilbertdim(), 1));
    evecs[[0, 0]] = C64::from(1.0);
    let es = Eigensystem { evals: nd::array![0.0], evecs };
    let grids = GridSpec {
        phi: Grid1d::new(-2.0 * PI, 2.0 * PI, 9),
        zeta: Grid1d::new(-PI, PI, 7),
        theta: Grid1d::new(-0.5 * PI, 1.5 * PI, 11),
    };
    let wf = qubit.wavefunction(Some(&es), 0, Some(grids)).unwrap();
    assert_eq!(wf.amplitudes().dim(), (9, 7, 11));
    assert_eq!(*wf.gridspec(), grids);

    let p = harm_osc_wavefunction(0, &grids.phi.make_linspace(), qubit.phi_osc());
    let z = harm_osc_wavefunction(0, &grids.zeta.make_linspace(), qubit.zeta_osc());
    let t = planewave(-(qubit.ncut() as i64), &grids.theta.make_linspace());
    for ((a, b, c), w) in wf.amplitudes().indexed_iter() {
        let expected = t[c] * p[a] * z[b];
        assert_abs_diff_eq!((w - expected).norm(), 0.0, epsilon = 1e-14);
    }

    assert!(matches!(
        qubit.wavefunction(Some(&es), 1, Some(grids)),
        Err(Cos2PhiError::EigenIndex { index: 1, count: 1 })
    ));
}

#[test]
fn computed_ground_state_is_normalized() {
    let qubit = Cos2PhiQubit::new(small(2, 8, 5)).unwrap();
    let grids = GridSpec {
        phi: Grid1d::new(-6.0 * PI, 6.0 * PI, 121),
        zeta: Grid1d::new(-8.0, 8.0, 81),
        theta: Grid1d::new(-0.5 * PI, 1.5 * PI, 40),
    };
    let wf = qubit.wavefunction(None, 0, Some(grids)).unwrap();
    // θ is periodic; the endpoint is sampled twice, so allow a little slack
    let norm = wf.norm_sqr();
    assert!(norm > 0.9 && norm < 1.1);
}
