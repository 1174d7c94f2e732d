use std::f64::consts::PI;

use qpd_core::{GaussianPacket, HarmonicEigenstate, Hbar};
use qpd_wigner::{evaluate, evaluate_report, evaluate_with, PhasePoint, WignerOpts};

fn natural() -> WignerOpts {
    let mut opts = WignerOpts::natural_units();
    opts.quad.abs_tol = 1e-12;
    opts.quad.rel_tol = 1e-12;
    opts
}

fn ground() -> GaussianPacket {
    GaussianPacket::new(1.0, Hbar::NATURAL).expect("packet")
}

#[test]
fn ground_state_peak_is_one_over_pi() {
    let value = evaluate_with(&ground(), PhasePoint::new(0.0, 0.0), &natural()).unwrap();
    assert!((value - 1.0 / PI).abs() < 1e-10, "W(0,0) = {value}");
}

#[test]
fn large_momentum_decays_to_zero() {
    let value = evaluate_with(&ground(), PhasePoint::new(0.0, 10.0), &natural()).unwrap();
    assert!(value.abs() < 1e-10, "W(0,10) = {value}");
    let near = evaluate_with(&ground(), PhasePoint::new(0.0, 2.0), &natural()).unwrap();
    assert!(value.abs() < near);
}

#[test]
fn ground_state_matches_closed_form_on_grid() {
    let packet = ground();
    let opts = natural();
    for i in -4..=4 {
        for j in -4..=4 {
            let (x, p) = (0.5 * f64::from(i), 0.5 * f64::from(j));
            let value = evaluate_with(&packet, PhasePoint::new(x, p), &opts).unwrap();
            let expected = (-(x * x) - p * p).exp() / PI;
            assert!(
                (value - expected).abs() < 1e-9,
                "W({x},{p}) = {value}, expected {expected}"
            );
        }
    }
}

#[test]
fn displaced_packet_peaks_at_its_centre() {
    let packet = GaussianPacket::new(0.7, Hbar::NATURAL)
        .unwrap()
        .displaced(1.2, -2.0);
    let opts = natural();
    for &(x, p) in &[(1.2, -2.0), (0.5, -1.0), (2.0, -2.5), (0.0, 0.0)] {
        let value = evaluate_with(&packet, PhasePoint::new(x, p), &opts).unwrap();
        assert!((value - packet.wigner(x, p)).abs() < 1e-9, "W({x},{p}) = {value}");
    }
}

#[test]
fn first_excited_state_is_negative_at_origin() {
    let state = HarmonicEigenstate::new(1, 1.0, 1.0, Hbar::NATURAL).unwrap();
    let value = evaluate_with(&state, PhasePoint::new(0.0, 0.0), &natural()).unwrap();
    assert!((value + 1.0 / PI).abs() < 1e-10, "W(0,0) = {value}");
}

#[test]
fn excited_states_match_laguerre_closed_form() {
    let opts = natural();
    for n in 2..5 {
        let state = HarmonicEigenstate::new(n, 1.0, 1.0, Hbar::NATURAL).unwrap();
        for &(x, p) in &[(0.0, 0.0), (0.8, -0.3), (-1.5, 1.1), (2.0, 2.0)] {
            let value = evaluate_with(&state, PhasePoint::new(x, p), &opts).unwrap();
            let expected = state.wigner(x, p);
            assert!(
                (value - expected).abs() < 1e-9,
                "n={n} W({x},{p}) = {value}, expected {expected}"
            );
        }
    }
}

#[test]
fn stationary_states_do_not_evolve() {
    let state = HarmonicEigenstate::new(2, 1.0, 3.0, Hbar::NATURAL).unwrap();
    let opts = natural();
    let at_rest = evaluate_with(&state, PhasePoint::new(0.4, 0.6), &opts).unwrap();
    for &t in &[0.5, 1.7, 10.0] {
        let later = evaluate_with(&state, PhasePoint::new(0.4, 0.6).at_time(t), &opts).unwrap();
        assert!((later - at_rest).abs() < 1e-10);
    }
}

#[test]
fn hbar_scales_kernel_and_normalisation() {
    let hbar = Hbar::new(0.25).unwrap();
    let packet = GaussianPacket::new(0.5, hbar).unwrap();
    let opts = natural().with_hbar(hbar);
    for &(x, p) in &[(0.0, 0.0), (0.3, 0.2), (-0.4, -0.6)] {
        let value = evaluate_with(&packet, PhasePoint::new(x, p), &opts).unwrap();
        assert!(
            (value - packet.wigner(x, p)).abs() < 1e-8,
            "W({x},{p}) = {value}, expected {}",
            packet.wigner(x, p)
        );
    }
}

#[test]
fn si_units_with_matching_length_scale() {
    let sigma = 1e-10;
    let packet = GaussianPacket::new(sigma, Hbar::SI).unwrap();
    let mut opts = WignerOpts::default();
    opts.quad.length_scale = sigma;
    let p = Hbar::SI.value() / sigma;
    for &(x, p) in &[(0.0, 0.0), (sigma, p), (-0.5 * sigma, 2.0 * p)] {
        let report = evaluate_report(&packet, PhasePoint::new(x, p), &opts).unwrap();
        let expected = packet.wigner(x, p);
        assert!(
            ((report.value - expected) / expected).abs() < 1e-6,
            "W({x},{p}) = {}, expected {expected}",
            report.value
        );
    }
}

#[test]
fn default_evaluate_uses_si_hbar() {
    let value = evaluate(&ground(), 0.0, 0.0, 0.0).unwrap();
    assert!((value * PI * Hbar::SI.value() - 1.0).abs() < 1e-7);
}

#[test]
fn report_exposes_diagnostics() {
    let report = evaluate_report(&ground(), PhasePoint::new(0.3, -0.2), &natural()).unwrap();
    assert!(report.status == qpd_wigner::QuadStatus::Converged);
    assert!(report.evaluations >= 60);
    assert!(report.abs_error <= 1e-12);
    assert!(report.imaginary_residue.abs() < 1e-12);
    assert_eq!(report.hbar, Hbar::NATURAL);
    assert_eq!(report.report_hash.len(), 64);
}

#[test]
fn closures_are_accepted_directly() {
    let psi = |x: f64, _t: f64| {
        qpd_wigner::Complex64::new(PI.powf(-0.25) * (-0.5 * x * x).exp(), 0.0)
    };
    let value = evaluate_with(&psi, PhasePoint::new(0.0, 0.0), &natural()).unwrap();
    assert!((value - 1.0 / PI).abs() < 1e-10);
}

#[test]
fn non_finite_query_yields_nan() {
    let value = evaluate_with(&ground(), PhasePoint::new(f64::NAN, 0.0), &natural()).unwrap();
    assert!(value.is_nan());
}
