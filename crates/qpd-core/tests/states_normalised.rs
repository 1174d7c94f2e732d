use qpd_core::{Complex64, GaussianPacket, HarmonicEigenstate, Hbar, Wavefunction};
use proptest::prelude::*;

fn trapezoid_norm<W: Wavefunction>(psi: &W, t: f64) -> f64 {
    let h = 0.01;
    let steps = 2000;
    let mut acc = 0.0;
    for i in 0..=steps {
        let x = -10.0 + h * i as f64;
        let weight = if i == 0 || i == steps { 0.5 } else { 1.0 };
        acc += weight * psi.amplitude(x, t).norm_sqr();
    }
    acc * h
}

#[test]
fn gaussian_packet_is_normalised() {
    let packet = GaussianPacket::new(1.3, Hbar::NATURAL)
        .expect("packet")
        .displaced(0.4, 2.0);
    assert!((trapezoid_norm(&packet, 0.0) - 1.0).abs() < 1e-9);
}

#[test]
fn eigenstates_are_normalised() {
    for n in 0..6 {
        let state = HarmonicEigenstate::new(n, 1.0, 1.0, Hbar::NATURAL).expect("state");
        let norm = trapezoid_norm(&state, 0.3);
        assert!((norm - 1.0).abs() < 1e-9, "n={n} norm={norm}");
    }
}

#[test]
fn closures_are_wavefunctions() {
    let psi = |x: f64, t: f64| Complex64::new(x, t);
    assert_eq!(psi.amplitude(2.0, 3.0), Complex64::new(2.0, 3.0));
}

#[test]
fn eigenstate_wigner_is_negative_at_origin_for_odd_n() {
    let state = HarmonicEigenstate::new(1, 1.0, 1.0, Hbar::NATURAL).expect("state");
    assert!((state.wigner(0.0, 0.0) + 1.0 / std::f64::consts::PI).abs() < 1e-14);
}

proptest! {
    #[test]
    fn ground_state_matches_gaussian_packet(x in -4.0f64..4.0, p in -4.0f64..4.0, sigma in 0.5f64..2.0) {
        let ground = HarmonicEigenstate::new(0, sigma, 1.0, Hbar::NATURAL).unwrap();
        let packet = GaussianPacket::new(sigma, Hbar::NATURAL).unwrap();
        prop_assert!((ground.wigner(x, p) - packet.wigner(x, p)).abs() < 1e-12);
        prop_assert!((ground.amplitude(x, 0.0) - packet.amplitude(x, 0.0)).norm() < 1e-12);
    }
}
