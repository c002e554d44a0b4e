// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Carlson Symmetric Forms
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Carlson symmetric elliptic integrals R_F, R_C, R_D, R_J.
//!
//! All four use the duplication theorem: with
//!   λ = √x√y + √y√z + √z√x
//! every argument is replaced by (a + λ)/4, which leaves the integral
//! invariant (up to an accumulated correction for R_D and R_J) and drives
//! the arguments towards their mean μ. Once every argument is within
//! `tolerance · μ` of μ, a truncated Taylor series in the normalised
//! deviations finishes the job (B. C. Carlson, Numer. Algorithms 10, 1995).
//!
//! Zero arguments never divide: √0 = 0 simply drops the matching terms of λ.

use elliptic_types::config::DuplicationConfig;
use elliptic_types::error::{EllipticError, EllipticResult};

/// Validate Carlson arguments and return how many are exactly zero.
fn check_arguments(function: &'static str, args: &[f64]) -> EllipticResult<usize> {
    let mut zeros = 0usize;
    for &a in args {
        if a.is_nan() || a.is_infinite() {
            return Err(EllipticError::domain(
                function,
                format!("arguments must be finite, got {a}"),
            ));
        }
        if a < 0.0 {
            return Err(EllipticError::domain(
                function,
                format!("arguments must be non-negative, got {a}"),
            ));
        }
        if a == 0.0 {
            zeros += 1;
        }
    }
    Ok(zeros)
}

#[inline]
fn max_deviation(args: &[f64], mu: f64) -> f64 {
    args.iter().fold(0.0_f64, |acc, &a| acc.max((a - mu).abs()))
}

fn not_converged(form: &'static str, config: &DuplicationConfig) -> EllipticError {
    log::debug!(
        "{form} duplication exceeded {} iterations (tolerance {})",
        config.max_iterations,
        config.tolerance
    );
    EllipticError::ConvergenceFailed {
        form,
        iterations: config.max_iterations,
    }
}

/// R_F(x, y, z) = ½ ∫₀^∞ dt / √((t+x)(t+y)(t+z)).
///
/// At most one argument may be zero.
pub fn rf(x: f64, y: f64, z: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    if check_arguments("rf", &[x, y, z])? > 1 {
        return Err(EllipticError::domain(
            "rf",
            "at most one argument may be zero",
        ));
    }

    let (mut x, mut y, mut z) = (x, y, z);
    for _ in 0..config.max_iterations {
        let mu = (x + y + z) / 3.0;
        if max_deviation(&[x, y, z], mu) < config.tolerance * mu {
            let dx = 1.0 - x / mu;
            let dy = 1.0 - y / mu;
            let dz = -(dx + dy);
            let e2 = dx * dy - dz * dz;
            let e3 = dx * dy * dz;
            let series = 1.0 - e2 / 10.0 + e3 / 14.0 + e2 * e2 / 24.0
                - 3.0 * e2 * e3 / 44.0
                - 5.0 * e2 * e2 * e2 / 208.0
                + 3.0 * e3 * e3 / 104.0
                + e2 * e2 * e3 / 16.0;
            return Ok(series / mu.sqrt());
        }

        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * sy + sy * sz + sz * sx;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }

    Err(not_converged("R_F", config))
}

/// R_C(x, y) = R_F(x, y, y). Requires y > 0.
pub fn rc(x: f64, y: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_arguments("rc", &[x, y])?;
    if y == 0.0 {
        return Err(EllipticError::domain("rc", "y must be positive"));
    }
    rf(x, y, y, config)
}

/// R_D(x, y, z) = R_J(x, y, z, z).
///
/// Requires z > 0 and at most one of x, y zero.
pub fn rd(x: f64, y: f64, z: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_arguments("rd", &[x, y, z])?;
    if z == 0.0 {
        return Err(EllipticError::domain("rd", "z must be positive"));
    }
    if x == 0.0 && y == 0.0 {
        return Err(EllipticError::domain(
            "rd",
            "at most one of x, y may be zero",
        ));
    }

    const C1: f64 = 3.0 / 14.0;
    const C2: f64 = 1.0 / 6.0;
    const C3: f64 = 9.0 / 22.0;
    const C4: f64 = 3.0 / 26.0;
    const C5: f64 = 0.25 * C3;
    const C6: f64 = 1.5 * C4;

    let (mut x, mut y, mut z) = (x, y, z);
    let mut sum = 0.0;
    let mut fac = 1.0;
    for _ in 0..config.max_iterations {
        let mu = 0.2 * (x + y + 3.0 * z);
        if max_deviation(&[x, y, z], mu) < config.tolerance * mu {
            let dx = (mu - x) / mu;
            let dy = (mu - y) / mu;
            let dz = (mu - z) / mu;
            let ea = dx * dy;
            let eb = dz * dz;
            let ec = ea - eb;
            let ed = ea - 6.0 * eb;
            let ee = ed + ec + ec;
            let series = 1.0
                + ed * (-C1 + C5 * ed - C6 * dz * ee)
                + dz * (C2 * ee + dz * (-C3 * ec + dz * C4 * ea));
            return Ok(3.0 * sum + fac * series / (mu * mu.sqrt()));
        }

        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        sum += fac / (sz * (z + lambda));
        fac *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }

    Err(not_converged("R_D", config))
}

/// R_J(x, y, z, p) = 3/2 ∫₀^∞ dt / ((t+p)√((t+x)(t+y)(t+z))).
///
/// Requires p > 0 (no Cauchy principal value) and at most one of x, y, z zero.
pub fn rj(x: f64, y: f64, z: f64, p: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    if check_arguments("rj", &[x, y, z])? > 1 {
        return Err(EllipticError::domain(
            "rj",
            "at most one of x, y, z may be zero",
        ));
    }
    check_arguments("rj", &[p])?;
    if p == 0.0 {
        return Err(EllipticError::domain("rj", "p must be positive"));
    }

    const C1: f64 = 3.0 / 14.0;
    const C2: f64 = 1.0 / 3.0;
    const C3: f64 = 3.0 / 22.0;
    const C4: f64 = 3.0 / 26.0;
    const C5: f64 = 0.75 * C3;
    const C6: f64 = 1.5 * C4;
    const C7: f64 = 0.5 * C2;
    const C8: f64 = C3 + C3;

    let (mut x, mut y, mut z, mut p) = (x, y, z, p);
    let mut sum = 0.0;
    let mut fac = 1.0;
    for _ in 0..config.max_iterations {
        let mu = 0.2 * (x + y + z + 2.0 * p);
        if max_deviation(&[x, y, z, p], mu) < config.tolerance * mu {
            let dx = (mu - x) / mu;
            let dy = (mu - y) / mu;
            let dz = (mu - z) / mu;
            let dp = (mu - p) / mu;
            let ea = dx * (dy + dz) + dy * dz;
            let eb = dx * dy * dz;
            let ec = dp * dp;
            let ed = ea - 3.0 * ec;
            let ee = eb + 2.0 * dp * (ea - ec);
            let series = 1.0
                + ed * (-C1 + C5 * ed - C6 * ee)
                + eb * (C7 + dp * (-C8 + dp * C4))
                + dp * ea * (C2 - dp * C3)
                - C2 * dp * ec;
            return Ok(3.0 * sum + fac * series / (mu * mu.sqrt()));
        }

        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        let alpha = p * (sx + sy + sz) + sx * sy * sz;
        let beta = p * (p + lambda) * (p + lambda);
        sum += fac * rc(alpha * alpha, beta, config)?;
        fac *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        p = 0.25 * (p + lambda);
    }

    Err(not_converged("R_J", config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{LN_2, PI};

    fn cfg() -> DuplicationConfig {
        DuplicationConfig::default()
    }

    fn assert_close(got: f64, expected: f64, tol: f64, what: &str) {
        let err = (got - expected).abs();
        assert!(
            err <= tol * expected.abs().max(1.0),
            "{what} = {got}, expected {expected}, error = {err}"
        );
    }

    // Reference values: Carlson (1995), Numer. Algorithms 10, Table 1.
    #[test]
    fn test_rf_reference_values() {
        assert_close(rf(1.0, 2.0, 0.0, &cfg()).unwrap(), 1.311_028_777_146_1, 1e-13, "RF(1,2,0)");
        assert_close(rf(2.0, 3.0, 4.0, &cfg()).unwrap(), 0.584_082_841_677_15, 1e-13, "RF(2,3,4)");
    }

    #[test]
    fn test_rf_is_symmetric() {
        let a = rf(0.5, 2.0, 7.0, &cfg()).unwrap();
        let b = rf(7.0, 0.5, 2.0, &cfg()).unwrap();
        let c = rf(2.0, 7.0, 0.5, &cfg()).unwrap();
        assert_close(a, b, 1e-15, "RF permutation");
        assert_close(a, c, 1e-15, "RF permutation");
    }

    #[test]
    fn test_rf_equal_arguments() {
        // R_F(x,x,x) = 1/√x, converges before any duplication.
        assert_close(rf(4.0, 4.0, 4.0, &cfg()).unwrap(), 0.5, 1e-15, "RF(4,4,4)");
    }

    #[test]
    fn test_rc_reference_values() {
        assert_close(rc(0.0, 0.25, &cfg()).unwrap(), PI, 1e-14, "RC(0,1/4)");
        assert_close(rc(2.25, 2.0, &cfg()).unwrap(), LN_2, 1e-14, "RC(9/4,2)");
    }

    #[test]
    fn test_rd_reference_values() {
        assert_close(rd(0.0, 2.0, 1.0, &cfg()).unwrap(), 1.797_210_352_103_4, 1e-13, "RD(0,2,1)");
        assert_close(rd(2.0, 3.0, 4.0, &cfg()).unwrap(), 0.165_105_272_942_61, 1e-13, "RD(2,3,4)");
    }

    #[test]
    fn test_rj_reference_values() {
        assert_close(rj(0.0, 1.0, 2.0, 3.0, &cfg()).unwrap(), 0.776_886_237_785_82, 1e-13, "RJ(0,1,2,3)");
        assert_close(rj(2.0, 3.0, 4.0, 5.0, &cfg()).unwrap(), 0.142_975_796_671_57, 1e-13, "RJ(2,3,4,5)");
    }

    #[test]
    fn test_rj_with_p_equal_z_is_rd() {
        let rj_val = rj(0.3, 1.7, 2.2, 2.2, &cfg()).unwrap();
        let rd_val = rd(0.3, 1.7, 2.2, &cfg()).unwrap();
        assert_close(rj_val, rd_val, 1e-14, "RJ(x,y,z,z)");
    }

    #[test]
    fn test_negative_argument_is_domain_error() {
        assert!(rf(-1.0, 1.0, 1.0, &cfg()).unwrap_err().is_domain());
        assert!(rc(1.0, -1.0, &cfg()).unwrap_err().is_domain());
        assert!(rd(1.0, 1.0, -1.0, &cfg()).unwrap_err().is_domain());
        assert!(rj(1.0, 1.0, 1.0, -1.0, &cfg()).unwrap_err().is_domain());
    }

    #[test]
    fn test_nan_argument_is_domain_error() {
        assert!(rf(f64::NAN, 1.0, 1.0, &cfg()).unwrap_err().is_domain());
        assert!(rj(1.0, 1.0, 1.0, f64::NAN, &cfg()).unwrap_err().is_domain());
    }

    #[test]
    fn test_too_many_zeros_is_domain_error() {
        assert!(rf(0.0, 0.0, 1.0, &cfg()).unwrap_err().is_domain());
        assert!(rc(1.0, 0.0, &cfg()).unwrap_err().is_domain());
        assert!(rd(0.0, 0.0, 1.0, &cfg()).unwrap_err().is_domain());
        assert!(rd(1.0, 1.0, 0.0, &cfg()).unwrap_err().is_domain());
        assert!(rj(0.0, 0.0, 1.0, 1.0, &cfg()).unwrap_err().is_domain());
        assert!(rj(1.0, 1.0, 1.0, 0.0, &cfg()).unwrap_err().is_domain());
    }

    #[test]
    fn test_single_zero_is_allowed() {
        assert!(rf(0.0, 1.0, 1.0, &cfg()).unwrap().is_finite());
        assert!(rd(0.0, 1.0, 1.0, &cfg()).unwrap().is_finite());
        assert!(rj(0.0, 1.0, 1.0, 0.5, &cfg()).unwrap().is_finite());
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let tight = DuplicationConfig {
            tolerance: 1e-3,
            max_iterations: 1,
        };
        let err = rf(1.0, 2.0, 0.0, &tight).unwrap_err();
        assert!(matches!(
            err,
            EllipticError::ConvergenceFailed { form: "R_F", iterations: 1 }
        ));
        assert!(matches!(
            rd(0.0, 2.0, 1.0, &tight).unwrap_err(),
            EllipticError::ConvergenceFailed { form: "R_D", .. }
        ));
        assert!(matches!(
            rj(0.0, 1.0, 2.0, 3.0, &tight).unwrap_err(),
            EllipticError::ConvergenceFailed { .. }
        ));
    }

    #[test]
    fn test_extreme_ratio_converges_within_default_cap() {
        let v = rf(1e-300, 1.0, 1e300, &cfg()).unwrap();
        assert!(v.is_finite() && v > 0.0);
    }
}
