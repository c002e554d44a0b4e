// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — AGM / Landen Series
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Elliptic integrals by the arithmetic-geometric mean.
//!
//! Independent of the Carlson forms; used to cross-check them.
//!
//! With a₀ = 1, b₀ = √(1−m), c₀² = m and
//!   aₙ₊₁ = (aₙ + bₙ)/2,  bₙ₊₁ = √(aₙbₙ),  cₙ₊₁ = (aₙ − bₙ)/2:
//!   K(m)    = π / (2 a_N)
//!   E(m)    = K(m) · (1 − ½ Σ 2ⁿ cₙ²)
//!   F(φ, m) = φ_N / (2^N a_N),  φₙ₊₁ = φₙ + atan((bₙ/aₙ) tan φₙ) + π·round(φₙ/π)
//!   E(φ, m) = F(φ, m) · (1 − ½ Σ 2ⁿ cₙ²) + Σₙ≥₁ cₙ sin φₙ
//! (Abramowitz & Stegun 17.6). The complete third kind carries an extra
//! Newton-like sequence pₙ (p₀ = √(1−n)) towards √(aₙbₙ):
//!   Π(n, m) = π/(4 a_N) · (2 + n/(1−n) Σ Qₙ),
//!   εₙ = (pₙ² − aₙbₙ)/(pₙ² + aₙbₙ),  Qₙ₊₁ = Qₙ εₙ / 2,  Q₀ = 1.
//!
//! Only 0 <= m <= 1 is accepted.

use std::f64::consts::{FRAC_PI_2, PI};

use elliptic_types::config::AgmConfig;
use elliptic_types::error::{EllipticError, EllipticResult};

fn check_unit_parameter(function: &'static str, m: f64) -> EllipticResult<()> {
    if !(0.0..=1.0).contains(&m) {
        return Err(EllipticError::domain(
            function,
            format!("AGM evaluation requires 0 <= m <= 1, got {m}"),
        ));
    }
    Ok(())
}

fn not_converged(form: &'static str, config: &AgmConfig) -> EllipticError {
    log::debug!(
        "{form} AGM exceeded {} iterations (tolerance {})",
        config.max_iterations,
        config.tolerance
    );
    EllipticError::ConvergenceFailed {
        form,
        iterations: config.max_iterations,
    }
}

/// K(m) and E(m) from one AGM run. m = 1 gives (+∞, 1).
pub fn complete_pair(m: f64, config: &AgmConfig) -> EllipticResult<(f64, f64)> {
    check_unit_parameter("agm_complete", m)?;
    if m == 1.0 {
        return Ok((f64::INFINITY, 1.0));
    }

    let mut a = 1.0_f64;
    let mut b = (1.0 - m).sqrt();
    let mut pow2 = 1.0;
    let mut c2sum = m;
    for _ in 0..config.max_iterations {
        let c = 0.5 * (a - b);
        let a_next = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = a_next;
        pow2 *= 2.0;
        c2sum += pow2 * c * c;
        if c.abs() <= config.tolerance * a {
            let k = FRAC_PI_2 / a;
            return Ok((k, k * (1.0 - 0.5 * c2sum)));
        }
    }
    Err(not_converged("AGM(K,E)", config))
}

/// Complete third kind Π(n, m). n = 1 or m = 1 gives +∞; n > 1 is rejected.
pub fn complete_pi(n: f64, m: f64, config: &AgmConfig) -> EllipticResult<f64> {
    check_unit_parameter("agm_ellippi", m)?;
    if !n.is_finite() || n > 1.0 {
        return Err(EllipticError::domain(
            "agm_ellippi",
            format!("n must be finite and <= 1, got {n}"),
        ));
    }
    if n == 1.0 || m == 1.0 {
        return Ok(f64::INFINITY);
    }
    if n == 0.0 {
        return complete_pair(m, config).map(|(k, _)| k);
    }

    let mut a = 1.0_f64;
    let mut g = (1.0 - m).sqrt();
    let mut p = (1.0 - n).sqrt();
    let mut q = 1.0;
    let mut qsum = 1.0;
    for _ in 0..config.max_iterations {
        let ag = a * g;
        let p2 = p * p;
        let eps = (p2 - ag) / (p2 + ag);
        p = (p2 + ag) / (2.0 * p);
        q *= 0.5 * eps;
        qsum += q;

        let c = 0.5 * (a - g);
        let a_next = 0.5 * (a + g);
        g = (a * g).sqrt();
        a = a_next;

        if c.abs() <= config.tolerance * a && q.abs() <= config.tolerance * qsum.abs() {
            return Ok(PI / (4.0 * a) * (2.0 + n / (1.0 - n) * qsum));
        }
    }
    Err(not_converged("AGM(Pi)", config))
}

/// F(φ, m) and E(φ, m) on the reduced range (−π/2, π/2) by descending Landen.
///
/// m = 1 uses the closed forms asinh(tan φ) and sin φ.
pub fn landen_pair(phi: f64, m: f64, config: &AgmConfig) -> EllipticResult<(f64, f64)> {
    check_unit_parameter("agm_landen", m)?;
    if m == 1.0 {
        return Ok((phi.tan().asinh(), phi.sin()));
    }

    let mut a = 1.0_f64;
    let mut b = (1.0 - m).sqrt();
    let mut phase = phi;
    let mut pow2 = 1.0;
    let mut c2sum = m;
    let mut sin_sum = 0.0;
    for _ in 0..config.max_iterations {
        phase += (b / a * phase.tan()).atan() + PI * (phase / PI).round();
        let c = 0.5 * (a - b);
        let a_next = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = a_next;
        pow2 *= 2.0;
        c2sum += pow2 * c * c;
        sin_sum += c * phase.sin();
        if c.abs() <= config.tolerance * a {
            let f = phase / (pow2 * a);
            return Ok((f, f * (1.0 - 0.5 * c2sum) + sin_sum));
        }
    }
    Err(not_converged("Landen", config))
}
