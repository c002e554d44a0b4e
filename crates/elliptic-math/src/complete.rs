// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Complete Integrals
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Complete elliptic integrals K(m), E(m) and Π(n, m).
//!
//! Parameter convention matches scipy: m = k². Evaluated through the
//! Carlson forms at amplitude π/2:
//!   K(m)    = R_F(0, 1−m, 1)
//!   E(m)    = R_F(0, 1−m, 1) − (m/3)·R_D(0, 1−m, 1)
//!   Π(n, m) = R_F(0, 1−m, 1) + (n/3)·R_J(0, 1−m, 1, 1−n)

use std::f64::consts::FRAC_PI_2;

use elliptic_types::config::DuplicationConfig;
use elliptic_types::error::{EllipticError, EllipticResult};

use crate::carlson::{rd, rf, rj};

pub(crate) fn check_parameter(function: &'static str, m: f64) -> EllipticResult<()> {
    if m.is_nan() {
        return Err(EllipticError::domain(function, "m is NaN"));
    }
    if m > 1.0 {
        return Err(EllipticError::domain(
            function,
            format!("complete integral requires m <= 1, got {m}"),
        ));
    }
    if m.is_infinite() {
        return Err(EllipticError::domain(function, "m must be finite"));
    }
    Ok(())
}

pub(crate) fn check_characteristic(function: &'static str, n: f64) -> EllipticResult<()> {
    if n.is_nan() || n.is_infinite() {
        return Err(EllipticError::domain(
            function,
            format!("n must be finite, got {n}"),
        ));
    }
    if n > 1.0 {
        return Err(EllipticError::domain(
            function,
            format!("n > 1 lies outside the principal branch, got {n}"),
        ));
    }
    Ok(())
}

/// Complete elliptic integral of the first kind K(m).
///
/// K(0) = π/2, K(1) = +∞.
pub fn ellipk(m: f64) -> EllipticResult<f64> {
    ellipk_with(m, &DuplicationConfig::default())
}

pub fn ellipk_with(m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_parameter("ellipk", m)?;
    if m == 1.0 {
        return Ok(f64::INFINITY);
    }
    if m == 0.0 {
        return Ok(FRAC_PI_2);
    }
    rf(0.0, 1.0 - m, 1.0, config)
}

/// Complete elliptic integral of the second kind E(m).
///
/// E(0) = π/2, E(1) = 1.
pub fn ellipe(m: f64) -> EllipticResult<f64> {
    ellipe_with(m, &DuplicationConfig::default())
}

pub fn ellipe_with(m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_parameter("ellipe", m)?;
    if m == 1.0 {
        return Ok(1.0);
    }
    if m == 0.0 {
        return Ok(FRAC_PI_2);
    }
    let y = 1.0 - m;
    Ok(rf(0.0, y, 1.0, config)? - m / 3.0 * rd(0.0, y, 1.0, config)?)
}

/// Complete elliptic integral of the third kind Π(n, m).
///
/// Π(1, m) = +∞ and Π(n, 1) = +∞; n > 1 is a domain error.
pub fn ellippi(n: f64, m: f64) -> EllipticResult<f64> {
    ellippi_with(n, m, &DuplicationConfig::default())
}

pub fn ellippi_with(n: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_characteristic("ellippi", n)?;
    check_parameter("ellippi", m)?;
    if n == 1.0 || m == 1.0 {
        return Ok(f64::INFINITY);
    }
    if n == 0.0 {
        return ellipk_with(m, config);
    }
    let y = 1.0 - m;
    Ok(rf(0.0, y, 1.0, config)? + n / 3.0 * rj(0.0, y, 1.0, 1.0 - n, config)?)
}
