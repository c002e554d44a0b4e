// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Incomplete Integrals
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Incomplete elliptic integrals F(φ, m), E(φ, m) and Π(n, φ, m).
//!
//! The amplitude is first reduced to φᵣ ∈ [−π/2, π/2] with φ = kπ + φᵣ.
//! All three integrands are even and π-periodic in θ, so each picks up
//! twice its own complete value per period:
//!   F(φ) = 2k·K + F(φᵣ),  E(φ) = 2k·E + E(φᵣ),  Π(φ) = 2k·Π + Π(φᵣ).
//!
//! On the reduced range, with s = sin φᵣ, c = cos²φᵣ, Δ² = 1 − m s²:
//!   F = s·R_F(c, Δ², 1)
//!   E = s·R_F(c, Δ², 1) − (m s³/3)·R_D(c, Δ², 1)
//!   Π = F + (n s³/3)·R_J(c, Δ², 1, 1 − n s²)

use std::f64::consts::{FRAC_PI_2, PI};

use elliptic_types::config::DuplicationConfig;
use elliptic_types::error::{EllipticError, EllipticResult};

use crate::carlson::{rd, rf, rj};
use crate::complete::{ellipe_with, ellipk_with, ellippi_with};

/// Amplitude split into whole half-turns and a remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedAmplitude {
    /// Number of half-turns k (φ = kπ + φᵣ), stored as f64 for the offset.
    pub periods: f64,
    /// Remainder φᵣ ∈ [−π/2, π/2].
    pub phi: f64,
}

impl ReducedAmplitude {
    /// True when the remainder sits exactly on ±π/2.
    pub fn is_quarter_period(&self) -> bool {
        self.phi.abs() == FRAC_PI_2
    }
}

/// Reduce φ by multiples of π. |φ| <= π/2 is returned untouched so that
/// φ = π/2 stays on the quarter period instead of wrapping to −π/2.
pub fn reduce_amplitude(phi: f64) -> ReducedAmplitude {
    if phi.abs() <= FRAC_PI_2 {
        return ReducedAmplitude { periods: 0.0, phi };
    }
    let periods = (phi / PI).round();
    let rem = (phi - periods * PI).clamp(-FRAC_PI_2, FRAC_PI_2);
    ReducedAmplitude { periods, phi: rem }
}

fn check_amplitude(function: &'static str, phi: f64, m: f64) -> EllipticResult<()> {
    if !phi.is_finite() {
        return Err(EllipticError::domain(
            function,
            format!("amplitude must be finite, got {phi}"),
        ));
    }
    if !m.is_finite() {
        return Err(EllipticError::domain(
            function,
            format!("m must be finite, got {m}"),
        ));
    }
    Ok(())
}

/// Shared Carlson arguments for the reduced amplitude.
struct Trig {
    s: f64,
    c: f64,
    delta2: f64,
}

fn trig(function: &'static str, phi: f64, m: f64) -> EllipticResult<Trig> {
    let s = phi.sin();
    let cp = phi.cos();
    let delta2 = 1.0 - m * s * s;
    if delta2 < 0.0 {
        return Err(EllipticError::domain(
            function,
            format!("1 - m sin²φ must be non-negative, got {delta2}"),
        ));
    }
    Ok(Trig {
        s,
        c: cp * cp,
        delta2,
    })
}

/// Incomplete elliptic integral of the first kind F(φ, m).
pub fn ellipf(phi: f64, m: f64) -> EllipticResult<f64> {
    ellipf_with(phi, m, &DuplicationConfig::default())
}

pub fn ellipf_with(phi: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_amplitude("ellipf", phi, m)?;
    let red = reduce_amplitude(phi);
    let partial = ellipf_reduced(red.phi, m, config)?;
    if red.periods == 0.0 {
        return Ok(partial);
    }
    Ok(2.0 * red.periods * ellipk_with(m, config)? + partial)
}

fn ellipf_reduced(phi: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    if phi == 0.0 {
        return Ok(phi);
    }
    if phi.abs() == FRAC_PI_2 {
        return Ok(phi.signum() * ellipk_with(m, config)?);
    }
    let t = trig("ellipf", phi, m)?;
    Ok(t.s * rf(t.c, t.delta2, 1.0, config)?)
}

/// Incomplete elliptic integral of the second kind E(φ, m).
pub fn ellipeinc(phi: f64, m: f64) -> EllipticResult<f64> {
    ellipeinc_with(phi, m, &DuplicationConfig::default())
}

pub fn ellipeinc_with(phi: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    check_amplitude("ellipeinc", phi, m)?;
    let red = reduce_amplitude(phi);
    let partial = ellipeinc_reduced(red.phi, m, config)?;
    if red.periods == 0.0 {
        return Ok(partial);
    }
    Ok(2.0 * red.periods * ellipe_with(m, config)? + partial)
}

fn ellipeinc_reduced(phi: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    if phi == 0.0 {
        return Ok(phi);
    }
    if phi.abs() == FRAC_PI_2 {
        return Ok(phi.signum() * ellipe_with(m, config)?);
    }
    let t = trig("ellipeinc", phi, m)?;
    let first = t.s * rf(t.c, t.delta2, 1.0, config)?;
    if m == 0.0 {
        return Ok(first);
    }
    let s3 = t.s * t.s * t.s;
    Ok(first - m * s3 / 3.0 * rd(t.c, t.delta2, 1.0, config)?)
}

/// Incomplete elliptic integral of the third kind Π(n, φ, m).
///
/// 1 − n sin²φ = 0 gives +∞ (sign of φ); 1 − n sin²φ < 0 is a domain error.
/// A full period (|φ| > π/2) additionally needs the complete Π(n, m), which
/// rejects n > 1.
pub fn ellippiinc(n: f64, phi: f64, m: f64) -> EllipticResult<f64> {
    ellippiinc_with(n, phi, m, &DuplicationConfig::default())
}

pub fn ellippiinc_with(
    n: f64,
    phi: f64,
    m: f64,
    config: &DuplicationConfig,
) -> EllipticResult<f64> {
    check_amplitude("ellippiinc", phi, m)?;
    if !n.is_finite() {
        return Err(EllipticError::domain(
            "ellippiinc",
            format!("n must be finite, got {n}"),
        ));
    }
    let red = reduce_amplitude(phi);
    let partial = ellippiinc_reduced(n, red.phi, m, config)?;
    if red.periods == 0.0 {
        return Ok(partial);
    }
    Ok(2.0 * red.periods * ellippi_with(n, m, config)? + partial)
}

fn ellippiinc_reduced(n: f64, phi: f64, m: f64, config: &DuplicationConfig) -> EllipticResult<f64> {
    if phi == 0.0 {
        return Ok(phi);
    }
    if phi.abs() == FRAC_PI_2 {
        return Ok(phi.signum() * ellippi_with(n, m, config)?);
    }
    let t = trig("ellippiinc", phi, m)?;
    let p = 1.0 - n * t.s * t.s;
    if p < 0.0 {
        return Err(EllipticError::domain(
            "ellippiinc",
            format!("1 - n sin²φ must be non-negative, got {p}"),
        ));
    }
    if p == 0.0 {
        return Ok(phi.signum() * f64::INFINITY);
    }
    let first = t.s * rf(t.c, t.delta2, 1.0, config)?;
    if n == 0.0 {
        return Ok(first);
    }
    let s3 = t.s * t.s * t.s;
    Ok(first + n * s3 / 3.0 * rj(t.c, t.delta2, 1.0, p, config)?)
}
