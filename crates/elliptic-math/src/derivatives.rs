// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Derivative Rules
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form partial derivatives of the six integrals.
//!
//! Every rule is expressed through K, E, Π, F, E(φ), Π(φ) as returned by a
//! backend, so gradients never differentiate through the duplication loop.
//! With Δ = √(1 − m sin²φ):
//!
//! | rule              | value |
//! |-------------------|-------|
//! | `ellipk_dm`       | E/(2m(1−m)) − K/(2m) |
//! | `ellipe_dm`       | (E − K)/(2m) |
//! | `ellippi_dn`      | [E + (m−n)K/n + (n²−m)Π/n] / (2(m−n)(n−1)) |
//! | `ellippi_dm`      | (E/(m−1) + Π) / (2(n−m)) |
//! | `ellipf_dphi`     | 1/Δ |
//! | `ellipf_dm`       | E/(2m(1−m)) − F/(2m) − sin2φ/(4(1−m)Δ) |
//! | `ellipeinc_dphi`  | Δ |
//! | `ellipeinc_dm`    | (E − F)/(2m) |
//! | `ellippiinc_dn`   | [E + (m−n)F/n + (n²−m)Π/n − nΔ sin2φ/(2(1−n sin²φ))] / (2(m−n)(n−1)) |
//! | `ellippiinc_dphi` | 1/(Δ(1 − n sin²φ)) |
//! | `ellippiinc_dm`   | [E/(m−1) + Π − m sin2φ/(2(m−1)Δ)] / (2(n−m)) |
//!
//! Removable singularities are handled in two ways. For |m| below
//! [`SMALL_PARAMETER`] the m-rules switch to their Maclaurin series. For the
//! Π rules, when n is within the backend's bridge radius of 0, m or (for a
//! partial quarter period) 1, the rule is sampled at four points straddling
//! the singular cluster and interpolated by a cubic.

use std::f64::consts::FRAC_PI_2;

use elliptic_types::constants::SMALL_PARAMETER;
use elliptic_types::error::{EllipticError, EllipticResult};

use crate::backend::EllipticBackend;
use crate::incomplete::reduce_amplitude;

// ── Removable singularities ──────────────────────────────────────────

/// Cubic Lagrange interpolation through four nodes.
fn lagrange(nodes: &[f64; 4], values: &[f64; 4], x: f64) -> f64 {
    let mut total = 0.0;
    for i in 0..4 {
        let mut basis = 1.0;
        for j in 0..4 {
            if i != j {
                basis *= (x - nodes[j]) / (nodes[i] - nodes[j]);
            }
        }
        total += values[i] * basis;
    }
    total
}

/// Node spacing never exceeds this fraction of the gap between the singular
/// cluster and the pole at `upper`.
const POLE_CLEARANCE: f64 = 128.0;

/// Evaluate `rule` at `n`, bridging over any removable singularity in
/// `singular` that lies within `radius`. `upper` is the nearest
/// non-removable pole above the cluster; nodes stay well short of it.
fn bridge<F>(
    function: &'static str,
    n: f64,
    singular: &[f64],
    upper: f64,
    radius: f64,
    rule: F,
) -> EllipticResult<f64>
where
    F: Fn(f64) -> EllipticResult<f64>,
{
    let (mut lo, mut hi) = singular
        .iter()
        .filter(|&&s| (n - s).abs() < radius)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
    if lo > hi {
        return rule(n);
    }

    // Absorb neighbours close enough to land between the nodes.
    let reach = 3.0 * radius;
    loop {
        let mut grown = false;
        for &s in singular {
            if s < lo && lo - s <= reach {
                lo = s;
                grown = true;
            }
            if s > hi && s - hi <= reach {
                hi = s;
                grown = true;
            }
        }
        if !grown {
            break;
        }
    }

    let h = radius.min((upper - hi) / POLE_CLEARANCE);
    if h <= 0.0 || n < lo - h || n > hi + h {
        return rule(n);
    }
    let nodes = [lo - 2.0 * h, lo - h, hi + h, hi + 2.0 * h];
    let mut values = [0.0; 4];
    for (value, &node) in values.iter_mut().zip(nodes.iter()) {
        *value = rule(node)?;
    }
    log::trace!("{function}: bridging n={n} over [{lo}, {hi}] with nodes {nodes:?}");
    Ok(lagrange(&nodes, &values, n))
}

/// Wallis integrals Jₖ(φ) = ∫₀^φ sin^{2k}θ dθ for k = 0..4.
fn wallis(phi: f64) -> [f64; 5] {
    let s = phi.sin();
    let c = phi.cos();
    let mut j = [0.0; 5];
    j[0] = phi;
    let mut odd_power = s;
    for k in 1..5 {
        let kf = k as f64;
        j[k] = (2.0 * kf - 1.0) / (2.0 * kf) * j[k - 1] - odd_power * c / (2.0 * kf);
        odd_power *= s * s;
    }
    j
}

fn check_finite(function: &'static str, name: &str, value: f64) -> EllipticResult<()> {
    if !value.is_finite() {
        return Err(EllipticError::domain(
            function,
            format!("{name} must be finite, got {value}"),
        ));
    }
    Ok(())
}

/// Δ = √(1 − m sin²φ); negative radicand is a domain error.
fn delta(function: &'static str, phi: f64, m: f64) -> EllipticResult<f64> {
    check_finite(function, "phi", phi)?;
    check_finite(function, "m", m)?;
    let d2 = 1.0 - m * phi.sin().powi(2);
    if d2 < 0.0 {
        return Err(EllipticError::domain(
            function,
            format!("1 - m sin²φ must be non-negative, got {d2}"),
        ));
    }
    Ok(d2.sqrt())
}

fn incomplete_unit_parameter(function: &'static str, m: f64) -> EllipticResult<()> {
    if m == 1.0 {
        return Err(EllipticError::domain(
            function,
            "m = 1 is not supported by this m-rule",
        ));
    }
    Ok(())
}

// ── Complete integrals ───────────────────────────────────────────────

/// ∂K/∂m. K → +∞ at m = 1, so the derivative is +∞ there.
pub fn ellipk_dm<B: EllipticBackend + ?Sized>(backend: &B, m: f64) -> EllipticResult<f64> {
    if m == 1.0 {
        return Ok(f64::INFINITY);
    }
    if m.abs() < SMALL_PARAMETER {
        log::trace!("ellipk_dm: small-m series at m={m}");
        return Ok(FRAC_PI_2 * (0.25 + m * (9.0 / 32.0 + m * (75.0 / 256.0 + m * 1225.0 / 4096.0))));
    }
    let k = backend.ellipk(m)?;
    let e = backend.ellipe(m)?;
    Ok(e / (2.0 * m * (1.0 - m)) - k / (2.0 * m))
}

/// ∂E/∂m. −∞ at m = 1.
pub fn ellipe_dm<B: EllipticBackend + ?Sized>(backend: &B, m: f64) -> EllipticResult<f64> {
    if m == 1.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if m.abs() < SMALL_PARAMETER {
        log::trace!("ellipe_dm: small-m series at m={m}");
        return Ok(-FRAC_PI_2 * (0.25 + m * (3.0 / 32.0 + m * (15.0 / 256.0 + m * 175.0 / 4096.0))));
    }
    let k = backend.ellipk(m)?;
    let e = backend.ellipe(m)?;
    Ok((e - k) / (2.0 * m))
}

/// ∂Π(n, m)/∂n. +∞ at the pole n = 1 and on m = 1; n > 1 is rejected.
pub fn ellippi_dn<B: EllipticBackend + ?Sized>(backend: &B, n: f64, m: f64) -> EllipticResult<f64> {
    check_finite("ellippi_dn", "n", n)?;
    if n > 1.0 {
        return Err(EllipticError::domain(
            "ellippi_dn",
            format!("n > 1 lies outside the principal branch, got {n}"),
        ));
    }
    if n == 1.0 || m == 1.0 {
        return Ok(f64::INFINITY);
    }
    let k = backend.ellipk(m)?;
    let e = backend.ellipe(m)?;
    bridge("ellippi_dn", n, &[0.0, m], 1.0, backend.bridge_radius(), |n| {
        let p = backend.ellippi(n, m)?;
        Ok((e + (m - n) * k / n + (n * n - m) * p / n) / (2.0 * (m - n) * (n - 1.0)))
    })
}

/// ∂Π(n, m)/∂m. +∞ on m = 1.
pub fn ellippi_dm<B: EllipticBackend + ?Sized>(backend: &B, n: f64, m: f64) -> EllipticResult<f64> {
    check_finite("ellippi_dm", "n", n)?;
    if n > 1.0 {
        return Err(EllipticError::domain(
            "ellippi_dm",
            format!("n > 1 lies outside the principal branch, got {n}"),
        ));
    }
    if n == 1.0 || m == 1.0 {
        return Ok(f64::INFINITY);
    }
    let e = backend.ellipe(m)?;
    bridge("ellippi_dm", n, &[m], 1.0, backend.bridge_radius(), |n| {
        let p = backend.ellippi(n, m)?;
        Ok((e / (m - 1.0) + p) / (2.0 * (n - m)))
    })
}

// ── Incomplete integrals ─────────────────────────────────────────────

/// ∂F/∂φ = 1/Δ.
pub fn ellipf_dphi(phi: f64, m: f64) -> EllipticResult<f64> {
    Ok(1.0 / delta("ellipf_dphi", phi, m)?)
}

/// ∂F/∂m.
pub fn ellipf_dm<B: EllipticBackend + ?Sized>(backend: &B, phi: f64, m: f64) -> EllipticResult<f64> {
    let d = delta("ellipf_dm", phi, m)?;
    incomplete_unit_parameter("ellipf_dm", m)?;
    if m.abs() < SMALL_PARAMETER {
        log::trace!("ellipf_dm: small-m series at phi={phi}, m={m}");
        let j = wallis(phi);
        return Ok(0.5 * j[1] + m * (0.75 * j[2] + m * (15.0 / 16.0 * j[3] + m * 35.0 / 32.0 * j[4])));
    }
    let f = backend.ellipf(phi, m)?;
    let e = backend.ellipeinc(phi, m)?;
    Ok(e / (2.0 * m * (1.0 - m)) - f / (2.0 * m) - (2.0 * phi).sin() / (4.0 * (1.0 - m) * d))
}

/// ∂E(φ, m)/∂φ = Δ.
pub fn ellipeinc_dphi(phi: f64, m: f64) -> EllipticResult<f64> {
    delta("ellipeinc_dphi", phi, m)
}

/// ∂E(φ, m)/∂m. Finite at m = 1 inside a quarter period, −∞ past it.
pub fn ellipeinc_dm<B: EllipticBackend + ?Sized>(backend: &B, phi: f64, m: f64) -> EllipticResult<f64> {
    delta("ellipeinc_dm", phi, m)?;
    if m.abs() < SMALL_PARAMETER {
        log::trace!("ellipeinc_dm: small-m series at phi={phi}, m={m}");
        let j = wallis(phi);
        return Ok(-0.5 * j[1] - m * (0.25 * j[2] + m * (3.0 / 16.0 * j[3] + m * 5.0 / 32.0 * j[4])));
    }
    let f = backend.ellipf(phi, m)?;
    let e = backend.ellipeinc(phi, m)?;
    Ok((e - f) / (2.0 * m))
}

/// Where the incomplete Π rules may sample n, and which points are removable.
struct CharacteristicRange {
    singular: Vec<f64>,
    upper: f64,
    /// A whole quarter period is covered, so n = 1 is a genuine pole.
    full: bool,
}

fn characteristic_range(phi: f64, m: f64) -> CharacteristicRange {
    let red = reduce_amplitude(phi);
    if red.periods == 0.0 && !red.is_quarter_period() {
        let s2 = phi.sin().powi(2);
        let upper = if s2 > 0.0 { 1.0 / s2 } else { f64::INFINITY };
        CharacteristicRange {
            singular: vec![0.0, m, 1.0],
            upper,
            full: false,
        }
    } else {
        CharacteristicRange {
            singular: vec![0.0, m],
            upper: 1.0,
            full: true,
        }
    }
}

fn check_characteristic(function: &'static str, n: f64, range: &CharacteristicRange) -> EllipticResult<()> {
    check_finite(function, "n", n)?;
    if n > range.upper {
        return Err(EllipticError::domain(
            function,
            format!("n = {n} passes the pole of the integrand (limit {})", range.upper),
        ));
    }
    Ok(())
}

/// ∂Π(n, φ, m)/∂n.
pub fn ellippiinc_dn<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: f64,
    phi: f64,
    m: f64,
) -> EllipticResult<f64> {
    let d = delta("ellippiinc_dn", phi, m)?;
    let range = characteristic_range(phi, m);
    check_characteristic("ellippiinc_dn", n, &range)?;
    if phi == 0.0 {
        return Ok(0.0);
    }
    if n == range.upper || (range.full && m == 1.0) {
        return Ok(phi.signum() * f64::INFINITY);
    }

    let s2 = phi.sin().powi(2);
    let sin2 = (2.0 * phi).sin();
    let f = backend.ellipf(phi, m)?;
    let e = backend.ellipeinc(phi, m)?;
    bridge("ellippiinc_dn", n, &range.singular, range.upper, backend.bridge_radius(), |n| {
        let p = backend.ellippiinc(n, phi, m)?;
        let boundary = n * d * sin2 / (2.0 * (1.0 - n * s2));
        Ok((e + (m - n) * f / n + (n * n - m) * p / n - boundary) / (2.0 * (m - n) * (n - 1.0)))
    })
}

/// ∂Π(n, φ, m)/∂φ, the integrand at φ.
pub fn ellippiinc_dphi(n: f64, phi: f64, m: f64) -> EllipticResult<f64> {
    let d = delta("ellippiinc_dphi", phi, m)?;
    check_finite("ellippiinc_dphi", "n", n)?;
    if phi.abs() > FRAC_PI_2 && n > 1.0 {
        return Err(EllipticError::domain(
            "ellippiinc_dphi",
            format!("n > 1 over a full period, got {n}"),
        ));
    }
    let p = 1.0 - n * phi.sin().powi(2);
    if p < 0.0 {
        return Err(EllipticError::domain(
            "ellippiinc_dphi",
            format!("1 - n sin²φ must be non-negative, got {p}"),
        ));
    }
    Ok(1.0 / (d * p))
}

/// ∂Π(n, φ, m)/∂m.
pub fn ellippiinc_dm<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: f64,
    phi: f64,
    m: f64,
) -> EllipticResult<f64> {
    let d = delta("ellippiinc_dm", phi, m)?;
    incomplete_unit_parameter("ellippiinc_dm", m)?;
    let range = characteristic_range(phi, m);
    check_characteristic("ellippiinc_dm", n, &range)?;
    if phi == 0.0 {
        return Ok(0.0);
    }
    if n == range.upper || (range.full && n == 1.0) {
        return Ok(phi.signum() * f64::INFINITY);
    }

    let sin2 = (2.0 * phi).sin();
    let e = backend.ellipeinc(phi, m)?;
    let boundary = m * sin2 / (2.0 * (m - 1.0) * d);
    bridge("ellippiinc_dm", n, &[m], range.upper, backend.bridge_radius(), |n| {
        let p = backend.ellippiinc(n, phi, m)?;
        Ok((e / (m - 1.0) + p - boundary) / (2.0 * (n - m)))
    })
}

// ── Gradients ────────────────────────────────────────────────────────

/// Forward-mode result: value and directional derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jvp {
    pub value: f64,
    pub tangent: f64,
}

/// Function value with its partials in argument order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient<const N: usize> {
    pub value: f64,
    pub partials: [f64; N],
}

impl<const N: usize> Gradient<N> {
    /// Push a tangent through: Σ ∂f/∂xᵢ · ẋᵢ. Zero tangents skip their
    /// partial, so an infinite partial in an idle direction stays out.
    pub fn jvp(&self, tangents: [f64; N]) -> Jvp {
        let tangent = self
            .partials
            .iter()
            .zip(tangents.iter())
            .filter(|(_, t)| **t != 0.0)
            .map(|(&p, &t)| p * t)
            .sum();
        Jvp {
            value: self.value,
            tangent,
        }
    }

    /// Pull a cotangent back onto each argument.
    pub fn vjp(&self, cotangent: f64) -> [f64; N] {
        self.partials.map(|p| p * cotangent)
    }
}

/// K(m) and [∂K/∂m].
pub fn ellipk_grad<B: EllipticBackend + ?Sized>(backend: &B, m: f64) -> EllipticResult<Gradient<1>> {
    Ok(Gradient {
        value: backend.ellipk(m)?,
        partials: [ellipk_dm(backend, m)?],
    })
}

/// E(m) and [∂E/∂m].
pub fn ellipe_grad<B: EllipticBackend + ?Sized>(backend: &B, m: f64) -> EllipticResult<Gradient<1>> {
    Ok(Gradient {
        value: backend.ellipe(m)?,
        partials: [ellipe_dm(backend, m)?],
    })
}

/// Π(n, m) and [∂/∂n, ∂/∂m].
pub fn ellippi_grad<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: f64,
    m: f64,
) -> EllipticResult<Gradient<2>> {
    Ok(Gradient {
        value: backend.ellippi(n, m)?,
        partials: [ellippi_dn(backend, n, m)?, ellippi_dm(backend, n, m)?],
    })
}

/// F(φ, m) and [∂/∂φ, ∂/∂m].
pub fn ellipf_grad<B: EllipticBackend + ?Sized>(
    backend: &B,
    phi: f64,
    m: f64,
) -> EllipticResult<Gradient<2>> {
    Ok(Gradient {
        value: backend.ellipf(phi, m)?,
        partials: [ellipf_dphi(phi, m)?, ellipf_dm(backend, phi, m)?],
    })
}

/// E(φ, m) and [∂/∂φ, ∂/∂m].
pub fn ellipeinc_grad<B: EllipticBackend + ?Sized>(
    backend: &B,
    phi: f64,
    m: f64,
) -> EllipticResult<Gradient<2>> {
    Ok(Gradient {
        value: backend.ellipeinc(phi, m)?,
        partials: [ellipeinc_dphi(phi, m)?, ellipeinc_dm(backend, phi, m)?],
    })
}

/// Π(n, φ, m) and [∂/∂n, ∂/∂φ, ∂/∂m].
pub fn ellippiinc_grad<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: f64,
    phi: f64,
    m: f64,
) -> EllipticResult<Gradient<3>> {
    Ok(Gradient {
        value: backend.ellippiinc(n, phi, m)?,
        partials: [
            ellippiinc_dn(backend, n, phi, m)?,
            ellippiinc_dphi(n, phi, m)?,
            ellippiinc_dm(backend, n, phi, m)?,
        ],
    })
}
