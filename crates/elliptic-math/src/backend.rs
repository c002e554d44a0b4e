// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Backends
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Interchangeable evaluation backends.
//!
//! [`Carlson`] is the reference; [`Agm`] evaluates the same six integrals
//! with AGM / Landen series and Gauss-Legendre quadrature so the two can be
//! checked against each other. The derivative rules in
//! [`crate::derivatives`] are generic over either.

use std::f64::consts::FRAC_PI_2;

use elliptic_types::config::{AgmConfig, BackendKind, DuplicationConfig, EngineConfig};
use elliptic_types::constants::BRIDGE_RADIUS;
use elliptic_types::error::{EllipticError, EllipticResult};

use crate::agm::{complete_pair, complete_pi, landen_pair};
use crate::complete::{ellipe_with, ellipk_with, ellippi_with};
use crate::incomplete::{ellipeinc_with, ellipf_with, ellippiinc_with, reduce_amplitude};
use crate::quadrature::GaussLegendre;

/// The six Legendre-form integrals behind one interface.
pub trait EllipticBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Bridge radius used by the Π derivative rules near removable singularities.
    fn bridge_radius(&self) -> f64 {
        BRIDGE_RADIUS
    }

    fn ellipk(&self, m: f64) -> EllipticResult<f64>;
    fn ellipe(&self, m: f64) -> EllipticResult<f64>;
    fn ellippi(&self, n: f64, m: f64) -> EllipticResult<f64>;
    fn ellipf(&self, phi: f64, m: f64) -> EllipticResult<f64>;
    fn ellipeinc(&self, phi: f64, m: f64) -> EllipticResult<f64>;
    fn ellippiinc(&self, n: f64, phi: f64, m: f64) -> EllipticResult<f64>;
}

/// Build the backend named in the configuration.
pub fn select(config: &EngineConfig) -> Box<dyn EllipticBackend> {
    match config.backend {
        BackendKind::Carlson => Box::new(Carlson::from_config(config)),
        BackendKind::Agm => Box::new(Agm::from_config(config)),
    }
}

// ─────────────────────────────── Carlson ─────────────────────────────

/// Carlson symmetric-form backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carlson {
    pub duplication: DuplicationConfig,
    pub bridge_radius: f64,
}

impl Default for Carlson {
    fn default() -> Self {
        Carlson {
            duplication: DuplicationConfig::default(),
            bridge_radius: BRIDGE_RADIUS,
        }
    }
}

impl Carlson {
    pub fn new(duplication: DuplicationConfig) -> Self {
        Carlson {
            duplication,
            bridge_radius: BRIDGE_RADIUS,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Carlson {
            duplication: config.duplication,
            bridge_radius: config.bridge_radius,
        }
    }
}

impl EllipticBackend for Carlson {
    fn name(&self) -> &'static str {
        "carlson"
    }

    fn bridge_radius(&self) -> f64 {
        self.bridge_radius
    }

    fn ellipk(&self, m: f64) -> EllipticResult<f64> {
        ellipk_with(m, &self.duplication)
    }

    fn ellipe(&self, m: f64) -> EllipticResult<f64> {
        ellipe_with(m, &self.duplication)
    }

    fn ellippi(&self, n: f64, m: f64) -> EllipticResult<f64> {
        ellippi_with(n, m, &self.duplication)
    }

    fn ellipf(&self, phi: f64, m: f64) -> EllipticResult<f64> {
        ellipf_with(phi, m, &self.duplication)
    }

    fn ellipeinc(&self, phi: f64, m: f64) -> EllipticResult<f64> {
        ellipeinc_with(phi, m, &self.duplication)
    }

    fn ellippiinc(&self, n: f64, phi: f64, m: f64) -> EllipticResult<f64> {
        ellippiinc_with(n, phi, m, &self.duplication)
    }
}

// ───────────────────────────────── AGM ───────────────────────────────

/// AGM / Landen backend with quadrature for the incomplete third kind.
#[derive(Debug, Clone)]
pub struct Agm {
    pub config: AgmConfig,
    pub bridge_radius: f64,
    rule: GaussLegendre,
}

impl Default for Agm {
    fn default() -> Self {
        Agm::new(AgmConfig::default())
    }
}

impl Agm {
    pub fn new(config: AgmConfig) -> Self {
        Agm {
            rule: GaussLegendre::new(config.quadrature_points),
            config,
            bridge_radius: BRIDGE_RADIUS,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Agm {
            bridge_radius: config.bridge_radius,
            ..Agm::new(config.agm)
        }
    }

    /// F and E over the reduced amplitude plus whole periods.
    fn incomplete_pair(&self, function: &'static str, phi: f64, m: f64) -> EllipticResult<(f64, f64)> {
        if !phi.is_finite() || !(0.0..=1.0).contains(&m) {
            return Err(EllipticError::domain(
                function,
                format!("unsupported arguments phi={phi}, m={m}"),
            ));
        }
        let red = reduce_amplitude(phi);
        let (f, e) = if red.phi == 0.0 {
            (red.phi, red.phi)
        } else if red.is_quarter_period() {
            let (k, e) = complete_pair(m, &self.config)?;
            (red.phi.signum() * k, red.phi.signum() * e)
        } else {
            landen_pair(red.phi, m, &self.config)?
        };
        if red.periods == 0.0 {
            return Ok((f, e));
        }
        let (k, e_full) = complete_pair(m, &self.config)?;
        Ok((2.0 * red.periods * k + f, 2.0 * red.periods * e_full + e))
    }
}

impl EllipticBackend for Agm {
    fn name(&self) -> &'static str {
        "agm"
    }

    fn bridge_radius(&self) -> f64 {
        self.bridge_radius
    }

    fn ellipk(&self, m: f64) -> EllipticResult<f64> {
        complete_pair(m, &self.config).map(|(k, _)| k)
    }

    fn ellipe(&self, m: f64) -> EllipticResult<f64> {
        complete_pair(m, &self.config).map(|(_, e)| e)
    }

    fn ellippi(&self, n: f64, m: f64) -> EllipticResult<f64> {
        complete_pi(n, m, &self.config)
    }

    fn ellipf(&self, phi: f64, m: f64) -> EllipticResult<f64> {
        self.incomplete_pair("agm_ellipf", phi, m).map(|(f, _)| f)
    }

    fn ellipeinc(&self, phi: f64, m: f64) -> EllipticResult<f64> {
        self.incomplete_pair("agm_ellipeinc", phi, m).map(|(_, e)| e)
    }

    fn ellippiinc(&self, n: f64, phi: f64, m: f64) -> EllipticResult<f64> {
        if !phi.is_finite() || !n.is_finite() || !(0.0..=1.0).contains(&m) {
            return Err(EllipticError::domain(
                "agm_ellippiinc",
                format!("unsupported arguments n={n}, phi={phi}, m={m}"),
            ));
        }
        let red = reduce_amplitude(phi);
        let partial = if red.phi == 0.0 {
            red.phi
        } else if red.is_quarter_period() {
            red.phi.signum() * complete_pi(n, m, &self.config)?
        } else {
            let s2 = red.phi.sin().powi(2);
            let p = 1.0 - n * s2;
            if p < 0.0 {
                return Err(EllipticError::domain(
                    "agm_ellippiinc",
                    format!("1 - n sin²φ must be non-negative, got {p}"),
                ));
            }
            if p == 0.0 {
                red.phi.signum() * f64::INFINITY
            } else {
                self.rule
                    .integrate(0.0, red.phi, self.config.quadrature_panels, |theta| {
                        let s2 = theta.sin().powi(2);
                        1.0 / ((1.0 - n * s2) * (1.0 - m * s2).sqrt())
                    })
            }
        };
        if red.periods == 0.0 {
            return Ok(partial);
        }
        Ok(2.0 * red.periods * complete_pi(n, m, &self.config)? + partial)
    }
}

/// Evaluate at amplitude π/2 through the incomplete entry points; a
/// backend is consistent when this matches its complete functions.
pub fn quarter_period_gap<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: f64,
    m: f64,
) -> EllipticResult<f64> {
    let gaps = [
        backend.ellipf(FRAC_PI_2, m)? - backend.ellipk(m)?,
        backend.ellipeinc(FRAC_PI_2, m)? - backend.ellipe(m)?,
        backend.ellippiinc(n, FRAC_PI_2, m)? - backend.ellippi(n, m)?,
    ];
    Ok(gaps.iter().fold(0.0_f64, |acc, g| acc.max(g.abs())))
}
