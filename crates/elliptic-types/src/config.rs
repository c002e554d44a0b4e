// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    AGM_MAX_ITERATIONS, AGM_TOLERANCE, BRIDGE_RADIUS, DUPLICATION_MAX_ITERATIONS,
    DUPLICATION_TOLERANCE, QUADRATURE_PANELS, QUADRATURE_POINTS,
};
use crate::error::{EllipticError, EllipticResult};

/// Which evaluation algorithm backs the integral functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Carlson symmetric forms (reference).
    #[default]
    Carlson,
    /// Arithmetic-geometric mean / Landen series with quadrature for Π(φ).
    Agm,
}

/// Top-level engine configuration.
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub duplication: DuplicationConfig,
    #[serde(default)]
    pub agm: AgmConfig,
    /// Bridge radius for removable singularities of the Π derivative rules.
    #[serde(default = "default_bridge_radius")]
    pub bridge_radius: f64,
}

/// Carlson duplication controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuplicationConfig {
    /// Stop once every argument is within `tolerance * mean` of the mean.
    #[serde(default = "default_duplication_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_duplication_max_iterations")]
    pub max_iterations: usize,
}

/// AGM / Landen and quadrature controls for the alternative backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgmConfig {
    #[serde(default = "default_agm_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_agm_max_iterations")]
    pub max_iterations: usize,
    /// Gauss-Legendre points per panel.
    #[serde(default = "default_quadrature_points")]
    pub quadrature_points: usize,
    #[serde(default = "default_quadrature_panels")]
    pub quadrature_panels: usize,
}

fn default_bridge_radius() -> f64 {
    BRIDGE_RADIUS
}
fn default_duplication_tolerance() -> f64 {
    DUPLICATION_TOLERANCE
}
fn default_duplication_max_iterations() -> usize {
    DUPLICATION_MAX_ITERATIONS
}
fn default_agm_tolerance() -> f64 {
    AGM_TOLERANCE
}
fn default_agm_max_iterations() -> usize {
    AGM_MAX_ITERATIONS
}
fn default_quadrature_points() -> usize {
    QUADRATURE_POINTS
}
fn default_quadrature_panels() -> usize {
    QUADRATURE_PANELS
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            backend: BackendKind::default(),
            duplication: DuplicationConfig::default(),
            agm: AgmConfig::default(),
            bridge_radius: default_bridge_radius(),
        }
    }
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        DuplicationConfig {
            tolerance: default_duplication_tolerance(),
            max_iterations: default_duplication_max_iterations(),
        }
    }
}

impl Default for AgmConfig {
    fn default() -> Self {
        AgmConfig {
            tolerance: default_agm_tolerance(),
            max_iterations: default_agm_max_iterations(),
            quadrature_points: default_quadrature_points(),
            quadrature_panels: default_quadrature_panels(),
        }
    }
}

impl DuplicationConfig {
    pub fn validate(&self) -> EllipticResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 0.1 {
            return Err(EllipticError::ConfigError(format!(
                "duplication tolerance must lie in (0, 0.1), got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(EllipticError::ConfigError(
                "duplication max_iterations must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl AgmConfig {
    pub fn validate(&self) -> EllipticResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 0.1 {
            return Err(EllipticError::ConfigError(format!(
                "AGM tolerance must lie in (0, 0.1), got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(EllipticError::ConfigError(
                "AGM max_iterations must be >= 1".to_string(),
            ));
        }
        if self.quadrature_points < 2 {
            return Err(EllipticError::ConfigError(format!(
                "quadrature_points must be >= 2, got {}",
                self.quadrature_points
            )));
        }
        if self.quadrature_panels == 0 {
            return Err(EllipticError::ConfigError(
                "quadrature_panels must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> EllipticResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        log::debug!("loaded engine config from {path}: backend={:?}", config.backend);
        Ok(config)
    }

    pub fn validate(&self) -> EllipticResult<()> {
        self.duplication.validate()?;
        self.agm.validate()?;
        if !self.bridge_radius.is_finite() || self.bridge_radius <= 0.0 || self.bridge_radius >= 0.05
        {
            return Err(EllipticError::ConfigError(format!(
                "bridge_radius must lie in (0, 0.05), got {}",
                self.bridge_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/elliptic-types/, the shipped
    /// configs live two levels up.
    fn config_path(name: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("configs")
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_load_default_config() {
        let cfg = EngineConfig::from_file(&config_path("default.json")).unwrap();
        assert_eq!(cfg.backend, BackendKind::Carlson);
        assert_eq!(cfg.duplication.max_iterations, 32);
        assert!((cfg.duplication.tolerance - 1e-3).abs() < 1e-15);
        assert!((cfg.bridge_radius - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_load_agm_config() {
        let cfg = EngineConfig::from_file(&config_path("agm.json")).unwrap();
        assert_eq!(cfg.backend, BackendKind::Agm);
        assert_eq!(cfg.agm.quadrature_points, 32);
        assert_eq!(cfg.agm.quadrature_panels, 24);
        // Unspecified sections fall back to defaults.
        assert_eq!(cfg.duplication, DuplicationConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_file(&config_path("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, EllipticError::Io(_)));
    }

    #[test]
    fn test_empty_object_is_default() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let res: Result<EngineConfig, _> = serde_json::from_str(r#"{"backend": "gauss"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = EngineConfig::default();
        cfg.duplication.tolerance = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.duplication.max_iterations = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.agm.quadrature_points = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.bridge_radius = f64::NAN;
        assert!(cfg.validate().is_err());
    }
}
