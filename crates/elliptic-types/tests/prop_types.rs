// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Property-Based Tests (proptest) for elliptic-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for elliptic-types using proptest.
//!
//! Covers: configuration validation bounds, JSON serialization roundtrip,
//! error classification.

use elliptic_types::config::{AgmConfig, BackendKind, DuplicationConfig, EngineConfig};
use elliptic_types::error::EllipticError;
use proptest::prelude::*;

// ── Validation ───────────────────────────────────────────────────────

proptest! {
    /// Any tolerance in (0, 0.1) with a positive cap is accepted.
    #[test]
    fn duplication_valid_range_accepted(
        tol in 1e-12f64..0.099,
        cap in 1usize..200,
    ) {
        let cfg = DuplicationConfig { tolerance: tol, max_iterations: cap };
        prop_assert!(cfg.validate().is_ok());
    }

    /// Tolerances at or above 0.1 are rejected with a ConfigError.
    #[test]
    fn duplication_loose_tolerance_rejected(tol in 0.1f64..10.0) {
        let cfg = DuplicationConfig { tolerance: tol, max_iterations: 32 };
        let err = cfg.validate().unwrap_err();
        prop_assert!(matches!(err, EllipticError::ConfigError(_)));
    }

    /// Quadrature with fewer than two points is rejected.
    #[test]
    fn agm_quadrature_points_floor(points in 0usize..2) {
        let cfg = AgmConfig { quadrature_points: points, ..AgmConfig::default() };
        prop_assert!(cfg.validate().is_err());
    }
}

// ── Serialization ────────────────────────────────────────────────────

proptest! {
    /// EngineConfig survives a JSON roundtrip unchanged.
    #[test]
    fn engine_config_json_roundtrip(
        agm_backend in any::<bool>(),
        tol in 1e-6f64..0.05,
        cap in 1usize..100,
        points in 2usize..64,
        panels in 1usize..64,
        radius in 1e-6f64..0.04,
    ) {
        let cfg = EngineConfig {
            backend: if agm_backend { BackendKind::Agm } else { BackendKind::Carlson },
            duplication: DuplicationConfig { tolerance: tol, max_iterations: cap },
            agm: AgmConfig {
                quadrature_points: points,
                quadrature_panels: panels,
                ..AgmConfig::default()
            },
            bridge_radius: radius,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &cfg);
        prop_assert!(back.validate().is_ok());
    }
}

#[test]
fn backend_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&BackendKind::Agm).unwrap(), "\"agm\"");
    assert_eq!(
        serde_json::to_string(&BackendKind::Carlson).unwrap(),
        "\"carlson\""
    );
}

#[test]
fn domain_helper_builds_domain_variant() {
    let err = EllipticError::domain("rf", "negative argument");
    assert!(err.is_domain());
    assert_eq!(err.to_string(), "Domain error in rf: negative argument");

    let err = EllipticError::ConvergenceFailed {
        form: "R_J",
        iterations: 3,
    };
    assert!(!err.is_domain());
    assert_eq!(err.to_string(), "R_J did not converge within 3 iterations");
}
