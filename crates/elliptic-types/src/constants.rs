// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Relative deviation at which Carlson duplication stops.
/// The seventh-order R_F series leaves an error of order tol^8 at this point.
pub const DUPLICATION_TOLERANCE: f64 = 1e-3;

/// Maximum duplication steps before a Carlson form reports ConvergenceFailed.
pub const DUPLICATION_MAX_ITERATIONS: usize = 32;

/// AGM / Landen stop once the half-difference c satisfies |c| <= tol * a.
pub const AGM_TOLERANCE: f64 = 1e-15;

/// AGM / Landen cap (quadratic convergence, so this is generous).
pub const AGM_MAX_ITERATIONS: usize = 64;

/// Gauss-Legendre points per panel for the quadrature third-kind integral.
pub const QUADRATURE_POINTS: usize = 24;

/// Number of equal panels on the reduced amplitude interval.
pub const QUADRATURE_PANELS: usize = 16;

/// Below this |m| the m-derivative rules switch to their Maclaurin series.
pub const SMALL_PARAMETER: f64 = 1e-4;

/// Distance from a removable singularity inside which Π-rules are bridged.
/// The closed forms hold full accuracy outside this window.
pub const BRIDGE_RADIUS: f64 = 1e-6;
