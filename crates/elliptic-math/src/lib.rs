//! Elliptic integrals on Carlson symmetric forms, with closed-form
//! derivative rules and an interchangeable AGM backend.

pub mod agm;
pub mod backend;
pub mod batch;
pub mod carlson;
pub mod complete;
pub mod derivatives;
pub mod incomplete;
pub mod quadrature;

pub use backend::{select, Agm, Carlson, EllipticBackend};
pub use complete::{ellipe, ellipk, ellippi};
pub use incomplete::{ellipeinc, ellipf, ellippiinc};
