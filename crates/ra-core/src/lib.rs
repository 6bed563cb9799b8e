//! `ra-core` — identifiers and coordinates shared by the `rastar` crates.
//!
//! This crate is a dependency of every other `ra-*` crate.  It has no `ra-*`
//! dependencies and no required external ones (optional `serde` only).
//!
//! # What lives here
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`ids`]   | `NodeId` (external), `NodeIdx` (store position)  |
//! | [`geo`]   | `GeoPoint`, haversine and planar distance        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::{NodeId, NodeIdx};
