//! `ra-graph` — the immutable road graph and everything that produces it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `RoadGraph` (sorted ids + CSR successors + name blob)       |
//! | [`builder`] | `RoadGraphBuilder`                                          |
//! | [`binary`]  | `save` / `load` / `read_graph` / `write_graph`              |
//! | [`text`]    | `TextSchema`, `load_text` / `parse_text`                    |
//! | [`spatial`] | `SpatialIndex` (nearest node by coordinate)                 |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod binary;
pub mod builder;
pub mod error;
pub mod graph;
pub mod spatial;
pub mod text;


pub use builder::RoadGraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::RoadGraph;
pub use spatial::SpatialIndex;
pub use text::TextSchema;
