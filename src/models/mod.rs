//! Data models for the layout compiler pipeline.
//!
//! This module contains the core data structures passed between pipeline
//! stages. Models are independent of parsing, routing, and rendering
//! logic; every entity is produced once per compilation run and never
//! mutated retroactively.

pub mod footprint;
pub mod key;
pub mod matrix;
pub mod placed;
pub mod units;

// Re-export all model types
pub use footprint::{FootprintSpec, StabilizerVariant};
pub use key::{Key, KleLayout};
pub use matrix::{MatrixAddress, NetId, NetTable, PlacedKey};
pub use placed::{BoardPoint, PlacedElement, SchematicPoint, TraceLayer, TraceSegment};
pub use units::{fmt_mm, Milliunits};
