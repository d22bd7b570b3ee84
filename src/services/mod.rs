//! Pipeline stage services: matrix mapping, footprint resolution,
//! coordinate projection, and trace routing.

pub mod footprint;
pub mod matrix;
pub mod projector;
pub mod router;

pub use footprint::{resolve, Warning};
pub use matrix::{assign, ColumnGrouping, MapError, MatrixModel};
pub use projector::project;
pub use router::route;
