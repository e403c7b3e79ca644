//! Geometry primitives, re-exported from `trellis-geom`.

pub use trellis_geom::*;
