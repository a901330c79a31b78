#![doc = "stereo-core: the geometry kernel behind snapped measurement annotations on reference solids."]
#![deny(rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

/// Camera-facing quads that make thin edges hit-testable.
pub mod billboard;
/// Annotation colours.
pub mod color;
/// Picking and glyph tolerances, serde-backed.
pub mod config;
/// Error type for solid parameters and configuration.
pub mod error;
/// Points, segments, rays and projections.
pub mod geom;
/// Arc and right-angle glyphs derived from angle annotations.
pub mod glyph;
/// Segment/segment intersection.
pub mod intersect;
/// Procedural reference solids (triangles, pyramids, prisms).
pub mod shape;
/// Snap candidates and nearest-candidate resolution.
pub mod snap;
/// Tolerance constants, comparison macros, and traits.
pub mod tolerance;

pub use billboard::{build_billboards, nearest_hit, Billboard, RayHit};
pub use color::Color;
pub use config::{GlyphConfig, PickConfig};
pub use error::{Error, Result};
pub use geom::{Point3, Ray, Segment, Vector3};
pub use glyph::{angle_at, angle_glyph, AngleGlyph};
pub use intersect::segment_intersection;
pub use shape::{CircleMode, ShapeKind, ShapeModel, ShapeParams, Solid};
pub use snap::{resolve, Resolved, SnapKind, SnapPoint, SnapTable};
