#![doc = "stereo-view: picking, snapping and the annotation state machine over a host-provided camera and solid."]
#![deny(rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

/// Committed line and angle annotations with the undo stack.
pub mod annotations;
/// Spherical orbit camera.
pub mod camera;
/// Undo tags.
pub mod history;
/// Host-facing collaborator traits.
pub mod host;
/// Ray-cast picking and the click state machine.
pub mod picker;
/// In-progress selection and drawing mode.
pub mod selection;
/// Settings file.
pub mod settings;

pub use annotations::{AngleAnnotation, AnnotationSnapshot, AnnotationStore, LineAnnotation};
pub use camera::{OrbitCamera, OrbitCameraConfig};
pub use history::{History, UndoTag};
pub use host::{
    CameraProvider, ColorSource, Collaborators, NoopScene, Palette, SceneSink, SolidSource, Viewport,
};
pub use picker::Picker;
pub use selection::{DrawMode, Selection};
pub use settings::Settings;
