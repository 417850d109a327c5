//! Lux Core - scene description, configuration and image output.
//!
//! This crate provides everything around the renderer that is not rendering:
//!
//! - **Configuration**: `RenderSettings` and `Background`
//! - **Scene description**: named materials and objects, loadable from JSON
//! - **Built-in scenes**: selectable by name
//! - **Output**: the `PixelSink` trait with PPM and PNG encoders
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{builtin_scene, load_scene};
//!
//! let scene = load_scene("scene.json")?;
//! let demo = builtin_scene("materials")?;
//! ```

pub mod loader;
pub mod output;
pub mod presets;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use output::{sink_for_path, to_rgb8, OutputError, OutputResult, PixelSink, PngWriter, PpmWriter};
pub use presets::{builtin_scene, BUILTIN_SCENES};
pub use scene::{MaterialDesc, ObjectDesc, SceneDescription};
pub use settings::{Background, RenderSettings};
