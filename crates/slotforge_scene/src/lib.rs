//! # Slotforge Scenes
//!
//! Scene lifecycle on top of the storage engine. Each activation receives a
//! fresh storage session built from a registered template engine, and the
//! session is torn down when the scene finishes, so handles never outlive
//! the scene that created them.
//!
//! Rendering, input and windowing are left to the application.

#![deny(unsafe_code)]

mod director;
mod error;
mod scene;

pub use director::{SceneDirector, Transition};
pub use error::{SceneError, SceneResult};
pub use scene::{Frame, Scene, SceneConfig};
