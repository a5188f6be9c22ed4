//! Virtual Backlot mood-board engine.
//!
//! Headless state and geometry for arranging snapshots of 3D assets on a
//! freeform canvas: per-item drag/rotate/scale gestures, drop handling,
//! selection and stacking, and the persisted mood-board document.
//!
//! ## Modules
//!
//! - `input` - geometry helpers, gesture state machine, pointer capture,
//!   per-item controller
//! - `canvas` - the mood-board canvas (item collection, drop target, routing)
//! - `moodboard` - the persisted aggregate and its lifecycle
//! - `store` - storage collaborator contract and implementations
//! - `editor` / `gallery` - session state for the editor and gallery views

pub mod auth;
pub mod canvas;
pub mod constants;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod input;
pub mod logging;
pub mod moodboard;
pub mod notice;
pub mod perf;
pub mod placement;
pub mod settings;
pub mod settings_watcher;
pub mod share;
pub mod spatial_index;
pub mod store;
pub mod types;
pub mod viewer;

pub use error::{BacklotError, Result};
