//! Platform-independent engine for a "wheel of life" dashboard widget.
//!
//! A [`Wheel`](wheel::Wheel) is a labeled circle split into equal angular
//! sectors, one per item, where each item carries a value on a 1..=10 scale.
//! The crate provides the geometry (sector angles, polar hit-testing), the
//! drag state machine that turns pointer gestures into value updates, a
//! clock-driven value animator, and the [`WheelWidget`](widget::WheelWidget)
//! composing them around a private working copy of the wheel.
//!
//! Rendering and event delivery belong to the embedding shell; everything
//! here is synchronous, single-threaded and free of GUI dependencies.

pub mod animate;
pub mod drag;
pub mod geometry;
mod macros;
pub mod wheel;
pub mod widget;

pub use animate::ValueAnimation;
pub use drag::{DragController, DragState};
pub use geometry::{Point, Sector, WheelLayout, compute_sectors, locate};
pub use wheel::{ItemName, ValidationError, Wheel, WheelItem, WheelTitle};
pub use widget::{EditTarget, LabelError, WheelEvent, WheelWidget, WidgetOptions};
