//! Vello backend for the joystick draw plan.
//!
//! Paints into a `vello::Scene` with kurbo shapes and peniko colours.
//! The caller presents the scene via wgpu.

pub mod scene;

pub use scene::{VelloSurface, paint_joystick};
