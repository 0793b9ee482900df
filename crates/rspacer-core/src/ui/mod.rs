//! Chart rendering for satellite measurement series
//!
//! Rendering goes through [`embedded_graphics`], so the same chart can be
//! drawn into the simulator window, an in-memory framebuffer for PNG export,
//! or a mock display in tests.

pub mod components;
pub mod core;
pub mod styling;

pub use components::SeriesChart;
pub use core::Drawable;
