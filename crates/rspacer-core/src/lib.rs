//! UI-independent core library for RSPACER
//!
//! This crate contains the platform-agnostic logic of the radio-noise
//! monitoring application: the in-memory satellite measurement store and its
//! change notifications, derived statistics, CSV export, celestial influence
//! factors, and the analytics chart renderer.
//!
//! Chart rendering targets any `embedded_graphics::DrawTarget`, so the same
//! code draws into the desktop simulator window, a PNG image, or a mock
//! display in tests.

pub mod config;
pub mod export;
pub mod influence;
pub mod stats;
pub mod storage;
pub mod ui;
