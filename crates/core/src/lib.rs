#![deny(unsafe_code)]
//! Core types and traits for folio, the portfolio animation engines.
//!
//! Provides the `Engine` trait, the `Scene` drawing model, `Viewport` and
//! `Input`, the `Controller`/`FrameScheduler` frame loop, color types,
//! the `Xorshift64` PRNG, the `Seed` replay file and parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod input;
pub mod params;
pub mod prng;
pub mod scene;
pub mod schedule;
pub mod seed;
pub mod viewport;

pub use color::{Color, Hsla, Srgb};
pub use engine::Engine;
pub use error::EngineError;
pub use input::{Input, ScheduledInput};
pub use prng::Xorshift64;
pub use scene::{Node, Scene, Shape};
pub use schedule::{Controller, FrameHandle, FrameScheduler, LoopState, ManualScheduler};
pub use seed::Seed;
pub use viewport::Viewport;
