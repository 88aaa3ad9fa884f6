//! Tessera Core
//!
//! Shared building blocks for the Tessera vector renderer: math helpers on top of
//! `glam`, the RGBA [`Color`] type, opaque resource handles and the logging and
//! profiling setup used by the other crates.

pub mod alloc;
pub mod color;
pub mod handle;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::Color;
pub use handle::{TextureHandle, UserData};
