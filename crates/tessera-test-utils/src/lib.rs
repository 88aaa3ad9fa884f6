//! Test utilities for Tessera.
//!
//! Tessera talks to two external collaborators, a GPU backend and a font
//! engine. This crate provides stand-ins for both so tessellation and batching
//! can be tested without a GPU or font files:
//!
//! - [`MockBackend`] - records every texture and draw call it receives
//! - [`MonospaceFontLoader`] - a font engine producing fixed-size box glyphs
//!
//! # Example
//!
//! ```rust
//! use tessera_geometry::{Color, Config, RenderContext, StyleOptions, Vec2};
//! use tessera_test_utils::MockBackend;
//!
//! let mut ctx = RenderContext::new(Config::default());
//! ctx.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &StyleOptions::filled(Color::RED), 0.0, 0);
//!
//! let mut backend = MockBackend::new();
//! ctx.flush_buffers(&mut backend);
//! assert_eq!(backend.count_draws(), 1);
//! ```

pub mod font;
pub mod mock_backend;

pub use font::{MonospaceFace, MonospaceFontLoader};
pub use mock_backend::{BackendCall, DrawPath, MockBackend};
