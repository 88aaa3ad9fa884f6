//! Hash map used across Tessera.
//!
//! Glyph tables, kerning pairs and the text cache all key on small values,
//! so every crate uses the same AHash based map.

pub use ahash::AHashMap as HashMap;
