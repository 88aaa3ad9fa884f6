//! Opaque handles exchanged with the host and its GPU backend.

/// Identifies a texture owned by the GPU backend.
///
/// Tessera never dereferences the value; it is only compared and handed back to
/// the backend when a buffer that samples the texture is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Wrap a backend specific texture id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Host supplied token that forces geometry into separate draw buffers.
///
/// Hosts typically use it to split geometry across GPU command groups. Only
/// value equality matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UserData(pub u64);

impl UserData {
    /// The token used when the host does not care about separation.
    pub const NONE: Self = Self(0);
}
