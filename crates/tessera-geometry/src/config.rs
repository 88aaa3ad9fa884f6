//! Render context configuration.

/// Callback receiving error or log messages.
pub type MessageCallback = Box<dyn FnMut(&str)>;

/// Settings for a [`RenderContext`](crate::RenderContext).
///
/// # Example
///
/// ```
/// use tessera_geometry::Config;
///
/// let config = Config::default()
///     .with_gc_collect_interval(120)
///     .with_global_aa_multiplier(1.5)
///     .with_error_callback(|msg| eprintln!("tessera: {msg}"));
/// assert_eq!(config.gc_collect_interval, 120);
/// ```
pub struct Config {
    /// Frames between full buffer purges, `0` purges every frame.
    pub gc_collect_interval: u32,
    /// Initial capacity of the buffer list.
    pub default_buffer_reserve: usize,
    /// Initial vertex capacity of a new draw buffer.
    pub default_vtx_buffer_reserve: usize,
    /// Initial index capacity of a new draw buffer.
    pub default_idx_buffer_reserve: usize,
    /// Turn angle in degrees above which miter joints become rounded bevels.
    pub miter_limit: f32,
    /// Scales every shape's antialiasing distance.
    pub global_aa_multiplier: f32,
    /// Edge length of font atlases.
    pub max_font_atlas_size: u32,
    pub text_caching_enabled: bool,
    /// Frames an unused text cache entry survives.
    pub text_cache_expire_interval: u32,
    pub error_callback: Option<MessageCallback>,
    pub log_callback: Option<MessageCallback>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gc_collect_interval: 600,
            default_buffer_reserve: 10,
            default_vtx_buffer_reserve: 50,
            default_idx_buffer_reserve: 100,
            miter_limit: 150.0,
            global_aa_multiplier: 1.0,
            max_font_atlas_size: 1024,
            text_caching_enabled: false,
            text_cache_expire_interval: 3000,
            error_callback: None,
            log_callback: None,
        }
    }
}

impl Config {
    pub fn with_gc_collect_interval(mut self, frames: u32) -> Self {
        self.gc_collect_interval = frames;
        self
    }

    pub fn with_buffer_reserves(mut self, buffers: usize, vertices: usize, indices: usize) -> Self {
        self.default_buffer_reserve = buffers;
        self.default_vtx_buffer_reserve = vertices;
        self.default_idx_buffer_reserve = indices;
        self
    }

    pub fn with_miter_limit(mut self, degrees: f32) -> Self {
        self.miter_limit = degrees;
        self
    }

    pub fn with_global_aa_multiplier(mut self, multiplier: f32) -> Self {
        self.global_aa_multiplier = multiplier;
        self
    }

    pub fn with_max_font_atlas_size(mut self, size: u32) -> Self {
        self.max_font_atlas_size = size;
        self
    }

    pub fn with_text_caching(mut self, enabled: bool, expire_interval: u32) -> Self {
        self.text_caching_enabled = enabled;
        self.text_cache_expire_interval = expire_interval;
        self
    }

    pub fn with_error_callback(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.error_callback = Some(Box::new(callback));
        self
    }

    pub fn with_log_callback(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.log_callback = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("gc_collect_interval", &self.gc_collect_interval)
            .field("default_buffer_reserve", &self.default_buffer_reserve)
            .field("default_vtx_buffer_reserve", &self.default_vtx_buffer_reserve)
            .field("default_idx_buffer_reserve", &self.default_idx_buffer_reserve)
            .field("miter_limit", &self.miter_limit)
            .field("global_aa_multiplier", &self.global_aa_multiplier)
            .field("max_font_atlas_size", &self.max_font_atlas_size)
            .field("text_caching_enabled", &self.text_caching_enabled)
            .field("text_cache_expire_interval", &self.text_cache_expire_interval)
            .field("error_callback", &self.error_callback.is_some())
            .field("log_callback", &self.log_callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gc_collect_interval, 600);
        assert_eq!(config.miter_limit, 150.0);
        assert_eq!(config.max_font_atlas_size, 1024);
        assert!(!config.text_caching_enabled);
        assert!(config.error_callback.is_none());
    }

    #[test]
    fn test_debug_hides_callbacks() {
        let config = Config::default().with_log_callback(|_| {});
        let debug = format!("{:?}", config);
        assert!(debug.contains("log_callback: true"));
    }
}
