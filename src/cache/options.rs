//! Write options for cache entries.

// == Set Options ==
/// Per-write overrides for TTL, tags and compression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// TTL in seconds (store default when `None`)
    pub ttl_seconds: Option<u64>,
    /// Invalidation tags
    pub tags: Vec<String>,
    /// Compress regardless of payload size
    pub force_compress: bool,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl_seconds = Some(seconds);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn compress(mut self) -> Self {
        self.force_compress = true;
        self
    }
}
