//! Key Pattern Module
//!
//! Glob-style matching for key listing: `*` matches any run of
//! characters, everything else is literal, and the whole key must match.

use regex::Regex;

use crate::error::{CacheError, Result};

// == Key Pattern ==
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// Compiles a glob into an anchored regular expression.
    pub fn new(glob: &str) -> Result<Self> {
        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("^{}$", body))
            .map_err(|e| CacheError::InvalidRequest(format!("Invalid key pattern: {}", e)))?;

        Ok(Self { regex })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}
