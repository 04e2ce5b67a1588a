//! Engine-wide configuration: buffer sizes, literal ceilings, timeouts, and
//! the other knobs that sit above the sans-I/O core.
//!
//! # Example
//!
//! ```
//! use imap_engine::config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::builder()
//!     .max_literal_size(50 * 1024 * 1024)
//!     .command_timeout(Duration::from_secs(30))
//!     .max_pipeline_depth(8)
//!     .build();
//! ```

use std::time::Duration;

use crate::pipeline::PipelineConfig;

/// Default size of the L1 read buffer, in bytes.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Default read-ahead slack kept past the current line/literal boundary, in
/// bytes (RFC 3501 doesn't bound line length, so a little slack avoids
/// re-allocating on every near-miss).
pub const DEFAULT_READ_AHEAD_SLACK: usize = 128;

/// Default size of the write buffer, in bytes.
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 4096;

/// Default ceiling on a single literal's declared length, in bytes.
pub const DEFAULT_MAX_LITERAL_SIZE: usize = 100 * 1024 * 1024;

/// Default per-command timeout.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Default maximum number of commands kept outstanding at once.
pub const DEFAULT_MAX_PIPELINE_DEPTH: usize = 4;

/// Default safe encoded command-line length before a STORE's sequence/UID
/// set is split into several sub-commands (§4.5). Comfortably under servers'
/// common 8KiB command-line limits once the rest of the command is
/// accounted for.
pub const DEFAULT_MAX_COMMAND_LINE_LEN: usize = 4096;

/// Engine-wide configuration.
///
/// Construct via [`EngineConfig::default`] for sensible defaults, or
/// [`EngineConfig::builder`] to override individual fields.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Size of the L1 read buffer, in bytes.
    pub read_buffer_size: usize,

    /// Read-ahead slack kept past the current line/literal boundary, in
    /// bytes.
    pub read_ahead_slack: usize,

    /// Size of the write buffer, in bytes.
    pub write_buffer_size: usize,

    /// Ceiling on a single literal's declared length, in bytes. A `{n}`
    /// announcement exceeding this is rejected before any literal bytes are
    /// read.
    pub max_literal_size: usize,

    /// How long to wait for a tagged response before a command is
    /// considered timed out.
    pub command_timeout: Duration,

    /// Maximum number of commands kept outstanding at once.
    pub max_pipeline_depth: usize,

    /// Safe encoded command-line length before a STORE's sequence/UID set is
    /// split into several sub-commands (§4.5).
    pub max_command_line_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_ahead_slack: DEFAULT_READ_AHEAD_SLACK,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            max_literal_size: DEFAULT_MAX_LITERAL_SIZE,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            max_pipeline_depth: DEFAULT_MAX_PIPELINE_DEPTH,
            max_command_line_len: DEFAULT_MAX_COMMAND_LINE_LEN,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder seeded with defaults.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Derives a [`PipelineConfig`] from this configuration's pipelining
    /// fields.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .max_depth(self.max_pipeline_depth)
            .timeout(self.command_timeout)
    }
}

/// Chainable builder for [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the L1 read buffer size.
    #[must_use]
    pub const fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Sets the read-ahead slack kept past the current line/literal
    /// boundary.
    #[must_use]
    pub const fn read_ahead_slack(mut self, size: usize) -> Self {
        self.config.read_ahead_slack = size;
        self
    }

    /// Sets the write buffer size.
    #[must_use]
    pub const fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Sets the ceiling on a single literal's declared length.
    #[must_use]
    pub const fn max_literal_size(mut self, size: usize) -> Self {
        self.config.max_literal_size = size;
        self
    }

    /// Sets the per-command timeout.
    #[must_use]
    pub const fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    /// Sets the maximum number of commands kept outstanding at once.
    #[must_use]
    pub const fn max_pipeline_depth(mut self, depth: usize) -> Self {
        self.config.max_pipeline_depth = depth;
        self
    }

    /// Sets the safe encoded command-line length before a STORE's
    /// sequence/UID set is split into several sub-commands.
    #[must_use]
    pub const fn max_command_line_len(mut self, len: usize) -> Self {
        self.config.max_command_line_len = len;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert_eq!(config.max_literal_size, DEFAULT_MAX_LITERAL_SIZE);
        assert_eq!(config.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert_eq!(config.max_command_line_len, DEFAULT_MAX_COMMAND_LINE_LEN);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .max_literal_size(10 * 1024 * 1024)
            .command_timeout(Duration::from_secs(5))
            .max_pipeline_depth(2)
            .max_command_line_len(512)
            .build();

        assert_eq!(config.max_literal_size, 10 * 1024 * 1024);
        assert_eq!(config.command_timeout, Duration::from_secs(5));
        assert_eq!(config.max_pipeline_depth, 2);
        assert_eq!(config.max_command_line_len, 512);
        // Untouched fields keep their defaults.
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
    }

    #[test]
    fn test_pipeline_config_derivation() {
        let config = EngineConfig::builder()
            .max_pipeline_depth(6)
            .command_timeout(Duration::from_secs(12))
            .build();

        let pipeline_config = config.pipeline_config();
        assert_eq!(pipeline_config.max_depth, 6);
        assert_eq!(pipeline_config.timeout, Duration::from_secs(12));
    }
}
