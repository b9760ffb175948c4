//! Configuration system for the unaligned-access emulator.
//!
//! This module defines all configuration structures used to parameterize the
//! trap handlers. It provides:
//! 1. **Defaults:** Baseline values for the address-space boundary, the notice
//!    rate limiter and the die-path diagnostics.
//! 2. **Structures:** Hierarchical config for general policy, rate limiting and diagnostics.
//! 3. **Loading:** JSON deserialization with validation via [`Config::from_json`].
//!
//! Every field has a default, so a partial (or empty) JSON object is a valid configuration.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the emulator.
mod defaults {
    use crate::common::constants::{DEFAULT_TASK_SIZE, PAGE_SIZE};

    /// Emit the rate-limited "unaligned trap" notice for user faults.
    pub const PRINT_UNALIGNED: bool = true;

    /// User/kernel address-space boundary.
    pub const TASK_SIZE: u64 = DEFAULT_TASK_SIZE;

    /// Escalate the die path to a system panic.
    pub const PANIC_ON_OOPS: bool = false;

    /// Rate-limit window for the user notice (5 seconds).
    pub const RATELIMIT_INTERVAL_MS: u64 = 5_000;

    /// Messages allowed per rate-limit window.
    pub const RATELIMIT_BURST: u32 = 5;

    /// Start of the kernel text segment, used to filter stack words in die reports.
    pub const KERNEL_TEXT_START: u64 = 0xfff0_0000_0091_0000;

    /// End (exclusive) of the kernel text segment.
    pub const KERNEL_TEXT_END: u64 = 0xfff0_0000_0200_0000;

    /// The die-path stack walk stops at a multiple of this boundary.
    pub const TRACE_BOUNDARY: u64 = PAGE_SIZE;

    /// Maximum number of kernel-text addresses listed in a die-path trace.
    pub const MAX_TRACE_ENTRIES: usize = 40;
}

/// Root configuration structure containing all emulator settings.
///
/// # Examples
///
/// ```
/// use sw64_unaligned::config::Config;
///
/// let config = Config::default();
/// assert!(config.general.print_unaligned);
/// assert_eq!(config.ratelimit.burst, 5);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use sw64_unaligned::config::Config;
///
/// let json = r#"{
///     "general": { "panic_on_oops": true, "task_size": 1099511627776 },
///     "ratelimit": { "interval_ms": 1000, "burst": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.panic_on_oops);
/// assert_eq!(config.general.task_size, 1 << 40);
/// assert_eq!(config.ratelimit.burst, 2);
/// assert_eq!(config.diagnostics.max_trace_entries, 40);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Policy switches shared by both handlers.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Rate limiting of the user-fault notice.
    #[serde(default)]
    pub ratelimit: RateLimitConfig,
    /// Die-path report parameters.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and a validation error
    /// for inconsistent values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let diag = &self.diagnostics;
        if diag.kernel_text_start > diag.kernel_text_end {
            return Err(ConfigError::InvertedRange {
                field: "diagnostics.kernel_text",
                start: diag.kernel_text_start,
                end: diag.kernel_text_end,
            });
        }
        if !diag.trace_boundary.is_power_of_two() {
            return Err(ConfigError::TraceBoundary(diag.trace_boundary));
        }
        if self.general.print_unaligned && self.ratelimit.burst == 0 {
            return Err(ConfigError::ZeroBurst);
        }
        Ok(())
    }
}

/// General policy settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit the rate-limited notice for every user unaligned trap (unless the
    /// task sets `NOPRINT`).
    #[serde(default = "GeneralConfig::default_print_unaligned")]
    pub print_unaligned: bool,

    /// User/kernel address-space boundary. User faults at or above it are
    /// rejected before any emulation.
    #[serde(default = "GeneralConfig::default_task_size")]
    pub task_size: u64,

    /// When set, the die path reports a system panic instead of terminating
    /// only the current task.
    #[serde(default)]
    pub panic_on_oops: bool,
}

impl GeneralConfig {
    fn default_print_unaligned() -> bool {
        defaults::PRINT_UNALIGNED
    }

    fn default_task_size() -> u64 {
        defaults::TASK_SIZE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            print_unaligned: defaults::PRINT_UNALIGNED,
            task_size: defaults::TASK_SIZE,
            panic_on_oops: defaults::PANIC_ON_OOPS,
        }
    }
}

/// Rate limiter for the user unaligned-trap notice.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Length of one window in milliseconds.
    #[serde(default = "RateLimitConfig::default_interval_ms")]
    pub interval_ms: u64,

    /// Messages allowed per window.
    #[serde(default = "RateLimitConfig::default_burst")]
    pub burst: u32,
}

impl RateLimitConfig {
    fn default_interval_ms() -> u64 {
        defaults::RATELIMIT_INTERVAL_MS
    }

    fn default_burst() -> u32 {
        defaults::RATELIMIT_BURST
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::RATELIMIT_INTERVAL_MS,
            burst: defaults::RATELIMIT_BURST,
        }
    }
}

/// Parameters of the die-path diagnostic report.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    /// Start of kernel text; stack words inside `[start, end)` are listed in the trace.
    #[serde(default = "DiagnosticsConfig::default_kernel_text_start")]
    pub kernel_text_start: u64,

    /// End (exclusive) of kernel text.
    #[serde(default = "DiagnosticsConfig::default_kernel_text_end")]
    pub kernel_text_end: u64,

    /// The stack walk stops when the stack pointer reaches a multiple of this value.
    #[serde(default = "DiagnosticsConfig::default_trace_boundary")]
    pub trace_boundary: u64,

    /// Maximum number of trace entries before the walk is cut short.
    #[serde(default = "DiagnosticsConfig::default_max_trace_entries")]
    pub max_trace_entries: usize,
}

impl DiagnosticsConfig {
    fn default_kernel_text_start() -> u64 {
        defaults::KERNEL_TEXT_START
    }

    fn default_kernel_text_end() -> u64 {
        defaults::KERNEL_TEXT_END
    }

    fn default_trace_boundary() -> u64 {
        defaults::TRACE_BOUNDARY
    }

    fn default_max_trace_entries() -> usize {
        defaults::MAX_TRACE_ENTRIES
    }

    /// Returns `true` if `addr` lies inside the configured kernel text range.
    pub const fn is_kernel_text(&self, addr: u64) -> bool {
        addr >= self.kernel_text_start && addr < self.kernel_text_end
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            kernel_text_start: defaults::KERNEL_TEXT_START,
            kernel_text_end: defaults::KERNEL_TEXT_END,
            trace_boundary: defaults::TRACE_BOUNDARY,
            max_trace_entries: defaults::MAX_TRACE_ENTRIES,
        }
    }
}
