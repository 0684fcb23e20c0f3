//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

pub fn default_idle_timeout_secs() -> u64 {
    300
}

// =============================================================================
// Client Defaults
// =============================================================================

pub fn default_realname() -> String {
    "slirc-bot".to_string()
}
