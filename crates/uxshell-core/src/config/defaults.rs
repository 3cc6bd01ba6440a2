//! Default values for configuration fields.

pub fn default_refresh_period_ms() -> u64 {
    100
}

pub fn default_fetch_timeout_ms() -> u64 {
    5000
}

pub fn default_require_data_thread() -> bool {
    true
}

pub fn default_max_creation_attempts() -> u32 {
    3
}
