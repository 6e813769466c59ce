/// Device configuration

/// Configuration passed to a backend device when it is wrapped
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported in log messages about this device
    pub device_name: String,
    /// Trace every handle registration and removal
    pub trace_object_lifetime: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_name: "device".to_string(),
            trace_object_lifetime: cfg!(debug_assertions),
        }
    }
}
