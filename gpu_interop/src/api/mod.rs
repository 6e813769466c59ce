/// Canonical model module - backend-neutral descriptors and device/command traits

// Module declarations
pub mod format;
pub mod resource;
pub mod sampler;
pub mod pipeline_state;
pub mod device;
pub mod config;

// Re-export from all modules
pub use format::*;
pub use resource::*;
pub use sampler::*;
pub use pipeline_state::*;
pub use device::*;
pub use config::*;
