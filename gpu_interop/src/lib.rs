/*!
# GPU Interop

Backend-agnostic model of GPU resources, resource views and fixed-function
state, shared by every graphics backend of the overlay layer.

Higher-level code (the overlay and third-party extensions) creates, inspects
and destroys GPU objects through the traits in [`api`] without knowing which
native graphics API is active. Each backend crate (Direct3D 11, Direct3D 12,
...) implements those traits on top of two pieces provided here:

- **Canonical descriptors** ([`api::ResourceDesc`], [`api::ResourceViewDesc`],
  [`api::SamplerDesc`], state enums) which backend converters translate to and
  from native structures.
- **Object registry** ([`registry::ObjectRegistry`]) which turns opaque native
  object addresses into generational, validity-checked handles.

The [`d3d`] module holds the native values and converters the Direct3D 11 and
12 backends have in common.
*/

// Internal modules
mod error;
pub mod log;
pub mod api;
pub mod registry;
pub mod d3d;

pub use error::{Error, Result};

// Main interop namespace module
pub mod interop {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and logger installation, macros live at crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Canonical descriptors and device/command traits
    pub mod api {
        pub use crate::api::*;
    }

    // Handle registry
    pub mod registry {
        pub use crate::registry::*;
    }

    // Values shared by the Direct3D backends
    pub mod d3d {
        pub use crate::d3d::*;
    }
}
