/// Device and command abstraction traits
///
/// Implemented once per backend on top of its converters and a pair of
/// handle registries. Every native failure is returned as an `Err`; nothing
/// here panics on a native error.

use bitflags::bitflags;
use crate::error::Result;
use crate::registry::{ResourceHandle, ResourceViewHandle};
use crate::api::{Format, ResourceDesc, ResourceUsage, ResourceViewDesc};

/// 16-byte private-data key (a native GUID in byte order)
pub type Guid = [u8; 16];

/// Native graphics API behind a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderApi {
    D3D11,
    D3D12,
}

bitflags! {
    /// Aspects cleared by `CommandList::clear_depth_stencil_view`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

// ============================================================================
// DeviceObject
// ============================================================================

/// Anything carrying native private data
pub trait DeviceObject: Send + Sync {
    /// Read the private data stored under `guid` into `data`
    ///
    /// # Returns
    ///
    /// The number of bytes written
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize>;

    /// Store `data` under `guid` on the native object
    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()>;
}

// ============================================================================
// Device
// ============================================================================

/// Logical device: resource and view creation, destruction and introspection
pub trait Device: DeviceObject {
    /// Native API implemented by this device
    fn api(&self) -> RenderApi;

    /// Check whether `format` supports every usage in `usage`
    fn check_format_support(&self, format: Format, usage: ResourceUsage) -> bool;

    /// Check whether `resource` still refers to a live native resource
    fn is_resource_valid(&self, resource: ResourceHandle) -> bool;

    /// Check whether `view` still refers to a live native view
    fn is_resource_view_valid(&self, view: ResourceViewHandle) -> bool;

    /// Create a resource
    ///
    /// # Arguments
    ///
    /// * `desc` - Resource descriptor
    /// * `initial_state` - State the resource starts in (ignored where the
    ///   native API tracks states itself)
    fn create_resource(&self, desc: &ResourceDesc, initial_state: ResourceUsage) -> Result<ResourceHandle>;

    /// Create a view of `resource`
    ///
    /// # Arguments
    ///
    /// * `resource` - Viewed resource
    /// * `usage_type` - View category: `RENDER_TARGET`, `DEPTH_STENCIL`,
    ///   `SHADER_RESOURCE` or `UNORDERED_ACCESS`
    /// * `desc` - View descriptor
    fn create_resource_view(
        &self,
        resource: ResourceHandle,
        usage_type: ResourceUsage,
        desc: &ResourceViewDesc,
    ) -> Result<ResourceViewHandle>;

    /// Unregister and release a resource created through this device
    fn destroy_resource(&self, resource: ResourceHandle) -> Result<()>;

    /// Unregister and release a view created through this device
    fn destroy_resource_view(&self, view: ResourceViewHandle) -> Result<()>;

    /// Resource a view was created for
    fn get_resource_from_view(&self, view: ResourceViewHandle) -> Result<ResourceHandle>;

    /// Introspect the native resource behind `resource`
    fn get_resource_desc(&self, resource: ResourceHandle) -> Result<ResourceDesc>;

    /// Introspect the native view behind `view`
    fn get_resource_view_desc(&self, view: ResourceViewHandle) -> Result<ResourceViewDesc>;

    /// Block until the GPU is idle
    fn wait_idle(&self) -> Result<()>;
}

// ============================================================================
// CommandList / CommandQueue
// ============================================================================

/// Command recording capability
pub trait CommandList: DeviceObject {
    /// Device this list belongs to
    fn device(&self) -> &dyn Device;

    /// Declare a resource state transition
    ///
    /// Must always be called even on backends where it is a no-op.
    fn transition_state(
        &mut self,
        resource: ResourceHandle,
        old_state: ResourceUsage,
        new_state: ResourceUsage,
    ) -> Result<()>;

    /// Clear the depth and/or stencil aspect of a depth-stencil view
    fn clear_depth_stencil_view(
        &mut self,
        dsv: ResourceViewHandle,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) -> Result<()>;

    /// Clear a render target view to `color`
    fn clear_render_target_view(&mut self, rtv: ResourceViewHandle, color: [f32; 4]) -> Result<()>;

    /// Copy the whole content of `source` into `dest`
    fn copy_resource(&mut self, source: ResourceHandle, dest: ResourceHandle) -> Result<()>;
}

/// Submission capability
pub trait CommandQueue: DeviceObject {
    /// Device this queue belongs to
    fn device(&self) -> &dyn Device;

    /// List that executes directly on this queue
    fn immediate_command_list(&mut self) -> &mut dyn CommandList;

    /// Submit everything recorded on the immediate list
    fn flush(&mut self) -> Result<()>;
}
