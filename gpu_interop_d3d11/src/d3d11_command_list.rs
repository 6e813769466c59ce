/// Direct3D 11 execution contexts
///
/// `D3D11DeviceContext` wraps the immediate (or a deferred) device context
/// and plays both the queue and the command list role: its immediate command
/// list is itself. `D3D11CommandList` wraps a finished native command list
/// and only supports what a closed recording can do.
///
/// Direct3D 11 tracks resource states itself, so transitions are accepted
/// and ignored everywhere.

use std::sync::Arc;
use gpu_interop::interop::api::{
    ClearFlags, CommandList, CommandQueue, Device, DeviceObject, Guid, ResourceUsage,
};
use gpu_interop::interop::registry::{NativeObject, ResourceHandle, ResourceViewHandle};
use gpu_interop::interop::{Error, Result};
use gpu_interop::interop_warn;
use crate::d3d11_device::{native_error, D3D11Device, LOG_SOURCE};
use crate::d3d11_native::{ClearFlag, NativeDeviceContext};

fn convert_clear_flags(flags: ClearFlags) -> ClearFlag {
    let mut native = ClearFlag::empty();
    native.set(ClearFlag::DEPTH, flags.contains(ClearFlags::DEPTH));
    native.set(ClearFlag::STENCIL, flags.contains(ClearFlags::STENCIL));
    native
}

// ============================================================================
// D3D11DeviceContext
// ============================================================================

/// Queue and command list backed by an ID3D11DeviceContext
///
/// Native contexts are not thread safe; callers serialize access (the
/// `&mut self` receivers enforce it for a single owner).
pub struct D3D11DeviceContext {
    device: Arc<D3D11Device>,
    native: Arc<dyn NativeDeviceContext>,
}

impl D3D11DeviceContext {
    pub fn new(device: Arc<D3D11Device>, native: Arc<dyn NativeDeviceContext>) -> Self {
        Self { device, native }
    }

    pub fn native(&self) -> &Arc<dyn NativeDeviceContext> {
        &self.native
    }
}

impl DeviceObject for D3D11DeviceContext {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.device
            .native()
            .get_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D11DeviceContext::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.device
            .native()
            .set_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D11DeviceContext::SetPrivateData", hr))
    }
}

impl CommandList for D3D11DeviceContext {
    fn device(&self) -> &dyn Device {
        &*self.device
    }

    fn transition_state(&mut self, _resource: ResourceHandle, _old: ResourceUsage, _new: ResourceUsage) -> Result<()> {
        Ok(())
    }

    fn clear_depth_stencil_view(
        &mut self,
        dsv: ResourceViewHandle,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) -> Result<()> {
        let view = self.device.resolve_view(dsv)?;
        self.native.clear_depth_stencil_view(view, convert_clear_flags(flags), depth, stencil);
        Ok(())
    }

    fn clear_render_target_view(&mut self, rtv: ResourceViewHandle, color: [f32; 4]) -> Result<()> {
        let view = self.device.resolve_view(rtv)?;
        self.native.clear_render_target_view(view, color);
        Ok(())
    }

    fn copy_resource(&mut self, source: ResourceHandle, dest: ResourceHandle) -> Result<()> {
        let source = self.device.resolve_resource(source)?;
        let dest = self.device.resolve_resource(dest)?;
        self.native.copy_resource(dest, source);
        Ok(())
    }
}

impl CommandQueue for D3D11DeviceContext {
    fn device(&self) -> &dyn Device {
        &*self.device
    }

    fn immediate_command_list(&mut self) -> &mut dyn CommandList {
        self
    }

    fn flush(&mut self) -> Result<()> {
        self.native.flush();
        Ok(())
    }
}

// ============================================================================
// D3D11CommandList
// ============================================================================

/// Finished ID3D11CommandList (recorded role)
///
/// Holds one native reference, released on drop.
pub struct D3D11CommandList {
    device: Arc<D3D11Device>,
    object: NativeObject,
}

impl D3D11CommandList {
    /// Wrap a finished command list, taking over one reference to it
    pub fn new(device: Arc<D3D11Device>, object: NativeObject) -> Self {
        Self { device, object }
    }

    pub fn object(&self) -> NativeObject {
        self.object
    }

    fn closed(&self, operation: &str) -> Error {
        interop_warn!(LOG_SOURCE, "{} on finished command list {}", operation, self.object);
        Error::InvalidOperation(format!("{} is not possible on a finished command list", operation))
    }
}

impl DeviceObject for D3D11CommandList {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.device
            .native()
            .get_private_data(self.object, guid, data)
            .map_err(|hr| native_error("ID3D11CommandList::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.device
            .native()
            .set_private_data(self.object, guid, data)
            .map_err(|hr| native_error("ID3D11CommandList::SetPrivateData", hr))
    }
}

impl CommandList for D3D11CommandList {
    fn device(&self) -> &dyn Device {
        &*self.device
    }

    fn transition_state(&mut self, _resource: ResourceHandle, _old: ResourceUsage, _new: ResourceUsage) -> Result<()> {
        Ok(())
    }

    fn clear_depth_stencil_view(&mut self, _dsv: ResourceViewHandle, _flags: ClearFlags, _depth: f32, _stencil: u8) -> Result<()> {
        Err(self.closed("clear_depth_stencil_view"))
    }

    fn clear_render_target_view(&mut self, _rtv: ResourceViewHandle, _color: [f32; 4]) -> Result<()> {
        Err(self.closed("clear_render_target_view"))
    }

    fn copy_resource(&mut self, _source: ResourceHandle, _dest: ResourceHandle) -> Result<()> {
        Err(self.closed("copy_resource"))
    }
}

impl Drop for D3D11CommandList {
    fn drop(&mut self) {
        self.device.native().release(self.object);
    }
}

#[cfg(test)]
#[path = "d3d11_command_list_tests.rs"]
mod tests;
