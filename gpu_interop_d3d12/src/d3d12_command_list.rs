/// Direct3D 12 command lists and queues
///
/// `D3D12CommandList` records into an open ID3D12GraphicsCommandList.
/// `D3D12CommandQueue` owns one such list as its immediate command list and
/// submits it on `flush`.

use std::sync::Arc;
use gpu_interop::interop::api::{
    ClearFlags, CommandList, CommandQueue, Device, DeviceObject, Guid, ResourceUsage,
};
use gpu_interop::interop::registry::{ResourceHandle, ResourceViewHandle};
use gpu_interop::interop::Result;
use gpu_interop::interop_trace;
use crate::d3d12_convert::convert_resource_usage_to_states;
use crate::d3d12_device::{native_error, D3D12Device, LOG_SOURCE};
use crate::d3d12_native::{
    self as native, NativeCommandList, NativeCommandQueue, TransitionBarrier, ALL_SUBRESOURCES,
};

fn convert_clear_flags(flags: ClearFlags) -> native::ClearFlags {
    let mut internal = native::ClearFlags::empty();
    internal.set(native::ClearFlags::DEPTH, flags.contains(ClearFlags::DEPTH));
    internal.set(native::ClearFlags::STENCIL, flags.contains(ClearFlags::STENCIL));
    internal
}

// ============================================================================
// D3D12CommandList
// ============================================================================

/// Command list backed by an ID3D12GraphicsCommandList
pub struct D3D12CommandList {
    device: Arc<D3D12Device>,
    native: Arc<dyn NativeCommandList>,
    has_commands: bool,
}

impl D3D12CommandList {
    /// Wrap a native command list that is open for recording
    pub fn new(device: Arc<D3D12Device>, native: Arc<dyn NativeCommandList>) -> Self {
        Self {
            device,
            native,
            has_commands: false,
        }
    }

    pub fn native(&self) -> &Arc<dyn NativeCommandList> {
        &self.native
    }

    /// Whether anything was recorded since the list was last opened
    pub fn has_commands(&self) -> bool {
        self.has_commands
    }
}

impl DeviceObject for D3D12CommandList {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.device
            .native()
            .get_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12GraphicsCommandList::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.device
            .native()
            .set_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12GraphicsCommandList::SetPrivateData", hr))
    }
}

impl CommandList for D3D12CommandList {
    fn device(&self) -> &dyn Device {
        &*self.device
    }

    fn transition_state(&mut self, resource: ResourceHandle, old_state: ResourceUsage, new_state: ResourceUsage) -> Result<()> {
        let object = self.device.resolve_resource(resource)?;
        let state_before = convert_resource_usage_to_states(old_state);
        let state_after = convert_resource_usage_to_states(new_state);
        if state_before == state_after {
            return Ok(());
        }

        self.native.resource_barrier(&[TransitionBarrier {
            resource: object,
            subresource: ALL_SUBRESOURCES,
            state_before,
            state_after,
        }]);
        self.has_commands = true;
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
        self.has_commands = true;
        Ok(())
    }

    fn clear_render_target_view(&mut self, rtv: ResourceViewHandle, color: [f32; 4]) -> Result<()> {
        let view = self.device.resolve_view(rtv)?;
        self.native.clear_render_target_view(view, color);
        self.has_commands = true;
        Ok(())
    }

    fn copy_resource(&mut self, source: ResourceHandle, dest: ResourceHandle) -> Result<()> {
        let source = self.device.resolve_resource(source)?;
        let dest = self.device.resolve_resource(dest)?;
        self.native.copy_resource(dest, source);
        self.has_commands = true;
        Ok(())
    }
}

// ============================================================================
// D3D12CommandQueue
// ============================================================================

/// Command queue backed by an ID3D12CommandQueue
pub struct D3D12CommandQueue {
    device: Arc<D3D12Device>,
    native: Arc<dyn NativeCommandQueue>,
    immediate: D3D12CommandList,
}

impl D3D12CommandQueue {
    /// Wrap a native queue
    ///
    /// # Arguments
    ///
    /// * `device` - Device the queue was created from
    /// * `native` - Native queue entry points
    /// * `immediate` - Open command list submitted by `flush`
    pub fn new(device: Arc<D3D12Device>, native: Arc<dyn NativeCommandQueue>, immediate: Arc<dyn NativeCommandList>) -> Self {
        Self {
            immediate: D3D12CommandList::new(device.clone(), immediate),
            device,
            native,
        }
    }

    pub fn native(&self) -> &Arc<dyn NativeCommandQueue> {
        &self.native
    }
}

impl DeviceObject for D3D12CommandQueue {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.device
            .native()
            .get_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12CommandQueue::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.device
            .native()
            .set_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12CommandQueue::SetPrivateData", hr))
    }
}

impl CommandQueue for D3D12CommandQueue {
    fn device(&self) -> &dyn Device {
        &*self.device
    }

    fn immediate_command_list(&mut self) -> &mut dyn CommandList {
        &mut self.immediate
    }

    fn flush(&mut self) -> Result<()> {
        if !self.immediate.has_commands {
            return Ok(());
        }

        let list = &self.immediate.native;
        list.close().map_err(|hr| native_error("ID3D12GraphicsCommandList::Close", hr))?;
        self.native.execute_command_lists(&[list.object()]);
        // Submitted work is gone even if reopening fails
        self.immediate.has_commands = false;
        list.reset().map_err(|hr| native_error("ID3D12GraphicsCommandList::Reset", hr))?;

        interop_trace!(LOG_SOURCE, "Flushed immediate command list {}", list.object());
        Ok(())
    }
}

#[cfg(test)]
#[path = "d3d12_command_list_tests.rs"]
mod tests;
