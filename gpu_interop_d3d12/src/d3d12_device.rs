/// D3D12Device - Device implementation on top of a native ID3D12Device
///
/// Resources are committed resources holding one native reference that
/// `destroy_resource` releases. Views are descriptors, not objects: there is
/// no way to ask a descriptor which resource it points at, so the device
/// keeps the view descriptor and its resource next to the view registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use rustc_hash::FxHashMap;
use gpu_interop::interop::api::{
    Config, Device, DeviceObject, Format, Guid, MemoryHeap, RenderApi, ResourceDesc,
    ResourceUsage, ResourceViewDesc,
};
use gpu_interop::interop::registry::{
    NativeObject, ObjectRegistry, RawHandle, ResourceHandle, ResourceViewHandle,
};
use gpu_interop::interop::{Error, Result};
use gpu_interop::{interop_debug, interop_err, interop_error, interop_info, interop_trace};
use crate::d3d12_convert::{
    convert_native_view_desc, convert_resource_desc, convert_resource_desc_to_native,
    convert_resource_usage_to_format_support, convert_resource_usage_to_states,
    convert_resource_view_desc_to_native, native_resource_desc_for, native_view_desc_for,
};
use crate::d3d12_native::{HeapProperties, Hresult, NativeDevice, NativeViewDesc};

pub(crate) const LOG_SOURCE: &str = "gpu_interop::d3d12";

/// Turn a failed native call into an error, logging it
pub(crate) fn native_error(call: &str, hr: Hresult) -> Error {
    if hr == Hresult::E_OUTOFMEMORY {
        interop_error!(LOG_SOURCE, "{} failed: out of memory", call);
        Error::OutOfMemory
    } else {
        interop_err!(LOG_SOURCE, "{} failed: {}", call, hr)
    }
}

/// What a view descriptor was written from
#[derive(Debug, Clone, Copy)]
struct ViewInfo {
    resource: NativeObject,
    desc: NativeViewDesc,
}

/// Direct3D 12 device
pub struct D3D12Device {
    native: Arc<dyn NativeDevice>,
    config: Config,
    resources: ObjectRegistry<ResourceHandle>,
    views: ObjectRegistry<ResourceViewHandle>,
    view_info: Mutex<FxHashMap<NativeObject, ViewInfo>>,
}

impl D3D12Device {
    /// Wrap a native device
    ///
    /// # Arguments
    ///
    /// * `native` - Native device entry points
    /// * `config` - Device configuration
    pub fn new(native: Arc<dyn NativeDevice>, config: Config) -> Self {
        interop_info!(LOG_SOURCE, "Wrapping D3D12 device '{}' ({})", config.device_name, native.object());
        Self {
            resources: ObjectRegistry::new("resource", config.trace_object_lifetime),
            views: ObjectRegistry::new("resource view", config.trace_object_lifetime),
            view_info: Mutex::new(FxHashMap::default()),
            native,
            config,
        }
    }

    pub fn native(&self) -> &Arc<dyn NativeDevice> {
        &self.native
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn view_info(&self) -> MutexGuard<'_, FxHashMap<NativeObject, ViewInfo>> {
        self.view_info.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Hook notifications =====

    /// Capture a resource created outside this layer
    pub fn register_resource(&self, resource: NativeObject) -> Result<ResourceHandle> {
        self.resources.register(resource)
    }

    /// Capture a view descriptor written outside this layer
    ///
    /// # Arguments
    ///
    /// * `view` - CPU descriptor handle the view was written to
    /// * `resource` - Resource the view was created for
    /// * `desc` - Descriptor the view was created with
    pub fn register_resource_view(&self, view: NativeObject, resource: NativeObject, desc: &NativeViewDesc) -> Result<ResourceViewHandle> {
        let handle = self.views.register(view)?;
        self.view_info().insert(view, ViewInfo { resource, desc: *desc });
        Ok(handle)
    }

    /// Native resource is about to be destroyed
    pub fn on_destroy_resource(&self, resource: NativeObject) {
        self.resources.unregister_object(resource);
    }

    /// Descriptor is about to be overwritten or its heap destroyed
    pub fn on_destroy_resource_view(&self, view: NativeObject) {
        if self.views.unregister_object(view).is_some() {
            self.view_info().remove(&view);
        }
    }

    // ===== Handle resolution =====

    pub(crate) fn resolve_resource(&self, resource: ResourceHandle) -> Result<NativeObject> {
        self.resources
            .resolve(resource)
            .ok_or_else(|| Error::InvalidHandle(format!("resource {:#x}", resource.to_raw())))
    }

    pub(crate) fn resolve_view(&self, view: ResourceViewHandle) -> Result<NativeObject> {
        self.views
            .resolve(view)
            .ok_or_else(|| Error::InvalidHandle(format!("resource view {:#x}", view.to_raw())))
    }

    fn resolve_view_info(&self, view: ResourceViewHandle) -> Result<ViewInfo> {
        let object = self.resolve_view(view)?;
        self.view_info()
            .get(&object)
            .copied()
            .ok_or_else(|| Error::InvalidResource(format!("no descriptor recorded for view {}", object)))
    }
}

impl DeviceObject for D3D12Device {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.native
            .get_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12Device::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.native
            .set_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D12Device::SetPrivateData", hr))
    }
}

impl Device for D3D12Device {
    fn api(&self) -> RenderApi {
        RenderApi::D3D12
    }

    fn check_format_support(&self, format: Format, usage: ResourceUsage) -> bool {
        let required = convert_resource_usage_to_format_support(usage);
        match self.native.check_format_support(format.raw()) {
            Ok(support) => support.contains(required),
            Err(hr) => {
                interop_debug!(LOG_SOURCE, "CheckFeatureSupport({}) failed: {}", format.raw(), hr);
                false
            }
        }
    }

    fn is_resource_valid(&self, resource: ResourceHandle) -> bool {
        self.resources.is_valid(resource)
    }

    fn is_resource_view_valid(&self, view: ResourceViewHandle) -> bool {
        self.views.is_valid(view)
    }

    fn create_resource(&self, desc: &ResourceDesc, initial_state: ResourceUsage) -> Result<ResourceHandle> {
        let mut internal = native_resource_desc_for(desc.ty)
            .ok_or_else(|| Error::InvalidResource("cannot create a resource of unknown type".to_string()))?;
        if desc.heap == MemoryHeap::Unknown {
            return Err(Error::InvalidResource("cannot create a resource in an unknown heap".to_string()));
        }
        let mut props = HeapProperties::default();
        convert_resource_desc_to_native(desc, &mut internal, &mut props);

        let object = self
            .native
            .create_committed_resource(&props, &internal, convert_resource_usage_to_states(initial_state))
            .map_err(|hr| native_error("ID3D12Device::CreateCommittedResource", hr))?;
        self.resources.register(object).map_err(|err| {
            self.native.release(object);
            err
        })
    }

    fn create_resource_view(
        &self,
        resource: ResourceHandle,
        usage_type: ResourceUsage,
        desc: &ResourceViewDesc,
    ) -> Result<ResourceViewHandle> {
        let resource_object = self.resolve_resource(resource)?;
        let mut internal = native_view_desc_for(usage_type).ok_or_else(|| {
            Error::InvalidOperation(format!("{:?} does not name a view category", usage_type))
        })?;
        convert_resource_view_desc_to_native(desc, &mut internal);

        let view = self
            .native
            .create_view(resource_object, &internal)
            .map_err(|hr| native_error("ID3D12Device::CreateView", hr))?;
        self.register_resource_view(view, resource_object, &internal).map_err(|err| {
            self.native.free_view(view);
            err
        })
    }

    fn destroy_resource(&self, resource: ResourceHandle) -> Result<()> {
        let object = self
            .resources
            .take(resource)
            .ok_or_else(|| Error::InvalidHandle(format!("resource {:#x}", resource.to_raw())))?;
        self.native.release(object);
        Ok(())
    }

    fn destroy_resource_view(&self, view: ResourceViewHandle) -> Result<()> {
        let object = self
            .views
            .take(view)
            .ok_or_else(|| Error::InvalidHandle(format!("resource view {:#x}", view.to_raw())))?;
        self.view_info().remove(&object);
        self.native.free_view(object);
        Ok(())
    }

    fn get_resource_from_view(&self, view: ResourceViewHandle) -> Result<ResourceHandle> {
        let info = self.resolve_view_info(view)?;
        self.resources.find(info.resource).ok_or_else(|| {
            Error::InvalidResource(format!("resource {} behind view is not registered", info.resource))
        })
    }

    fn get_resource_desc(&self, resource: ResourceHandle) -> Result<ResourceDesc> {
        let object = self.resolve_resource(resource)?;
        let internal = self
            .native
            .resource_desc(object)
            .map_err(|hr| native_error("ID3D12Resource::GetDesc", hr))?;
        let props = self
            .native
            .heap_properties(object)
            .map_err(|hr| native_error("ID3D12Resource::GetHeapProperties", hr))?;
        Ok(convert_resource_desc(&internal, &props))
    }

    fn get_resource_view_desc(&self, view: ResourceViewHandle) -> Result<ResourceViewDesc> {
        Ok(convert_native_view_desc(&self.resolve_view_info(view)?.desc))
    }

    fn wait_idle(&self) -> Result<()> {
        self.native
            .wait_idle()
            .map_err(|hr| native_error("ID3D12Fence::SetEventOnCompletion", hr))
    }
}

impl Drop for D3D12Device {
    fn drop(&mut self) {
        if !self.resources.is_empty() || !self.views.is_empty() {
            interop_debug!(
                LOG_SOURCE,
                "Device '{}' dropped with {} resources and {} views still registered",
                self.config.device_name,
                self.resources.len(),
                self.views.len()
            );
        }
        if self.config.trace_object_lifetime {
            for (handle, object) in self.resources.entries() {
                interop_trace!(LOG_SOURCE, "Outstanding resource {} ({:#x})", object, handle.to_raw());
            }
        }
    }
}

#[cfg(test)]
#[path = "d3d12_device_tests.rs"]
mod tests;
