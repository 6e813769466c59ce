/// D3D11Device - Device implementation on top of a native ID3D11Device
///
/// Owns the resource and view registries for one native device. Objects
/// created through `create_resource`/`create_resource_view` hold one native
/// reference that `destroy_*` releases. Objects captured through
/// `register_*` are not owned; the hooking layer reports their destruction
/// through `on_destroy_*`.

use std::sync::Arc;
use gpu_interop::interop::api::{
    Config, Device, DeviceObject, Format, Guid, RenderApi, ResourceDesc,
    ResourceUsage, ResourceViewDesc,
};
use gpu_interop::interop::registry::{
    NativeObject, ObjectRegistry, RawHandle, ResourceHandle, ResourceViewHandle,
};
use gpu_interop::interop::{Error, Result};
use gpu_interop::{interop_debug, interop_err, interop_error, interop_info, interop_trace};
use crate::d3d11_convert::{
    convert_native_resource_desc, convert_native_view_desc, convert_resource_desc_to_native,
    convert_resource_usage_to_format_support, convert_resource_view_desc_to_native,
    native_resource_desc_for, native_view_desc_for,
};
use crate::d3d11_native::{Hresult, NativeDevice, NativeRef};

pub(crate) const LOG_SOURCE: &str = "gpu_interop::d3d11";

/// Turn a failed native call into an error, logging it
pub(crate) fn native_error(call: &str, hr: Hresult) -> Error {
    if hr == Hresult::E_OUTOFMEMORY {
        interop_error!(LOG_SOURCE, "{} failed: out of memory", call);
        Error::OutOfMemory
    } else {
        interop_err!(LOG_SOURCE, "{} failed: {}", call, hr)
    }
}

/// Direct3D 11 device
pub struct D3D11Device {
    native: Arc<dyn NativeDevice>,
    config: Config,
    resources: ObjectRegistry<ResourceHandle>,
    views: ObjectRegistry<ResourceViewHandle>,
}

impl D3D11Device {
    /// Wrap a native device
    ///
    /// # Arguments
    ///
    /// * `native` - Native device entry points
    /// * `config` - Device configuration
    pub fn new(native: Arc<dyn NativeDevice>, config: Config) -> Self {
        interop_info!(LOG_SOURCE, "Wrapping D3D11 device '{}' ({})", config.device_name, native.object());
        Self {
            resources: ObjectRegistry::new("resource", config.trace_object_lifetime),
            views: ObjectRegistry::new("resource view", config.trace_object_lifetime),
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

    // ===== Hook notifications =====

    /// Capture a resource created outside this layer (swap chain back buffer,
    /// application resource seen by the hooks)
    pub fn register_resource(&self, resource: NativeObject) -> Result<ResourceHandle> {
        self.resources.register(resource)
    }

    /// Capture a view created outside this layer
    pub fn register_resource_view(&self, view: NativeObject) -> Result<ResourceViewHandle> {
        self.views.register(view)
    }

    /// Native resource is about to be destroyed
    pub fn on_destroy_resource(&self, resource: NativeObject) {
        self.resources.unregister_object(resource);
    }

    /// Native view is about to be destroyed
    pub fn on_destroy_resource_view(&self, view: NativeObject) {
        self.views.unregister_object(view);
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

    /// Release an object this layer just created if registering it failed
    fn release_on_error<T>(&self, object: NativeObject, registered: Result<T>) -> Result<T> {
        registered.map_err(|err| {
            self.native.release(object);
            err
        })
    }
}

impl DeviceObject for D3D11Device {
    fn get_private_data(&self, guid: &Guid, data: &mut [u8]) -> Result<usize> {
        self.native
            .get_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D11Device::GetPrivateData", hr))
    }

    fn set_private_data(&self, guid: &Guid, data: &[u8]) -> Result<()> {
        self.native
            .set_private_data(self.native.object(), guid, data)
            .map_err(|hr| native_error("ID3D11Device::SetPrivateData", hr))
    }
}

impl Device for D3D11Device {
    fn api(&self) -> RenderApi {
        RenderApi::D3D11
    }

    fn check_format_support(&self, format: Format, usage: ResourceUsage) -> bool {
        let required = convert_resource_usage_to_format_support(usage);
        match self.native.check_format_support(format.raw()) {
            Ok(support) => support.contains(required),
            Err(hr) => {
                interop_debug!(LOG_SOURCE, "CheckFormatSupport({}) failed: {}", format.raw(), hr);
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

    fn create_resource(&self, desc: &ResourceDesc, _initial_state: ResourceUsage) -> Result<ResourceHandle> {
        let mut internal = native_resource_desc_for(desc.ty)
            .ok_or_else(|| Error::InvalidResource("cannot create a resource of unknown type".to_string()))?;
        convert_resource_desc_to_native(desc, &mut internal);

        let object = self
            .native
            .create_resource(&internal)
            .map_err(|hr| native_error("ID3D11Device::CreateResource", hr))?;
        self.release_on_error(object, self.resources.register(object))
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

        let object = self
            .native
            .create_view(resource_object, &internal)
            .map_err(|hr| native_error("ID3D11Device::CreateView", hr))?;
        self.release_on_error(object, self.views.register(object))
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
        self.native.release(object);
        Ok(())
    }

    fn get_resource_from_view(&self, view: ResourceViewHandle) -> Result<ResourceHandle> {
        let view_object = self.resolve_view(view)?;
        let resource = self
            .native
            .view_resource(view_object)
            .map_err(|hr| native_error("ID3D11View::GetResource", hr))?;
        let resource = NativeRef::new(&*self.native, resource);

        self.resources.find(resource.object()).ok_or_else(|| {
            Error::InvalidResource(format!("resource {} behind view is not registered", resource.object()))
        })
    }

    fn get_resource_desc(&self, resource: ResourceHandle) -> Result<ResourceDesc> {
        let object = self.resolve_resource(resource)?;
        let internal = self
            .native
            .resource_desc(object)
            .map_err(|hr| native_error("ID3D11Resource::GetDesc", hr))?;
        Ok(convert_native_resource_desc(&internal))
    }

    fn get_resource_view_desc(&self, view: ResourceViewHandle) -> Result<ResourceViewDesc> {
        let object = self.resolve_view(view)?;
        let internal = self
            .native
            .view_desc(object)
            .map_err(|hr| native_error("ID3D11View::GetDesc", hr))?;
        Ok(convert_native_view_desc(&internal))
    }

    fn wait_idle(&self) -> Result<()> {
        // Immediate context submission is synchronous from the API's point of view
        Ok(())
    }
}

impl Drop for D3D11Device {
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
#[path = "d3d11_device_tests.rs"]
mod tests;
