/// Mock native Direct3D 11 device and context for unit tests (no GPU required)
///
/// Tracks reference counts the way COM does, reuses freed addresses (most
/// recently freed first, like a heap allocator would) and records every
/// context call.

use std::sync::Mutex;
use rustc_hash::FxHashMap;
use gpu_interop::interop::api::Guid;
use gpu_interop::interop::registry::NativeObject;
use crate::d3d11_native::{
    ClearFlag, FormatSupport, Hresult, NativeDevice, NativeDeviceContext,
    NativeResourceDesc, NativeResult, NativeViewDesc,
};

// ============================================================================
// Mock device
// ============================================================================

struct MockResource {
    desc: NativeResourceDesc,
    refs: u32,
}

struct MockView {
    resource: NativeObject,
    desc: NativeViewDesc,
    refs: u32,
}

#[derive(Default)]
struct MockState {
    next_address: u64,
    free_addresses: Vec<u64>,
    resources: FxHashMap<NativeObject, MockResource>,
    views: FxHashMap<NativeObject, MockView>,
    other_refs: FxHashMap<NativeObject, u32>,
    private_data: FxHashMap<(NativeObject, Guid), Vec<u8>>,
    format_support: FxHashMap<u32, FormatSupport>,
    fail_next_create: Option<Hresult>,
    created: u32,
}

impl MockState {
    fn allocate(&mut self) -> NativeObject {
        let address = self.free_addresses.pop().unwrap_or_else(|| {
            self.next_address += 0x100;
            self.next_address
        });
        NativeObject(address)
    }

    fn free(&mut self, object: NativeObject) {
        self.free_addresses.push(object.0);
    }
}

pub(crate) struct MockNativeDevice {
    object: NativeObject,
    state: Mutex<MockState>,
}

impl MockNativeDevice {
    pub(crate) fn new() -> Self {
        Self {
            object: NativeObject(0xD3D1_1000_0000),
            state: Mutex::new(MockState {
                next_address: 0x1_0000,
                ..Default::default()
            }),
        }
    }

    /// Make the next create call fail with `hr`
    pub(crate) fn fail_next_create(&self, hr: Hresult) {
        self.state.lock().unwrap().fail_next_create = Some(hr);
    }

    pub(crate) fn set_format_support(&self, format: u32, support: FormatSupport) {
        self.state.lock().unwrap().format_support.insert(format, support);
    }

    /// Simulate an object created by the application, outside this layer
    pub(crate) fn create_external_resource(&self, desc: NativeResourceDesc) -> NativeObject {
        self.create_resource(&desc).unwrap()
    }

    /// Simulate an unrelated native object (e.g. a finished command list)
    pub(crate) fn create_other_object(&self) -> NativeObject {
        let mut state = self.state.lock().unwrap();
        let object = state.allocate();
        state.other_refs.insert(object, 1);
        object
    }

    pub(crate) fn is_alive(&self, object: NativeObject) -> bool {
        let state = self.state.lock().unwrap();
        state.resources.contains_key(&object) || state.views.contains_key(&object) || state.other_refs.contains_key(&object)
    }

    pub(crate) fn ref_count(&self, object: NativeObject) -> u32 {
        let state = self.state.lock().unwrap();
        state.resources.get(&object).map(|r| r.refs)
            .or_else(|| state.views.get(&object).map(|v| v.refs))
            .or_else(|| state.other_refs.get(&object).copied())
            .unwrap_or(0)
    }

    pub(crate) fn created_count(&self) -> u32 {
        self.state.lock().unwrap().created
    }

    pub(crate) fn last_resource_desc(&self, object: NativeObject) -> Option<NativeResourceDesc> {
        self.state.lock().unwrap().resources.get(&object).map(|r| r.desc)
    }

    fn take_failure(state: &mut MockState) -> NativeResult<()> {
        match state.fail_next_create.take() {
            Some(hr) => Err(hr),
            None => Ok(()),
        }
    }
}

impl NativeDevice for MockNativeDevice {
    fn object(&self) -> NativeObject {
        self.object
    }

    fn create_resource(&self, desc: &NativeResourceDesc) -> NativeResult<NativeObject> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        let object = state.allocate();
        state.resources.insert(object, MockResource { desc: *desc, refs: 1 });
        state.created += 1;
        Ok(object)
    }

    fn create_view(&self, resource: NativeObject, desc: &NativeViewDesc) -> NativeResult<NativeObject> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        match state.resources.get_mut(&resource) {
            // Views keep their resource alive
            Some(r) => r.refs += 1,
            None => return Err(Hresult::E_INVALIDARG),
        }
        let object = state.allocate();
        state.views.insert(object, MockView { resource, desc: *desc, refs: 1 });
        state.created += 1;
        Ok(object)
    }

    fn resource_desc(&self, resource: NativeObject) -> NativeResult<NativeResourceDesc> {
        let state = self.state.lock().unwrap();
        state.resources.get(&resource).map(|r| r.desc).ok_or(Hresult::E_INVALIDARG)
    }

    fn view_desc(&self, view: NativeObject) -> NativeResult<NativeViewDesc> {
        let state = self.state.lock().unwrap();
        state.views.get(&view).map(|v| v.desc).ok_or(Hresult::E_INVALIDARG)
    }

    fn view_resource(&self, view: NativeObject) -> NativeResult<NativeObject> {
        let mut state = self.state.lock().unwrap();
        let resource = state.views.get(&view).map(|v| v.resource).ok_or(Hresult::E_INVALIDARG)?;
        if let Some(r) = state.resources.get_mut(&resource) {
            r.refs += 1;
        }
        Ok(resource)
    }

    fn check_format_support(&self, format: u32) -> NativeResult<FormatSupport> {
        let state = self.state.lock().unwrap();
        state.format_support.get(&format).copied().ok_or(Hresult::E_FAIL)
    }

    fn get_private_data(&self, object: NativeObject, guid: &Guid, data: &mut [u8]) -> NativeResult<usize> {
        let state = self.state.lock().unwrap();
        let stored = state.private_data.get(&(object, *guid)).ok_or(Hresult::DXGI_ERROR_NOT_FOUND)?;
        if stored.len() > data.len() {
            return Err(Hresult::DXGI_ERROR_MORE_DATA);
        }
        data[..stored.len()].copy_from_slice(stored);
        Ok(stored.len())
    }

    fn set_private_data(&self, object: NativeObject, guid: &Guid, data: &[u8]) -> NativeResult<()> {
        let mut state = self.state.lock().unwrap();
        state.private_data.insert((object, *guid), data.to_vec());
        Ok(())
    }

    fn release(&self, object: NativeObject) -> u32 {
        let mut state = self.state.lock().unwrap();
        if let Some(r) = state.resources.get_mut(&object) {
            r.refs -= 1;
            let refs = r.refs;
            if refs == 0 {
                state.resources.remove(&object);
                state.free(object);
            }
            return refs;
        }
        if let Some(v) = state.views.get_mut(&object) {
            v.refs -= 1;
            let (refs, resource) = (v.refs, v.resource);
            if refs == 0 {
                state.views.remove(&object);
                state.free(object);
                drop(state);
                self.release(resource);
            }
            return refs;
        }
        if let Some(refs) = state.other_refs.get_mut(&object) {
            *refs -= 1;
            let refs = *refs;
            if refs == 0 {
                state.other_refs.remove(&object);
                state.free(object);
            }
            return refs;
        }
        panic!("release of dead object {}", object);
    }
}

// ============================================================================
// Mock context
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ContextCall {
    ClearDepthStencilView { dsv: NativeObject, flags: ClearFlag, depth: f32, stencil: u8 },
    ClearRenderTargetView { rtv: NativeObject, color: [f32; 4] },
    CopyResource { dest: NativeObject, source: NativeObject },
    Flush,
}

pub(crate) struct MockNativeContext {
    object: NativeObject,
    calls: Mutex<Vec<ContextCall>>,
}

impl MockNativeContext {
    pub(crate) fn new() -> Self {
        Self {
            object: NativeObject(0xC0_7E47),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<ContextCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl NativeDeviceContext for MockNativeContext {
    fn object(&self) -> NativeObject {
        self.object
    }

    fn clear_depth_stencil_view(&self, dsv: NativeObject, flags: ClearFlag, depth: f32, stencil: u8) {
        self.calls.lock().unwrap().push(ContextCall::ClearDepthStencilView { dsv, flags, depth, stencil });
    }

    fn clear_render_target_view(&self, rtv: NativeObject, color: [f32; 4]) {
        self.calls.lock().unwrap().push(ContextCall::ClearRenderTargetView { rtv, color });
    }

    fn copy_resource(&self, dest: NativeObject, source: NativeObject) {
        self.calls.lock().unwrap().push(ContextCall::CopyResource { dest, source });
    }

    fn flush(&self) {
        self.calls.lock().unwrap().push(ContextCall::Flush);
    }
}
