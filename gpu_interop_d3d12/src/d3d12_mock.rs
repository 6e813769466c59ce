/// Mock native Direct3D 12 device, command list and queue for unit tests
///
/// Resources are reference counted like COM objects. View descriptors come
/// from a free list and hold no reference on their resource, as on a real
/// descriptor heap.

use std::sync::Mutex;
use rustc_hash::FxHashMap;
use gpu_interop::interop::api::Guid;
use gpu_interop::interop::registry::NativeObject;
use crate::d3d12_native::{
    ClearFlags, FormatSupport, HeapProperties, Hresult, NativeCommandList, NativeCommandQueue,
    NativeDevice, NativeResult, NativeViewDesc, ResourceDesc, ResourceStates, TransitionBarrier,
};

// ============================================================================
// Mock device
// ============================================================================

struct MockResource {
    desc: ResourceDesc,
    heap: HeapProperties,
    initial_state: ResourceStates,
    refs: u32,
}

#[derive(Default)]
struct MockState {
    next_address: u64,
    free_addresses: Vec<u64>,
    resources: FxHashMap<NativeObject, MockResource>,
    descriptors: FxHashMap<NativeObject, NativeViewDesc>,
    private_data: FxHashMap<(NativeObject, Guid), Vec<u8>>,
    format_support: FxHashMap<u32, FormatSupport>,
    fail_next_create: Option<Hresult>,
    fail_wait: Option<Hresult>,
    waits: u32,
}

impl MockState {
    fn allocate(&mut self) -> NativeObject {
        let address = self.free_addresses.pop().unwrap_or_else(|| {
            self.next_address += 0x40;
            self.next_address
        });
        NativeObject(address)
    }
}

pub(crate) struct MockNativeDevice {
    object: NativeObject,
    state: Mutex<MockState>,
}

impl MockNativeDevice {
    pub(crate) fn new() -> Self {
        Self {
            object: NativeObject(0xD3D1_2000_0000),
            state: Mutex::new(MockState {
                next_address: 0x2_0000,
                ..Default::default()
            }),
        }
    }

    /// Make the next create call fail with `hr`
    pub(crate) fn fail_next_create(&self, hr: Hresult) {
        self.state.lock().unwrap().fail_next_create = Some(hr);
    }

    pub(crate) fn fail_wait(&self, hr: Hresult) {
        self.state.lock().unwrap().fail_wait = Some(hr);
    }

    pub(crate) fn set_format_support(&self, format: u32, support: FormatSupport) {
        self.state.lock().unwrap().format_support.insert(format, support);
    }

    /// Simulate a resource created by the application, outside this layer
    pub(crate) fn create_external_resource(&self, heap: HeapProperties, desc: ResourceDesc) -> NativeObject {
        self.create_committed_resource(&heap, &desc, ResourceStates::empty()).unwrap()
    }

    pub(crate) fn is_alive(&self, object: NativeObject) -> bool {
        let state = self.state.lock().unwrap();
        state.resources.contains_key(&object) || state.descriptors.contains_key(&object)
    }

    pub(crate) fn ref_count(&self, object: NativeObject) -> u32 {
        self.state.lock().unwrap().resources.get(&object).map_or(0, |r| r.refs)
    }

    pub(crate) fn resource(&self, object: NativeObject) -> Option<(ResourceDesc, HeapProperties, ResourceStates)> {
        let state = self.state.lock().unwrap();
        state.resources.get(&object).map(|r| (r.desc, r.heap, r.initial_state))
    }

    pub(crate) fn descriptor(&self, view: NativeObject) -> Option<NativeViewDesc> {
        self.state.lock().unwrap().descriptors.get(&view).copied()
    }

    pub(crate) fn wait_count(&self) -> u32 {
        self.state.lock().unwrap().waits
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

    fn create_committed_resource(
        &self,
        heap: &HeapProperties,
        desc: &ResourceDesc,
        initial_state: ResourceStates,
    ) -> NativeResult<NativeObject> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        let object = state.allocate();
        state.resources.insert(object, MockResource { desc: *desc, heap: *heap, initial_state, refs: 1 });
        Ok(object)
    }

    fn create_view(&self, resource: NativeObject, desc: &NativeViewDesc) -> NativeResult<NativeObject> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        if !state.resources.contains_key(&resource) {
            return Err(Hresult::E_INVALIDARG);
        }
        let view = state.allocate();
        state.descriptors.insert(view, *desc);
        Ok(view)
    }

    fn free_view(&self, view: NativeObject) {
        let mut state = self.state.lock().unwrap();
        assert!(state.descriptors.remove(&view).is_some(), "free of unknown descriptor {}", view);
        state.free_addresses.push(view.0);
    }

    fn resource_desc(&self, resource: NativeObject) -> NativeResult<ResourceDesc> {
        let state = self.state.lock().unwrap();
        state.resources.get(&resource).map(|r| r.desc).ok_or(Hresult::E_INVALIDARG)
    }

    fn heap_properties(&self, resource: NativeObject) -> NativeResult<HeapProperties> {
        let state = self.state.lock().unwrap();
        state.resources.get(&resource).map(|r| r.heap).ok_or(Hresult::E_INVALIDARG)
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

    fn wait_idle(&self) -> NativeResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(hr) = state.fail_wait.take() {
            return Err(hr);
        }
        state.waits += 1;
        Ok(())
    }

    fn release(&self, object: NativeObject) -> u32 {
        let mut state = self.state.lock().unwrap();
        let resource = state
            .resources
            .get_mut(&object)
            .unwrap_or_else(|| panic!("release of dead object {}", object));
        resource.refs -= 1;
        let refs = resource.refs;
        if refs == 0 {
            state.resources.remove(&object);
            state.free_addresses.push(object.0);
        }
        refs
    }
}

// ============================================================================
// Mock command list and queue
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListCall {
    ResourceBarrier(Vec<TransitionBarrier>),
    ClearDepthStencilView { dsv: NativeObject, flags: ClearFlags, depth: f32, stencil: u8 },
    ClearRenderTargetView { rtv: NativeObject, color: [f32; 4] },
    CopyResource { dest: NativeObject, source: NativeObject },
    Close,
    Reset,
}

pub(crate) struct MockNativeCommandList {
    object: NativeObject,
    calls: Mutex<Vec<ListCall>>,
    fail_close: Mutex<Option<Hresult>>,
    fail_reset: Mutex<Option<Hresult>>,
}

impl MockNativeCommandList {
    pub(crate) fn new() -> Self {
        Self {
            object: NativeObject(0xC0_3D12),
            calls: Mutex::new(Vec::new()),
            fail_close: Mutex::new(None),
            fail_reset: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> Vec<ListCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn fail_close(&self, hr: Hresult) {
        *self.fail_close.lock().unwrap() = Some(hr);
    }

    pub(crate) fn fail_reset(&self, hr: Hresult) {
        *self.fail_reset.lock().unwrap() = Some(hr);
    }
}

impl NativeCommandList for MockNativeCommandList {
    fn object(&self) -> NativeObject {
        self.object
    }

    fn resource_barrier(&self, barriers: &[TransitionBarrier]) {
        self.calls.lock().unwrap().push(ListCall::ResourceBarrier(barriers.to_vec()));
    }

    fn clear_depth_stencil_view(&self, dsv: NativeObject, flags: ClearFlags, depth: f32, stencil: u8) {
        self.calls.lock().unwrap().push(ListCall::ClearDepthStencilView { dsv, flags, depth, stencil });
    }

    fn clear_render_target_view(&self, rtv: NativeObject, color: [f32; 4]) {
        self.calls.lock().unwrap().push(ListCall::ClearRenderTargetView { rtv, color });
    }

    fn copy_resource(&self, dest: NativeObject, source: NativeObject) {
        self.calls.lock().unwrap().push(ListCall::CopyResource { dest, source });
    }

    fn close(&self) -> NativeResult<()> {
        if let Some(hr) = self.fail_close.lock().unwrap().take() {
            return Err(hr);
        }
        self.calls.lock().unwrap().push(ListCall::Close);
        Ok(())
    }

    fn reset(&self) -> NativeResult<()> {
        if let Some(hr) = self.fail_reset.lock().unwrap().take() {
            return Err(hr);
        }
        self.calls.lock().unwrap().push(ListCall::Reset);
        Ok(())
    }
}

pub(crate) struct MockNativeCommandQueue {
    object: NativeObject,
    submissions: Mutex<Vec<Vec<NativeObject>>>,
}

impl MockNativeCommandQueue {
    pub(crate) fn new() -> Self {
        Self {
            object: NativeObject(0x0E_3D12),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn submissions(&self) -> Vec<Vec<NativeObject>> {
        self.submissions.lock().unwrap().clone()
    }
}

impl NativeCommandQueue for MockNativeCommandQueue {
    fn object(&self) -> NativeObject {
        self.object
    }

    fn execute_command_lists(&self, lists: &[NativeObject]) {
        self.submissions.lock().unwrap().push(lists.to_vec());
    }
}
