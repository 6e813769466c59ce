/// Direct3D 12 native mirror types and entry points
///
/// Same conventions as the Direct3D 11 mirror: native numeric values, view
/// unions as enums carrying the per-dimension payload. Direct3D 12 views are
/// descriptors rather than objects, so the seam hands out descriptor handles
/// and the device keeps track of what each one describes.

use std::fmt;
use bitflags::bitflags;
use gpu_interop::interop::api::Guid;
use gpu_interop::interop::registry::NativeObject;

pub use gpu_interop::interop::d3d::{
    Blend, BlendOp, ComparisonFunc, CullMode, FillMode, FormatSupport, PrimitiveTopology,
    StencilOp, ENTIRE_RANGE,
};

// ===== HRESULT =====

/// Native failure code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hresult(pub i32);

impl Hresult {
    pub const E_OUTOFMEMORY: Hresult = Hresult(0x8007_000E_u32 as i32);
    pub const E_INVALIDARG: Hresult = Hresult(0x8007_0057_u32 as i32);
    pub const E_FAIL: Hresult = Hresult(0x8000_4005_u32 as i32);
    pub const DXGI_ERROR_NOT_FOUND: Hresult = Hresult(0x887A_0002_u32 as i32);
    pub const DXGI_ERROR_MORE_DATA: Hresult = Hresult(0x887A_0003_u32 as i32);
    pub const DXGI_ERROR_DEVICE_REMOVED: Hresult = Hresult(0x887A_0005_u32 as i32);
}

impl fmt::Display for Hresult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HRESULT {:#010x}", self.0 as u32)
    }
}

/// Result of a native call
pub type NativeResult<T> = std::result::Result<T, Hresult>;

// ===== STATES AND FLAGS =====

bitflags! {
    /// D3D12_RESOURCE_STATES (COMMON is the empty set)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceStates: u32 {
        const VERTEX_AND_CONSTANT_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const RENDER_TARGET = 0x4;
        const UNORDERED_ACCESS = 0x8;
        const DEPTH_WRITE = 0x10;
        const DEPTH_READ = 0x20;
        const NON_PIXEL_SHADER_RESOURCE = 0x40;
        const PIXEL_SHADER_RESOURCE = 0x80;
        const STREAM_OUT = 0x100;
        const INDIRECT_ARGUMENT = 0x200;
        const COPY_DEST = 0x400;
        const COPY_SOURCE = 0x800;
        const RESOLVE_DEST = 0x1000;
        const RESOLVE_SOURCE = 0x2000;
        const _ = !0;
    }

    /// D3D12_RESOURCE_FLAGS
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceFlags: u32 {
        const ALLOW_RENDER_TARGET = 0x1;
        const ALLOW_DEPTH_STENCIL = 0x2;
        const ALLOW_UNORDERED_ACCESS = 0x4;
        const DENY_SHADER_RESOURCE = 0x8;
        const ALLOW_CROSS_ADAPTER = 0x10;
        const ALLOW_SIMULTANEOUS_ACCESS = 0x20;
        const _ = !0;
    }

    /// D3D12_DSV_FLAGS
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DsvFlags: u32 {
        const READ_ONLY_DEPTH = 0x1;
        const READ_ONLY_STENCIL = 0x2;
    }

    /// D3D12_BUFFER_SRV_FLAGS
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferSrvFlags: u32 {
        const RAW = 0x1;
    }

    /// D3D12_BUFFER_UAV_FLAGS
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferUavFlags: u32 {
        const RAW = 0x1;
    }

    /// D3D12_CLEAR_FLAGS
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClearFlags: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

// ===== RESOURCE DESCRIPTORS =====

/// D3D12_HEAP_TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeapType(pub u32);

impl HeapType {
    pub const DEFAULT: HeapType = HeapType(1);
    pub const UPLOAD: HeapType = HeapType(2);
    pub const READBACK: HeapType = HeapType(3);
    pub const CUSTOM: HeapType = HeapType(4);
}

/// D3D12_HEAP_PROPERTIES
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapProperties {
    pub heap_type: HeapType,
    pub cpu_page_property: u32,
    pub memory_pool_preference: u32,
    pub creation_node_mask: u32,
    pub visible_node_mask: u32,
}

/// D3D12_RESOURCE_DIMENSION
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceDimension {
    #[default]
    Unknown,
    Buffer,
    Texture1D,
    Texture2D,
    Texture3D,
}

/// D3D12_TEXTURE_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureLayout(pub u32);

impl TextureLayout {
    pub const UNKNOWN: TextureLayout = TextureLayout(0);
    pub const ROW_MAJOR: TextureLayout = TextureLayout(1);
}

/// DXGI_SAMPLE_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

/// D3D12_RESOURCE_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceDesc {
    pub dimension: ResourceDimension,
    pub alignment: u64,
    pub width: u64,
    pub height: u32,
    pub depth_or_array_size: u16,
    pub mip_levels: u16,
    pub format: u32,
    pub sample_desc: SampleDesc,
    pub layout: TextureLayout,
    pub flags: ResourceFlags,
}

// ===== VIEW DESCRIPTORS =====

/// D3D12_DEFAULT_SHADER_4_COMPONENT_MAPPING (identity swizzle)
pub const DEFAULT_SHADER_4_COMPONENT_MAPPING: u32 = 0x1688;

/// D3D12_DSV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DsvDimension {
    #[default]
    Unknown,
    Texture1D { mip_slice: u32 },
    Texture1DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { mip_slice: u32 },
    Texture2DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2DMs,
    Texture2DMsArray { first_array_slice: u32, array_size: u32 },
}

/// D3D12_DEPTH_STENCIL_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthStencilViewDesc {
    pub format: u32,
    pub dimension: DsvDimension,
    pub flags: DsvFlags,
}

/// D3D12_RTV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtvDimension {
    #[default]
    Unknown,
    Buffer { first_element: u64, num_elements: u32 },
    Texture1D { mip_slice: u32 },
    Texture1DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { mip_slice: u32, plane_slice: u32 },
    Texture2DArray { mip_slice: u32, first_array_slice: u32, array_size: u32, plane_slice: u32 },
    Texture2DMs,
    Texture2DMsArray { first_array_slice: u32, array_size: u32 },
    Texture3D { mip_slice: u32, first_w_slice: u32, w_size: u32 },
}

/// D3D12_RENDER_TARGET_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTargetViewDesc {
    pub format: u32,
    pub dimension: RtvDimension,
}

/// D3D12_SRV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SrvDimension {
    #[default]
    Unknown,
    Buffer {
        first_element: u64,
        num_elements: u32,
        structure_byte_stride: u32,
        flags: BufferSrvFlags,
    },
    Texture1D { most_detailed_mip: u32, mip_levels: u32, resource_min_lod_clamp: f32 },
    Texture1DArray {
        most_detailed_mip: u32,
        mip_levels: u32,
        first_array_slice: u32,
        array_size: u32,
        resource_min_lod_clamp: f32,
    },
    Texture2D { most_detailed_mip: u32, mip_levels: u32, plane_slice: u32, resource_min_lod_clamp: f32 },
    Texture2DArray {
        most_detailed_mip: u32,
        mip_levels: u32,
        first_array_slice: u32,
        array_size: u32,
        plane_slice: u32,
        resource_min_lod_clamp: f32,
    },
    Texture2DMs,
    Texture2DMsArray { first_array_slice: u32, array_size: u32 },
    Texture3D { most_detailed_mip: u32, mip_levels: u32, resource_min_lod_clamp: f32 },
    TextureCube { most_detailed_mip: u32, mip_levels: u32, resource_min_lod_clamp: f32 },
    TextureCubeArray {
        most_detailed_mip: u32,
        mip_levels: u32,
        first_2d_array_face: u32,
        num_cubes: u32,
        resource_min_lod_clamp: f32,
    },
    /// GPU virtual address of the acceleration structure
    RaytracingAccelerationStructure { location: u64 },
}

/// D3D12_SHADER_RESOURCE_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderResourceViewDesc {
    pub format: u32,
    pub dimension: SrvDimension,
    pub shader_4_component_mapping: u32,
}

impl Default for ShaderResourceViewDesc {
    fn default() -> Self {
        Self {
            format: 0,
            dimension: SrvDimension::Unknown,
            shader_4_component_mapping: DEFAULT_SHADER_4_COMPONENT_MAPPING,
        }
    }
}

/// D3D12_UAV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UavDimension {
    #[default]
    Unknown,
    Buffer {
        first_element: u64,
        num_elements: u32,
        structure_byte_stride: u32,
        counter_offset_in_bytes: u64,
        flags: BufferUavFlags,
    },
    Texture1D { mip_slice: u32 },
    Texture1DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { mip_slice: u32, plane_slice: u32 },
    Texture2DArray { mip_slice: u32, first_array_slice: u32, array_size: u32, plane_slice: u32 },
    Texture3D { mip_slice: u32, first_w_slice: u32, w_size: u32 },
}

/// D3D12_UNORDERED_ACCESS_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnorderedAccessViewDesc {
    pub format: u32,
    pub dimension: UavDimension,
}

/// Descriptor of any native view, tagged by view category
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeViewDesc {
    DepthStencil(DepthStencilViewDesc),
    RenderTarget(RenderTargetViewDesc),
    ShaderResource(ShaderResourceViewDesc),
    UnorderedAccess(UnorderedAccessViewDesc),
}

// ===== DESCRIPTORS =====

/// D3D12_DESCRIPTOR_RANGE_TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DescriptorRangeType(pub u32);

impl DescriptorRangeType {
    pub const SRV: DescriptorRangeType = DescriptorRangeType(0);
    pub const UAV: DescriptorRangeType = DescriptorRangeType(1);
    pub const CBV: DescriptorRangeType = DescriptorRangeType(2);
    pub const SAMPLER: DescriptorRangeType = DescriptorRangeType(3);
}

/// D3D12_DESCRIPTOR_HEAP_TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DescriptorHeapType(pub u32);

impl DescriptorHeapType {
    pub const CBV_SRV_UAV: DescriptorHeapType = DescriptorHeapType(0);
    pub const SAMPLER: DescriptorHeapType = DescriptorHeapType(1);
    pub const RTV: DescriptorHeapType = DescriptorHeapType(2);
    pub const DSV: DescriptorHeapType = DescriptorHeapType(3);
}

// ===== SAMPLER / FIXED FUNCTION =====

/// D3D12_SAMPLER_DESC
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SamplerDesc {
    pub filter: u32,
    pub address_u: u32,
    pub address_v: u32,
    pub address_w: u32,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: ComparisonFunc,
    pub border_color: [f32; 4],
    pub min_lod: f32,
    pub max_lod: f32,
}

/// D3D12_PRIMITIVE_TOPOLOGY_TYPE (pipeline state objects only know the class)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveTopologyType(pub u32);

impl PrimitiveTopologyType {
    pub const UNDEFINED: PrimitiveTopologyType = PrimitiveTopologyType(0);
    pub const POINT: PrimitiveTopologyType = PrimitiveTopologyType(1);
    pub const LINE: PrimitiveTopologyType = PrimitiveTopologyType(2);
    pub const TRIANGLE: PrimitiveTopologyType = PrimitiveTopologyType(3);
    pub const PATCH: PrimitiveTopologyType = PrimitiveTopologyType(4);
}

// ===== BARRIERS =====

/// D3D12_RESOURCE_BARRIER_ALL_SUBRESOURCES
pub const ALL_SUBRESOURCES: u32 = u32::MAX;

/// D3D12_RESOURCE_TRANSITION_BARRIER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionBarrier {
    pub resource: NativeObject,
    pub subresource: u32,
    pub state_before: ResourceStates,
    pub state_after: ResourceStates,
}

// ============================================================================
// Native entry points
// ============================================================================

/// ID3D12Device subset
///
/// Resources carry one reference owned by the caller. View descriptors are
/// allocated by the hooking layer from its own descriptor heaps.
pub trait NativeDevice: Send + Sync {
    /// The device object itself (target of device-level private data)
    fn object(&self) -> NativeObject;

    fn create_committed_resource(
        &self,
        heap: &HeapProperties,
        desc: &ResourceDesc,
        initial_state: ResourceStates,
    ) -> NativeResult<NativeObject>;

    /// Allocate a descriptor and write a view of `resource` into it
    fn create_view(&self, resource: NativeObject, desc: &NativeViewDesc) -> NativeResult<NativeObject>;

    /// Return a descriptor obtained from `create_view` to its heap
    fn free_view(&self, view: NativeObject);

    /// ID3D12Resource::GetDesc
    fn resource_desc(&self, resource: NativeObject) -> NativeResult<ResourceDesc>;

    /// ID3D12Resource::GetHeapProperties
    fn heap_properties(&self, resource: NativeObject) -> NativeResult<HeapProperties>;

    fn check_format_support(&self, format: u32) -> NativeResult<FormatSupport>;

    /// Private data of a device child (or the device itself)
    ///
    /// # Returns
    ///
    /// The size of the stored data
    fn get_private_data(&self, object: NativeObject, guid: &Guid, data: &mut [u8]) -> NativeResult<usize>;

    fn set_private_data(&self, object: NativeObject, guid: &Guid, data: &[u8]) -> NativeResult<()>;

    /// Signal and wait on a fence of every queue created from this device
    fn wait_idle(&self) -> NativeResult<()>;

    /// Release one reference, returning the remaining count
    fn release(&self, object: NativeObject) -> u32;
}

/// ID3D12GraphicsCommandList subset
pub trait NativeCommandList: Send + Sync {
    fn object(&self) -> NativeObject;

    fn resource_barrier(&self, barriers: &[TransitionBarrier]);

    fn clear_depth_stencil_view(&self, dsv: NativeObject, flags: ClearFlags, depth: f32, stencil: u8);

    fn clear_render_target_view(&self, rtv: NativeObject, color: [f32; 4]);

    fn copy_resource(&self, dest: NativeObject, source: NativeObject);

    fn close(&self) -> NativeResult<()>;

    /// Reopen a closed list for recording
    fn reset(&self) -> NativeResult<()>;
}

/// ID3D12CommandQueue subset
pub trait NativeCommandQueue: Send + Sync {
    fn object(&self) -> NativeObject;

    fn execute_command_lists(&self, lists: &[NativeObject]);
}
