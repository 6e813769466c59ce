/// Direct3D 11 native mirror types and entry points
///
/// Plain Rust reproductions of the native descriptor structures, with the
/// native numeric values. View descriptor unions are expressed as enums
/// carrying the per-dimension payload. The hooking layer implements
/// `NativeDevice` and `NativeDeviceContext` over the real COM interfaces.

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
}

impl fmt::Display for Hresult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HRESULT {:#010x}", self.0 as u32)
    }
}

/// Result of a native call
pub type NativeResult<T> = std::result::Result<T, Hresult>;

// ===== RESOURCE FLAGS =====

/// D3D11_USAGE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Usage(pub u32);

impl Usage {
    pub const DEFAULT: Usage = Usage(0);
    pub const IMMUTABLE: Usage = Usage(1);
    pub const DYNAMIC: Usage = Usage(2);
    pub const STAGING: Usage = Usage(3);
}

bitflags! {
    /// D3D11_BIND_FLAG
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const STREAM_OUTPUT = 0x10;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
        const DECODER = 0x200;
        const VIDEO_ENCODER = 0x400;
    }

    /// D3D11_CPU_ACCESS_FLAG
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 0x10000;
        const READ = 0x20000;
    }

    /// D3D11_RESOURCE_MISC_FLAG (subset)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceMiscFlags: u32 {
        const GENERATE_MIPS = 0x1;
        const SHARED = 0x2;
        const TEXTURECUBE = 0x4;
        const DRAWINDIRECT_ARGS = 0x10;
        const BUFFER_ALLOW_RAW_VIEWS = 0x20;
        const BUFFER_STRUCTURED = 0x40;
        const _ = !0;
    }

    /// D3D11_DSV_FLAG
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DsvFlags: u32 {
        const READ_ONLY_DEPTH = 0x1;
        const READ_ONLY_STENCIL = 0x2;
    }

    /// D3D11_BUFFER_UAV_FLAG
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferUavFlags: u32 {
        const RAW = 0x1;
        const APPEND = 0x2;
        const COUNTER = 0x4;
    }

    /// D3D11_CLEAR_FLAG
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClearFlag: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

// ===== RESOURCE DESCRIPTORS =====

/// DXGI_SAMPLE_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

/// D3D11_BUFFER_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferDesc {
    pub byte_width: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
    pub structure_byte_stride: u32,
}

/// D3D11_TEXTURE1D_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture1dDesc {
    pub width: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

/// D3D11_TEXTURE2D_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture2dDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: u32,
    pub sample_desc: SampleDesc,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

/// D3D11_TEXTURE3D_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture3dDesc {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_levels: u32,
    pub format: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

/// Descriptor of any native resource, tagged by dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeResourceDesc {
    Buffer(BufferDesc),
    Texture1D(Texture1dDesc),
    Texture2D(Texture2dDesc),
    Texture3D(Texture3dDesc),
}

// ===== VIEW DESCRIPTORS =====

/// D3D11_DSV_DIMENSION with its payload
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

/// D3D11_DEPTH_STENCIL_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthStencilViewDesc {
    pub format: u32,
    pub dimension: DsvDimension,
    pub flags: DsvFlags,
}

/// D3D11_RTV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtvDimension {
    #[default]
    Unknown,
    Buffer { first_element: u32, num_elements: u32 },
    Texture1D { mip_slice: u32 },
    Texture1DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { mip_slice: u32 },
    Texture2DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2DMs,
    Texture2DMsArray { first_array_slice: u32, array_size: u32 },
    Texture3D { mip_slice: u32, first_w_slice: u32, w_size: u32 },
}

/// D3D11_RENDER_TARGET_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTargetViewDesc {
    pub format: u32,
    pub dimension: RtvDimension,
}

/// D3D11_SRV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SrvDimension {
    #[default]
    Unknown,
    Buffer { first_element: u32, num_elements: u32 },
    Texture1D { most_detailed_mip: u32, mip_levels: u32 },
    Texture1DArray { most_detailed_mip: u32, mip_levels: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { most_detailed_mip: u32, mip_levels: u32 },
    Texture2DArray { most_detailed_mip: u32, mip_levels: u32, first_array_slice: u32, array_size: u32 },
    Texture2DMs,
    Texture2DMsArray { first_array_slice: u32, array_size: u32 },
    Texture3D { most_detailed_mip: u32, mip_levels: u32 },
    TextureCube { most_detailed_mip: u32, mip_levels: u32 },
    TextureCubeArray { most_detailed_mip: u32, mip_levels: u32, first_2d_array_face: u32, num_cubes: u32 },
    BufferEx { first_element: u32, num_elements: u32, flags: u32 },
}

/// D3D11_SHADER_RESOURCE_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderResourceViewDesc {
    pub format: u32,
    pub dimension: SrvDimension,
}

/// D3D11_UAV_DIMENSION with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UavDimension {
    #[default]
    Unknown,
    Buffer { first_element: u32, num_elements: u32, flags: BufferUavFlags },
    Texture1D { mip_slice: u32 },
    Texture1DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2D { mip_slice: u32 },
    Texture2DArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture3D { mip_slice: u32, first_w_slice: u32, w_size: u32 },
}

/// D3D11_UNORDERED_ACCESS_VIEW_DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnorderedAccessViewDesc {
    pub format: u32,
    pub dimension: UavDimension,
}

/// Descriptor of any native view, tagged by view category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeViewDesc {
    DepthStencil(DepthStencilViewDesc),
    RenderTarget(RenderTargetViewDesc),
    ShaderResource(ShaderResourceViewDesc),
    UnorderedAccess(UnorderedAccessViewDesc),
}

// ===== SAMPLER / FIXED FUNCTION =====

/// D3D11_SAMPLER_DESC
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

// ============================================================================
// Native entry points
// ============================================================================

/// ID3D11Device subset
///
/// Every returned object carries one reference owned by the caller.
pub trait NativeDevice: Send + Sync {
    /// The device object itself (target of device-level private data)
    fn object(&self) -> NativeObject;

    fn create_resource(&self, desc: &NativeResourceDesc) -> NativeResult<NativeObject>;

    fn create_view(&self, resource: NativeObject, desc: &NativeViewDesc) -> NativeResult<NativeObject>;

    /// Describe a resource (GetType + GetDesc)
    fn resource_desc(&self, resource: NativeObject) -> NativeResult<NativeResourceDesc>;

    /// Describe a view (QueryInterface on the view categories + GetDesc)
    fn view_desc(&self, view: NativeObject) -> NativeResult<NativeViewDesc>;

    /// Resource behind a view (ID3D11View::GetResource, adds a reference)
    fn view_resource(&self, view: NativeObject) -> NativeResult<NativeObject>;

    fn check_format_support(&self, format: u32) -> NativeResult<FormatSupport>;

    /// Private data of a device child (or the device itself)
    ///
    /// # Returns
    ///
    /// The size of the stored data, which may exceed `data.len()`
    fn get_private_data(&self, object: NativeObject, guid: &Guid, data: &mut [u8]) -> NativeResult<usize>;

    fn set_private_data(&self, object: NativeObject, guid: &Guid, data: &[u8]) -> NativeResult<()>;

    /// Release one reference, returning the remaining count
    fn release(&self, object: NativeObject) -> u32;
}

/// ID3D11DeviceContext subset
pub trait NativeDeviceContext: Send + Sync {
    fn object(&self) -> NativeObject;

    fn clear_depth_stencil_view(&self, dsv: NativeObject, flags: ClearFlag, depth: f32, stencil: u8);

    fn clear_render_target_view(&self, rtv: NativeObject, color: [f32; 4]);

    fn copy_resource(&self, dest: NativeObject, source: NativeObject);

    fn flush(&self);
}

// ============================================================================
// Scoped native reference
// ============================================================================

/// Reference taken by the core during a call, released on drop
pub(crate) struct NativeRef<'a> {
    device: &'a dyn NativeDevice,
    object: NativeObject,
}

impl<'a> NativeRef<'a> {
    pub(crate) fn new(device: &'a dyn NativeDevice, object: NativeObject) -> Self {
        Self { device, object }
    }

    pub(crate) fn object(&self) -> NativeObject {
        self.object
    }
}

impl Drop for NativeRef<'_> {
    fn drop(&mut self) {
        self.device.release(self.object);
    }
}
