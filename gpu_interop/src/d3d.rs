/// Native values and conversions common to the Direct3D backends
///
/// Direct3D 11 and 12 share the numeric values of their fixed-function
/// enumerations, format support bits and view range sentinels, so both
/// backends re-export the types and converters defined here.

use bitflags::bitflags;
use crate::api::{
    BlendFactor, BlendOp as CanonicalBlendOp, CompareOp, CullMode as CanonicalCullMode,
    FillMode as CanonicalFillMode, Format, PrimitiveTopology as CanonicalTopology,
    ResourceUsage, ResourceViewDesc, StencilOp as CanonicalStencilOp,
};

/// Range sentinel meaning "up to the last mip level / array slice"
pub const ENTIRE_RANGE: u32 = u32::MAX;

pub const FACES_PER_CUBE: u32 = 6;

bitflags! {
    /// D3D11_FORMAT_SUPPORT / D3D12_FORMAT_SUPPORT1 (subset)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatSupport: u32 {
        const BUFFER = 0x1;
        const IA_VERTEX_BUFFER = 0x2;
        const IA_INDEX_BUFFER = 0x4;
        const TEXTURE2D = 0x20;
        const SHADER_LOAD = 0x100;
        const SHADER_SAMPLE = 0x200;
        const RENDER_TARGET = 0x4000;
        const DEPTH_STENCIL = 0x10000;
        const MULTISAMPLE_RESOLVE = 0x40000;
        const TYPED_UNORDERED_ACCESS_VIEW = 0x2000000;
        const _ = !0;
    }
}

// ===== FIXED FUNCTION =====

/// D3D11_COMPARISON_FUNC / D3D12_COMPARISON_FUNC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComparisonFunc(pub u32);

impl ComparisonFunc {
    pub const NEVER: ComparisonFunc = ComparisonFunc(1);
    pub const LESS: ComparisonFunc = ComparisonFunc(2);
    pub const EQUAL: ComparisonFunc = ComparisonFunc(3);
    pub const LESS_EQUAL: ComparisonFunc = ComparisonFunc(4);
    pub const GREATER: ComparisonFunc = ComparisonFunc(5);
    pub const NOT_EQUAL: ComparisonFunc = ComparisonFunc(6);
    pub const GREATER_EQUAL: ComparisonFunc = ComparisonFunc(7);
    pub const ALWAYS: ComparisonFunc = ComparisonFunc(8);
}

/// D3D11_BLEND_OP / D3D12_BLEND_OP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendOp(pub u32);

impl BlendOp {
    pub const ADD: BlendOp = BlendOp(1);
    pub const SUBTRACT: BlendOp = BlendOp(2);
    pub const REV_SUBTRACT: BlendOp = BlendOp(3);
    pub const MIN: BlendOp = BlendOp(4);
    pub const MAX: BlendOp = BlendOp(5);
}

/// D3D11_BLEND / D3D12_BLEND
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Blend(pub u32);

impl Blend {
    pub const ZERO: Blend = Blend(1);
    pub const ONE: Blend = Blend(2);
    pub const SRC_COLOR: Blend = Blend(3);
    pub const INV_SRC_COLOR: Blend = Blend(4);
    pub const SRC_ALPHA: Blend = Blend(5);
    pub const INV_SRC_ALPHA: Blend = Blend(6);
    pub const DEST_ALPHA: Blend = Blend(7);
    pub const INV_DEST_ALPHA: Blend = Blend(8);
    pub const DEST_COLOR: Blend = Blend(9);
    pub const INV_DEST_COLOR: Blend = Blend(10);
    pub const SRC_ALPHA_SAT: Blend = Blend(11);
    pub const BLEND_FACTOR: Blend = Blend(14);
    pub const INV_BLEND_FACTOR: Blend = Blend(15);
    pub const SRC1_COLOR: Blend = Blend(16);
    pub const INV_SRC1_COLOR: Blend = Blend(17);
    pub const SRC1_ALPHA: Blend = Blend(18);
    pub const INV_SRC1_ALPHA: Blend = Blend(19);
}

/// D3D11_FILL_MODE / D3D12_FILL_MODE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FillMode(pub u32);

impl FillMode {
    pub const WIREFRAME: FillMode = FillMode(2);
    pub const SOLID: FillMode = FillMode(3);
}

/// D3D11_CULL_MODE / D3D12_CULL_MODE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CullMode(pub u32);

impl CullMode {
    pub const NONE: CullMode = CullMode(1);
    pub const FRONT: CullMode = CullMode(2);
    pub const BACK: CullMode = CullMode(3);
}

/// D3D11_STENCIL_OP / D3D12_STENCIL_OP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StencilOp(pub u32);

impl StencilOp {
    pub const KEEP: StencilOp = StencilOp(1);
    pub const ZERO: StencilOp = StencilOp(2);
    pub const REPLACE: StencilOp = StencilOp(3);
    pub const INCR_SAT: StencilOp = StencilOp(4);
    pub const DECR_SAT: StencilOp = StencilOp(5);
    pub const INVERT: StencilOp = StencilOp(6);
    pub const INCR: StencilOp = StencilOp(7);
    pub const DECR: StencilOp = StencilOp(8);
}

/// D3D_PRIMITIVE_TOPOLOGY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveTopology(pub u32);

impl PrimitiveTopology {
    pub const UNDEFINED: PrimitiveTopology = PrimitiveTopology(0);
    pub const POINTLIST: PrimitiveTopology = PrimitiveTopology(1);
    pub const LINELIST: PrimitiveTopology = PrimitiveTopology(2);
    pub const LINESTRIP: PrimitiveTopology = PrimitiveTopology(3);
    pub const TRIANGLELIST: PrimitiveTopology = PrimitiveTopology(4);
    pub const TRIANGLESTRIP: PrimitiveTopology = PrimitiveTopology(5);
    pub const LINELIST_ADJ: PrimitiveTopology = PrimitiveTopology(10);
    pub const LINESTRIP_ADJ: PrimitiveTopology = PrimitiveTopology(11);
    pub const TRIANGLELIST_ADJ: PrimitiveTopology = PrimitiveTopology(12);
    pub const TRIANGLESTRIP_ADJ: PrimitiveTopology = PrimitiveTopology(13);
    /// Patch lists occupy 33..=64 (32 + control point count)
    pub const CONTROL_POINT_PATCHLIST_BASE: u32 = 32;
}

// ============================================================================
// Numeric helpers
// ============================================================================

pub fn narrow_u32(value: u64) -> u32 {
    debug_assert!(value <= u32::MAX as u64, "{} does not fit in 32 bits", value);
    value as u32
}

pub fn narrow_u16(value: u32) -> u16 {
    debug_assert!(value <= u16::MAX as u32, "{} does not fit in 16 bits", value);
    value as u16
}

/// Cube count of a cube array view covering `layers` faces
pub fn cube_count(layers: u32) -> u32 {
    if layers == ResourceViewDesc::ALL_LAYERS {
        ENTIRE_RANGE
    } else {
        debug_assert!(layers % FACES_PER_CUBE == 0, "cube array layer count {} is not a multiple of 6", layers);
        layers / FACES_PER_CUBE
    }
}

/// Face count of a native cube array view
///
/// Counts past the 32-bit range assert in debug builds and saturate otherwise.
pub fn face_count(num_cubes: u32) -> u32 {
    if num_cubes == ENTIRE_RANGE {
        return ResourceViewDesc::ALL_LAYERS;
    }
    let faces = num_cubes.checked_mul(FACES_PER_CUBE);
    debug_assert!(faces.is_some(), "{} cubes do not fit in 32 bits of faces", num_cubes);
    faces.unwrap_or(ResourceViewDesc::ALL_LAYERS)
}

// ============================================================================
// Views
// ============================================================================

/// Native view category a usage selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCategory {
    RenderTarget,
    DepthStencil,
    ShaderResource,
    UnorderedAccess,
}

/// View category for a view-creation usage
///
/// `usage_type` must be exactly one of RENDER_TARGET, DEPTH_STENCIL (or one
/// of its halves), SHADER_RESOURCE (or one of its halves), UNORDERED_ACCESS.
pub fn view_category(usage_type: ResourceUsage) -> Option<ViewCategory> {
    if usage_type == ResourceUsage::RENDER_TARGET {
        Some(ViewCategory::RenderTarget)
    } else if usage_type == ResourceUsage::UNORDERED_ACCESS {
        Some(ViewCategory::UnorderedAccess)
    } else if !usage_type.is_empty() && ResourceUsage::DEPTH_STENCIL.contains(usage_type) {
        Some(ViewCategory::DepthStencil)
    } else if !usage_type.is_empty() && ResourceUsage::SHADER_RESOURCE.contains(usage_type) {
        Some(ViewCategory::ShaderResource)
    } else {
        None
    }
}

/// Descriptor for the view categories that always cover exactly one mip level
pub fn single_level_view(format: Format) -> ResourceViewDesc {
    let mut desc = ResourceViewDesc::from_format(format);
    desc.texture.levels = 1;
    desc
}

// ============================================================================
// Format support
// ============================================================================

/// Format support bits required for every usage in `usage`
pub fn convert_resource_usage_to_format_support(usage: ResourceUsage) -> FormatSupport {
    let mut support = FormatSupport::empty();
    if usage.contains(ResourceUsage::RENDER_TARGET) {
        support |= FormatSupport::RENDER_TARGET;
    }
    if usage.intersects(ResourceUsage::DEPTH_STENCIL) {
        support |= FormatSupport::DEPTH_STENCIL;
    }
    if usage.intersects(ResourceUsage::SHADER_RESOURCE) {
        support |= FormatSupport::SHADER_SAMPLE;
    }
    if usage.contains(ResourceUsage::UNORDERED_ACCESS) {
        support |= FormatSupport::TYPED_UNORDERED_ACCESS_VIEW;
    }
    if usage.contains(ResourceUsage::VERTEX_BUFFER) {
        support |= FormatSupport::IA_VERTEX_BUFFER;
    }
    if usage.contains(ResourceUsage::INDEX_BUFFER) {
        support |= FormatSupport::IA_INDEX_BUFFER;
    }
    if usage.intersects(ResourceUsage::RESOLVE_SOURCE | ResourceUsage::RESOLVE_DEST) {
        support |= FormatSupport::MULTISAMPLE_RESOLVE;
    }
    support
}

// ============================================================================
// Fixed-function state
// ============================================================================

pub fn convert_blend_op(value: CanonicalBlendOp) -> BlendOp {
    BlendOp(value as u32 + 1)
}

pub fn convert_blend_factor(value: BlendFactor) -> Blend {
    match value {
        BlendFactor::Zero => Blend::ZERO,
        BlendFactor::One => Blend::ONE,
        BlendFactor::SrcColor => Blend::SRC_COLOR,
        BlendFactor::InvSrcColor => Blend::INV_SRC_COLOR,
        BlendFactor::DstColor => Blend::DEST_COLOR,
        BlendFactor::InvDstColor => Blend::INV_DEST_COLOR,
        BlendFactor::SrcAlpha => Blend::SRC_ALPHA,
        BlendFactor::InvSrcAlpha => Blend::INV_SRC_ALPHA,
        BlendFactor::DstAlpha => Blend::DEST_ALPHA,
        BlendFactor::InvDstAlpha => Blend::INV_DEST_ALPHA,
        BlendFactor::ConstantColor | BlendFactor::ConstantAlpha => Blend::BLEND_FACTOR,
        BlendFactor::InvConstantColor | BlendFactor::InvConstantAlpha => Blend::INV_BLEND_FACTOR,
        BlendFactor::SrcAlphaSat => Blend::SRC_ALPHA_SAT,
        BlendFactor::Src1Color => Blend::SRC1_COLOR,
        BlendFactor::InvSrc1Color => Blend::INV_SRC1_COLOR,
        BlendFactor::Src1Alpha => Blend::SRC1_ALPHA,
        BlendFactor::InvSrc1Alpha => Blend::INV_SRC1_ALPHA,
    }
}

pub fn convert_fill_mode(value: CanonicalFillMode) -> FillMode {
    match value {
        CanonicalFillMode::Solid => FillMode::SOLID,
        CanonicalFillMode::Wireframe => FillMode::WIREFRAME,
        CanonicalFillMode::Point => {
            debug_assert!(false, "point fill mode is not supported");
            FillMode::SOLID
        }
    }
}

pub fn convert_cull_mode(value: CanonicalCullMode) -> CullMode {
    debug_assert!(value != CanonicalCullMode::FrontAndBack, "front-and-back culling is not supported");
    CullMode(value as u32 + 1)
}

pub fn convert_compare_op(value: CompareOp) -> ComparisonFunc {
    ComparisonFunc(value as u32 + 1)
}

pub fn convert_stencil_op(value: CanonicalStencilOp) -> StencilOp {
    StencilOp(value as u32 + 1)
}

pub fn convert_primitive_topology(value: CanonicalTopology) -> PrimitiveTopology {
    match value {
        CanonicalTopology::Undefined => PrimitiveTopology::UNDEFINED,
        CanonicalTopology::PointList => PrimitiveTopology::POINTLIST,
        CanonicalTopology::LineList => PrimitiveTopology::LINELIST,
        CanonicalTopology::LineStrip => PrimitiveTopology::LINESTRIP,
        CanonicalTopology::TriangleList => PrimitiveTopology::TRIANGLELIST,
        CanonicalTopology::TriangleStrip => PrimitiveTopology::TRIANGLESTRIP,
        CanonicalTopology::LineListAdj => PrimitiveTopology::LINELIST_ADJ,
        CanonicalTopology::LineStripAdj => PrimitiveTopology::LINESTRIP_ADJ,
        CanonicalTopology::TriangleListAdj => PrimitiveTopology::TRIANGLELIST_ADJ,
        CanonicalTopology::TriangleStripAdj => PrimitiveTopology::TRIANGLESTRIP_ADJ,
        CanonicalTopology::PatchList(control_points) => {
            debug_assert!(
                (1..=CanonicalTopology::MAX_PATCH_CONTROL_POINTS).contains(&control_points),
                "patch list with {} control points",
                control_points
            );
            PrimitiveTopology(PrimitiveTopology::CONTROL_POINT_PATCHLIST_BASE + control_points as u32)
        }
    }
}

#[cfg(test)]
#[path = "d3d_tests.rs"]
mod tests;
