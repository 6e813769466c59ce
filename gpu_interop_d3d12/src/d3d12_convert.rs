/// Conversions between canonical descriptors and Direct3D 12 structures
///
/// Same in-place convention as the Direct3D 11 converters. Per-dimension
/// fields the canonical model cannot express (plane slice, min-LOD clamp,
/// structure stride, counter offset, buffer view flags) keep their value
/// while the native dimension stays the same and start from the native
/// default otherwise.
///
/// Resource usage bits share their values with D3D12_RESOURCE_STATES, so the
/// state conversion is a cast plus two corrections.

use gpu_interop::interop::api::{
    DescriptorType, Format, MemoryHeap, PrimitiveTopology, ResourceDesc, ResourceType,
    ResourceUsage, ResourceViewDesc, ResourceViewType, SamplerDesc, TextureAddressMode,
    TextureDesc, TextureFilter,
};
use gpu_interop::interop::d3d::{
    cube_count, face_count, narrow_u32, single_level_view, view_category, ViewCategory,
};
use crate::d3d12_native::{
    self as native, ComparisonFunc, DescriptorHeapType, DescriptorRangeType, DsvDimension,
    HeapProperties, HeapType, NativeViewDesc, PrimitiveTopologyType, ResourceDimension,
    ResourceFlags, ResourceStates, RtvDimension, SrvDimension, TextureLayout, UavDimension,
};

pub use gpu_interop::interop::d3d::{
    convert_blend_factor, convert_blend_op, convert_compare_op, convert_cull_mode,
    convert_fill_mode, convert_primitive_topology, convert_resource_usage_to_format_support,
    convert_stencil_op,
};

// ============================================================================
// States and flags
// ============================================================================

/// Resource usage to resource states
///
/// DEPTH_WRITE excludes every other state, so it is dropped when the read
/// half is requested too. There is no separate constant buffer state; it
/// folds into VERTEX_AND_CONSTANT_BUFFER.
pub fn convert_resource_usage_to_states(usage: ResourceUsage) -> ResourceStates {
    let mut states = ResourceStates::from_bits_retain(usage.bits());
    if usage.contains(ResourceUsage::DEPTH_STENCIL) {
        states.remove(ResourceStates::DEPTH_WRITE);
    }
    if usage.contains(ResourceUsage::CONSTANT_BUFFER) {
        states.remove(ResourceStates::from_bits_retain(ResourceUsage::CONSTANT_BUFFER.bits()));
        states.insert(ResourceStates::VERTEX_AND_CONSTANT_BUFFER);
    }
    states
}

fn convert_resource_usage_to_flags(usage: ResourceUsage, flags: &mut ResourceFlags) {
    flags.set(ResourceFlags::ALLOW_RENDER_TARGET, usage.contains(ResourceUsage::RENDER_TARGET));
    flags.set(ResourceFlags::ALLOW_DEPTH_STENCIL, usage.intersects(ResourceUsage::DEPTH_STENCIL));
    // Only depth-stencil resources may deny shader access
    let deny = flags.contains(ResourceFlags::ALLOW_DEPTH_STENCIL) && !usage.intersects(ResourceUsage::SHADER_RESOURCE);
    flags.set(ResourceFlags::DENY_SHADER_RESOURCE, deny);
    flags.set(ResourceFlags::ALLOW_UNORDERED_ACCESS, usage.contains(ResourceUsage::UNORDERED_ACCESS));
}

fn convert_resource_flags_to_usage(flags: ResourceFlags) -> ResourceUsage {
    let mut usage = ResourceUsage::empty();
    usage.set(ResourceUsage::RENDER_TARGET, flags.contains(ResourceFlags::ALLOW_RENDER_TARGET));
    usage.set(ResourceUsage::DEPTH_STENCIL, flags.contains(ResourceFlags::ALLOW_DEPTH_STENCIL));
    usage.set(ResourceUsage::SHADER_RESOURCE, !flags.contains(ResourceFlags::DENY_SHADER_RESOURCE));
    usage.set(ResourceUsage::UNORDERED_ACCESS, flags.contains(ResourceFlags::ALLOW_UNORDERED_ACCESS));
    usage
}

fn convert_memory_heap_to_native(heap: MemoryHeap, props: &mut HeapProperties) {
    props.heap_type = match heap {
        MemoryHeap::GpuOnly => HeapType::DEFAULT,
        MemoryHeap::CpuOnly | MemoryHeap::CpuToGpu => HeapType::UPLOAD,
        MemoryHeap::GpuToCpu => HeapType::READBACK,
        MemoryHeap::Unknown => return,
    };
}

fn convert_native_memory_heap(props: &HeapProperties) -> MemoryHeap {
    match props.heap_type {
        HeapType::DEFAULT => MemoryHeap::GpuOnly,
        HeapType::UPLOAD => MemoryHeap::CpuToGpu,
        HeapType::READBACK => MemoryHeap::GpuToCpu,
        _ => MemoryHeap::Unknown,
    }
}

// ============================================================================
// Resource descriptors
// ============================================================================

/// Update a resource descriptor and its heap properties in place
///
/// An `Unknown` type is a contract violation; the native dimension is left
/// untouched. An `Unknown` heap leaves the heap type untouched.
pub fn convert_resource_desc_to_native(desc: &ResourceDesc, internal: &mut native::ResourceDesc, props: &mut HeapProperties) {
    match desc.ty {
        ResourceType::Unknown => debug_assert!(false, "resource of unknown type"),
        ResourceType::Buffer => internal.dimension = ResourceDimension::Buffer,
        ResourceType::Texture1D => internal.dimension = ResourceDimension::Texture1D,
        ResourceType::Texture2D => internal.dimension = ResourceDimension::Texture2D,
        ResourceType::Texture3D => internal.dimension = ResourceDimension::Texture3D,
    }

    if desc.ty == ResourceType::Buffer {
        internal.width = desc.buffer.size;
        internal.height = 1;
        internal.depth_or_array_size = 1;
        internal.mip_levels = 1;
        internal.sample_desc.count = 1;
    } else {
        internal.width = desc.texture.width as u64;
        internal.height = desc.texture.height;
        internal.depth_or_array_size = desc.texture.depth_or_layers;
        internal.mip_levels = desc.texture.levels;
        internal.format = desc.texture.format.raw();
        internal.sample_desc.count = desc.texture.samples as u32;
    }

    convert_memory_heap_to_native(desc.heap, props);
    convert_resource_usage_to_flags(desc.usage, &mut internal.flags);
}

/// Empty native descriptor suited to creating a resource of type `ty`
///
/// Buffers must use the row-major layout; `None` for `Unknown`.
pub fn native_resource_desc_for(ty: ResourceType) -> Option<native::ResourceDesc> {
    let layout = match ty {
        ResourceType::Unknown => return None,
        ResourceType::Buffer => TextureLayout::ROW_MAJOR,
        _ => TextureLayout::UNKNOWN,
    };
    Some(native::ResourceDesc {
        layout,
        ..Default::default()
    })
}

pub fn convert_resource_desc(internal: &native::ResourceDesc, props: &HeapProperties) -> ResourceDesc {
    let mut desc = ResourceDesc {
        ty: match internal.dimension {
            ResourceDimension::Buffer => ResourceType::Buffer,
            ResourceDimension::Texture1D => ResourceType::Texture1D,
            ResourceDimension::Texture2D => ResourceType::Texture2D,
            ResourceDimension::Texture3D => ResourceType::Texture3D,
            ResourceDimension::Unknown => {
                debug_assert!(false, "resource of unknown dimension");
                ResourceType::Unknown
            }
        },
        heap: convert_native_memory_heap(props),
        ..Default::default()
    };

    if desc.ty == ResourceType::Buffer {
        desc.buffer.size = internal.width;
        // Any buffer can be bound as any kind of buffer
        desc.usage |= ResourceUsage::VERTEX_BUFFER | ResourceUsage::INDEX_BUFFER | ResourceUsage::CONSTANT_BUFFER;
    } else {
        desc.texture = TextureDesc {
            width: narrow_u32(internal.width),
            height: internal.height,
            depth_or_layers: internal.depth_or_array_size,
            levels: internal.mip_levels,
            format: Format(internal.format),
            samples: internal.sample_desc.count as u16,
        };
        if desc.ty == ResourceType::Texture2D {
            desc.usage |= if desc.texture.samples > 1 { ResourceUsage::RESOLVE_SOURCE } else { ResourceUsage::RESOLVE_DEST };
        }
    }

    desc.usage |= ResourceUsage::COPY_DEST | ResourceUsage::COPY_SOURCE;
    desc.usage |= convert_resource_flags_to_usage(internal.flags);
    desc
}

// ============================================================================
// View descriptors: canonical to native
// ============================================================================

fn unsupported_view(category: &str, ty: ResourceViewType) {
    debug_assert!(false, "{:?} view type has no {} equivalent", ty, category);
}

/// Carry the plane slice over when the render target dimension is unchanged
fn keep_rtv_extras(previous: RtvDimension, next: RtvDimension) -> RtvDimension {
    match (previous, next) {
        (RtvDimension::Texture2D { plane_slice, .. }, RtvDimension::Texture2D { mip_slice, .. }) => {
            RtvDimension::Texture2D { mip_slice, plane_slice }
        }
        (
            RtvDimension::Texture2DArray { plane_slice, .. },
            RtvDimension::Texture2DArray { mip_slice, first_array_slice, array_size, .. },
        ) => RtvDimension::Texture2DArray { mip_slice, first_array_slice, array_size, plane_slice },
        (_, next) => next,
    }
}

/// Carry stride, flags, plane slice and min-LOD clamp over when the shader
/// resource dimension is unchanged
fn keep_srv_extras(previous: SrvDimension, next: SrvDimension) -> SrvDimension {
    use SrvDimension as D;
    match (previous, next) {
        (D::Buffer { structure_byte_stride, flags, .. }, D::Buffer { first_element, num_elements, .. }) => {
            D::Buffer { first_element, num_elements, structure_byte_stride, flags }
        }
        (D::Texture1D { resource_min_lod_clamp, .. }, D::Texture1D { most_detailed_mip, mip_levels, .. }) => {
            D::Texture1D { most_detailed_mip, mip_levels, resource_min_lod_clamp }
        }
        (
            D::Texture1DArray { resource_min_lod_clamp, .. },
            D::Texture1DArray { most_detailed_mip, mip_levels, first_array_slice, array_size, .. },
        ) => D::Texture1DArray { most_detailed_mip, mip_levels, first_array_slice, array_size, resource_min_lod_clamp },
        (
            D::Texture2D { plane_slice, resource_min_lod_clamp, .. },
            D::Texture2D { most_detailed_mip, mip_levels, .. },
        ) => D::Texture2D { most_detailed_mip, mip_levels, plane_slice, resource_min_lod_clamp },
        (
            D::Texture2DArray { plane_slice, resource_min_lod_clamp, .. },
            D::Texture2DArray { most_detailed_mip, mip_levels, first_array_slice, array_size, .. },
        ) => D::Texture2DArray {
            most_detailed_mip,
            mip_levels,
            first_array_slice,
            array_size,
            plane_slice,
            resource_min_lod_clamp,
        },
        (D::Texture3D { resource_min_lod_clamp, .. }, D::Texture3D { most_detailed_mip, mip_levels, .. }) => {
            D::Texture3D { most_detailed_mip, mip_levels, resource_min_lod_clamp }
        }
        (D::TextureCube { resource_min_lod_clamp, .. }, D::TextureCube { most_detailed_mip, mip_levels, .. }) => {
            D::TextureCube { most_detailed_mip, mip_levels, resource_min_lod_clamp }
        }
        (
            D::TextureCubeArray { resource_min_lod_clamp, .. },
            D::TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes, .. },
        ) => D::TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes, resource_min_lod_clamp },
        (_, next) => next,
    }
}

/// Carry stride, counter offset, flags and plane slice over when the
/// unordered access dimension is unchanged
fn keep_uav_extras(previous: UavDimension, next: UavDimension) -> UavDimension {
    use UavDimension as D;
    match (previous, next) {
        (
            D::Buffer { structure_byte_stride, counter_offset_in_bytes, flags, .. },
            D::Buffer { first_element, num_elements, .. },
        ) => D::Buffer { first_element, num_elements, structure_byte_stride, counter_offset_in_bytes, flags },
        (D::Texture2D { plane_slice, .. }, D::Texture2D { mip_slice, .. }) => D::Texture2D { mip_slice, plane_slice },
        (
            D::Texture2DArray { plane_slice, .. },
            D::Texture2DArray { mip_slice, first_array_slice, array_size, .. },
        ) => D::Texture2DArray { mip_slice, first_array_slice, array_size, plane_slice },
        (_, next) => next,
    }
}

pub fn convert_depth_stencil_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::DepthStencilViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    debug_assert!(desc.ty == ResourceViewType::Unknown || t.levels == 1, "depth-stencil views cover one mip level");
    internal.dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Texture1D => DsvDimension::Texture1D { mip_slice: t.first_level },
        ResourceViewType::Texture1DArray => DsvDimension::Texture1DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => DsvDimension::Texture2D { mip_slice: t.first_level },
        ResourceViewType::Texture2DArray => DsvDimension::Texture2DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2DMultisample => DsvDimension::Texture2DMs,
        ResourceViewType::Texture2DMultisampleArray => DsvDimension::Texture2DMsArray {
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        other => return unsupported_view("depth-stencil", other),
    };
}

pub fn convert_render_target_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::RenderTargetViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    debug_assert!(desc.ty == ResourceViewType::Unknown || t.levels == 1, "render target views cover one mip level");
    let dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Texture1D => RtvDimension::Texture1D { mip_slice: t.first_level },
        ResourceViewType::Texture1DArray => RtvDimension::Texture1DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => RtvDimension::Texture2D { mip_slice: t.first_level, plane_slice: 0 },
        ResourceViewType::Texture2DArray => RtvDimension::Texture2DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
            plane_slice: 0,
        },
        ResourceViewType::Texture2DMultisample => RtvDimension::Texture2DMs,
        ResourceViewType::Texture2DMultisampleArray => RtvDimension::Texture2DMsArray {
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture3D => RtvDimension::Texture3D {
            mip_slice: t.first_level,
            first_w_slice: t.first_layer,
            w_size: t.layers,
        },
        other => return unsupported_view("render target", other),
    };
    internal.dimension = keep_rtv_extras(internal.dimension, dimension);
}

pub fn convert_shader_resource_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::ShaderResourceViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    let dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Buffer => SrvDimension::Buffer {
            first_element: desc.buffer.offset,
            num_elements: narrow_u32(desc.buffer.size),
            structure_byte_stride: 0,
            flags: Default::default(),
        },
        ResourceViewType::Texture1D => SrvDimension::Texture1D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::Texture1DArray => SrvDimension::Texture1DArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_array_slice: t.first_layer,
            array_size: t.layers,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::Texture2D => SrvDimension::Texture2D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            plane_slice: 0,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::Texture2DArray => SrvDimension::Texture2DArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_array_slice: t.first_layer,
            array_size: t.layers,
            plane_slice: 0,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::Texture2DMultisample => SrvDimension::Texture2DMs,
        ResourceViewType::Texture2DMultisampleArray => SrvDimension::Texture2DMsArray {
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture3D => SrvDimension::Texture3D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::TextureCube => SrvDimension::TextureCube {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            resource_min_lod_clamp: 0.0,
        },
        ResourceViewType::TextureCubeArray => SrvDimension::TextureCubeArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_2d_array_face: t.first_layer,
            num_cubes: cube_count(t.layers),
            resource_min_lod_clamp: 0.0,
        },
    };
    internal.dimension = keep_srv_extras(internal.dimension, dimension);
}

pub fn convert_unordered_access_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::UnorderedAccessViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    debug_assert!(
        matches!(desc.ty, ResourceViewType::Unknown | ResourceViewType::Buffer) || t.levels == 1,
        "unordered access views cover one mip level"
    );
    let dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Buffer => UavDimension::Buffer {
            first_element: desc.buffer.offset,
            num_elements: narrow_u32(desc.buffer.size),
            structure_byte_stride: 0,
            counter_offset_in_bytes: 0,
            flags: Default::default(),
        },
        ResourceViewType::Texture1D => UavDimension::Texture1D { mip_slice: t.first_level },
        ResourceViewType::Texture1DArray => UavDimension::Texture1DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => UavDimension::Texture2D { mip_slice: t.first_level, plane_slice: 0 },
        ResourceViewType::Texture2DArray => UavDimension::Texture2DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
            plane_slice: 0,
        },
        ResourceViewType::Texture3D => UavDimension::Texture3D {
            mip_slice: t.first_level,
            first_w_slice: t.first_layer,
            w_size: t.layers,
        },
        other => return unsupported_view("unordered access", other),
    };
    internal.dimension = keep_uav_extras(internal.dimension, dimension);
}

/// Update whichever native view descriptor kind `internal` holds
pub fn convert_resource_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut NativeViewDesc) {
    match internal {
        NativeViewDesc::DepthStencil(view) => convert_depth_stencil_view_desc_to_native(desc, view),
        NativeViewDesc::RenderTarget(view) => convert_render_target_view_desc_to_native(desc, view),
        NativeViewDesc::ShaderResource(view) => convert_shader_resource_view_desc_to_native(desc, view),
        NativeViewDesc::UnorderedAccess(view) => convert_unordered_access_view_desc_to_native(desc, view),
    }
}

/// Empty native view descriptor for a view category
///
/// `usage_type` must be exactly one of RENDER_TARGET, DEPTH_STENCIL (or one
/// of its halves), SHADER_RESOURCE (or one of its halves), UNORDERED_ACCESS.
pub fn native_view_desc_for(usage_type: ResourceUsage) -> Option<NativeViewDesc> {
    Some(match view_category(usage_type)? {
        ViewCategory::RenderTarget => NativeViewDesc::RenderTarget(Default::default()),
        ViewCategory::DepthStencil => NativeViewDesc::DepthStencil(Default::default()),
        ViewCategory::ShaderResource => NativeViewDesc::ShaderResource(Default::default()),
        ViewCategory::UnorderedAccess => NativeViewDesc::UnorderedAccess(Default::default()),
    })
}

// ============================================================================
// View descriptors: native to canonical
// ============================================================================

pub fn convert_depth_stencil_view_desc(internal: &native::DepthStencilViewDesc) -> ResourceViewDesc {
    let mut desc = single_level_view(Format(internal.format));
    let t = &mut desc.texture;
    desc.ty = match internal.dimension {
        DsvDimension::Unknown => ResourceViewType::Unknown,
        DsvDimension::Texture1D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture1D
        }
        DsvDimension::Texture1DArray { mip_slice, first_array_slice, array_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture1DArray
        }
        DsvDimension::Texture2D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture2D
        }
        DsvDimension::Texture2DArray { mip_slice, first_array_slice, array_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DArray
        }
        DsvDimension::Texture2DMs => ResourceViewType::Texture2DMultisample,
        DsvDimension::Texture2DMsArray { first_array_slice, array_size } => {
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DMultisampleArray
        }
    };
    desc
}

pub fn convert_render_target_view_desc(internal: &native::RenderTargetViewDesc) -> ResourceViewDesc {
    let mut desc = single_level_view(Format(internal.format));
    let t = &mut desc.texture;
    desc.ty = match internal.dimension {
        RtvDimension::Unknown => ResourceViewType::Unknown,
        RtvDimension::Buffer { first_element, num_elements } => {
            desc.buffer.offset = first_element;
            desc.buffer.size = num_elements as u64;
            ResourceViewType::Buffer
        }
        RtvDimension::Texture1D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture1D
        }
        RtvDimension::Texture1DArray { mip_slice, first_array_slice, array_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture1DArray
        }
        RtvDimension::Texture2D { mip_slice, .. } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture2D
        }
        RtvDimension::Texture2DArray { mip_slice, first_array_slice, array_size, .. } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DArray
        }
        RtvDimension::Texture2DMs => ResourceViewType::Texture2DMultisample,
        RtvDimension::Texture2DMsArray { first_array_slice, array_size } => {
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DMultisampleArray
        }
        RtvDimension::Texture3D { mip_slice, first_w_slice, w_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_w_slice;
            t.layers = w_size;
            ResourceViewType::Texture3D
        }
    };
    desc
}

pub fn convert_shader_resource_view_desc(internal: &native::ShaderResourceViewDesc) -> ResourceViewDesc {
    let mut desc = ResourceViewDesc::from_format(Format(internal.format));
    let t = &mut desc.texture;
    desc.ty = match internal.dimension {
        SrvDimension::Unknown => ResourceViewType::Unknown,
        SrvDimension::Buffer { first_element, num_elements, .. } => {
            desc.buffer.offset = first_element;
            desc.buffer.size = num_elements as u64;
            ResourceViewType::Buffer
        }
        SrvDimension::Texture1D { most_detailed_mip, mip_levels, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture1D
        }
        SrvDimension::Texture1DArray { most_detailed_mip, mip_levels, first_array_slice, array_size, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture1DArray
        }
        SrvDimension::Texture2D { most_detailed_mip, mip_levels, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture2D
        }
        SrvDimension::Texture2DArray { most_detailed_mip, mip_levels, first_array_slice, array_size, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DArray
        }
        SrvDimension::Texture2DMs => ResourceViewType::Texture2DMultisample,
        SrvDimension::Texture2DMsArray { first_array_slice, array_size } => {
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DMultisampleArray
        }
        SrvDimension::Texture3D { most_detailed_mip, mip_levels, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture3D
        }
        SrvDimension::TextureCube { most_detailed_mip, mip_levels, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::TextureCube
        }
        SrvDimension::TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes, .. } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            t.first_layer = first_2d_array_face;
            t.layers = face_count(num_cubes);
            ResourceViewType::TextureCubeArray
        }
        SrvDimension::RaytracingAccelerationStructure { location } => {
            // No canonical view type; the address is all there is to report
            desc.buffer.offset = location;
            ResourceViewType::Unknown
        }
    };
    desc
}

pub fn convert_unordered_access_view_desc(internal: &native::UnorderedAccessViewDesc) -> ResourceViewDesc {
    let mut desc = single_level_view(Format(internal.format));
    let t = &mut desc.texture;
    desc.ty = match internal.dimension {
        UavDimension::Unknown => ResourceViewType::Unknown,
        UavDimension::Buffer { first_element, num_elements, .. } => {
            desc.buffer.offset = first_element;
            desc.buffer.size = num_elements as u64;
            ResourceViewType::Buffer
        }
        UavDimension::Texture1D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture1D
        }
        UavDimension::Texture1DArray { mip_slice, first_array_slice, array_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture1DArray
        }
        UavDimension::Texture2D { mip_slice, .. } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture2D
        }
        UavDimension::Texture2DArray { mip_slice, first_array_slice, array_size, .. } => {
            t.first_level = mip_slice;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture2DArray
        }
        UavDimension::Texture3D { mip_slice, first_w_slice, w_size } => {
            t.first_level = mip_slice;
            t.first_layer = first_w_slice;
            t.layers = w_size;
            ResourceViewType::Texture3D
        }
    };
    desc
}

pub fn convert_native_view_desc(internal: &NativeViewDesc) -> ResourceViewDesc {
    match internal {
        NativeViewDesc::DepthStencil(view) => convert_depth_stencil_view_desc(view),
        NativeViewDesc::RenderTarget(view) => convert_render_target_view_desc(view),
        NativeViewDesc::ShaderResource(view) => convert_shader_resource_view_desc(view),
        NativeViewDesc::UnorderedAccess(view) => convert_unordered_access_view_desc(view),
    }
}

// ============================================================================
// Sampler
// ============================================================================

/// Sampler to native; comparison is ALWAYS and the border colour transparent black
pub fn convert_sampler_desc_to_native(desc: &SamplerDesc, internal: &mut native::SamplerDesc) {
    internal.filter = desc.filter.raw();
    internal.address_u = desc.address_u.to_native();
    internal.address_v = desc.address_v.to_native();
    internal.address_w = desc.address_w.to_native();
    internal.mip_lod_bias = desc.mip_lod_bias;
    internal.max_anisotropy = desc.max_anisotropy as u32;
    internal.comparison_func = ComparisonFunc::ALWAYS;
    internal.border_color = [0.0; 4];
    internal.min_lod = desc.min_lod;
    internal.max_lod = desc.max_lod;
}

pub fn convert_sampler_desc(internal: &native::SamplerDesc) -> SamplerDesc {
    SamplerDesc {
        filter: TextureFilter::from_raw(internal.filter),
        address_u: TextureAddressMode::from_native(internal.address_u),
        address_v: TextureAddressMode::from_native(internal.address_v),
        address_w: TextureAddressMode::from_native(internal.address_w),
        mip_lod_bias: internal.mip_lod_bias,
        max_anisotropy: internal.max_anisotropy as f32,
        min_lod: internal.min_lod,
        max_lod: internal.max_lod,
    }
}

// ============================================================================
// Descriptors
// ============================================================================

pub fn convert_descriptor_type(value: DescriptorType) -> DescriptorRangeType {
    match value {
        DescriptorType::ShaderResourceView => DescriptorRangeType::SRV,
        DescriptorType::UnorderedAccessView => DescriptorRangeType::UAV,
        DescriptorType::ConstantBuffer => DescriptorRangeType::CBV,
        DescriptorType::Sampler => DescriptorRangeType::SAMPLER,
    }
}

/// Shader-visible heap a descriptor of this type lives in
pub fn convert_descriptor_type_to_heap_type(value: DescriptorType) -> DescriptorHeapType {
    match value {
        DescriptorType::Sampler => DescriptorHeapType::SAMPLER,
        DescriptorType::ShaderResourceView | DescriptorType::UnorderedAccessView | DescriptorType::ConstantBuffer => {
            DescriptorHeapType::CBV_SRV_UAV
        }
    }
}

// ============================================================================
// Fixed-function state
// ============================================================================

/// Topology class of a pipeline state object
pub fn convert_primitive_topology_type(value: PrimitiveTopology) -> PrimitiveTopologyType {
    match value {
        PrimitiveTopology::Undefined => PrimitiveTopologyType::UNDEFINED,
        PrimitiveTopology::PointList => PrimitiveTopologyType::POINT,
        PrimitiveTopology::LineList
        | PrimitiveTopology::LineStrip
        | PrimitiveTopology::LineListAdj
        | PrimitiveTopology::LineStripAdj => PrimitiveTopologyType::LINE,
        PrimitiveTopology::TriangleList
        | PrimitiveTopology::TriangleStrip
        | PrimitiveTopology::TriangleListAdj
        | PrimitiveTopology::TriangleStripAdj => PrimitiveTopologyType::TRIANGLE,
        PrimitiveTopology::PatchList(_) => PrimitiveTopologyType::PATCH,
    }
}

#[cfg(test)]
#[path = "d3d12_convert_tests.rs"]
mod tests;
