/// Conversions between canonical descriptors and Direct3D 11 structures
///
/// `*_to_native` functions update a native structure in place: fields the
/// canonical model cannot express keep whatever value the caller put there
/// (usually the native default), and an `Unknown` canonical type leaves the
/// native dimension untouched. `convert_*` functions build a canonical
/// descriptor from a native one and drop the unrepresented fields.
///
/// Unrepresented native fields: misc flags (including TEXTURECUBE), structure
/// byte stride, sample quality, DSV read-only flags, buffer UAV flags,
/// extended buffer SRV flags, comparison function and border colour of
/// samplers.

use gpu_interop::interop::api::{
    Format, MemoryHeap, ResourceDesc, ResourceType, ResourceUsage, ResourceViewDesc,
    ResourceViewType, SamplerDesc, TextureAddressMode, TextureDesc, TextureFilter,
};
use gpu_interop::interop::d3d::{
    cube_count, face_count, narrow_u16, narrow_u32, single_level_view, view_category, ViewCategory,
};
use crate::d3d11_native::{
    self as native, BindFlags, CpuAccessFlags, DsvDimension, NativeResourceDesc,
    NativeViewDesc, RtvDimension, SrvDimension, UavDimension, Usage,
};

pub use gpu_interop::interop::d3d::{
    convert_blend_factor, convert_blend_op, convert_compare_op, convert_cull_mode,
    convert_fill_mode, convert_primitive_topology, convert_resource_usage_to_format_support,
    convert_stencil_op,
};

// ============================================================================
// Heap and usage flags
// ============================================================================

/// Memory heap to D3D11_USAGE plus CPU access flags
fn convert_memory_heap_to_native(heap: MemoryHeap, usage: &mut Usage, cpu_access: &mut CpuAccessFlags) {
    let (new_usage, new_cpu_access) = match heap {
        MemoryHeap::GpuOnly => (Usage::DEFAULT, CpuAccessFlags::empty()),
        MemoryHeap::CpuToGpu => (Usage::DYNAMIC, CpuAccessFlags::WRITE),
        MemoryHeap::GpuToCpu => (Usage::STAGING, CpuAccessFlags::READ),
        MemoryHeap::CpuOnly => (Usage::STAGING, CpuAccessFlags::READ | CpuAccessFlags::WRITE),
        MemoryHeap::Unknown => return,
    };
    *usage = new_usage;
    *cpu_access = new_cpu_access;
}

fn convert_native_memory_heap(usage: Usage, cpu_access: CpuAccessFlags) -> MemoryHeap {
    match usage {
        Usage::DEFAULT | Usage::IMMUTABLE => MemoryHeap::GpuOnly,
        Usage::DYNAMIC => MemoryHeap::CpuToGpu,
        Usage::STAGING if cpu_access == CpuAccessFlags::READ => MemoryHeap::GpuToCpu,
        Usage::STAGING => MemoryHeap::CpuOnly,
        _ => MemoryHeap::Unknown,
    }
}

/// Resource usage to bind flags
///
/// Only the seven bind flags with a canonical counterpart are set or
/// cleared; stream output and video bits are left as they are.
fn convert_resource_usage_to_bind_flags(usage: ResourceUsage, bind_flags: &mut BindFlags) {
    let pairs = [
        (ResourceUsage::VERTEX_BUFFER, BindFlags::VERTEX_BUFFER),
        (ResourceUsage::INDEX_BUFFER, BindFlags::INDEX_BUFFER),
        (ResourceUsage::CONSTANT_BUFFER, BindFlags::CONSTANT_BUFFER),
        (ResourceUsage::SHADER_RESOURCE, BindFlags::SHADER_RESOURCE),
        (ResourceUsage::RENDER_TARGET, BindFlags::RENDER_TARGET),
        (ResourceUsage::DEPTH_STENCIL, BindFlags::DEPTH_STENCIL),
        (ResourceUsage::UNORDERED_ACCESS, BindFlags::UNORDERED_ACCESS),
    ];
    for (canonical, bind) in pairs {
        bind_flags.set(bind, usage.intersects(canonical));
    }
}

fn convert_bind_flags_to_resource_usage(bind_flags: BindFlags) -> ResourceUsage {
    let mut usage = ResourceUsage::empty();
    usage.set(ResourceUsage::VERTEX_BUFFER, bind_flags.contains(BindFlags::VERTEX_BUFFER));
    usage.set(ResourceUsage::INDEX_BUFFER, bind_flags.contains(BindFlags::INDEX_BUFFER));
    usage.set(ResourceUsage::CONSTANT_BUFFER, bind_flags.contains(BindFlags::CONSTANT_BUFFER));
    usage.set(ResourceUsage::SHADER_RESOURCE, bind_flags.contains(BindFlags::SHADER_RESOURCE));
    usage.set(ResourceUsage::RENDER_TARGET, bind_flags.contains(BindFlags::RENDER_TARGET));
    usage.set(ResourceUsage::DEPTH_STENCIL, bind_flags.contains(BindFlags::DEPTH_STENCIL));
    usage.set(ResourceUsage::UNORDERED_ACCESS, bind_flags.contains(BindFlags::UNORDERED_ACCESS));
    usage
}

/// Usage shared by every introspected resource
///
/// Any resource can be copied from; immutable ones cannot be written.
fn derived_copy_usage(usage: Usage) -> ResourceUsage {
    if usage == Usage::IMMUTABLE {
        ResourceUsage::COPY_SOURCE
    } else {
        ResourceUsage::COPY_SOURCE | ResourceUsage::COPY_DEST
    }
}

// ============================================================================
// Resource descriptors
// ============================================================================

pub fn convert_resource_desc_to_buffer(desc: &ResourceDesc, internal: &mut native::BufferDesc) {
    debug_assert_eq!(desc.ty, ResourceType::Buffer);
    internal.byte_width = narrow_u32(desc.buffer.size);
    convert_memory_heap_to_native(desc.heap, &mut internal.usage, &mut internal.cpu_access_flags);
    convert_resource_usage_to_bind_flags(desc.usage, &mut internal.bind_flags);
}

pub fn convert_resource_desc_to_texture_1d(desc: &ResourceDesc, internal: &mut native::Texture1dDesc) {
    debug_assert_eq!(desc.ty, ResourceType::Texture1D);
    internal.width = desc.texture.width;
    debug_assert_eq!(desc.texture.height, 1);
    internal.array_size = desc.texture.depth_or_layers as u32;
    internal.mip_levels = desc.texture.levels as u32;
    internal.format = desc.texture.format.raw();
    convert_memory_heap_to_native(desc.heap, &mut internal.usage, &mut internal.cpu_access_flags);
    convert_resource_usage_to_bind_flags(desc.usage, &mut internal.bind_flags);
}

pub fn convert_resource_desc_to_texture_2d(desc: &ResourceDesc, internal: &mut native::Texture2dDesc) {
    debug_assert_eq!(desc.ty, ResourceType::Texture2D);
    internal.width = desc.texture.width;
    internal.height = desc.texture.height;
    internal.array_size = desc.texture.depth_or_layers as u32;
    internal.mip_levels = desc.texture.levels as u32;
    internal.format = desc.texture.format.raw();
    internal.sample_desc.count = desc.texture.samples as u32;
    convert_memory_heap_to_native(desc.heap, &mut internal.usage, &mut internal.cpu_access_flags);
    convert_resource_usage_to_bind_flags(desc.usage, &mut internal.bind_flags);
}

pub fn convert_resource_desc_to_texture_3d(desc: &ResourceDesc, internal: &mut native::Texture3dDesc) {
    debug_assert_eq!(desc.ty, ResourceType::Texture3D);
    internal.width = desc.texture.width;
    internal.height = desc.texture.height;
    internal.depth = desc.texture.depth_or_layers as u32;
    internal.mip_levels = desc.texture.levels as u32;
    internal.format = desc.texture.format.raw();
    convert_memory_heap_to_native(desc.heap, &mut internal.usage, &mut internal.cpu_access_flags);
    convert_resource_usage_to_bind_flags(desc.usage, &mut internal.bind_flags);
}

/// Update whichever native descriptor kind `internal` holds
pub fn convert_resource_desc_to_native(desc: &ResourceDesc, internal: &mut NativeResourceDesc) {
    match internal {
        NativeResourceDesc::Buffer(buffer) => convert_resource_desc_to_buffer(desc, buffer),
        NativeResourceDesc::Texture1D(texture) => convert_resource_desc_to_texture_1d(desc, texture),
        NativeResourceDesc::Texture2D(texture) => convert_resource_desc_to_texture_2d(desc, texture),
        NativeResourceDesc::Texture3D(texture) => convert_resource_desc_to_texture_3d(desc, texture),
    }
}

/// Empty native descriptor of the kind matching `ty`, `None` for `Unknown`
pub fn native_resource_desc_for(ty: ResourceType) -> Option<NativeResourceDesc> {
    match ty {
        ResourceType::Unknown => None,
        ResourceType::Buffer => Some(NativeResourceDesc::Buffer(Default::default())),
        ResourceType::Texture1D => Some(NativeResourceDesc::Texture1D(Default::default())),
        ResourceType::Texture2D => Some(NativeResourceDesc::Texture2D(Default::default())),
        ResourceType::Texture3D => Some(NativeResourceDesc::Texture3D(Default::default())),
    }
}

pub fn convert_buffer_desc(internal: &native::BufferDesc) -> ResourceDesc {
    let usage = convert_bind_flags_to_resource_usage(internal.bind_flags) | derived_copy_usage(internal.usage);
    ResourceDesc::buffer(
        internal.byte_width as u64,
        convert_native_memory_heap(internal.usage, internal.cpu_access_flags),
        usage,
    )
}

pub fn convert_texture_1d_desc(internal: &native::Texture1dDesc) -> ResourceDesc {
    let texture = TextureDesc {
        width: internal.width,
        height: 1,
        depth_or_layers: narrow_u16(internal.array_size),
        levels: narrow_u16(internal.mip_levels),
        format: Format(internal.format),
        samples: 1,
    };
    ResourceDesc::texture(
        ResourceType::Texture1D,
        texture,
        convert_native_memory_heap(internal.usage, internal.cpu_access_flags),
        convert_bind_flags_to_resource_usage(internal.bind_flags) | derived_copy_usage(internal.usage),
    )
}

pub fn convert_texture_2d_desc(internal: &native::Texture2dDesc) -> ResourceDesc {
    let texture = TextureDesc {
        width: internal.width,
        height: internal.height,
        depth_or_layers: narrow_u16(internal.array_size),
        levels: narrow_u16(internal.mip_levels),
        format: Format(internal.format),
        samples: narrow_u16(internal.sample_desc.count),
    };
    let resolve = if texture.samples > 1 { ResourceUsage::RESOLVE_SOURCE } else { ResourceUsage::RESOLVE_DEST };
    ResourceDesc::texture(
        ResourceType::Texture2D,
        texture,
        convert_native_memory_heap(internal.usage, internal.cpu_access_flags),
        convert_bind_flags_to_resource_usage(internal.bind_flags) | derived_copy_usage(internal.usage) | resolve,
    )
}

pub fn convert_texture_3d_desc(internal: &native::Texture3dDesc) -> ResourceDesc {
    let texture = TextureDesc {
        width: internal.width,
        height: internal.height,
        depth_or_layers: narrow_u16(internal.depth),
        levels: narrow_u16(internal.mip_levels),
        format: Format(internal.format),
        samples: 1,
    };
    ResourceDesc::texture(
        ResourceType::Texture3D,
        texture,
        convert_native_memory_heap(internal.usage, internal.cpu_access_flags),
        convert_bind_flags_to_resource_usage(internal.bind_flags) | derived_copy_usage(internal.usage),
    )
}

pub fn convert_native_resource_desc(internal: &NativeResourceDesc) -> ResourceDesc {
    match internal {
        NativeResourceDesc::Buffer(buffer) => convert_buffer_desc(buffer),
        NativeResourceDesc::Texture1D(texture) => convert_texture_1d_desc(texture),
        NativeResourceDesc::Texture2D(texture) => convert_texture_2d_desc(texture),
        NativeResourceDesc::Texture3D(texture) => convert_texture_3d_desc(texture),
    }
}

// ============================================================================
// View descriptors: canonical to native
// ============================================================================

fn unsupported_view(category: &str, ty: ResourceViewType) {
    debug_assert!(false, "{:?} view type has no {} equivalent", ty, category);
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
    internal.dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Texture1D => RtvDimension::Texture1D { mip_slice: t.first_level },
        ResourceViewType::Texture1DArray => RtvDimension::Texture1DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => RtvDimension::Texture2D { mip_slice: t.first_level },
        ResourceViewType::Texture2DArray => RtvDimension::Texture2DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
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
}

pub fn convert_shader_resource_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::ShaderResourceViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    internal.dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Buffer => {
            let first_element = narrow_u32(desc.buffer.offset);
            let num_elements = narrow_u32(desc.buffer.size);
            // An extended buffer view keeps its raw flag across an in-place update
            match internal.dimension {
                SrvDimension::BufferEx { flags, .. } => SrvDimension::BufferEx { first_element, num_elements, flags },
                _ => SrvDimension::Buffer { first_element, num_elements },
            }
        }
        ResourceViewType::Texture1D => SrvDimension::Texture1D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
        },
        ResourceViewType::Texture1DArray => SrvDimension::Texture1DArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => SrvDimension::Texture2D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
        },
        ResourceViewType::Texture2DArray => SrvDimension::Texture2DArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2DMultisample => SrvDimension::Texture2DMs,
        ResourceViewType::Texture2DMultisampleArray => SrvDimension::Texture2DMsArray {
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture3D => SrvDimension::Texture3D {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
        },
        ResourceViewType::TextureCube => SrvDimension::TextureCube {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
        },
        ResourceViewType::TextureCubeArray => SrvDimension::TextureCubeArray {
            most_detailed_mip: t.first_level,
            mip_levels: t.levels,
            first_2d_array_face: t.first_layer,
            num_cubes: cube_count(t.layers),
        },
    };
}

pub fn convert_unordered_access_view_desc_to_native(desc: &ResourceViewDesc, internal: &mut native::UnorderedAccessViewDesc) {
    internal.format = desc.format.raw();
    let t = &desc.texture;
    debug_assert!(
        matches!(desc.ty, ResourceViewType::Unknown | ResourceViewType::Buffer) || t.levels == 1,
        "unordered access views cover one mip level"
    );
    internal.dimension = match desc.ty {
        ResourceViewType::Unknown => return,
        ResourceViewType::Buffer => {
            // Raw/append/counter flags survive an in-place update
            let flags = match internal.dimension {
                UavDimension::Buffer { flags, .. } => flags,
                _ => Default::default(),
            };
            UavDimension::Buffer {
                first_element: narrow_u32(desc.buffer.offset),
                num_elements: narrow_u32(desc.buffer.size),
                flags,
            }
        }
        ResourceViewType::Texture1D => UavDimension::Texture1D { mip_slice: t.first_level },
        ResourceViewType::Texture1DArray => UavDimension::Texture1DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture2D => UavDimension::Texture2D { mip_slice: t.first_level },
        ResourceViewType::Texture2DArray => UavDimension::Texture2DArray {
            mip_slice: t.first_level,
            first_array_slice: t.first_layer,
            array_size: t.layers,
        },
        ResourceViewType::Texture3D => UavDimension::Texture3D {
            mip_slice: t.first_level,
            first_w_slice: t.first_layer,
            w_size: t.layers,
        },
        other => return unsupported_view("unordered access", other),
    };
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
            desc.buffer.offset = first_element as u64;
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
        RtvDimension::Texture2D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture2D
        }
        RtvDimension::Texture2DArray { mip_slice, first_array_slice, array_size } => {
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
        SrvDimension::Buffer { first_element, num_elements }
        | SrvDimension::BufferEx { first_element, num_elements, .. } => {
            desc.buffer.offset = first_element as u64;
            desc.buffer.size = num_elements as u64;
            ResourceViewType::Buffer
        }
        SrvDimension::Texture1D { most_detailed_mip, mip_levels } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture1D
        }
        SrvDimension::Texture1DArray { most_detailed_mip, mip_levels, first_array_slice, array_size } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            t.first_layer = first_array_slice;
            t.layers = array_size;
            ResourceViewType::Texture1DArray
        }
        SrvDimension::Texture2D { most_detailed_mip, mip_levels } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture2D
        }
        SrvDimension::Texture2DArray { most_detailed_mip, mip_levels, first_array_slice, array_size } => {
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
        SrvDimension::Texture3D { most_detailed_mip, mip_levels } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::Texture3D
        }
        SrvDimension::TextureCube { most_detailed_mip, mip_levels } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            ResourceViewType::TextureCube
        }
        SrvDimension::TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes } => {
            t.first_level = most_detailed_mip;
            t.levels = mip_levels;
            t.first_layer = first_2d_array_face;
            t.layers = face_count(num_cubes);
            ResourceViewType::TextureCubeArray
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
            desc.buffer.offset = first_element as u64;
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
        UavDimension::Texture2D { mip_slice } => {
            t.first_level = mip_slice;
            ResourceViewType::Texture2D
        }
        UavDimension::Texture2DArray { mip_slice, first_array_slice, array_size } => {
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

pub fn convert_sampler_desc_to_native(desc: &SamplerDesc, internal: &mut native::SamplerDesc) {
    internal.filter = desc.filter.raw();
    internal.address_u = desc.address_u.to_native();
    internal.address_v = desc.address_v.to_native();
    internal.address_w = desc.address_w.to_native();
    internal.mip_lod_bias = desc.mip_lod_bias;
    internal.max_anisotropy = desc.max_anisotropy as u32;
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

#[cfg(test)]
#[path = "d3d11_convert_tests.rs"]
mod tests;
