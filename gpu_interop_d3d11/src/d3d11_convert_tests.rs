//! Unit tests for Direct3D 11 descriptor conversion
//!
//! Pure functions only, no device required.

use gpu_interop::interop::api::{
    Format, MemoryHeap, ResourceDesc, ResourceType, ResourceUsage, ResourceViewDesc,
    ResourceViewType, SamplerDesc, TextureAddressMode, TextureDesc, TextureFilter,
};
use crate::d3d11_convert::*;
use crate::d3d11_native::{
    self as native, BindFlags, BufferUavFlags, CpuAccessFlags, DsvDimension, DsvFlags,
    NativeViewDesc, ResourceMiscFlags, RtvDimension, SrvDimension, UavDimension, Usage,
    ENTIRE_RANGE,
};

/// Usage bits added on the way back from native regardless of input
const DERIVED_USAGE: ResourceUsage = ResourceUsage::COPY_SOURCE
    .union(ResourceUsage::COPY_DEST)
    .union(ResourceUsage::RESOLVE_SOURCE)
    .union(ResourceUsage::RESOLVE_DEST);

fn texture_view(ty: ResourceViewType, first_level: u32, levels: u32, first_layer: u32, layers: u32) -> ResourceViewDesc {
    ResourceViewDesc::texture(ty, Format::R8G8B8A8_UNORM, first_level, levels, first_layer, layers)
}

// ============================================================================
// RESOURCE DESCRIPTORS
// ============================================================================

#[test]
fn test_buffer_to_native() {
    let desc = ResourceDesc::buffer(
        65536,
        MemoryHeap::CpuToGpu,
        ResourceUsage::VERTEX_BUFFER | ResourceUsage::CONSTANT_BUFFER,
    );
    let mut internal = native::BufferDesc::default();
    convert_resource_desc_to_buffer(&desc, &mut internal);

    assert_eq!(internal.byte_width, 65536);
    assert_eq!(internal.usage, Usage::DYNAMIC);
    assert_eq!(internal.cpu_access_flags, CpuAccessFlags::WRITE);
    assert_eq!(internal.bind_flags, BindFlags::VERTEX_BUFFER | BindFlags::CONSTANT_BUFFER);
}

#[test]
fn test_buffer_unrepresented_fields_untouched() {
    let desc = ResourceDesc::buffer(256, MemoryHeap::GpuOnly, ResourceUsage::UNORDERED_ACCESS);
    let mut internal = native::BufferDesc {
        bind_flags: BindFlags::STREAM_OUTPUT | BindFlags::VERTEX_BUFFER,
        misc_flags: ResourceMiscFlags::BUFFER_STRUCTURED,
        structure_byte_stride: 16,
        ..Default::default()
    };
    convert_resource_desc_to_buffer(&desc, &mut internal);

    assert_eq!(internal.bind_flags, BindFlags::STREAM_OUTPUT | BindFlags::UNORDERED_ACCESS);
    assert_eq!(internal.misc_flags, ResourceMiscFlags::BUFFER_STRUCTURED);
    assert_eq!(internal.structure_byte_stride, 16);
}

#[test]
fn test_unknown_heap_leaves_usage_untouched() {
    let desc = ResourceDesc::buffer(16, MemoryHeap::Unknown, ResourceUsage::empty());
    let mut internal = native::BufferDesc {
        usage: Usage::STAGING,
        cpu_access_flags: CpuAccessFlags::READ,
        ..Default::default()
    };
    convert_resource_desc_to_buffer(&desc, &mut internal);
    assert_eq!(internal.usage, Usage::STAGING);
    assert_eq!(internal.cpu_access_flags, CpuAccessFlags::READ);
}

#[test]
fn test_heap_mapping_round_trip() {
    for heap in [MemoryHeap::GpuOnly, MemoryHeap::CpuToGpu, MemoryHeap::GpuToCpu, MemoryHeap::CpuOnly] {
        let desc = ResourceDesc::buffer(64, heap, ResourceUsage::empty());
        let mut internal = native::BufferDesc::default();
        convert_resource_desc_to_buffer(&desc, &mut internal);
        assert_eq!(convert_buffer_desc(&internal).heap, heap, "heap {:?}", heap);
    }
}

#[test]
fn test_buffer_from_native_copy_usage() {
    let internal = native::BufferDesc {
        byte_width: 1024,
        usage: Usage::DEFAULT,
        bind_flags: BindFlags::INDEX_BUFFER,
        ..Default::default()
    };
    let desc = convert_buffer_desc(&internal);

    assert_eq!(desc.ty, ResourceType::Buffer);
    assert_eq!(desc.buffer.size, 1024);
    assert_eq!(desc.heap, MemoryHeap::GpuOnly);
    assert_eq!(
        desc.usage,
        ResourceUsage::INDEX_BUFFER | ResourceUsage::COPY_SOURCE | ResourceUsage::COPY_DEST
    );
}

#[test]
fn test_immutable_is_gpu_only_without_copy_dest() {
    let internal = native::Texture2dDesc {
        width: 4,
        height: 4,
        mip_levels: 1,
        array_size: 1,
        format: Format::BC1_UNORM.raw(),
        sample_desc: native::SampleDesc { count: 1, quality: 0 },
        usage: Usage::IMMUTABLE,
        bind_flags: BindFlags::SHADER_RESOURCE,
        ..Default::default()
    };
    let desc = convert_texture_2d_desc(&internal);

    assert_eq!(desc.heap, MemoryHeap::GpuOnly);
    assert!(desc.usage.contains(ResourceUsage::COPY_SOURCE));
    assert!(!desc.usage.contains(ResourceUsage::COPY_DEST));
}

#[test]
fn test_texture_2d_round_trip() {
    let desc = ResourceDesc::texture(
        ResourceType::Texture2D,
        TextureDesc {
            width: 1920,
            height: 1080,
            depth_or_layers: 6,
            levels: 11,
            format: Format::R16G16B16A16_FLOAT,
            samples: 1,
        },
        MemoryHeap::GpuOnly,
        ResourceUsage::RENDER_TARGET | ResourceUsage::SHADER_RESOURCE | ResourceUsage::UNORDERED_ACCESS,
    );
    let mut internal = native::Texture2dDesc::default();
    convert_resource_desc_to_texture_2d(&desc, &mut internal);
    let back = convert_texture_2d_desc(&internal);

    assert_eq!(back.ty, desc.ty);
    assert_eq!(back.heap, desc.heap);
    assert_eq!(back.texture, desc.texture);
    assert_eq!(back.usage.difference(DERIVED_USAGE), desc.usage);
    assert!(back.usage.contains(ResourceUsage::RESOLVE_DEST));
}

#[test]
fn test_multisampled_texture_is_resolve_source() {
    let internal = native::Texture2dDesc {
        width: 800,
        height: 600,
        mip_levels: 1,
        array_size: 1,
        format: Format::R8G8B8A8_UNORM.raw(),
        sample_desc: native::SampleDesc { count: 4, quality: 0 },
        bind_flags: BindFlags::RENDER_TARGET,
        ..Default::default()
    };
    let desc = convert_texture_2d_desc(&internal);
    assert_eq!(desc.texture.samples, 4);
    assert!(desc.usage.contains(ResourceUsage::RESOLVE_SOURCE));
    assert!(!desc.usage.contains(ResourceUsage::RESOLVE_DEST));
}

#[test]
fn test_texture_1d_and_3d_round_trip() {
    let tex1d = ResourceDesc::texture(
        ResourceType::Texture1D,
        TextureDesc { width: 256, height: 1, depth_or_layers: 4, levels: 9, format: Format::R32_FLOAT, samples: 1 },
        MemoryHeap::GpuOnly,
        ResourceUsage::SHADER_RESOURCE,
    );
    let mut internal1d = native::Texture1dDesc::default();
    convert_resource_desc_to_texture_1d(&tex1d, &mut internal1d);
    assert_eq!(internal1d.array_size, 4);
    assert_eq!(convert_texture_1d_desc(&internal1d).texture, tex1d.texture);

    let tex3d = ResourceDesc::texture(
        ResourceType::Texture3D,
        TextureDesc { width: 64, height: 64, depth_or_layers: 32, levels: 1, format: Format::R11G11B10_FLOAT, samples: 1 },
        MemoryHeap::GpuOnly,
        ResourceUsage::UNORDERED_ACCESS,
    );
    let mut internal3d = native::Texture3dDesc::default();
    convert_resource_desc_to_texture_3d(&tex3d, &mut internal3d);
    assert_eq!(internal3d.depth, 32);
    let back = convert_texture_3d_desc(&internal3d);
    assert_eq!(back.texture, tex3d.texture);
    assert_eq!(back.usage.difference(DERIVED_USAGE), tex3d.usage);
}

#[test]
fn test_texture_cube_misc_flag_untouched() {
    let desc = ResourceDesc::texture_2d(512, 512, 1, Format::R8G8B8A8_UNORM, ResourceUsage::SHADER_RESOURCE);
    let mut internal = native::Texture2dDesc {
        misc_flags: ResourceMiscFlags::TEXTURECUBE,
        ..Default::default()
    };
    convert_resource_desc_to_texture_2d(&desc, &mut internal);
    assert_eq!(internal.misc_flags, ResourceMiscFlags::TEXTURECUBE);
}

#[test]
fn test_depth_stencil_usage_sets_bind_flag() {
    let desc = ResourceDesc::texture_2d(
        1920, 1080, 1, Format::R24G8_TYPELESS,
        ResourceUsage::DEPTH_STENCIL_WRITE | ResourceUsage::SHADER_RESOURCE_PIXEL,
    );
    let mut internal = native::Texture2dDesc::default();
    convert_resource_desc_to_texture_2d(&desc, &mut internal);
    assert_eq!(internal.bind_flags, BindFlags::DEPTH_STENCIL | BindFlags::SHADER_RESOURCE);
}

#[test]
#[cfg_attr(debug_assertions, should_panic)]
fn test_buffer_size_narrowing_asserts() {
    let desc = ResourceDesc::buffer(u32::MAX as u64 + 1, MemoryHeap::GpuOnly, ResourceUsage::empty());
    let mut internal = native::BufferDesc::default();
    convert_resource_desc_to_buffer(&desc, &mut internal);
}

#[test]
fn test_native_resource_desc_for() {
    assert!(native_resource_desc_for(ResourceType::Unknown).is_none());
    assert!(matches!(
        native_resource_desc_for(ResourceType::Texture3D),
        Some(native::NativeResourceDesc::Texture3D(_))
    ));
}

// ============================================================================
// RENDER TARGET / DEPTH STENCIL VIEWS
// ============================================================================

#[test]
fn test_render_target_view_texture_2d_mip_0() {
    // 1920x1080 RGBA8 texture used as render target and shader resource
    let resource = ResourceDesc::texture_2d(
        1920, 1080, 1, Format::R8G8B8A8_UNORM,
        ResourceUsage::RENDER_TARGET | ResourceUsage::SHADER_RESOURCE,
    );
    let view = ResourceViewDesc::texture(ResourceViewType::Texture2D, resource.texture.format, 0, 1, 0, 1);

    let mut internal = native::RenderTargetViewDesc::default();
    convert_render_target_view_desc_to_native(&view, &mut internal);

    assert_eq!(internal.format, Format::R8G8B8A8_UNORM.raw());
    assert_eq!(internal.dimension, RtvDimension::Texture2D { mip_slice: 0 });
}

#[test]
fn test_unknown_view_type_leaves_dimension_untouched() {
    let view = ResourceViewDesc::from_format(Format::R8G8B8A8_UNORM_SRGB);
    let mut internal = native::RenderTargetViewDesc {
        format: Format::R8G8B8A8_UNORM.raw(),
        dimension: RtvDimension::Texture2DArray { mip_slice: 2, first_array_slice: 1, array_size: 3 },
    };
    convert_render_target_view_desc_to_native(&view, &mut internal);

    // Only the format changes
    assert_eq!(internal.format, Format::R8G8B8A8_UNORM_SRGB.raw());
    assert_eq!(
        internal.dimension,
        RtvDimension::Texture2DArray { mip_slice: 2, first_array_slice: 1, array_size: 3 }
    );
}

#[test]
fn test_depth_stencil_view_round_trip_keeps_flags() {
    let view = ResourceViewDesc::texture(ResourceViewType::Texture2DArray, Format::D32_FLOAT, 1, 1, 2, 4);
    let mut internal = native::DepthStencilViewDesc {
        flags: DsvFlags::READ_ONLY_DEPTH,
        ..Default::default()
    };
    convert_depth_stencil_view_desc_to_native(&view, &mut internal);

    assert_eq!(internal.flags, DsvFlags::READ_ONLY_DEPTH);
    assert_eq!(
        internal.dimension,
        DsvDimension::Texture2DArray { mip_slice: 1, first_array_slice: 2, array_size: 4 }
    );
    assert_eq!(convert_depth_stencil_view_desc(&internal), view);
}

#[test]
#[cfg_attr(debug_assertions, should_panic)]
fn test_depth_stencil_view_rejects_multiple_levels() {
    let view = texture_view(ResourceViewType::Texture2D, 0, 2, 0, 1);
    let mut internal = native::DepthStencilViewDesc::default();
    convert_depth_stencil_view_desc_to_native(&view, &mut internal);
}

#[test]
#[cfg_attr(debug_assertions, should_panic)]
fn test_depth_stencil_view_rejects_texture_3d() {
    let view = texture_view(ResourceViewType::Texture3D, 0, 1, 0, 1);
    let mut internal = native::DepthStencilViewDesc::default();
    convert_depth_stencil_view_desc_to_native(&view, &mut internal);
    assert_eq!(internal.dimension, DsvDimension::Unknown);
}

#[test]
fn test_single_level_views_report_one_level() {
    let dsv = native::DepthStencilViewDesc {
        format: Format::D24_UNORM_S8_UINT.raw(),
        dimension: DsvDimension::Texture2DMs,
        flags: DsvFlags::empty(),
    };
    let desc = convert_depth_stencil_view_desc(&dsv);
    assert_eq!(desc.ty, ResourceViewType::Texture2DMultisample);
    assert_eq!(desc.texture.levels, 1);

    let uav = native::UnorderedAccessViewDesc {
        format: Format::R32_UINT.raw(),
        dimension: UavDimension::Texture3D { mip_slice: 3, first_w_slice: 0, w_size: ENTIRE_RANGE },
    };
    let desc = convert_unordered_access_view_desc(&uav);
    assert_eq!(desc.texture.levels, 1);
    assert_eq!(desc.texture.first_level, 3);
    assert_eq!(desc.texture.layers, ResourceViewDesc::ALL_LAYERS);
}

#[test]
fn test_render_target_view_texture_3d_slices() {
    let view = texture_view(ResourceViewType::Texture3D, 2, 1, 4, 8);
    let mut internal = native::RenderTargetViewDesc::default();
    convert_render_target_view_desc_to_native(&view, &mut internal);
    assert_eq!(internal.dimension, RtvDimension::Texture3D { mip_slice: 2, first_w_slice: 4, w_size: 8 });
    assert_eq!(convert_render_target_view_desc(&internal), view);
}

// ============================================================================
// SENTINELS AND CUBE ARRAYS
// ============================================================================

#[test]
fn test_all_layers_sentinel_round_trips_for_array_views() {
    let all = ResourceViewDesc::ALL_LAYERS;
    for ty in [
        ResourceViewType::Texture1DArray,
        ResourceViewType::Texture2DArray,
        ResourceViewType::Texture2DMultisampleArray,
    ] {
        let view = texture_view(ty, 0, 1, 3, all);

        let mut rtv = NativeViewDesc::RenderTarget(Default::default());
        convert_resource_view_desc_to_native(&view, &mut rtv);
        let mut dsv = NativeViewDesc::DepthStencil(Default::default());
        convert_resource_view_desc_to_native(&view, &mut dsv);
        let mut srv = NativeViewDesc::ShaderResource(Default::default());
        convert_resource_view_desc_to_native(&view, &mut srv);

        for internal in [rtv, dsv, srv] {
            let back = convert_native_view_desc(&internal);
            assert_eq!(back.ty, ty);
            assert_eq!(back.texture.first_layer, 3);
            assert_eq!(back.texture.layers, all, "{:?} through {:?}", ty, internal);
        }
    }
}

#[test]
fn test_cube_array_scaling() {
    for cubes in [0u32, 1, 2, 7, 100] {
        let view = ResourceViewDesc::texture(
            ResourceViewType::TextureCubeArray, Format::R16G16B16A16_FLOAT, 0, 5, 6, cubes * 6,
        );
        let mut internal = native::ShaderResourceViewDesc::default();
        convert_shader_resource_view_desc_to_native(&view, &mut internal);

        assert_eq!(
            internal.dimension,
            SrvDimension::TextureCubeArray { most_detailed_mip: 0, mip_levels: 5, first_2d_array_face: 6, num_cubes: cubes }
        );
        assert_eq!(convert_shader_resource_view_desc(&internal), view);
    }
}

#[test]
fn test_cube_array_sentinel_not_scaled() {
    let view = ResourceViewDesc::texture(
        ResourceViewType::TextureCubeArray, Format::R8G8B8A8_UNORM,
        0, ResourceViewDesc::ALL_LEVELS, 0, ResourceViewDesc::ALL_LAYERS,
    );
    let mut internal = native::ShaderResourceViewDesc::default();
    convert_shader_resource_view_desc_to_native(&view, &mut internal);

    match internal.dimension {
        SrvDimension::TextureCubeArray { num_cubes, mip_levels, .. } => {
            assert_eq!(num_cubes, ENTIRE_RANGE);
            assert_eq!(mip_levels, u32::MAX);
        }
        other => panic!("unexpected dimension {:?}", other),
    }
    assert_eq!(convert_shader_resource_view_desc(&internal).texture.layers, ResourceViewDesc::ALL_LAYERS);
}

// ============================================================================
// SHADER RESOURCE / UNORDERED ACCESS VIEWS
// ============================================================================

#[test]
fn test_shader_resource_view_buffer() {
    let view = ResourceViewDesc::buffer(Format::R32_FLOAT, 16, 4096);
    let mut internal = native::ShaderResourceViewDesc::default();
    convert_shader_resource_view_desc_to_native(&view, &mut internal);
    assert_eq!(internal.dimension, SrvDimension::Buffer { first_element: 16, num_elements: 4096 });
    assert_eq!(convert_shader_resource_view_desc(&internal), view);
}

#[test]
fn test_shader_resource_view_bufferex_reads_as_buffer() {
    let internal = native::ShaderResourceViewDesc {
        format: Format::R32_TYPELESS.raw(),
        dimension: SrvDimension::BufferEx { first_element: 0, num_elements: 128, flags: 1 },
    };
    let desc = convert_shader_resource_view_desc(&internal);
    assert_eq!(desc.ty, ResourceViewType::Buffer);
    assert_eq!(desc.buffer.size, 128);
}

#[test]
fn test_shader_resource_view_bufferex_keeps_flags_in_place() {
    let mut internal = native::ShaderResourceViewDesc {
        format: Format::R32_TYPELESS.raw(),
        dimension: SrvDimension::BufferEx { first_element: 0, num_elements: 128, flags: 1 },
    };
    let mut desc = convert_shader_resource_view_desc(&internal);
    desc.buffer.offset = 16;
    convert_shader_resource_view_desc_to_native(&desc, &mut internal);

    assert_eq!(internal.format, Format::R32_TYPELESS.raw());
    assert_eq!(internal.dimension, SrvDimension::BufferEx { first_element: 16, num_elements: 128, flags: 1 });

    // A fresh descriptor gets the plain buffer dimension
    let mut fresh = native::ShaderResourceViewDesc::default();
    convert_shader_resource_view_desc_to_native(&desc, &mut fresh);
    assert_eq!(fresh.dimension, SrvDimension::Buffer { first_element: 16, num_elements: 128 });
}

#[test]
#[cfg_attr(debug_assertions, should_panic)]
fn test_shader_resource_view_buffer_narrowing_asserts() {
    let view = ResourceViewDesc::buffer(Format::R32_FLOAT, 0, u32::MAX as u64 + 10);
    let mut internal = native::ShaderResourceViewDesc::default();
    convert_shader_resource_view_desc_to_native(&view, &mut internal);
}

#[test]
fn test_shader_resource_view_texture_2d_levels() {
    let view = texture_view(ResourceViewType::Texture2D, 1, ResourceViewDesc::ALL_LEVELS, 0, 1);
    let mut internal = native::ShaderResourceViewDesc::default();
    convert_shader_resource_view_desc_to_native(&view, &mut internal);
    assert_eq!(internal.dimension, SrvDimension::Texture2D { most_detailed_mip: 1, mip_levels: u32::MAX });
}

#[test]
fn test_unordered_access_buffer_keeps_flags() {
    let view = ResourceViewDesc::buffer(Format::R32_TYPELESS, 0, 256);
    let mut internal = native::UnorderedAccessViewDesc {
        format: 0,
        dimension: UavDimension::Buffer { first_element: 8, num_elements: 8, flags: BufferUavFlags::RAW },
    };
    convert_unordered_access_view_desc_to_native(&view, &mut internal);
    assert_eq!(
        internal.dimension,
        UavDimension::Buffer { first_element: 0, num_elements: 256, flags: BufferUavFlags::RAW }
    );
    assert_eq!(convert_unordered_access_view_desc(&internal).buffer, view.buffer);
}

#[test]
fn test_native_view_desc_for_usage() {
    assert!(matches!(native_view_desc_for(ResourceUsage::RENDER_TARGET), Some(NativeViewDesc::RenderTarget(_))));
    assert!(matches!(native_view_desc_for(ResourceUsage::DEPTH_STENCIL), Some(NativeViewDesc::DepthStencil(_))));
    assert!(matches!(native_view_desc_for(ResourceUsage::DEPTH_STENCIL_READ), Some(NativeViewDesc::DepthStencil(_))));
    assert!(matches!(native_view_desc_for(ResourceUsage::SHADER_RESOURCE_PIXEL), Some(NativeViewDesc::ShaderResource(_))));
    assert!(matches!(native_view_desc_for(ResourceUsage::UNORDERED_ACCESS), Some(NativeViewDesc::UnorderedAccess(_))));
    assert!(native_view_desc_for(ResourceUsage::empty()).is_none());
    assert!(native_view_desc_for(ResourceUsage::RENDER_TARGET | ResourceUsage::SHADER_RESOURCE).is_none());
}

// ============================================================================
// SAMPLER
// ============================================================================

#[test]
fn test_sampler_round_trip() {
    let desc = SamplerDesc {
        filter: TextureFilter::Anisotropic,
        address_u: TextureAddressMode::Wrap,
        address_v: TextureAddressMode::Mirror,
        address_w: TextureAddressMode::Border,
        mip_lod_bias: -0.5,
        max_anisotropy: 16.0,
        min_lod: 0.0,
        max_lod: 12.0,
    };
    let mut internal = native::SamplerDesc {
        comparison_func: native::ComparisonFunc::LESS,
        border_color: [1.0, 0.0, 0.0, 1.0],
        ..Default::default()
    };
    convert_sampler_desc_to_native(&desc, &mut internal);

    assert_eq!(internal.filter, 0x55);
    assert_eq!(internal.address_u, 1);
    assert_eq!(internal.address_w, 4);
    assert_eq!(internal.max_anisotropy, 16);
    // Unrepresented fields untouched
    assert_eq!(internal.comparison_func, native::ComparisonFunc::LESS);
    assert_eq!(internal.border_color, [1.0, 0.0, 0.0, 1.0]);

    assert_eq!(convert_sampler_desc(&internal), desc);
}
