/// Resource and resource view descriptors
///
/// Pure value types. A `ResourceDesc`/`ResourceViewDesc` is produced either by
/// a caller (for creation) or by a backend converter from an introspected
/// native object, and is never persisted.

use bitflags::bitflags;
use crate::api::Format;

// ===== RESOURCE USAGE =====

bitflags! {
    /// How a resource is (or may be) used by the GPU
    ///
    /// Bit values line up with the Direct3D 12 resource-state bits, except
    /// `CONSTANT_BUFFER` which has no native state of its own there.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceUsage: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const RENDER_TARGET = 0x4;
        const UNORDERED_ACCESS = 0x8;
        const DEPTH_STENCIL_WRITE = 0x10;
        const DEPTH_STENCIL_READ = 0x20;
        const DEPTH_STENCIL = Self::DEPTH_STENCIL_WRITE.bits() | Self::DEPTH_STENCIL_READ.bits();
        const SHADER_RESOURCE_NON_PIXEL = 0x40;
        const SHADER_RESOURCE_PIXEL = 0x80;
        const SHADER_RESOURCE = Self::SHADER_RESOURCE_NON_PIXEL.bits() | Self::SHADER_RESOURCE_PIXEL.bits();
        const COPY_DEST = 0x400;
        const COPY_SOURCE = 0x800;
        const RESOLVE_DEST = 0x1000;
        const RESOLVE_SOURCE = 0x2000;
        const CONSTANT_BUFFER = 0x8000;
    }
}

// ===== RESOURCE TYPE / HEAP =====

/// Resource dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    /// Not known; converters leave the native dimension untouched
    #[default]
    Unknown,
    Buffer,
    Texture1D,
    Texture2D,
    Texture3D,
}

impl ResourceType {
    /// Returns true for any texture dimension
    pub fn is_texture(self) -> bool {
        matches!(self, Self::Texture1D | Self::Texture2D | Self::Texture3D)
    }
}

/// Memory heap a resource lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryHeap {
    #[default]
    Unknown,
    /// Device-local, not CPU accessible
    GpuOnly,
    /// CPU-written upload memory
    CpuToGpu,
    /// CPU-read readback memory
    GpuToCpu,
    /// CPU-only staging memory
    CpuOnly,
}

// ===== RESOURCE DESC =====

/// Buffer payload of a `ResourceDesc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
}

/// Texture payload of a `ResourceDesc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureDesc {
    pub width: u32,
    /// Always 1 for 1D textures
    pub height: u32,
    /// Depth for 3D textures, array layer count otherwise
    pub depth_or_layers: u16,
    /// Mip level count
    pub levels: u16,
    pub format: Format,
    /// Sample count (1 = not multisampled)
    pub samples: u16,
}

/// Backend-neutral description of a buffer or texture
///
/// `buffer` is meaningful only when `ty == Buffer`, `texture` only for the
/// texture types. Converters ignore the other payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceDesc {
    pub ty: ResourceType,
    pub heap: MemoryHeap,
    pub usage: ResourceUsage,
    pub buffer: BufferDesc,
    pub texture: TextureDesc,
}

impl ResourceDesc {
    /// Describe a buffer of `size` bytes
    pub fn buffer(size: u64, heap: MemoryHeap, usage: ResourceUsage) -> Self {
        Self {
            ty: ResourceType::Buffer,
            heap,
            usage,
            buffer: BufferDesc { size },
            texture: TextureDesc::default(),
        }
    }

    /// Describe a texture of the given dimension
    pub fn texture(ty: ResourceType, texture: TextureDesc, heap: MemoryHeap, usage: ResourceUsage) -> Self {
        debug_assert!(ty.is_texture(), "texture descriptor with non-texture type {:?}", ty);
        Self {
            ty,
            heap,
            usage,
            buffer: BufferDesc::default(),
            texture,
        }
    }

    /// Describe a single-sample, GPU-only 2D texture
    pub fn texture_2d(width: u32, height: u32, levels: u16, format: Format, usage: ResourceUsage) -> Self {
        Self::texture(
            ResourceType::Texture2D,
            TextureDesc { width, height, depth_or_layers: 1, levels, format, samples: 1 },
            MemoryHeap::GpuOnly,
            usage,
        )
    }
}

// ===== RESOURCE VIEW DESC =====

/// View dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceViewType {
    /// Not known; converters leave the native view dimension untouched
    #[default]
    Unknown,
    Buffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture2DMultisample,
    Texture2DMultisampleArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
}

/// Element range of a buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferRange {
    /// First element
    pub offset: u64,
    /// Element count
    pub size: u64,
}

/// Mip/layer range of a texture view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubresourceRange {
    pub first_level: u32,
    /// `ResourceViewDesc::ALL_LEVELS` selects every remaining level
    pub levels: u32,
    /// First array layer (first W slice for 3D views, first face for cube arrays)
    pub first_layer: u32,
    /// Layer count, faces for cube arrays (6 per cube);
    /// `ResourceViewDesc::ALL_LAYERS` selects every remaining layer
    pub layers: u32,
}

/// Backend-neutral description of a resource view
///
/// `buffer` is meaningful only when `ty == Buffer`, `texture` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceViewDesc {
    pub ty: ResourceViewType,
    pub format: Format,
    pub buffer: BufferRange,
    pub texture: SubresourceRange,
}

impl ResourceViewDesc {
    /// Sentinel selecting every remaining layer (or every remaining cube)
    pub const ALL_LAYERS: u32 = u32::MAX;
    /// Sentinel selecting every remaining mip level
    pub const ALL_LEVELS: u32 = u32::MAX;

    /// View of unknown dimension carrying only a format
    ///
    /// Converting it to native only updates the native format.
    pub fn from_format(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Typed buffer view of `size` elements starting at element `offset`
    pub fn buffer(format: Format, offset: u64, size: u64) -> Self {
        Self {
            ty: ResourceViewType::Buffer,
            format,
            buffer: BufferRange { offset, size },
            texture: SubresourceRange::default(),
        }
    }

    /// Texture view over a mip/layer range
    pub fn texture(
        ty: ResourceViewType,
        format: Format,
        first_level: u32,
        levels: u32,
        first_layer: u32,
        layers: u32,
    ) -> Self {
        debug_assert!(ty != ResourceViewType::Buffer, "texture view descriptor with buffer type");
        Self {
            ty,
            format,
            buffer: BufferRange::default(),
            texture: SubresourceRange { first_level, levels, first_layer, layers },
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
