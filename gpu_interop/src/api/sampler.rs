/// Sampler descriptor

// ===== TEXTURE FILTER =====

/// Texture filtering mode
///
/// Discriminants follow the native filter encoding shared by both Direct3D
/// backends (bit 0 mip linear, bit 2 mag linear, bit 4 min linear, 0x55
/// anisotropic, bit 7 comparison), so conversion is a plain cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum TextureFilter {
    MinMagMipPoint = 0x00,
    MinMagPointMipLinear = 0x01,
    MinPointMagLinearMipPoint = 0x04,
    MinPointMagMipLinear = 0x05,
    MinLinearMagMipPoint = 0x10,
    MinLinearMagPointMipLinear = 0x11,
    MinMagLinearMipPoint = 0x14,
    #[default]
    MinMagMipLinear = 0x15,
    Anisotropic = 0x55,
    CompareMinMagMipPoint = 0x80,
    CompareMinMagPointMipLinear = 0x81,
    CompareMinPointMagLinearMipPoint = 0x84,
    CompareMinPointMagMipLinear = 0x85,
    CompareMinLinearMagMipPoint = 0x90,
    CompareMinLinearMagPointMipLinear = 0x91,
    CompareMinMagLinearMipPoint = 0x94,
    CompareMinMagMipLinear = 0x95,
    CompareAnisotropic = 0xD5,
}

impl TextureFilter {
    const COMPARISON_BIT: u32 = 0x80;
    const REDUCTION_MASK: u32 = 0x180;

    /// Native filter value
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Build from a native filter value
    ///
    /// Minimum/maximum reduction filters have no canonical counterpart and
    /// degrade to the matching standard filter. Values outside the native
    /// encoding are a contract violation.
    pub fn from_raw(raw: u32) -> Self {
        let comparison = raw & Self::REDUCTION_MASK == Self::COMPARISON_BIT;
        let base = match raw & !Self::REDUCTION_MASK {
            0x00 => Self::MinMagMipPoint,
            0x01 => Self::MinMagPointMipLinear,
            0x04 => Self::MinPointMagLinearMipPoint,
            0x05 => Self::MinPointMagMipLinear,
            0x10 => Self::MinLinearMagMipPoint,
            0x11 => Self::MinLinearMagPointMipLinear,
            0x14 => Self::MinMagLinearMipPoint,
            0x15 => Self::MinMagMipLinear,
            0x55 => Self::Anisotropic,
            other => {
                debug_assert!(false, "invalid native texture filter {:#x}", other);
                Self::MinMagMipLinear
            }
        };
        if comparison { base.with_comparison() } else { base }
    }

    /// Returns true for comparison filters
    pub fn is_comparison(self) -> bool {
        self.raw() & Self::COMPARISON_BIT != 0
    }

    fn with_comparison(self) -> Self {
        match self {
            Self::MinMagMipPoint => Self::CompareMinMagMipPoint,
            Self::MinMagPointMipLinear => Self::CompareMinMagPointMipLinear,
            Self::MinPointMagLinearMipPoint => Self::CompareMinPointMagLinearMipPoint,
            Self::MinPointMagMipLinear => Self::CompareMinPointMagMipLinear,
            Self::MinLinearMagMipPoint => Self::CompareMinLinearMagMipPoint,
            Self::MinLinearMagPointMipLinear => Self::CompareMinLinearMagPointMipLinear,
            Self::MinMagLinearMipPoint => Self::CompareMinMagLinearMipPoint,
            Self::MinMagMipLinear => Self::CompareMinMagMipLinear,
            Self::Anisotropic => Self::CompareAnisotropic,
            compare => compare,
        }
    }
}

// ===== ADDRESS MODE =====

/// Texture coordinate addressing
///
/// Zero-based; the native enumeration starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum TextureAddressMode {
    #[default]
    Wrap = 0,
    Mirror = 1,
    Clamp = 2,
    Border = 3,
    MirrorOnce = 4,
}

impl TextureAddressMode {
    const NATIVE_OFFSET: u32 = 1;

    /// Native (one-based) value
    pub fn to_native(self) -> u32 {
        self as u32 + Self::NATIVE_OFFSET
    }

    /// Build from a native (one-based) value
    pub fn from_native(raw: u32) -> Self {
        match raw.wrapping_sub(Self::NATIVE_OFFSET) {
            0 => Self::Wrap,
            1 => Self::Mirror,
            2 => Self::Clamp,
            3 => Self::Border,
            4 => Self::MirrorOnce,
            _ => {
                debug_assert!(false, "invalid native texture address mode {}", raw);
                Self::Wrap
            }
        }
    }
}

// ===== SAMPLER DESC =====

/// Backend-neutral sampler description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub filter: TextureFilter,
    pub address_u: TextureAddressMode,
    pub address_v: TextureAddressMode,
    pub address_w: TextureAddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: f32,
    pub min_lod: f32,
    pub max_lod: f32,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            filter: TextureFilter::MinMagMipLinear,
            address_u: TextureAddressMode::Clamp,
            address_v: TextureAddressMode::Clamp,
            address_w: TextureAddressMode::Clamp,
            mip_lod_bias: 0.0,
            max_anisotropy: 1.0,
            min_lod: f32::MIN,
            max_lod: f32::MAX,
        }
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
