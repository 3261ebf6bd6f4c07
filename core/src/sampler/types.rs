//! CPU-side sampler types and filter/address mode definitions.

use crate::color::Color;

/// Filtering applied for one [`FilterKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// No filtering. Only meaningful for mipmaps, where it disables mipmapping.
    None,
    /// Nearest neighbour.
    Point,
    /// Linear interpolation.
    Linear,
    /// Anisotropic filtering.
    Anisotropic,
}

/// Which stage of texture filtering a [`FilterMode`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Minification.
    Min,
    /// Magnification.
    Mag,
    /// Mip level selection.
    Mip,
}

/// Common min/mag/mip combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPreset {
    /// Point min/mag, no mipmapping.
    None,
    /// Linear min/mag, point mip.
    Bilinear,
    /// Linear min/mag/mip.
    Trilinear,
    /// Anisotropic min/mag, linear mip.
    Anisotropic,
}

impl FilterPreset {
    /// The `(min, mag, mip)` filters this preset selects.
    pub fn filters(self) -> (FilterMode, FilterMode, FilterMode) {
        match self {
            Self::None => (FilterMode::Point, FilterMode::Point, FilterMode::None),
            Self::Bilinear => (FilterMode::Linear, FilterMode::Linear, FilterMode::Point),
            Self::Trilinear => (FilterMode::Linear, FilterMode::Linear, FilterMode::Linear),
            Self::Anisotropic => (
                FilterMode::Anisotropic,
                FilterMode::Anisotropic,
                FilterMode::Linear,
            ),
        }
    }
}

/// Texture address mode (behaviour outside `[0, 1]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Repeat the texture.
    #[default]
    Wrap,
    /// Repeat, flipping on every integer boundary.
    Mirror,
    /// Clamp to the edge texel.
    Clamp,
    /// Use the border colour.
    Border,
}

/// Address modes for the three texture axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UvwAddressMode {
    pub u: AddressMode,
    pub v: AddressMode,
    pub w: AddressMode,
}

impl UvwAddressMode {
    /// The same mode on every axis.
    pub fn uniform(mode: AddressMode) -> Self {
        Self {
            u: mode,
            v: mode,
            w: mode,
        }
    }
}

/// CPU-side sampler configuration.
///
/// Describes how a texture is sampled: filtering, address modes, mip bias,
/// anisotropy and border colour. This is a backend-agnostic descriptor
/// separate from any GPU resource.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSampler {
    /// Sampler name.
    pub name: Option<String>,
    /// Address modes for U, V and W.
    pub address_mode: UvwAddressMode,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Mipmap filter.
    pub mip_filter: FilterMode,
    /// Bias added to the computed mip level.
    pub mip_bias: f32,
    /// Maximum anisotropy level.
    pub max_anisotropy: u32,
    /// Colour used by [`AddressMode::Border`].
    pub border_color: Color,
}

impl CpuSampler {
    /// Create a sampler using the given filter preset.
    pub fn with_preset(preset: FilterPreset) -> Self {
        let (min_filter, mag_filter, mip_filter) = preset.filters();
        Self {
            min_filter,
            mag_filter,
            mip_filter,
            ..Default::default()
        }
    }

    /// Set the sampler name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set address mode for all coordinates.
    #[must_use]
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = UvwAddressMode::uniform(mode);
        self
    }

    /// Set the border colour.
    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set anisotropic filtering level.
    #[must_use]
    pub fn with_anisotropy(mut self, level: u32) -> Self {
        self.max_anisotropy = level;
        self
    }

    /// Whether mipmaps are sampled at all.
    pub fn uses_mipmaps(&self) -> bool {
        self.mip_filter != FilterMode::None
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self {
            name: None,
            address_mode: UvwAddressMode::default(),
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            mip_filter: FilterMode::Point,
            mip_bias: 0.0,
            max_anisotropy: 1,
            border_color: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_filter_triples() {
        assert_eq!(
            FilterPreset::None.filters(),
            (FilterMode::Point, FilterMode::Point, FilterMode::None)
        );
        assert_eq!(
            FilterPreset::Trilinear.filters(),
            (FilterMode::Linear, FilterMode::Linear, FilterMode::Linear)
        );
        assert_eq!(
            FilterPreset::Anisotropic.filters().2,
            FilterMode::Linear
        );
    }

    #[test]
    fn default_sampler_is_bilinear_wrap() {
        let s = CpuSampler::default();
        assert_eq!(s, CpuSampler::with_preset(FilterPreset::Bilinear));
        assert_eq!(s.address_mode, UvwAddressMode::uniform(AddressMode::Wrap));
        assert!(s.uses_mipmaps());
    }

    #[test]
    fn builder_sets_fields() {
        let s = CpuSampler::with_preset(FilterPreset::None)
            .with_name("shadow")
            .with_address_mode(AddressMode::Border)
            .with_border_color(Color::WHITE)
            .with_anisotropy(8);
        assert_eq!(s.name.as_deref(), Some("shadow"));
        assert_eq!(s.address_mode.w, AddressMode::Border);
        assert_eq!(s.border_color, Color::WHITE);
        assert_eq!(s.max_anisotropy, 8);
        assert!(!s.uses_mipmaps());
    }
}
