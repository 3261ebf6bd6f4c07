//! Blend operation types and the simple-to-extended operation table.

use crate::color::Color;

/// Whether a blend mode applies to colour or alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerBlendType {
    Colour,
    Alpha,
}

/// Simple layer blending, expanded through [`LayerBlendOperation::mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerBlendOperation {
    /// Replace everything with this layer.
    Replace,
    /// Add the layer to the existing colour.
    Add,
    /// Multiply the existing colour by the layer.
    Modulate,
    /// Blend by the layer's alpha.
    AlphaBlend,
}

/// Full set of per-layer blend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerBlendOperationEx {
    /// Use source 1 unchanged.
    Source1,
    /// Use source 2 unchanged.
    Source2,
    Modulate,
    /// Modulate and brighten by 2.
    ModulateX2,
    /// Modulate and brighten by 4.
    ModulateX4,
    Add,
    /// Add, then subtract 0.5.
    AddSigned,
    /// Add, then subtract the product.
    AddSmooth,
    Subtract,
    /// Interpolate using the vertex diffuse alpha.
    BlendDiffuseAlpha,
    /// Interpolate using the texture alpha.
    BlendTextureAlpha,
    /// Interpolate using the alpha of the previous layers.
    BlendCurrentAlpha,
    /// Interpolate using a manual factor.
    BlendManual,
    /// Dot product of the two colours.
    DotProduct,
    /// Interpolate using the vertex diffuse colour.
    BlendDiffuseColour,
}

/// Operand of a layer blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerBlendSource {
    /// Result of the previous layers.
    Current,
    /// This layer's texel.
    Texture,
    /// Interpolated vertex diffuse colour.
    Diffuse,
    /// Interpolated vertex specular colour.
    Specular,
    /// A manually supplied value.
    Manual,
}

/// Frame-buffer blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneBlendFactor {
    One,
    Zero,
    DestColour,
    SourceColour,
    OneMinusDestColour,
    OneMinusSourceColour,
    DestAlpha,
    SourceAlpha,
    OneMinusDestAlpha,
    OneMinusSourceAlpha,
}

/// Complete description of how one layer blends for one channel group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerBlendMode {
    pub blend_type: LayerBlendType,
    pub operation: LayerBlendOperationEx,
    pub source1: LayerBlendSource,
    pub source2: LayerBlendSource,
    /// Manual colour for `source1` when it is [`LayerBlendSource::Manual`].
    pub colour_arg1: Color,
    /// Manual colour for `source2` when it is [`LayerBlendSource::Manual`].
    pub colour_arg2: Color,
    /// Manual alpha for `source1`.
    pub alpha_arg1: f32,
    /// Manual alpha for `source2`.
    pub alpha_arg2: f32,
    /// Interpolation factor for [`LayerBlendOperationEx::BlendManual`].
    pub factor: f32,
}

impl LayerBlendMode {
    /// `texture * current` for the given channel group.
    pub fn modulate(blend_type: LayerBlendType) -> Self {
        Self {
            blend_type,
            operation: LayerBlendOperationEx::Modulate,
            source1: LayerBlendSource::Texture,
            source2: LayerBlendSource::Current,
            colour_arg1: Color::WHITE,
            colour_arg2: Color::WHITE,
            alpha_arg1: 1.0,
            alpha_arg2: 1.0,
            factor: 0.0,
        }
    }
}

/// Extended operation, operands and multipass fallback for a
/// [`LayerBlendOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColourOperationMapping {
    pub operation: LayerBlendOperationEx,
    pub source1: LayerBlendSource,
    pub source2: LayerBlendSource,
    pub fallback_src: SceneBlendFactor,
    pub fallback_dest: SceneBlendFactor,
}

impl LayerBlendOperation {
    /// Canonical expansion used by texture binding slots.
    pub fn mapping(self) -> ColourOperationMapping {
        use LayerBlendOperationEx as Ex;
        use SceneBlendFactor as F;

        let (operation, fallback_src, fallback_dest) = match self {
            Self::Replace => (Ex::Source1, F::One, F::Zero),
            Self::Add => (Ex::Add, F::One, F::One),
            Self::Modulate => (Ex::Modulate, F::DestColour, F::Zero),
            Self::AlphaBlend => (Ex::BlendTextureAlpha, F::SourceAlpha, F::OneMinusSourceAlpha),
        };
        ColourOperationMapping {
            operation,
            source1: LayerBlendSource::Texture,
            source2: LayerBlendSource::Current,
            fallback_src,
            fallback_dest,
        }
    }
}
