//! Layer and scene blending vocabulary.
//!
//! A texture layer combines its texel with the result of previous layers
//! ([`LayerBlendMode`]); when a backend cannot do that in one pass it falls
//! back to blending whole passes in the frame buffer ([`SceneBlendFactor`]).

mod blend;

pub use blend::{
    ColourOperationMapping, LayerBlendMode, LayerBlendOperation, LayerBlendOperationEx,
    LayerBlendSource, LayerBlendType, SceneBlendFactor,
};
