//! Texture binding slot: one sampler's texture source, addressing, filtering,
//! blending and coordinate transform.
//!
//! A slot names its textures by string and resolves them through a
//! [`TextureCache`] only when a frame is first needed. Resolved textures are
//! kept as `Weak` references, one per frame name, so the cache keeps sole
//! ownership. The references are dropped whenever the names change.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use camelot_core::color::Color;
use camelot_core::material::{
    LayerBlendMode, LayerBlendOperation, LayerBlendOperationEx, LayerBlendSource, LayerBlendType,
    SceneBlendFactor,
};
use camelot_core::math::Mat4;
use camelot_core::sampler::{
    AddressMode, CpuSampler, FilterKind, FilterMode, FilterPreset, UvwAddressMode,
};
use camelot_core::texture::{MipmapCount, TextureFormat, TextureType};

use crate::error::GraphicsError;
use crate::resources::{Texture, TextureCache, TextureRequest};

use super::texture_transform::TextureTransform;

/// Suffixes for the six faces of a cube map split into separate files.
pub const CUBE_FACE_SUFFIXES: [&str; 6] = ["_fr", "_bk", "_lf", "_rt", "_up", "_dn"];

/// Where a slot's texture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// Resolved by name through the texture cache.
    #[default]
    Named,
    /// A shadow map bound by the renderer.
    Shadow,
    /// A compositor target bound by the renderer.
    Compositor,
}

/// Which programmable stage samples the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingType {
    #[default]
    Fragment,
    Vertex,
}

/// Environment mapping flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvMapType {
    Planar,
    Curved,
    Reflection,
    Normal,
}

/// Texture coordinate effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureEffect {
    /// Generate coordinates from an environment map.
    EnvironmentMap(EnvMapType),
    /// Generate coordinates by projecting from a frustum.
    ProjectiveTexture,
    /// Scroll at a constant speed, in texture widths per second.
    UvScroll { u_speed: f32, v_speed: f32 },
    /// Rotate at a constant speed, in turns per second.
    Rotate { speed: f32 },
}

impl TextureEffect {
    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Texture binding slot of a [`Pass`](super::Pass).
///
/// Frame names and resolved references always have the same length. A slot
/// with no frames, an empty first frame name, or a failed load is blank and
/// contributes no texture.
///
/// # Example
///
/// ```ignore
/// let mut slot = TextureBindingSlot::new();
/// slot.set_name("tex");
/// slot.set_animated_texture_name("flame.png", 4, 1.0);
/// slot.set_texture_filtering(FilterPreset::Trilinear);
/// slot.load(cache);
/// let texture = slot.current_texture();
/// ```
#[derive(Clone)]
pub struct TextureBindingSlot {
    // Which textures
    frames: Vec<String>,
    frame_ptrs: Vec<Option<Weak<Texture>>>,
    manual_texture: Option<Weak<Texture>>,
    content_type: ContentType,
    current_frame: usize,
    animation_duration: f32,
    cubic: bool,
    texture_type: TextureType,
    texture_load_failed: bool,

    // Load hints
    desired_format: TextureFormat,
    num_mipmaps: MipmapCount,
    is_alpha: bool,
    hardware_gamma: bool,
    texture_coord_set: u32,
    binding_type: BindingType,

    // Sampling
    address_mode: UvwAddressMode,
    border_color: Color,
    min_filter: FilterMode,
    mag_filter: FilterMode,
    mip_filter: FilterMode,
    max_anisotropy: u32,
    mipmap_bias: f32,
    is_default_filtering: bool,
    is_default_anisotropy: bool,

    // Blending
    colour_blend_mode: LayerBlendMode,
    alpha_blend_mode: LayerBlendMode,
    colour_blend_fallback_src: SceneBlendFactor,
    colour_blend_fallback_dest: SceneBlendFactor,

    transform: TextureTransform,
    effects: Vec<TextureEffect>,

    name: String,
    texture_name_alias: String,
    compositor_name: String,
    compositor_texture_name: String,
    compositor_mrt_index: usize,

    cache: Option<Arc<dyn TextureCache>>,
    loaded: bool,
}

impl TextureBindingSlot {
    /// Create a blank slot with default sampling and a modulate colour operation.
    pub fn new() -> Self {
        let mut slot = Self {
            frames: Vec::new(),
            frame_ptrs: Vec::new(),
            manual_texture: None,
            content_type: ContentType::Named,
            current_frame: 0,
            animation_duration: 0.0,
            cubic: false,
            texture_type: TextureType::Type2D,
            texture_load_failed: false,
            desired_format: TextureFormat::Unknown,
            num_mipmaps: MipmapCount::Default,
            is_alpha: false,
            hardware_gamma: false,
            texture_coord_set: 0,
            binding_type: BindingType::Fragment,
            address_mode: UvwAddressMode::uniform(AddressMode::Wrap),
            border_color: Color::BLACK,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            mip_filter: FilterMode::Point,
            max_anisotropy: 0,
            mipmap_bias: 0.0,
            is_default_filtering: true,
            is_default_anisotropy: true,
            colour_blend_mode: LayerBlendMode::modulate(LayerBlendType::Colour),
            alpha_blend_mode: LayerBlendMode::modulate(LayerBlendType::Alpha),
            colour_blend_fallback_src: SceneBlendFactor::One,
            colour_blend_fallback_dest: SceneBlendFactor::Zero,
            transform: TextureTransform::new(),
            effects: Vec::new(),
            name: String::new(),
            texture_name_alias: String::new(),
            compositor_name: String::new(),
            compositor_texture_name: String::new(),
            compositor_mrt_index: 0,
            cache: None,
            loaded: false,
        };
        slot.set_colour_operation(LayerBlendOperation::Modulate);
        slot
    }

    /// Create a slot showing a single 2D texture.
    pub fn with_texture(name: impl Into<String>, texture_coord_set: u32) -> Self {
        let mut slot = Self::new();
        slot.set_texture_name(name, TextureType::Type2D);
        slot.set_texture_coord_set(texture_coord_set);
        slot
    }

    // ------------------------------------------------------------------
    // Frame names
    // ------------------------------------------------------------------

    /// Show a single texture. A cube map type delegates to
    /// [`set_cubic_texture_name`](Self::set_cubic_texture_name) with `for_uvw`.
    /// An empty name leaves the slot blank.
    pub fn set_texture_name(&mut self, name: impl Into<String>, texture_type: TextureType) {
        let name = name.into();
        if texture_type == TextureType::CubeMap {
            self.set_cubic_texture_name(&name, true);
            return;
        }

        let empty = name.is_empty();
        self.assign_single_frame(name, texture_type);
        if !empty {
            self.reload_if_loaded();
        }
    }

    /// Show a cube map. With `for_uvw` the name is one cube texture sampled
    /// with 3D coordinates; otherwise it is split into six face textures by
    /// inserting [`CUBE_FACE_SUFFIXES`] before the extension.
    pub fn set_cubic_texture_name(&mut self, name: &str, for_uvw: bool) {
        let names = if for_uvw {
            vec![name.to_string()]
        } else {
            let (base, ext) = split_extension(name);
            CUBE_FACE_SUFFIXES
                .iter()
                .map(|suffix| format!("{base}{suffix}{ext}"))
                .collect()
        };
        self.assign_cubic(names, for_uvw);
        self.reload_if_loaded();
    }

    /// Show a cube map from explicit names: one name with `for_uvw`, six
    /// face names otherwise.
    pub fn set_cubic_texture_names(
        &mut self,
        names: &[impl AsRef<str>],
        for_uvw: bool,
    ) -> Result<(), GraphicsError> {
        let expected = if for_uvw { 1 } else { 6 };
        if names.len() < expected {
            return Err(GraphicsError::InvalidParameter(format!(
                "cubic texture needs {expected} names, got {}",
                names.len()
            )));
        }
        let names = names[..expected]
            .iter()
            .map(|n| n.as_ref().to_string())
            .collect();
        self.assign_cubic(names, for_uvw);
        self.reload_if_loaded();
        Ok(())
    }

    /// Show an animation of `num_frames` textures named `base_<i>ext`,
    /// cycling over `duration` seconds.
    pub fn set_animated_texture_name(&mut self, name: &str, num_frames: usize, duration: f32) {
        let (base, ext) = split_extension(name);
        let names = (0..num_frames).map(|i| format!("{base}_{i}{ext}"));
        self.set_animated_texture_names(names, duration);
    }

    /// Show an animation of explicitly named frames.
    pub fn set_animated_texture_names(
        &mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
        duration: f32,
    ) {
        self.set_content_type(ContentType::Named);
        self.texture_load_failed = false;
        self.frames = names.into_iter().map(Into::into).collect();
        self.frame_ptrs = vec![None; self.frames.len()];
        self.animation_duration = duration;
        self.current_frame = 0;
        self.cubic = false;
        log::trace!("Slot '{}': {} animation frames", self.name, self.frames.len());
        self.reload_if_loaded();
    }

    /// Rename one frame.
    pub fn set_frame_texture_name(
        &mut self,
        name: impl Into<String>,
        frame: usize,
    ) -> Result<(), GraphicsError> {
        self.check_frame(frame, "set_frame_texture_name")?;
        self.texture_load_failed = false;
        self.frames[frame] = name.into();
        self.frame_ptrs[frame] = None;
        self.reload_if_loaded();
        Ok(())
    }

    /// Append a frame.
    pub fn add_frame_texture_name(&mut self, name: impl Into<String>) {
        self.set_content_type(ContentType::Named);
        self.texture_load_failed = false;
        self.frames.push(name.into());
        self.frame_ptrs.push(None);
        self.reload_if_loaded();
    }

    /// Remove a frame. The current frame stays within range.
    pub fn delete_frame_texture_name(&mut self, frame: usize) -> Result<(), GraphicsError> {
        self.check_frame(frame, "delete_frame_texture_name")?;
        self.texture_load_failed = false;
        self.frames.remove(frame);
        self.frame_ptrs.remove(frame);
        if self.current_frame >= self.frames.len() {
            self.current_frame = self.frames.len().saturating_sub(1);
        }
        self.reload_if_loaded();
        Ok(())
    }

    /// Name of one frame.
    pub fn frame_texture_name(&self, frame: usize) -> Result<&str, GraphicsError> {
        self.check_frame(frame, "frame_texture_name")?;
        Ok(&self.frames[frame])
    }

    /// Name of the current frame, or `""` when there is none.
    pub fn texture_name(&self) -> &str {
        self.frames
            .get(self.current_frame)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All frame names.
    pub fn frame_names(&self) -> &[String] {
        &self.frames
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Select the active frame.
    pub fn set_current_frame(&mut self, frame: usize) -> Result<(), GraphicsError> {
        self.check_frame(frame, "set_current_frame")?;
        self.current_frame = frame;
        Ok(())
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Seconds for one full cycle through the frames (0 when not animated).
    pub fn animation_duration(&self) -> f32 {
        self.animation_duration
    }

    /// Advance time-driven state to `time` seconds: the animation frame and
    /// any scroll or rotate effects.
    pub fn advance_animation(&mut self, time: f32) {
        let count = self.frames.len();
        if self.animation_duration > 0.0 && count > 1 {
            let phase = time.rem_euclid(self.animation_duration) / self.animation_duration;
            self.current_frame = ((phase * count as f32) as usize).min(count - 1);
        }

        let mut scroll = None;
        let mut rotate = None;
        for effect in &self.effects {
            match *effect {
                TextureEffect::UvScroll { u_speed, v_speed } => {
                    scroll = Some(((u_speed * time).fract(), (v_speed * time).fract()));
                }
                TextureEffect::Rotate { speed } => {
                    rotate = Some((speed * time).fract() * std::f32::consts::TAU);
                }
                _ => {}
            }
        }
        if let Some((u, v)) = scroll {
            self.transform.set_scroll(u, v);
        }
        if let Some(angle) = rotate {
            self.transform.set_rotate(angle);
        }
    }

    /// Make the slot blank.
    pub fn set_blank(&mut self) {
        self.set_texture_name("", TextureType::Type2D);
    }

    /// Whether the slot contributes no texture.
    pub fn is_blank(&self) -> bool {
        match self.frames.first() {
            None => true,
            Some(first) => first.is_empty() || self.texture_load_failed,
        }
    }

    /// Whether a texture failed to load since the names last changed.
    pub fn texture_load_failed(&self) -> bool {
        self.texture_load_failed
    }

    pub fn is_cubic(&self) -> bool {
        self.cubic
    }

    /// Whether the slot is sampled with 3D coordinates (a single cube texture).
    pub fn is_3d(&self) -> bool {
        self.texture_type == TextureType::CubeMap
    }

    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }

    // ------------------------------------------------------------------
    // Content and resolution
    // ------------------------------------------------------------------

    /// Switch between named and manually bound content. Shadow and
    /// compositor content drop every frame name and leave one manual
    /// reference, bound later with [`set_texture`](Self::set_texture).
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
        if content_type != ContentType::Named {
            self.frames.clear();
            self.frame_ptrs.clear();
            self.manual_texture = None;
            self.current_frame = 0;
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Bind a texture to `frame` directly. For named content this replaces
    /// the resolved reference of that frame; for shadow and compositor
    /// content only frame 0 exists.
    pub fn set_texture(&mut self, texture: &Arc<Texture>, frame: usize) -> Result<(), GraphicsError> {
        match self.content_type {
            ContentType::Named => {
                self.check_frame(frame, "set_texture")?;
                self.frame_ptrs[frame] = Some(Arc::downgrade(texture));
            }
            ContentType::Shadow | ContentType::Compositor => {
                if frame != 0 {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "set_texture: frame {frame} out of range for manually bound content"
                    )));
                }
                self.manual_texture = Some(Arc::downgrade(texture));
            }
        }
        Ok(())
    }

    /// The manually bound texture of shadow or compositor content.
    pub fn manual_texture(&self) -> Option<Arc<Texture>> {
        self.manual_texture.as_ref().and_then(Weak::upgrade)
    }

    /// Show exactly `texture`, pre-resolved, without going through the cache.
    pub fn bind_texture(&mut self, texture: &Arc<Texture>) {
        let texture_type = texture.texture_type();
        if texture_type == TextureType::CubeMap {
            self.assign_cubic(vec![texture.name().to_string()], true);
        } else {
            self.assign_single_frame(texture.name().to_string(), texture_type);
        }
        self.frame_ptrs[0] = Some(Arc::downgrade(texture));
        self.reload_if_loaded();
    }

    /// Texture of `frame`.
    ///
    /// Named content resolves through the bound cache on first use and keeps
    /// a weak reference afterwards. A failed load, an invalid frame, an empty
    /// name or a missing cache yield `None` without raising.
    pub fn resolve_texture(&mut self, frame: usize) -> Option<Arc<Texture>> {
        match self.content_type {
            ContentType::Named => {
                if frame < self.frames.len() && !self.texture_load_failed {
                    self.ensure_loaded(frame)
                } else {
                    None
                }
            }
            ContentType::Shadow | ContentType::Compositor => self.manual_texture(),
        }
    }

    /// Texture of the current frame.
    pub fn current_texture(&mut self) -> Option<Arc<Texture>> {
        self.resolve_texture(self.current_frame)
    }

    /// `(width, height)` of the texture of `frame`.
    pub fn texture_dimensions(&mut self, frame: usize) -> Result<(u32, u32), GraphicsError> {
        match self.resolve_texture(frame) {
            Some(texture) => Ok((texture.width(), texture.height())),
            None => {
                let name = self.frames.get(frame).map(String::as_str).unwrap_or("");
                Err(GraphicsError::ResourceNotFound(format!(
                    "could not find texture '{name}' for frame {frame}"
                )))
            }
        }
    }

    fn ensure_loaded(&mut self, frame: usize) -> Option<Arc<Texture>> {
        if let Some(texture) = self.frame_ptrs[frame].as_ref().and_then(Weak::upgrade) {
            return Some(texture);
        }
        if self.frames[frame].is_empty() {
            return None;
        }
        let Some(cache) = self.cache.clone() else {
            log::trace!(
                "Slot '{}': no texture cache bound, '{}' stays unresolved",
                self.name,
                self.frames[frame]
            );
            return None;
        };

        let request = self.request();
        match cache.resolve(&self.frames[frame], &request) {
            Ok(texture) => {
                self.frame_ptrs[frame] = Some(Arc::downgrade(&texture));
                Some(texture)
            }
            Err(e) => {
                log::warn!("Slot '{}': {e}", self.name);
                self.texture_load_failed = true;
                None
            }
        }
    }

    /// Load hints passed to the texture cache.
    pub fn request(&self) -> TextureRequest {
        TextureRequest {
            texture_type: self.texture_type,
            format: self.desired_format,
            mipmaps: self.num_mipmaps,
            hardware_gamma: self.hardware_gamma,
            is_alpha: self.is_alpha,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Make every named frame resident in `cache` without keeping references.
    pub fn prepare(&mut self, cache: Arc<dyn TextureCache>) {
        let request = self.request();
        if self.content_type == ContentType::Named && !self.texture_load_failed {
            for name in self.frames.iter().filter(|n| !n.is_empty()) {
                if let Err(e) = cache.prepare(name, &request) {
                    log::warn!("Slot '{}': {e}", self.name);
                    self.texture_load_failed = true;
                    break;
                }
            }
        }
        self.cache = Some(cache);
    }

    /// Bind `cache` and resolve every frame. Later name changes reload
    /// immediately until [`unload`](Self::unload).
    pub fn load(&mut self, cache: Arc<dyn TextureCache>) {
        self.cache = Some(cache);
        self.loaded = true;
        self.load_frames();
    }

    /// Drop resolved references but keep the names, so a later load resolves
    /// them again. Textures stay in the cache.
    pub fn unload(&mut self) {
        self.frame_ptrs.iter_mut().for_each(|ptr| *ptr = None);
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The cache this slot resolves through, if one is bound.
    pub fn texture_cache(&self) -> Option<&Arc<dyn TextureCache>> {
        self.cache.as_ref()
    }

    fn load_frames(&mut self) {
        if self.content_type != ContentType::Named {
            return;
        }
        for frame in 0..self.frames.len() {
            if self.texture_load_failed {
                break;
            }
            self.ensure_loaded(frame);
        }
    }

    fn reload_if_loaded(&mut self) {
        if self.loaded {
            self.load_frames();
        }
    }

    // ------------------------------------------------------------------
    // Load hints
    // ------------------------------------------------------------------

    pub fn set_desired_format(&mut self, format: TextureFormat) {
        self.desired_format = format;
    }

    pub fn desired_format(&self) -> TextureFormat {
        self.desired_format
    }

    pub fn set_num_mipmaps(&mut self, mipmaps: MipmapCount) {
        self.num_mipmaps = mipmaps;
    }

    pub fn num_mipmaps(&self) -> MipmapCount {
        self.num_mipmaps
    }

    /// Load single-channel images as alpha rather than luminance.
    pub fn set_is_alpha(&mut self, is_alpha: bool) {
        self.is_alpha = is_alpha;
    }

    pub fn is_alpha(&self) -> bool {
        self.is_alpha
    }

    pub fn set_hardware_gamma(&mut self, enabled: bool) {
        self.hardware_gamma = enabled;
    }

    pub fn hardware_gamma(&self) -> bool {
        self.hardware_gamma
    }

    /// Index of the vertex texture coordinate set this slot reads.
    pub fn set_texture_coord_set(&mut self, set: u32) {
        self.texture_coord_set = set;
    }

    pub fn texture_coord_set(&self) -> u32 {
        self.texture_coord_set
    }

    pub fn set_binding_type(&mut self, binding_type: BindingType) {
        self.binding_type = binding_type;
    }

    pub fn binding_type(&self) -> BindingType {
        self.binding_type
    }

    // ------------------------------------------------------------------
    // Addressing and filtering
    // ------------------------------------------------------------------

    /// Same address mode on every axis.
    pub fn set_texture_addressing_mode(&mut self, mode: AddressMode) {
        self.address_mode = UvwAddressMode::uniform(mode);
    }

    pub fn set_texture_addressing_modes(&mut self, u: AddressMode, v: AddressMode, w: AddressMode) {
        self.address_mode = UvwAddressMode { u, v, w };
    }

    pub fn set_uvw_addressing_mode(&mut self, mode: UvwAddressMode) {
        self.address_mode = mode;
    }

    pub fn texture_addressing_mode(&self) -> UvwAddressMode {
        self.address_mode
    }

    pub fn set_texture_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub fn texture_border_color(&self) -> Color {
        self.border_color
    }

    /// Apply a min/mag/mip preset.
    pub fn set_texture_filtering(&mut self, preset: FilterPreset) {
        let (min, mag, mip) = preset.filters();
        self.set_texture_filtering_modes(min, mag, mip);
    }

    /// Set the filter for one stage.
    pub fn set_texture_filtering_kind(&mut self, kind: FilterKind, mode: FilterMode) {
        match kind {
            FilterKind::Min => self.min_filter = mode,
            FilterKind::Mag => self.mag_filter = mode,
            FilterKind::Mip => self.mip_filter = mode,
        }
        self.is_default_filtering = false;
    }

    pub fn set_texture_filtering_modes(&mut self, min: FilterMode, mag: FilterMode, mip: FilterMode) {
        self.min_filter = min;
        self.mag_filter = mag;
        self.mip_filter = mip;
        self.is_default_filtering = false;
    }

    pub fn texture_filtering(&self, kind: FilterKind) -> FilterMode {
        match kind {
            FilterKind::Min => self.min_filter,
            FilterKind::Mag => self.mag_filter,
            FilterKind::Mip => self.mip_filter,
        }
    }

    /// Whether filtering was never set explicitly.
    pub fn is_default_filtering(&self) -> bool {
        self.is_default_filtering
    }

    pub fn set_texture_anisotropy(&mut self, max_anisotropy: u32) {
        self.max_anisotropy = max_anisotropy;
        self.is_default_anisotropy = false;
    }

    pub fn texture_anisotropy(&self) -> u32 {
        self.max_anisotropy
    }

    pub fn is_default_anisotropy(&self) -> bool {
        self.is_default_anisotropy
    }

    pub fn set_texture_mipmap_bias(&mut self, bias: f32) {
        self.mipmap_bias = bias;
    }

    pub fn texture_mipmap_bias(&self) -> f32 {
        self.mipmap_bias
    }

    /// Sampler state described by this slot.
    pub fn sampler(&self) -> CpuSampler {
        CpuSampler {
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            address_mode: self.address_mode,
            min_filter: self.min_filter,
            mag_filter: self.mag_filter,
            mip_filter: self.mip_filter,
            mip_bias: self.mipmap_bias,
            max_anisotropy: self.max_anisotropy.max(1),
            border_color: self.border_color,
        }
    }

    // ------------------------------------------------------------------
    // Blending
    // ------------------------------------------------------------------

    /// Simple colour blending with the matching multipass fallback.
    pub fn set_colour_operation(&mut self, operation: LayerBlendOperation) {
        let mapping = operation.mapping();
        self.set_colour_operation_ex(
            mapping.operation,
            mapping.source1,
            mapping.source2,
            Color::WHITE,
            Color::WHITE,
            0.0,
        );
        self.set_colour_op_multipass_fallback(mapping.fallback_src, mapping.fallback_dest);
    }

    /// Full control over colour blending. The multipass fallback is unchanged.
    pub fn set_colour_operation_ex(
        &mut self,
        operation: LayerBlendOperationEx,
        source1: LayerBlendSource,
        source2: LayerBlendSource,
        arg1: Color,
        arg2: Color,
        manual_blend: f32,
    ) {
        let mode = &mut self.colour_blend_mode;
        mode.operation = operation;
        mode.source1 = source1;
        mode.source2 = source2;
        mode.colour_arg1 = arg1;
        mode.colour_arg2 = arg2;
        mode.factor = manual_blend;
    }

    /// Frame-buffer blend used when the layer has to be drawn as its own pass.
    pub fn set_colour_op_multipass_fallback(&mut self, src: SceneBlendFactor, dest: SceneBlendFactor) {
        self.colour_blend_fallback_src = src;
        self.colour_blend_fallback_dest = dest;
    }

    pub fn set_alpha_operation(
        &mut self,
        operation: LayerBlendOperationEx,
        source1: LayerBlendSource,
        source2: LayerBlendSource,
        arg1: f32,
        arg2: f32,
        manual_blend: f32,
    ) {
        let mode = &mut self.alpha_blend_mode;
        mode.operation = operation;
        mode.source1 = source1;
        mode.source2 = source2;
        mode.alpha_arg1 = arg1;
        mode.alpha_arg2 = arg2;
        mode.factor = manual_blend;
    }

    pub fn colour_blend_mode(&self) -> &LayerBlendMode {
        &self.colour_blend_mode
    }

    pub fn alpha_blend_mode(&self) -> &LayerBlendMode {
        &self.alpha_blend_mode
    }

    pub fn colour_blend_fallback_src(&self) -> SceneBlendFactor {
        self.colour_blend_fallback_src
    }

    pub fn colour_blend_fallback_dest(&self) -> SceneBlendFactor {
        self.colour_blend_fallback_dest
    }

    // ------------------------------------------------------------------
    // Texture transform
    // ------------------------------------------------------------------

    pub fn set_texture_scroll(&mut self, u: f32, v: f32) {
        self.transform.set_scroll(u, v);
    }

    pub fn set_texture_u_scroll(&mut self, u: f32) {
        self.transform.set_u_scroll(u);
    }

    pub fn set_texture_v_scroll(&mut self, v: f32) {
        self.transform.set_v_scroll(v);
    }

    pub fn set_texture_scale(&mut self, u: f32, v: f32) {
        self.transform.set_scale(u, v);
    }

    pub fn set_texture_u_scale(&mut self, u: f32) {
        self.transform.set_u_scale(u);
    }

    pub fn set_texture_v_scale(&mut self, v: f32) {
        self.transform.set_v_scale(v);
    }

    /// Rotation in radians about the texture centre.
    pub fn set_texture_rotate(&mut self, angle: f32) {
        self.transform.set_rotate(angle);
    }

    /// Replace the computed transform with `matrix`.
    pub fn set_texture_transform(&mut self, matrix: Mat4) {
        self.transform.set_matrix(matrix);
    }

    /// Texture coordinate transform, recomputed if a component changed.
    pub fn texture_transform(&mut self) -> &Mat4 {
        self.transform.matrix()
    }

    /// Whether the next [`texture_transform`](Self::texture_transform) recomputes.
    pub fn texture_transform_dirty(&self) -> bool {
        self.transform.is_dirty()
    }

    pub fn texture_u_scroll(&self) -> f32 {
        self.transform.u_scroll()
    }

    pub fn texture_v_scroll(&self) -> f32 {
        self.transform.v_scroll()
    }

    pub fn texture_u_scale(&self) -> f32 {
        self.transform.u_scale()
    }

    pub fn texture_v_scale(&self) -> f32 {
        self.transform.v_scale()
    }

    pub fn texture_rotate(&self) -> f32 {
        self.transform.rotate()
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Add an effect, replacing any effect of the same kind.
    pub fn add_effect(&mut self, effect: TextureEffect) {
        self.effects.retain(|e| !e.same_kind(&effect));
        self.effects.push(effect);
    }

    pub fn remove_all_effects(&mut self) {
        self.effects.clear();
    }

    pub fn effects(&self) -> &[TextureEffect] {
        &self.effects
    }

    pub fn set_environment_map(&mut self, enabled: bool, env_map_type: EnvMapType) {
        self.effects
            .retain(|e| !matches!(e, TextureEffect::EnvironmentMap(_)));
        if enabled {
            self.effects.push(TextureEffect::EnvironmentMap(env_map_type));
        }
    }

    pub fn set_projective_texturing(&mut self, enabled: bool) {
        self.effects
            .retain(|e| !matches!(e, TextureEffect::ProjectiveTexture));
        if enabled {
            self.effects.push(TextureEffect::ProjectiveTexture);
        }
    }

    /// Whether texture coordinates depend on the view (reflection maps and
    /// projective texturing).
    pub fn has_view_relative_texture_coordinate_generation(&self) -> bool {
        self.effects.iter().any(|e| {
            matches!(
                e,
                TextureEffect::EnvironmentMap(EnvMapType::Reflection)
                    | TextureEffect::ProjectiveTexture
            )
        })
    }

    // ------------------------------------------------------------------
    // Naming and aliases
    // ------------------------------------------------------------------

    /// Name the slot. The name doubles as the alias if none is set.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.texture_name_alias.is_empty() {
            self.texture_name_alias = self.name.clone();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_texture_name_alias(&mut self, alias: impl Into<String>) {
        self.texture_name_alias = alias.into();
    }

    pub fn texture_name_alias(&self) -> &str {
        &self.texture_name_alias
    }

    /// Look the alias up in `aliases` and report whether it matched. With
    /// `apply`, re-derive the frame names from the replacement using the
    /// slot's current layout (cube faces, animation frames or a single
    /// texture).
    pub fn apply_texture_aliases(&mut self, aliases: &HashMap<String, String>, apply: bool) -> bool {
        if self.texture_name_alias.is_empty() {
            return false;
        }
        let Some(replacement) = aliases.get(&self.texture_name_alias) else {
            return false;
        };

        if apply {
            let replacement = replacement.clone();
            log::debug!(
                "Slot '{}': alias '{}' -> '{replacement}'",
                self.name,
                self.texture_name_alias
            );
            if self.cubic {
                let for_uvw = self.texture_type == TextureType::CubeMap;
                self.set_cubic_texture_name(&replacement, for_uvw);
            } else if self.frames.len() > 1 {
                let count = self.frames.len();
                let duration = self.animation_duration;
                self.set_animated_texture_name(&replacement, count, duration);
            } else {
                let texture_type = self.texture_type;
                self.set_texture_name(replacement, texture_type);
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Compositor reference
    // ------------------------------------------------------------------

    pub fn set_compositor_reference(
        &mut self,
        compositor: impl Into<String>,
        texture: impl Into<String>,
        mrt_index: usize,
    ) {
        self.compositor_name = compositor.into();
        self.compositor_texture_name = texture.into();
        self.compositor_mrt_index = mrt_index;
    }

    pub fn referenced_compositor_name(&self) -> &str {
        &self.compositor_name
    }

    pub fn referenced_texture_name(&self) -> &str {
        &self.compositor_texture_name
    }

    pub fn referenced_mrt_index(&self) -> usize {
        self.compositor_mrt_index
    }

    // ------------------------------------------------------------------
    // Copy
    // ------------------------------------------------------------------

    /// Copy every setting of `other` into this slot, keeping this slot's own
    /// cache binding and load state. Reloads if this slot is loaded.
    pub fn assign_from(&mut self, other: &TextureBindingSlot) {
        self.frames = other.frames.clone();
        self.frame_ptrs = other.frame_ptrs.clone();
        self.manual_texture = other.manual_texture.clone();
        self.content_type = other.content_type;
        self.current_frame = other.current_frame;
        self.animation_duration = other.animation_duration;
        self.cubic = other.cubic;
        self.texture_type = other.texture_type;
        self.texture_load_failed = other.texture_load_failed;

        self.desired_format = other.desired_format;
        self.num_mipmaps = other.num_mipmaps;
        self.is_alpha = other.is_alpha;
        self.hardware_gamma = other.hardware_gamma;
        self.texture_coord_set = other.texture_coord_set;
        self.binding_type = other.binding_type;

        self.address_mode = other.address_mode;
        self.border_color = other.border_color;
        self.min_filter = other.min_filter;
        self.mag_filter = other.mag_filter;
        self.mip_filter = other.mip_filter;
        self.max_anisotropy = other.max_anisotropy;
        self.mipmap_bias = other.mipmap_bias;
        self.is_default_filtering = other.is_default_filtering;
        self.is_default_anisotropy = other.is_default_anisotropy;

        self.colour_blend_mode = other.colour_blend_mode;
        self.alpha_blend_mode = other.alpha_blend_mode;
        self.colour_blend_fallback_src = other.colour_blend_fallback_src;
        self.colour_blend_fallback_dest = other.colour_blend_fallback_dest;

        self.transform = other.transform.clone();
        self.effects = other.effects.clone();

        self.name = other.name.clone();
        self.texture_name_alias = other.texture_name_alias.clone();
        self.compositor_name = other.compositor_name.clone();
        self.compositor_texture_name = other.compositor_texture_name.clone();
        self.compositor_mrt_index = other.compositor_mrt_index;

        self.reload_if_loaded();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn assign_single_frame(&mut self, name: String, texture_type: TextureType) {
        self.set_content_type(ContentType::Named);
        self.texture_load_failed = false;
        self.frames = vec![name];
        self.frame_ptrs = vec![None];
        self.animation_duration = 0.0;
        self.current_frame = 0;
        self.cubic = false;
        self.texture_type = texture_type;
    }

    fn assign_cubic(&mut self, names: Vec<String>, for_uvw: bool) {
        self.set_content_type(ContentType::Named);
        self.texture_load_failed = false;
        self.frame_ptrs = vec![None; names.len()];
        self.frames = names;
        self.animation_duration = 0.0;
        self.current_frame = 0;
        self.cubic = true;
        self.texture_type = if for_uvw {
            TextureType::CubeMap
        } else {
            TextureType::Type2D
        };
    }

    fn check_frame(&self, frame: usize, operation: &str) -> Result<(), GraphicsError> {
        if frame < self.frames.len() {
            Ok(())
        } else {
            Err(GraphicsError::InvalidParameter(format!(
                "{operation}: frame {frame} exceeds number of stored frames ({})",
                self.frames.len()
            )))
        }
    }
}

impl Default for TextureBindingSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextureBindingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureBindingSlot")
            .field("name", &self.name)
            .field("frames", &self.frames)
            .field("content_type", &self.content_type)
            .field("current_frame", &self.current_frame)
            .field("texture_type", &self.texture_type)
            .field("texture_load_failed", &self.texture_load_failed)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// Split `name` at its last `.` into `(base, ".ext")`.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => name.split_at(pos),
        None => (name, ""),
    }
}

static_assertions::assert_impl_all!(TextureBindingSlot: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TextureManager;

    fn texture(name: &str, width: u32, height: u32) -> Texture {
        Texture::new(
            name,
            TextureType::Type2D,
            TextureFormat::Rgba8Unorm,
            width,
            height,
        )
    }

    fn cache_with(names: &[&str]) -> Arc<TextureManager> {
        let manager = TextureManager::new();
        for name in names {
            manager.insert(texture(name, 64, 32));
        }
        Arc::new(manager)
    }

    #[test]
    fn frame_names_round_trip() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("foo.tga", 3, 1.0);
        for i in 0..3 {
            slot.set_frame_texture_name(format!("n{i}.png"), i).unwrap();
            assert_eq!(slot.frame_texture_name(i).unwrap(), format!("n{i}.png"));
        }
    }

    #[test]
    fn out_of_range_frames_are_invalid() {
        let mut slot = TextureBindingSlot::with_texture("a.png", 0);
        for i in [1, 2, 100] {
            assert!(matches!(
                slot.set_frame_texture_name("x", i),
                Err(GraphicsError::InvalidParameter(_))
            ));
            assert!(matches!(
                slot.frame_texture_name(i),
                Err(GraphicsError::InvalidParameter(_))
            ));
            assert!(matches!(
                slot.delete_frame_texture_name(i),
                Err(GraphicsError::InvalidParameter(_))
            ));
            assert!(matches!(
                slot.set_current_frame(i),
                Err(GraphicsError::InvalidParameter(_))
            ));
        }
        assert_eq!(slot.frame_names(), ["a.png"]);
    }

    #[test]
    fn cubic_face_names() {
        let mut slot = TextureBindingSlot::new();
        slot.set_cubic_texture_name("foo.tga", false);
        assert_eq!(
            slot.frame_names(),
            [
                "foo_fr.tga",
                "foo_bk.tga",
                "foo_lf.tga",
                "foo_rt.tga",
                "foo_up.tga",
                "foo_dn.tga"
            ]
        );
        assert!(slot.is_cubic());
        assert!(!slot.is_3d());
        assert_eq!(slot.texture_type(), TextureType::Type2D);
    }

    #[test]
    fn cubic_uvw_is_one_cube_texture() {
        let mut slot = TextureBindingSlot::new();
        slot.set_texture_name("sky.dds", TextureType::CubeMap);
        assert_eq!(slot.frame_names(), ["sky.dds"]);
        assert!(slot.is_cubic());
        assert!(slot.is_3d());
    }

    #[test]
    fn cubic_names_without_extension() {
        let mut slot = TextureBindingSlot::new();
        slot.set_cubic_texture_name("env", false);
        assert_eq!(slot.frame_names()[0], "env_fr");
        assert_eq!(slot.frame_names()[5], "env_dn");
    }

    #[test]
    fn explicit_cubic_names_need_six() {
        let mut slot = TextureBindingSlot::new();
        assert!(slot.set_cubic_texture_names(&["a", "b"], false).is_err());
        slot.set_cubic_texture_names(&["a", "b", "c", "d", "e", "f"], false)
            .unwrap();
        assert_eq!(slot.num_frames(), 6);
    }

    #[test]
    fn animated_names() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("foo.tga", 4, 1.0);
        assert_eq!(
            slot.frame_names(),
            ["foo_0.tga", "foo_1.tga", "foo_2.tga", "foo_3.tga"]
        );
        assert_eq!(slot.animation_duration(), 1.0);
        assert!(!slot.is_cubic());
    }

    #[test]
    fn single_name_clears_animation_and_cube_state() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("f.png", 4, 2.0);
        slot.set_texture_name("a.png", TextureType::Type2D);
        assert_eq!(slot.animation_duration(), 0.0);
        assert!(!slot.is_cubic());

        slot.add_frame_texture_name("b.png");
        slot.advance_animation(1.5);
        assert_eq!(slot.current_frame(), 0);

        slot.set_cubic_texture_name("sky.png", false);
        assert!(slot.is_cubic());
        slot.set_texture_name("a.png", TextureType::Type2D);
        assert!(!slot.is_cubic());
        assert_eq!(slot.animation_duration(), 0.0);
        assert_eq!(slot.num_frames(), 1);
    }

    #[test]
    fn one_frame_animation_aliases_to_single_texture() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("fire.png", 1, 2.0);
        slot.set_texture_name_alias("fire");
        let aliases = HashMap::from([("fire".to_string(), "smoke.png".to_string())]);
        assert!(slot.apply_texture_aliases(&aliases, true));
        assert_eq!(slot.frame_names(), ["smoke.png"]);
        assert_eq!(slot.animation_duration(), 0.0);
    }

    #[test]
    fn bind_texture_clears_animation() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("f.png", 3, 1.0);
        let texture = Arc::new(texture("bound.png", 4, 4));
        slot.bind_texture(&texture);
        assert_eq!(slot.animation_duration(), 0.0);
        assert_eq!(slot.frame_names(), ["bound.png"]);
    }

    #[test]
    fn blank_states() {
        let mut slot = TextureBindingSlot::new();
        assert!(slot.is_blank());

        slot.set_texture_name("", TextureType::Type2D);
        assert!(slot.is_blank());

        slot.set_texture_name("missing.png", TextureType::Type2D);
        assert!(!slot.is_blank());

        slot.load(Arc::new(TextureManager::new()));
        assert!(slot.texture_load_failed());
        assert!(slot.is_blank());

        slot.unload();
        assert!(slot.is_blank());
        slot.set_texture_name("other.png", TextureType::Type2D);
        assert!(!slot.is_blank());

        slot.set_blank();
        assert!(slot.is_blank());
    }

    #[test]
    fn load_failure_is_sticky_until_renamed() {
        let cache = cache_with(&["good.png"]);
        let mut slot = TextureBindingSlot::with_texture("bad.png", 0);
        slot.load(cache.clone());
        assert!(slot.texture_load_failed());

        cache.insert(texture("bad.png", 8, 8));
        assert!(slot.current_texture().is_none());

        slot.set_frame_texture_name("good.png", 0).unwrap();
        assert!(!slot.texture_load_failed());
        assert_eq!(slot.current_texture().unwrap().name(), "good.png");
    }

    #[test]
    fn resolution_is_lazy_and_weak() {
        let cache = cache_with(&["a.png"]);
        let mut slot = TextureBindingSlot::with_texture("a.png", 0);
        slot.prepare(cache.clone());
        assert!(!slot.is_loaded());

        let tex = slot.resolve_texture(0).unwrap();
        assert_eq!(tex.name(), "a.png");
        assert!(slot.resolve_texture(1).is_none());

        drop(tex);
        cache.remove("a.png");
        // The slot held only a weak reference, so the texture is gone.
        assert!(slot.resolve_texture(0).is_none());
        assert!(slot.texture_load_failed());
    }

    #[test]
    fn mutations_reload_when_loaded() {
        let cache = cache_with(&["a.png", "b.png"]);
        let mut slot = TextureBindingSlot::with_texture("a.png", 0);
        slot.load(cache);
        assert!(slot.is_loaded());

        slot.add_frame_texture_name("b.png");
        assert_eq!(slot.texture_dimensions(1).unwrap(), (64, 32));

        slot.unload();
        assert!(!slot.is_loaded());
        assert_eq!(slot.frame_names(), ["a.png", "b.png"]);
    }

    #[test]
    fn dimensions_of_unresolved_frame_not_found() {
        let mut slot = TextureBindingSlot::with_texture("a.png", 0);
        assert!(matches!(
            slot.texture_dimensions(0),
            Err(GraphicsError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn delete_keeps_current_frame_in_range() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("f.png", 3, 3.0);
        slot.set_current_frame(2).unwrap();
        slot.delete_frame_texture_name(2).unwrap();
        assert_eq!(slot.current_frame(), 1);
        assert_eq!(slot.texture_name(), "f_1.png");
    }

    #[test]
    fn animation_advances_frames() {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("f.png", 4, 2.0);
        slot.advance_animation(0.0);
        assert_eq!(slot.current_frame(), 0);
        slot.advance_animation(1.1);
        assert_eq!(slot.current_frame(), 2);
        slot.advance_animation(3.9);
        assert_eq!(slot.current_frame(), 3);
        slot.advance_animation(4.6);
        assert_eq!(slot.current_frame(), 1);
    }

    #[test]
    fn scroll_effect_drives_transform() {
        let mut slot = TextureBindingSlot::new();
        slot.add_effect(TextureEffect::UvScroll {
            u_speed: 0.25,
            v_speed: 0.0,
        });
        slot.add_effect(TextureEffect::UvScroll {
            u_speed: 0.5,
            v_speed: 0.0,
        });
        assert_eq!(slot.effects().len(), 1);

        slot.advance_animation(1.0);
        assert_eq!(slot.texture_u_scroll(), 0.5);
        assert!(slot.texture_transform_dirty());
        assert_eq!(slot.texture_transform()[(0, 3)], 0.5);
    }

    #[test]
    fn content_type_switch_clears_frames() {
        let mut slot = TextureBindingSlot::with_texture("a.png", 0);
        slot.set_content_type(ContentType::Shadow);
        assert_eq!(slot.num_frames(), 0);
        assert!(slot.manual_texture().is_none());

        let shadow = Arc::new(Texture::render_target(
            "shadow0",
            512,
            512,
            TextureFormat::Depth32Float,
        ));
        assert!(slot.set_texture(&shadow, 1).is_err());
        slot.set_texture(&shadow, 0).unwrap();
        assert_eq!(slot.current_texture().unwrap().name(), "shadow0");
        assert_eq!(slot.texture_dimensions(0).unwrap(), (512, 512));
    }

    #[test]
    fn bind_texture_pre_resolves() {
        let mut slot = TextureBindingSlot::new();
        slot.load(Arc::new(TextureManager::new()));
        let tex = Arc::new(texture("generated", 4, 4));
        slot.bind_texture(&tex);
        assert!(!slot.texture_load_failed());
        assert!(Arc::ptr_eq(&slot.current_texture().unwrap(), &tex));
        assert_eq!(slot.texture_name(), "generated");
    }

    #[test]
    fn colour_operation_is_table_driven() {
        let mut slot = TextureBindingSlot::new();
        slot.set_colour_operation(LayerBlendOperation::Add);
        slot.set_colour_operation(LayerBlendOperation::Modulate);
        let mode = slot.colour_blend_mode();
        assert_eq!(mode.operation, LayerBlendOperationEx::Modulate);
        assert_eq!(
            (mode.source1, mode.source2),
            (LayerBlendSource::Texture, LayerBlendSource::Current)
        );
        assert_eq!(
            (
                slot.colour_blend_fallback_src(),
                slot.colour_blend_fallback_dest()
            ),
            (SceneBlendFactor::DestColour, SceneBlendFactor::Zero)
        );
    }

    #[test]
    fn default_alpha_operation_modulates() {
        let slot = TextureBindingSlot::new();
        let alpha = slot.alpha_blend_mode();
        assert_eq!(alpha.blend_type, LayerBlendType::Alpha);
        assert_eq!(alpha.operation, LayerBlendOperationEx::Modulate);
        assert_eq!(alpha.source1, LayerBlendSource::Texture);
        assert_eq!(alpha.source2, LayerBlendSource::Current);
    }

    #[test]
    fn aliases_report_without_applying() {
        let mut slot = TextureBindingSlot::new();
        slot.set_name("diffuse");
        slot.set_animated_texture_name("old.png", 2, 1.0);
        let aliases = HashMap::from([("diffuse".to_string(), "new.png".to_string())]);

        for _ in 0..3 {
            assert!(slot.apply_texture_aliases(&aliases, false));
            assert_eq!(slot.frame_names(), ["old_0.png", "old_1.png"]);
        }

        assert!(slot.apply_texture_aliases(&aliases, true));
        assert_eq!(slot.frame_names(), ["new_0.png", "new_1.png"]);
        assert_eq!(slot.animation_duration(), 1.0);
    }

    #[test]
    fn aliases_keep_cubic_layout() {
        let mut slot = TextureBindingSlot::new();
        slot.set_texture_name_alias("env");
        slot.set_cubic_texture_name("old.jpg", false);
        let aliases = HashMap::from([("env".to_string(), "new.jpg".to_string())]);
        assert!(slot.apply_texture_aliases(&aliases, true));
        assert_eq!(slot.frame_names()[3], "new_rt.jpg");

        let unrelated = HashMap::from([("other".to_string(), "x.jpg".to_string())]);
        assert!(!slot.apply_texture_aliases(&unrelated, true));
    }

    #[test]
    fn filtering_presets_and_flags() {
        let mut slot = TextureBindingSlot::new();
        assert!(slot.is_default_filtering());
        assert_eq!(slot.texture_filtering(FilterKind::Mip), FilterMode::Point);

        slot.set_texture_filtering(FilterPreset::Anisotropic);
        assert!(!slot.is_default_filtering());
        assert_eq!(slot.texture_filtering(FilterKind::Min), FilterMode::Anisotropic);

        slot.set_texture_anisotropy(8);
        assert!(!slot.is_default_anisotropy());

        slot.set_texture_addressing_mode(AddressMode::Clamp);
        let sampler = slot.sampler();
        assert_eq!(sampler.max_anisotropy, 8);
        assert_eq!(sampler.mip_filter, FilterMode::Linear);
        assert_eq!(sampler.address_mode.v, AddressMode::Clamp);
    }

    #[test]
    fn view_relative_generation() {
        let mut slot = TextureBindingSlot::new();
        slot.set_environment_map(true, EnvMapType::Planar);
        assert!(!slot.has_view_relative_texture_coordinate_generation());
        slot.set_environment_map(true, EnvMapType::Reflection);
        assert!(slot.has_view_relative_texture_coordinate_generation());
        assert_eq!(slot.effects().len(), 1);

        slot.set_environment_map(false, EnvMapType::Reflection);
        slot.set_projective_texturing(true);
        assert!(slot.has_view_relative_texture_coordinate_generation());
        slot.remove_all_effects();
        assert!(!slot.has_view_relative_texture_coordinate_generation());
    }

    #[test]
    fn assign_copies_settings() {
        let mut source = TextureBindingSlot::new();
        source.set_name("detail");
        source.set_animated_texture_name("d.png", 2, 0.5);
        source.set_texture_scale(2.0, 2.0);
        source.set_colour_operation(LayerBlendOperation::Add);
        source.set_compositor_reference("bloom", "rt0", 1);
        source.set_projective_texturing(true);

        let cache = cache_with(&["d_0.png", "d_1.png"]);
        let mut target = TextureBindingSlot::new();
        target.load(cache);
        target.assign_from(&source);

        assert_eq!(target.name(), "detail");
        assert_eq!(target.frame_names(), source.frame_names());
        assert_eq!(target.texture_u_scale(), 2.0);
        assert_eq!(
            target.colour_blend_mode().operation,
            LayerBlendOperationEx::Add
        );
        assert_eq!(target.referenced_mrt_index(), 1);
        assert_eq!(target.effects(), source.effects());
        assert!(target.is_loaded());
        assert!(target.resolve_texture(1).is_some());
        assert!(!source.is_loaded());
    }
}
