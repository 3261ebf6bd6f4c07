//! A single rendering pass: texture slots, programs and frame-buffer blending.

use std::collections::HashMap;
use std::sync::Arc;

use camelot_core::material::SceneBlendFactor;
use camelot_core::math::{Mat4, Vec4};

use crate::error::GraphicsError;
use crate::resources::TextureCache;
use crate::shader::GpuProgram;

use super::texture_slot::TextureBindingSlot;

/// Value of a named program constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgramConstant {
    Float(f32),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// One draw submission's fixed state.
///
/// Texture slots are kept in binding order. A pass without programs is a
/// valid fixed-function pass.
#[derive(Clone, Default)]
pub struct Pass {
    name: String,
    texture_slots: Vec<TextureBindingSlot>,
    vertex_program: Option<Arc<GpuProgram>>,
    fragment_program: Option<Arc<GpuProgram>>,
    scene_blend: Option<(SceneBlendFactor, SceneBlendFactor)>,
    constants: HashMap<String, ProgramConstant>,
    cache: Option<Arc<dyn TextureCache>>,
    loaded: bool,
}

impl Pass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------
    // Texture slots
    // ------------------------------------------------------------------

    /// Append a slot and return it. The slot is loaded if the pass is.
    pub fn add_texture_slot(&mut self, mut slot: TextureBindingSlot) -> &mut TextureBindingSlot {
        if self.loaded
            && let Some(cache) = &self.cache
        {
            slot.load(Arc::clone(cache));
        }
        self.texture_slots.push(slot);
        let index = self.texture_slots.len() - 1;
        &mut self.texture_slots[index]
    }

    /// Append a default slot named `name`.
    pub fn create_texture_slot(&mut self, name: impl Into<String>) -> &mut TextureBindingSlot {
        let mut slot = TextureBindingSlot::new();
        slot.set_name(name);
        self.add_texture_slot(slot)
    }

    pub fn texture_slot(&self, index: usize) -> Option<&TextureBindingSlot> {
        self.texture_slots.get(index)
    }

    pub fn texture_slot_mut(&mut self, index: usize) -> Option<&mut TextureBindingSlot> {
        self.texture_slots.get_mut(index)
    }

    /// First slot whose name is `name`.
    pub fn texture_slot_by_name(&mut self, name: &str) -> Option<&mut TextureBindingSlot> {
        self.texture_slots.iter_mut().find(|s| s.name() == name)
    }

    pub fn texture_slots(&self) -> &[TextureBindingSlot] {
        &self.texture_slots
    }

    pub fn texture_slots_mut(&mut self) -> &mut [TextureBindingSlot] {
        &mut self.texture_slots
    }

    pub fn remove_texture_slot(&mut self, index: usize) -> Result<TextureBindingSlot, GraphicsError> {
        if index >= self.texture_slots.len() {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture slot {index} out of range ({} slots)",
                self.texture_slots.len()
            )));
        }
        Ok(self.texture_slots.remove(index))
    }

    pub fn remove_all_texture_slots(&mut self) {
        self.texture_slots.clear();
    }

    pub fn num_texture_slots(&self) -> usize {
        self.texture_slots.len()
    }

    // ------------------------------------------------------------------
    // Programs
    // ------------------------------------------------------------------

    /// Set or clear the vertex program.
    pub fn set_vertex_program(&mut self, program: Option<Arc<GpuProgram>>) {
        self.vertex_program = program;
    }

    /// Set or clear the fragment program.
    pub fn set_fragment_program(&mut self, program: Option<Arc<GpuProgram>>) {
        self.fragment_program = program;
    }

    pub fn vertex_program(&self) -> Option<&Arc<GpuProgram>> {
        self.vertex_program.as_ref()
    }

    pub fn fragment_program(&self) -> Option<&Arc<GpuProgram>> {
        self.fragment_program.as_ref()
    }

    pub fn has_vertex_program(&self) -> bool {
        self.vertex_program.is_some()
    }

    pub fn has_fragment_program(&self) -> bool {
        self.fragment_program.is_some()
    }

    /// Whether either program declares a global called `name`.
    pub fn declares_global(&self, name: &str) -> bool {
        [&self.vertex_program, &self.fragment_program]
            .into_iter()
            .flatten()
            .any(|p| p.declares_global(name))
    }

    pub fn set_constant(&mut self, name: impl Into<String>, value: ProgramConstant) {
        self.constants.insert(name.into(), value);
    }

    pub fn constant(&self, name: &str) -> Option<ProgramConstant> {
        self.constants.get(name).copied()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&str, &ProgramConstant)> {
        self.constants.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ------------------------------------------------------------------
    // Blending
    // ------------------------------------------------------------------

    /// Frame-buffer blend factors applied to this pass's output.
    pub fn set_scene_blending(&mut self, src: SceneBlendFactor, dest: SceneBlendFactor) {
        self.scene_blend = Some((src, dest));
    }

    /// `(source, destination)` factors, `(One, Zero)` unless set.
    pub fn scene_blending(&self) -> (SceneBlendFactor, SceneBlendFactor) {
        self.scene_blend
            .unwrap_or((SceneBlendFactor::One, SceneBlendFactor::Zero))
    }

    /// Whether the pass overwrites the frame buffer.
    pub fn is_opaque(&self) -> bool {
        self.scene_blending() == (SceneBlendFactor::One, SceneBlendFactor::Zero)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn load(&mut self, cache: Arc<dyn TextureCache>) {
        for slot in &mut self.texture_slots {
            slot.load(Arc::clone(&cache));
        }
        self.cache = Some(cache);
        self.loaded = true;
    }

    pub fn unload(&mut self) {
        for slot in &mut self.texture_slots {
            slot.unload();
        }
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Advance every slot's animation to `time` seconds.
    pub fn advance_animation(&mut self, time: f32) {
        for slot in &mut self.texture_slots {
            slot.advance_animation(time);
        }
    }

    /// Offer the aliases to every slot; true if any slot matched.
    pub fn apply_texture_aliases(&mut self, aliases: &HashMap<String, String>, apply: bool) -> bool {
        self.texture_slots
            .iter_mut()
            .fold(false, |matched, slot| slot.apply_texture_aliases(aliases, apply) || matched)
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass")
            .field("name", &self.name)
            .field("texture_slots", &self.texture_slots)
            .field("vertex_program", &self.vertex_program.as_ref().map(|p| p.label()))
            .field("fragment_program", &self.fragment_program.as_ref().map(|p| p.label()))
            .field("loaded", &self.loaded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Texture, TextureManager};
    use crate::shader::{GlobalKind, ProgramDescriptor, ProgramGlobal, ProgramStage};
    use camelot_core::texture::{TextureFormat, TextureType};

    fn program(stage: ProgramStage, globals: &[&str]) -> Arc<GpuProgram> {
        let globals = globals
            .iter()
            .map(|name| ProgramGlobal {
                name: name.to_string(),
                kind: GlobalKind::Uniform,
                binding: None,
            })
            .collect();
        Arc::new(GpuProgram::new(
            ProgramDescriptor::new("p", "", "main", stage),
            globals,
        ))
    }

    #[test]
    fn slots_keep_order() {
        let mut pass = Pass::new();
        pass.create_texture_slot("base");
        pass.create_texture_slot("detail");
        assert_eq!(pass.num_texture_slots(), 2);
        assert_eq!(pass.texture_slot(1).unwrap().name(), "detail");
        assert!(pass.texture_slot_by_name("base").is_some());

        let removed = pass.remove_texture_slot(0).unwrap();
        assert_eq!(removed.name(), "base");
        assert!(matches!(
            pass.remove_texture_slot(5),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn programs_are_optional() {
        let mut pass = Pass::new();
        assert!(!pass.has_vertex_program());
        pass.set_vertex_program(Some(program(ProgramStage::Vertex, &["view_proj"])));
        pass.set_fragment_program(Some(program(ProgramStage::Fragment, &["tint"])));
        assert!(pass.declares_global("view_proj"));
        assert!(pass.declares_global("tint"));
        assert!(!pass.declares_global("other"));

        pass.set_fragment_program(None);
        assert!(!pass.has_fragment_program());
    }

    #[test]
    fn default_blending_is_opaque() {
        let mut pass = Pass::new();
        assert!(pass.is_opaque());
        pass.set_scene_blending(SceneBlendFactor::SourceAlpha, SceneBlendFactor::OneMinusSourceAlpha);
        assert!(!pass.is_opaque());
    }

    #[test]
    fn slots_added_to_loaded_pass_are_loaded() {
        let cache = Arc::new(TextureManager::new());
        cache.insert(Texture::new(
            "a.png",
            TextureType::Type2D,
            TextureFormat::Rgba8Unorm,
            2,
            2,
        ));
        let mut pass = Pass::new();
        pass.load(cache);
        let slot = pass.add_texture_slot(TextureBindingSlot::with_texture("a.png", 0));
        assert!(slot.is_loaded());
        assert!(slot.current_texture().is_some());

        pass.unload();
        assert!(!pass.texture_slot(0).unwrap().is_loaded());
    }

    #[test]
    fn aliases_visit_every_slot() {
        let mut pass = Pass::new();
        pass.create_texture_slot("a").set_texture_name("a.png", TextureType::Type2D);
        pass.create_texture_slot("b").set_texture_name("b.png", TextureType::Type2D);
        let aliases = HashMap::from([
            ("a".to_string(), "x.png".to_string()),
            ("b".to_string(), "y.png".to_string()),
        ]);
        assert!(pass.apply_texture_aliases(&aliases, true));
        assert_eq!(pass.texture_slot(0).unwrap().texture_name(), "x.png");
        assert_eq!(pass.texture_slot(1).unwrap().texture_name(), "y.png");
    }
}
