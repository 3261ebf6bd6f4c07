//! Top-level material resource with named parameters.

use std::collections::HashMap;
use std::sync::Arc;

use camelot_core::math::{Mat4, Vec4};

use crate::render_system::{RenderSystem, RenderSystemKey};
use crate::resources::{Texture, TextureCache};

use super::pass::ProgramConstant;
use super::shader::Shader;
use super::technique::Technique;

/// Value bound to a material parameter name.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialParameter {
    Texture(Arc<Texture>),
    Float(f32),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl MaterialParameter {
    /// The program constant this parameter sets, if it is not a texture.
    pub fn as_constant(&self) -> Option<ProgramConstant> {
        match self {
            Self::Texture(_) => None,
            Self::Float(v) => Some(ProgramConstant::Float(*v)),
            Self::Vec4(v) => Some(ProgramConstant::Vec4(*v)),
            Self::Mat4(m) => Some(ProgramConstant::Mat4(*m)),
        }
    }
}

/// A shader plus the values of its named parameters.
///
/// Parameters are stored until [`Material::apply_parameters`] pushes them
/// down: textures into every texture slot named like the parameter, and
/// constants into every pass whose programs declare a global of that name.
/// [`Material::load`] applies parameters before loading.
///
/// # Example
///
/// ```ignore
/// let mut material = Material::new("crate");
/// material.set_shader(shader);
/// material.set_texture("tex", texture);
/// material.load(cache);
/// if let Some(technique) = material.active_technique(&render_system) {
///     for pass in technique.passes() { /* draw */ }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Material {
    name: String,
    shader: Option<Shader>,
    parameters: HashMap<String, MaterialParameter>,
    loaded: bool,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the shader and mark the material unloaded. Stored parameters
    /// are applied on the next [`apply_parameters`](Self::apply_parameters)
    /// or load.
    pub fn set_shader(&mut self, shader: Shader) {
        self.shader = Some(shader);
        self.loaded = false;
    }

    pub fn shader(&self) -> Option<&Shader> {
        self.shader.as_ref()
    }

    pub fn shader_mut(&mut self) -> Option<&mut Shader> {
        self.shader.as_mut()
    }

    pub fn set_texture(&mut self, name: impl Into<String>, texture: Arc<Texture>) {
        self.set_parameter(name, MaterialParameter::Texture(texture));
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.set_parameter(name, MaterialParameter::Float(value));
    }

    pub fn set_vec4(&mut self, name: impl Into<String>, value: Vec4) {
        self.set_parameter(name, MaterialParameter::Vec4(value));
    }

    pub fn set_mat4(&mut self, name: impl Into<String>, value: Mat4) {
        self.set_parameter(name, MaterialParameter::Mat4(value));
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: MaterialParameter) {
        let name = name.into();
        log::trace!("Material '{}': parameter '{name}' set", self.name);
        self.parameters.insert(name, value);
    }

    pub fn parameter(&self, name: &str) -> Option<&MaterialParameter> {
        self.parameters.get(name)
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, &MaterialParameter)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<MaterialParameter> {
        self.parameters.remove(name)
    }

    /// Push every parameter into the matching slots and passes of every
    /// technique. Returns how many bindings were made.
    pub fn apply_parameters(&mut self) -> usize {
        let Some(shader) = &mut self.shader else {
            return 0;
        };

        let mut applied = 0;
        for technique in shader.techniques_mut() {
            for pass in technique.passes_mut() {
                for (name, value) in &self.parameters {
                    match value {
                        MaterialParameter::Texture(texture) => {
                            for slot in pass.texture_slots_mut().iter_mut() {
                                if slot.name() == name {
                                    slot.bind_texture(texture);
                                    applied += 1;
                                }
                            }
                        }
                        constant => {
                            if pass.declares_global(name)
                                && let Some(constant) = constant.as_constant()
                            {
                                pass.set_constant(name.clone(), constant);
                                applied += 1;
                            }
                        }
                    }
                }
            }
        }
        log::debug!("Material '{}': applied {applied} parameter bindings", self.name);
        applied
    }

    /// First technique targeting `key`.
    pub fn best_technique(&self, key: &RenderSystemKey) -> Option<&Technique> {
        self.shader.as_ref()?.best_technique(key)
    }

    pub fn best_technique_mut(&mut self, key: &RenderSystemKey) -> Option<&mut Technique> {
        self.shader.as_mut()?.best_technique_mut(key)
    }

    /// Technique for the active render system, or `None` when the material
    /// has nothing for it. Callers then draw nothing or fall back.
    pub fn active_technique(&self, render_system: &RenderSystem) -> Option<&Technique> {
        let key = render_system.key();
        let technique = self.best_technique(key);
        if technique.is_none() {
            log::debug!(
                "Material '{}' has no technique for {}/{}",
                self.name,
                key.render_system(),
                key.renderer()
            );
        }
        technique
    }

    /// Apply parameters and load every technique through `cache`.
    pub fn load(&mut self, cache: Arc<dyn TextureCache>) {
        self.apply_parameters();
        if let Some(shader) = &mut self.shader {
            for technique in shader.techniques_mut() {
                technique.load(Arc::clone(&cache));
            }
        }
        self.loaded = true;
    }

    pub fn unload(&mut self) {
        if let Some(shader) = &mut self.shader {
            for technique in shader.techniques_mut() {
                technique.unload();
            }
        }
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Offer the aliases to every slot of every technique.
    pub fn apply_texture_aliases(&mut self, aliases: &HashMap<String, String>, apply: bool) -> bool {
        let Some(shader) = &mut self.shader else {
            return false;
        };
        shader
            .techniques_mut()
            .iter_mut()
            .fold(false, |matched, t| t.apply_texture_aliases(aliases, apply) || matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::TextureBindingSlot;
    use crate::shader::{GlobalKind, GpuProgram, ProgramDescriptor, ProgramGlobal, ProgramStage};
    use camelot_core::texture::{TextureFormat, TextureType};

    fn fragment_program(globals: &[&str]) -> Arc<GpuProgram> {
        let globals = globals
            .iter()
            .map(|name| ProgramGlobal {
                name: name.to_string(),
                kind: GlobalKind::Uniform,
                binding: Some((0, 0)),
            })
            .collect();
        Arc::new(GpuProgram::new(
            ProgramDescriptor::new("fs", "", "fs_main", ProgramStage::Fragment),
            globals,
        ))
    }

    fn two_backend_shader() -> Shader {
        let mut shader = Shader::new("textured");
        for rs in ["GLRenderSystem", "D3D9RenderSystem"] {
            let pass = shader.add_technique(rs, "ForwardRenderer").add_pass();
            pass.add_texture_slot(TextureBindingSlot::new()).set_name("tex");
            pass.set_fragment_program(Some(fragment_program(&["tint"])));
        }
        shader
    }

    #[test]
    fn textures_propagate_to_named_slots() {
        let mut material = Material::new("crate");
        material.set_shader(two_backend_shader());
        let texture = Arc::new(Texture::new(
            "crate.png",
            TextureType::Type2D,
            TextureFormat::Rgba8Unorm,
            16,
            16,
        ));
        material.set_texture("tex", Arc::clone(&texture));
        material.set_texture("unused", Arc::clone(&texture));

        assert_eq!(material.apply_parameters(), 2);
        let shader = material.shader_mut().unwrap();
        for technique in shader.techniques_mut() {
            let slot = technique.pass_mut(0).unwrap().texture_slot_mut(0).unwrap();
            assert_eq!(slot.texture_name(), "crate.png");
            assert!(Arc::ptr_eq(&slot.current_texture().unwrap(), &texture));
        }
    }

    #[test]
    fn constants_propagate_to_declaring_passes() {
        let mut material = Material::new("crate");
        material.set_shader(two_backend_shader());
        material.set_vec4("tint", Vec4::new(1.0, 0.5, 0.5, 1.0));
        material.set_float("undeclared", 2.0);

        assert_eq!(material.apply_parameters(), 2);
        let key = RenderSystemKey::new("GLRenderSystem", "ForwardRenderer");
        let pass = material.best_technique(&key).unwrap().pass(0).unwrap();
        assert_eq!(
            pass.constant("tint"),
            Some(ProgramConstant::Vec4(Vec4::new(1.0, 0.5, 0.5, 1.0)))
        );
        assert_eq!(pass.constant("undeclared"), None);
    }

    #[test]
    fn no_shader_means_no_technique() {
        let mut material = Material::new("empty");
        let key = RenderSystemKey::new("GLRenderSystem", "ForwardRenderer");
        assert!(material.best_technique(&key).is_none());
        assert_eq!(material.apply_parameters(), 0);
        assert!(!material.apply_texture_aliases(&HashMap::new(), true));
    }

    #[test]
    fn parameter_store() {
        let mut material = Material::new("m");
        material.set_float("gloss", 0.5);
        material.set_float("gloss", 0.75);
        assert_eq!(material.parameter("gloss"), Some(&MaterialParameter::Float(0.75)));
        assert_eq!(material.parameters().count(), 1);
        assert!(material.remove_parameter("gloss").is_some());
        assert!(material.parameter("gloss").is_none());
    }
}
