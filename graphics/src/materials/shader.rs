//! Named set of techniques.

use crate::render_system::RenderSystemKey;

use super::technique::Technique;

/// Alternative techniques for one logical material, tried in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Shader {
    name: String,
    techniques: Vec<Technique>,
}

impl Shader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            techniques: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a technique for `(render_system, renderer)` and return it.
    /// Keys need not be unique; the first match wins.
    pub fn add_technique(
        &mut self,
        render_system: impl Into<String>,
        renderer: impl Into<String>,
    ) -> &mut Technique {
        self.techniques.push(Technique::new(render_system, renderer));
        let index = self.techniques.len() - 1;
        &mut self.techniques[index]
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn techniques_mut(&mut self) -> &mut [Technique] {
        &mut self.techniques
    }

    pub fn num_techniques(&self) -> usize {
        self.techniques.len()
    }

    /// First technique targeting `key`.
    pub fn best_technique(&self, key: &RenderSystemKey) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.matches(key))
    }

    pub fn best_technique_mut(&mut self, key: &RenderSystemKey) -> Option<&mut Technique> {
        self.techniques.iter_mut().find(|t| t.matches(key))
    }
}
