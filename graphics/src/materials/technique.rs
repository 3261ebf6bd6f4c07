//! Backend-targeted implementation of a material.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GraphicsError;
use crate::render_system::RenderSystemKey;
use crate::resources::TextureCache;

use super::pass::Pass;

/// Ordered passes for one `(render system, renderer)` pair.
///
/// The key is only used for matching; a technique holds no connection to a
/// live render system.
#[derive(Clone)]
pub struct Technique {
    key: RenderSystemKey,
    passes: Vec<Pass>,
    cache: Option<Arc<dyn TextureCache>>,
    loaded: bool,
}

impl Technique {
    pub fn new(render_system: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            key: RenderSystemKey::new(render_system, renderer),
            passes: Vec::new(),
            cache: None,
            loaded: false,
        }
    }

    pub fn render_system(&self) -> &str {
        self.key.render_system()
    }

    pub fn renderer(&self) -> &str {
        self.key.renderer()
    }

    pub fn key(&self) -> &RenderSystemKey {
        &self.key
    }

    /// Whether this technique targets `key`.
    pub fn matches(&self, key: &RenderSystemKey) -> bool {
        self.key == *key
    }

    /// Append an empty pass and return it.
    pub fn add_pass(&mut self) -> &mut Pass {
        let mut pass = Pass::new();
        if self.loaded
            && let Some(cache) = &self.cache
        {
            pass.load(Arc::clone(cache));
        }
        self.passes.push(pass);
        let index = self.passes.len() - 1;
        &mut self.passes[index]
    }

    pub fn pass(&self, index: usize) -> Option<&Pass> {
        self.passes.get(index)
    }

    pub fn pass_mut(&mut self, index: usize) -> Option<&mut Pass> {
        self.passes.get_mut(index)
    }

    /// Passes in submission order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn passes_mut(&mut self) -> &mut [Pass] {
        &mut self.passes
    }

    pub fn remove_pass(&mut self, index: usize) -> Result<Pass, GraphicsError> {
        if index >= self.passes.len() {
            return Err(GraphicsError::InvalidParameter(format!(
                "pass {index} out of range ({} passes)",
                self.passes.len()
            )));
        }
        Ok(self.passes.remove(index))
    }

    pub fn num_passes(&self) -> usize {
        self.passes.len()
    }

    pub fn load(&mut self, cache: Arc<dyn TextureCache>) {
        for pass in &mut self.passes {
            pass.load(Arc::clone(&cache));
        }
        self.cache = Some(cache);
        self.loaded = true;
    }

    pub fn unload(&mut self) {
        for pass in &mut self.passes {
            pass.unload();
        }
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn apply_texture_aliases(&mut self, aliases: &HashMap<String, String>, apply: bool) -> bool {
        self.passes
            .iter_mut()
            .fold(false, |matched, pass| pass.apply_texture_aliases(aliases, apply) || matched)
    }
}

impl std::fmt::Debug for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Technique")
            .field("key", &self.key)
            .field("passes", &self.passes)
            .field("loaded", &self.loaded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_matching() {
        let technique = Technique::new("GLRenderSystem", "ForwardRenderer");
        assert_eq!(technique.render_system(), "GLRenderSystem");
        assert!(technique.matches(&RenderSystemKey::new("GLRenderSystem", "ForwardRenderer")));
        assert!(!technique.matches(&RenderSystemKey::new("GLRenderSystem", "DeferredRenderer")));
        assert!(!technique.matches(&RenderSystemKey::new("D3D11RenderSystem", "ForwardRenderer")));
    }

    #[test]
    fn passes_in_order() {
        let mut technique = Technique::new("GLRenderSystem", "ForwardRenderer");
        technique.add_pass().set_name("base");
        technique.add_pass().set_name("lighting");
        assert_eq!(technique.num_passes(), 2);
        assert_eq!(technique.pass(1).unwrap().name(), "lighting");

        let removed = technique.remove_pass(0).unwrap();
        assert_eq!(removed.name(), "base");
        assert!(technique.remove_pass(3).is_err());
    }
}
