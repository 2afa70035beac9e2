use std::sync::Arc;

use tracing::{debug, warn};

use super::dispatch::{emit_bodies, emit_switch, DispatchSource};
use super::instance::{TextureId, TextureInstance, TextureOverrides};
use crate::catalog::TextureCatalog;
use crate::error::{Error, Result};
use crate::uniform::ShaderProgram;

/// Ordered collection of live texture instances.
///
/// Ids are dense and follow registration order; they double as the case labels of the
/// generated `getTexture` switch. Instances can only be removed all at once with
/// [`TextureRegistry::clear`].
#[derive(Clone, Debug)]
pub struct TextureRegistry {
    catalog: Arc<TextureCatalog>,
    instances: Vec<TextureInstance>,
}

impl TextureRegistry {
    /// Creates an empty registry drawing types from `catalog`.
    pub fn new(catalog: Arc<TextureCatalog>) -> Self {
        Self {
            catalog,
            instances: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<TextureCatalog> {
        &self.catalog
    }

    /// Builds an unregistered instance of `type_name`.
    pub fn try_instantiate(
        &self,
        type_name: &str,
        overrides: &TextureOverrides,
    ) -> Result<TextureInstance> {
        let kind = self
            .catalog
            .lookup(type_name)
            .ok_or_else(|| Error::UnknownTextureType {
                name: type_name.to_string(),
            })?;
        TextureInstance::new(Arc::clone(kind), overrides)
    }

    /// Like [`TextureRegistry::try_instantiate`], logging failures instead of returning them.
    pub fn instantiate(
        &self,
        type_name: &str,
        overrides: &TextureOverrides,
    ) -> Option<TextureInstance> {
        match self.try_instantiate(type_name, overrides) {
            Ok(instance) => Some(instance),
            Err(err) => {
                warn!("Skipping texture: {}", err);
                None
            }
        }
    }

    /// Appends `instance`, assigning it the next id. All its uniforms start dirty.
    pub fn register(&mut self, mut instance: TextureInstance) -> TextureId {
        let id = TextureId(self.instances.len());
        instance.assign_id(id);
        debug!("Registered texture '{}' as id {}.", instance.type_name(), id);
        self.instances.push(instance);
        id
    }

    /// Instantiates and registers in one call.
    pub fn texture(&mut self, type_name: &str, overrides: &TextureOverrides) -> Option<TextureId> {
        self.instantiate(type_name, overrides)
            .map(|instance| self.register(instance))
    }

    /// Drops every instance. Ids restart at zero; the catalog is untouched.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureInstance> {
        self.instances.get(id.0)
    }

    pub fn get_mut(&mut self, id: TextureId) -> Option<&mut TextureInstance> {
        self.instances.get_mut(id.0)
    }

    /// Instances in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TextureInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// `uniform` declarations for every non-material parameter, in registration order.
    pub fn emit_declarations(&self) -> String {
        let mut out = String::new();
        for instance in &self.instances {
            for uniform in instance.declared_uniforms() {
                out.push_str(&uniform.emit_decl());
            }
        }
        out
    }

    /// Texture bodies plus the `getTexture` dispatch function.
    pub fn emit_dispatch(&self) -> DispatchSource {
        DispatchSource {
            bodies: emit_bodies(&self.instances),
            dispatch_function: emit_switch(&self.instances),
        }
    }

    /// Resolves and caches uniform locations against a freshly compiled program.
    ///
    /// Call after every compile. Every bound uniform is marked dirty so the next
    /// [`TextureRegistry::upload`] fills the new program.
    pub fn bind_locations(&mut self, program: &dyn ShaderProgram) {
        let mut bound = 0usize;
        let mut missing = 0usize;
        for instance in &mut self.instances {
            for uniform in instance.uniforms_mut() {
                uniform.update_location(program);
                if uniform.location().is_some() {
                    bound += 1;
                } else {
                    missing += 1;
                }
            }
        }
        debug!("Bound {} texture uniforms ({} inactive).", bound, missing);
    }

    /// Writes every dirty uniform and clears its flag. Returns the number of writes.
    pub fn upload(&mut self, program: &mut dyn ShaderProgram) -> usize {
        let mut writes = 0;
        for instance in &mut self.instances {
            for uniform in instance.uniforms_mut() {
                if uniform.upload(program) {
                    writes += 1;
                }
            }
        }
        if writes > 0 {
            debug!("Uploaded {} texture uniforms.", writes);
        }
        writes
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new(Arc::new(TextureCatalog::builtin()))
    }
}
