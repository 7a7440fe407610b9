//! Definition lookup by model identifier

use crate::definition::{definition, Definition};
use crate::error::AdapterError;
use dashmap::DashMap;
use std::sync::Arc;

/// Definitions indexed by every model identifier they claim
#[derive(Default)]
pub struct ConverterRegistry {
    definitions: DashMap<String, Arc<Definition>>,
}

impl ConverterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the PCIe switch definition
    #[allow(clippy::missing_errors_doc)]
    pub fn with_builtin() -> Result<Self, AdapterError> {
        let registry = Self::new();
        registry.register(definition())?;
        Ok(registry)
    }

    /// Validate and register a definition under each of its model identifiers
    #[allow(clippy::missing_errors_doc)]
    pub fn register(&self, definition: Definition) -> Result<Arc<Definition>, AdapterError> {
        definition.validate()?;

        let definition = Arc::new(definition);
        for model in &definition.zigbee_model {
            if self
                .definitions
                .insert((*model).to_string(), Arc::clone(&definition))
                .is_some()
            {
                tracing::warn!("Replacing existing definition for model {}", model);
            }
        }

        tracing::info!(
            "Registered {} ({}) for {:?}",
            definition.model,
            definition.vendor,
            definition.zigbee_model
        );
        Ok(definition)
    }

    /// Find the definition for a model identifier from the Basic cluster
    #[must_use]
    pub fn find_by_model(&self, model: &str) -> Option<Arc<Definition>> {
        self.definitions.get(model).map(|r| Arc::clone(r.value()))
    }

    /// All registered model identifiers
    #[must_use]
    pub fn models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.definitions.iter().map(|r| r.key().clone()).collect();
        models.sort();
        models
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
