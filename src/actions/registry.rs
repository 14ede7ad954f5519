//! Action registry for definition lookup.
//!
//! The `ActionRegistry` stores every action definition for the world.
//! It is filled once at startup and then shared read-only.

use rustc_hash::FxHashMap;

use super::definition::{ActionDefinition, ActionType};
use crate::core::{ActionId, ConfigError};

/// Registry of action definitions.
///
/// ## Example
///
/// ```
/// use destiny_engine::actions::{ActionCategory, ActionDefinition, ActionRegistry};
/// use destiny_engine::core::ActionId;
///
/// let mut registry = ActionRegistry::new();
///
/// let brawl = ActionDefinition::new(ActionId::new(1), "Saloon Brawl", ActionCategory::Combat, 10, 45);
/// registry.register(brawl).unwrap();
///
/// let found = registry.get(ActionId::new(1)).unwrap();
/// assert_eq!(found.name, "Saloon Brawl");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: FxHashMap<ActionId, ActionDefinition>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ActionDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Register an action definition.
    ///
    /// Fails if an action with the same ID already exists.
    pub fn register(&mut self, action: ActionDefinition) -> Result<(), ConfigError> {
        if self.actions.contains_key(&action.id) {
            return Err(ConfigError::Duplicate {
                kind: "action",
                id: action.id.to_string(),
            });
        }
        self.actions.insert(action.id, action);
        Ok(())
    }

    /// Get an action definition by ID.
    #[must_use]
    pub fn get(&self, id: ActionId) -> Option<&ActionDefinition> {
        self.actions.get(&id)
    }

    /// Check if an action ID is registered.
    #[must_use]
    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over all action definitions.
    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    /// Find actions by type.
    pub fn find_by_type(&self, action_type: ActionType) -> impl Iterator<Item = &ActionDefinition> {
        self.actions
            .values()
            .filter(move |a| a.action_type() == action_type)
    }
}
