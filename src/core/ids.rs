//! Opaque identifiers.
//!
//! The engine never interprets these beyond equality and hashing. The
//! character store, action tables and crafting recipes assign meaning.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $raw:ty, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $raw);

        impl $name {
            /// Create a new identifier.
            #[must_use]
            pub const fn new(id: $raw) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> $raw {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// A player character.
    CharacterId, u64, "Character"
);
define_id!(
    /// An entry in the action table.
    ActionId, u32, "Action"
);
define_id!(
    /// A world location, used for time-of-day crime detection.
    LocationId, u32, "Location"
);
define_id!(
    /// An inventory item type.
    ItemId, u32, "Item"
);
define_id!(
    /// A crafting recipe.
    RecipeId, u32, "Recipe"
);
define_id!(
    /// A special effect that can be attached to a crafted item.
    EffectId, u32, "Effect"
);
