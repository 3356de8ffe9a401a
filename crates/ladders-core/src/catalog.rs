//! Ability and item registry.
//!
//! Abilities and items are defined once at game setup and referenced
//! everywhere else by stable ids. Names are only resolved when building a
//! game from configuration or reading player input.

use crate::effects::Effect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an ability definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityId(pub u16);

/// Stable identifier of an item definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u16);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability #{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item #{}", self.0)
    }
}

/// A reusable ability gated by a cooldown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    pub effect: Effect,
    /// Turns to wait after use
    pub cooldown: u32,
}

/// A one-shot item, consumed when used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub effect: Effect,
}

/// All abilities and items available in a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    abilities: Vec<AbilityDef>,
    items: Vec<ItemDef>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in abilities and items
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.add_ability("Iron Skin", Effect::GrantImmunity, 4);
        catalog.add_ability("Second Wind", Effect::GrantExtraTurns(1), 5);
        catalog.add_ability("Study", Effect::GainExperience(25), 3);
        catalog.add_ability("Blink", Effect::TeleportToNextLadder, 6);
        catalog.add_ability("Switcheroo", Effect::SwapWithLeader, 8);
        catalog.add_ability(
            "Meditate",
            Effect::ApplyStatus {
                effect: Box::new(Effect::GainExperience(5)),
                duration: 3,
            },
            4,
        );
        catalog.add_ability("Purify", Effect::ClearStatusEffects, 3);

        catalog.add_item("Lucky Charm", Effect::BonusPoints(5));
        catalog.add_item("Shield Potion", Effect::GrantImmunity);
        catalog.add_item("Hourglass", Effect::GrantExtraTurns(1));
        catalog.add_item("Teleport Scroll", Effect::TeleportToNextLadder);
        catalog.add_item("Tome of Insight", Effect::GainExperience(50));
        catalog.add_item("Boots of Haste", Effect::Advance(3));
        catalog.add_item("Elixir", Effect::ClearStatusEffects);

        catalog
    }

    /// Register an ability, returning its id
    pub fn add_ability(&mut self, name: impl Into<String>, effect: Effect, cooldown: u32) -> AbilityId {
        let id = AbilityId(self.abilities.len() as u16);
        self.abilities.push(AbilityDef {
            id,
            name: name.into(),
            effect,
            cooldown,
        });
        id
    }

    /// Register an item, returning its id
    pub fn add_item(&mut self, name: impl Into<String>, effect: Effect) -> ItemId {
        let id = ItemId(self.items.len() as u16);
        self.items.push(ItemDef {
            id,
            name: name.into(),
            effect,
        });
        id
    }

    pub fn ability(&self, id: AbilityId) -> Option<&AbilityDef> {
        self.abilities.get(id.0 as usize)
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(id.0 as usize)
    }

    pub fn abilities(&self) -> &[AbilityDef] {
        &self.abilities
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }

    /// Find an ability by name (case-insensitive)
    pub fn ability_by_name(&self, name: &str) -> Option<AbilityId> {
        let name = name.trim();
        self.abilities
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.id)
    }

    /// Find an item by name (case-insensitive)
    pub fn item_by_name(&self, name: &str) -> Option<ItemId> {
        let name = name.trim();
        self.items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
            .map(|i| i.id)
    }

    /// Display name of an ability, falling back to its id
    pub fn ability_name(&self, id: AbilityId) -> String {
        self.ability(id)
            .map_or_else(|| id.to_string(), |a| a.name.clone())
    }

    /// Display name of an item, falling back to its id
    pub fn item_name(&self, id: ItemId) -> String {
        self.item(id)
            .map_or_else(|| id.to_string(), |i| i.name.clone())
    }
}
