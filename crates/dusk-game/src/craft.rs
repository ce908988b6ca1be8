//! Crafting recipes.
//!
//! A recipe turns materials into an item. Missing materials or a full pack
//! are refusals checked up front, so a failed craft never consumes
//! anything.

use dusk_core::{CoreError, ItemCatalog, ItemInstance, PlayerState};

use crate::error::{GameError, GameResult};

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Recipe id, usually the output item id.
    pub id: String,
    /// Catalog id of the produced item.
    pub output: String,
    /// Required materials: (catalog id, units).
    pub inputs: Vec<(String, u32)>,
}

impl Recipe {
    /// Define a recipe.
    pub fn new(id: &str, output: &str, inputs: &[(&str, u32)]) -> Self {
        Self {
            id: id.to_string(),
            output: output.to_string(),
            inputs: inputs
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        }
    }
}

/// The recipes every survivor knows.
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("bandage", "bandage", &[("cloth", 2)]),
        Recipe::new("splint", "splint", &[("cloth", 1), ("scrap", 1)]),
        Recipe::new("spear", "spear", &[("scrap", 2), ("cloth", 1)]),
        Recipe::new("molotov", "molotov", &[("fuel", 1), ("cloth", 1)]),
        Recipe::new("acid_flask", "acid_flask", &[("chemicals", 2)]),
    ]
}

/// Craft a recipe into the player's inventory. Returns the slot the
/// output landed in.
pub fn craft(
    state: &mut PlayerState,
    items: &ItemCatalog,
    recipes: &[Recipe],
    recipe_id: &str,
) -> GameResult<usize> {
    let recipe = recipes
        .iter()
        .find(|r| r.id == recipe_id)
        .ok_or_else(|| GameError::UnknownRecipe(recipe_id.to_string()))?;
    let output = items.get(&recipe.output)?;

    // All refusals up front: materials, then space.
    for (id, count) in &recipe.inputs {
        if state.inventory.count_of(id) < *count {
            return Err(CoreError::MissingMaterials(id.clone(), *count).into());
        }
    }
    if !state.inventory.has_room_for(output) {
        return Err(CoreError::InventoryFull(dusk_core::INVENTORY_CAPACITY).into());
    }

    for (id, count) in &recipe.inputs {
        state.inventory.consume(id, *count)?;
    }
    let slot = state.inventory.add(ItemInstance::of(output))?;
    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_core::ItemTemplate;

    fn stocked_state() -> (PlayerState, ItemCatalog) {
        let items = ItemCatalog::default_set();
        let mut state = PlayerState::new("Ash", "camp", false);
        let mut cloth = ItemInstance::of(&ItemTemplate::material("cloth", "Cloth Strips"));
        cloth.count = 4;
        let mut scrap = ItemInstance::of(&ItemTemplate::material("scrap", "Scrap Metal"));
        scrap.count = 3;
        state.inventory.add(cloth).unwrap();
        state.inventory.add(scrap).unwrap();
        (state, items)
    }

    #[test]
    fn crafting_consumes_inputs_and_yields_output() {
        let (mut state, items) = stocked_state();
        let recipes = default_recipes();
        let slot = craft(&mut state, &items, &recipes, "bandage").unwrap();
        assert_eq!(state.inventory.get(slot).unwrap().id(), "bandage");
        assert_eq!(state.inventory.count_of("cloth"), 2);
    }

    #[test]
    fn unknown_recipe_is_refused() {
        let (mut state, items) = stocked_state();
        let recipes = default_recipes();
        assert!(matches!(
            craft(&mut state, &items, &recipes, "railgun"),
            Err(GameError::UnknownRecipe(_))
        ));
    }

    #[test]
    fn missing_materials_refused_without_consuming() {
        let (mut state, items) = stocked_state();
        let recipes = default_recipes();
        // acid_flask needs chemicals, which we do not have.
        let err = craft(&mut state, &items, &recipes, "acid_flask");
        assert!(matches!(
            err,
            Err(GameError::Core(CoreError::MissingMaterials(_, _)))
        ));
        assert_eq!(state.inventory.count_of("cloth"), 4);
        assert_eq!(state.inventory.count_of("scrap"), 3);
    }

    #[test]
    fn partial_materials_also_refused() {
        let (mut state, items) = stocked_state();
        let recipes = vec![Recipe::new("wall", "spear", &[("scrap", 99)])];
        assert!(craft(&mut state, &items, &recipes, "wall").is_err());
        assert_eq!(state.inventory.count_of("scrap"), 3);
    }

    #[test]
    fn every_default_recipe_resolves_against_the_catalog() {
        let items = ItemCatalog::default_set();
        for recipe in default_recipes() {
            assert!(items.get(&recipe.output).is_ok(), "{}", recipe.output);
            for (id, count) in &recipe.inputs {
                assert!(items.get(id).is_ok(), "{id}");
                assert!(*count > 0);
            }
        }
    }
}
