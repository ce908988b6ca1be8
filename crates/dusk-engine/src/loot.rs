//! Procedural loot generation.
//!
//! Loot rolls are independent of encounter rolls. A search first tries the
//! location's exclusive finds, then a generic roll: pick a resource bucket
//! by the location's weights, then uniformly among catalog items of that
//! kind. Exclusive items never enter the generic pool.

use dusk_core::{ItemCatalog, ItemInstance, ItemKind, Location};
use rand::Rng;
use rand::rngs::StdRng;

use dusk_sim::weighted::pick_weighted;

/// Chance that a search turns up anything from the generic pool.
pub const LOOT_CHANCE: f64 = 0.5;

/// Roll for item discovery at a location.
pub fn roll_loot(
    rng: &mut StdRng,
    location: &Location,
    items: &ItemCatalog,
) -> Option<ItemInstance> {
    // Exclusive finds roll first, each on its own odds.
    for special in &location.special_items {
        if rng.random::<f64>() < special.chance {
            if let Ok(template) = items.get(&special.item_id) {
                return Some(ItemInstance::of(template));
            }
        }
    }
    if rng.random::<f64>() >= LOOT_CHANCE {
        return None;
    }
    pick_loot_item(rng, location, items)
}

/// Pick an item from the generic pool, skipping the discovery gate.
pub fn pick_loot_item(
    rng: &mut StdRng,
    location: &Location,
    items: &ItemCatalog,
) -> Option<ItemInstance> {
    let w = &location.resources;
    let buckets = [
        (ItemKind::Food, f64::from(w.food)),
        (ItemKind::Material, f64::from(w.material)),
        (ItemKind::Weapon, f64::from(w.weapon)),
        (ItemKind::Medical, f64::from(w.medical)),
    ];
    let kind = *pick_weighted(rng, &buckets)?;
    let pool: Vec<_> = items
        .of_kind(kind)
        .into_iter()
        .filter(|t| !t.exclusive)
        .collect();
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(ItemInstance::of(pool[index]))
}
