//! Core types for Duskfall: the player aggregate, items, enemies,
//! locations, companions, and the immutable content catalogs.
//!
//! Everything here is plain data plus invariant-preserving mutation; the
//! simulation rules live in `dusk-sim` and `dusk-engine`.

pub mod catalog;
pub mod companion;
pub mod enemy;
pub mod error;
pub mod inventory;
pub mod item;
pub mod location;
pub mod mission;
pub mod player;
pub mod stat;
pub mod status;
pub mod weather;

pub use catalog::{Bestiary, ItemCatalog, LocationCatalog};
pub use companion::{Companion, CompanionSkill, MAX_ACTIVE_COMPANIONS};
pub use enemy::{AnimalType, CreatureType, Enemy, EnemyKind};
pub use error::{CoreError, CoreResult};
pub use inventory::{INVENTORY_CAPACITY, Inventory};
pub use item::{DamageType, EffectTag, ItemInstance, ItemKind, ItemTemplate};
pub use location::{Location, ResourceWeights};
pub use mission::Mission;
pub use player::PlayerState;
pub use stat::Stat;
pub use status::{Affliction, AfflictionKind, StatusEffects};
pub use weather::{Weather, WeatherState};
