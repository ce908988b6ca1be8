//! Error types for the core data model.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core data-model operations.
///
/// These are refusals: the operation is rejected and no state is mutated.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The inventory has no room for another item.
    #[error("inventory is full ({0} slots)")]
    InventoryFull(usize),

    /// An inventory index pointed past the end of the list.
    #[error("no item at inventory slot {0}")]
    InvalidItemIndex(usize),

    /// Tried to equip something that is not a weapon.
    #[error("{0} is not a weapon")]
    NotAWeapon(String),

    /// An item id was not found in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// A location id was not found in the catalog.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Both companion slots are taken.
    #[error("no free companion slot (maximum {0} active)")]
    CompanionLimit(usize),

    /// Not enough of a material to consume.
    #[error("not enough {0} (need {1})")]
    MissingMaterials(String, u32),
}
