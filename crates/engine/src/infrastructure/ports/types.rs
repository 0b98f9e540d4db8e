//! Storage records exchanged with the persistence ports.

use serde::{Deserialize, Serialize};

use satchel_domain::{
    CharacterId, Currency, GridPosition, Item, ItemId, ItemName, ItemSize,
};

use super::RepoError;

/// Position and size of a stored item, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRect {
    pub grid_x: u32,
    pub grid_y: u32,
    pub w: u32,
    pub h: u32,
}

/// An item as the storage collaborator sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedItem {
    pub id: ItemId,
    pub owner_id: Option<CharacterId>,
    pub name: String,
    pub grid: GridRect,
}

impl From<&Item> for PersistedItem {
    fn from(item: &Item) -> Self {
        let position = item.position();
        let size = item.size();
        Self {
            id: item.id(),
            owner_id: item.owner_id(),
            name: item.name().as_str().to_string(),
            grid: GridRect {
                grid_x: position.x,
                grid_y: position.y,
                w: size.width(),
                h: size.height(),
            },
        }
    }
}

impl TryFrom<PersistedItem> for Item {
    type Error = RepoError;

    fn try_from(record: PersistedItem) -> Result<Self, Self::Error> {
        let name = ItemName::new(record.name)
            .map_err(|e| RepoError::corrupt(record.id, e))?;
        let size = ItemSize::new(record.grid.w, record.grid.h)
            .map_err(|e| RepoError::corrupt(record.id, e))?;
        Ok(Item::from_parts(
            record.id,
            name,
            GridPosition::new(record.grid.grid_x, record.grid.grid_y),
            size,
            record.owner_id,
        ))
    }
}

/// Per-character inventory settings stored alongside the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryProfile {
    pub rows: u32,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, w: u32) -> PersistedItem {
        PersistedItem {
            id: ItemId::new(),
            owner_id: Some(CharacterId::new()),
            name: name.to_string(),
            grid: GridRect {
                grid_x: 2,
                grid_y: 3,
                w,
                h: 1,
            },
        }
    }

    #[test]
    fn wire_format_uses_grid_field_names() {
        let json = serde_json::to_value(record("Torch", 1)).unwrap();
        assert_eq!(json["grid"]["gridX"], 2);
        assert_eq!(json["grid"]["gridY"], 3);
        assert_eq!(json["grid"]["w"], 1);
        assert!(json.get("ownerId").is_some());
    }

    #[test]
    fn converts_to_domain_item() {
        let rec = record("  Torch ", 2);
        let item = Item::try_from(rec.clone()).unwrap();
        assert_eq!(item.id(), rec.id);
        assert_eq!(item.name().as_str(), "Torch");
        assert_eq!(item.position(), GridPosition::new(2, 3));
        assert_eq!(item.size().width(), 2);

        let back = PersistedItem::from(&item);
        assert_eq!(back.grid, rec.grid);
        assert_eq!(back.name, "Torch");
    }

    #[test]
    fn blank_name_or_zero_size_is_a_corrupt_record() {
        assert!(matches!(
            Item::try_from(record(" ", 1)),
            Err(RepoError::CorruptRecord { .. })
        ));
        assert!(matches!(
            Item::try_from(record("Torch", 0)),
            Err(RepoError::CorruptRecord { .. })
        ));
    }
}
