//! InventoryGrid aggregate - one character's equipment grid
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: items are only reachable through accessors
//! - **Validate, then commit**: every mutation checks bounds and overlap
//!   before touching state, so a rejected call leaves the grid unchanged
//! - **Outcome enums**: mutations return what changed, for the caller to
//!   persist
//!
//! Coordinates are 1-based. The grid has a fixed number of columns and a
//! user-chosen number of rows in `[1, max_rows]`.

use crate::entities::Item;
use crate::error::DomainError;
use crate::events::{ItemMoved, ItemRenamed, ItemResized, RowCountChanged};
use crate::value_objects::{
    Footprint, GridLimits, GridPosition, ItemName, ItemSize, RowShrinkPolicy,
};
use crate::{CharacterId, ItemId};

/// The placement surface for one character's items.
///
/// # Invariants
///
/// - `1 <= rows <= limits.max_rows()`
/// - Items placed or moved through this type lie within
///   `[1, columns] × [1, rows]` and never overlap each other
///
/// A row-count shrink under [`RowShrinkPolicy::Strand`] may leave items
/// below the last row. Those items keep their cells: they still block
/// overlapping placements and can be moved back into bounds.
///
/// # Example
///
/// ```
/// use satchel_domain::aggregates::InventoryGrid;
/// use satchel_domain::value_objects::{GridLimits, GridPosition, RowShrinkPolicy};
///
/// let mut grid = InventoryGrid::new(GridLimits::default(), 5, RowShrinkPolicy::Strand);
/// let sword = grid.add_item("Sword", None).unwrap();
///
/// assert_eq!(sword.position(), GridPosition::new(1, 1));
/// assert!(!grid.is_cell_free(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryGrid {
    limits: GridLimits,
    rows: u32,
    shrink_policy: RowShrinkPolicy,
    /// Insertion order; this is the render order
    items: Vec<Item>,
}

impl InventoryGrid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty grid. `rows` is clamped into `[1, max_rows]`.
    pub fn new(limits: GridLimits, rows: u32, shrink_policy: RowShrinkPolicy) -> Self {
        Self {
            limits,
            rows: limits.clamp_rows(rows),
            shrink_policy,
            items: Vec::new(),
        }
    }

    /// Reconstruct from stored data.
    ///
    /// Stored items are taken as they are, even if they break the bounds or
    /// overlap rules; use [`Self::stranded_items`] and [`Self::collisions`]
    /// to find out.
    pub fn from_parts(
        limits: GridLimits,
        rows: u32,
        shrink_policy: RowShrinkPolicy,
        items: Vec<Item>,
    ) -> Self {
        Self {
            limits,
            rows: limits.clamp_rows(rows),
            shrink_policy,
            items,
        }
    }

    // =========================================================================
    // Read-only accessors
    // =========================================================================

    #[inline]
    pub fn columns(&self) -> u32 {
        self.limits.columns()
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn max_rows(&self) -> u32 {
        self.limits.max_rows()
    }

    #[inline]
    pub fn limits(&self) -> GridLimits {
        self.limits
    }

    #[inline]
    pub fn shrink_policy(&self) -> RowShrinkPolicy {
        self.shrink_policy
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The item covering a cell, if any.
    pub fn item_at(&self, x: u32, y: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.footprint().covers(x, y))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A `rows × columns` matrix of which item covers each visible cell.
    ///
    /// `occupancy()[y - 1][x - 1]` is the cell at `(x, y)`.
    pub fn occupancy(&self) -> Vec<Vec<Option<ItemId>>> {
        let columns = self.columns() as usize;
        let mut cells = vec![vec![None; columns]; self.rows as usize];
        for item in &self.items {
            let footprint = item.footprint();
            let bottom = footprint.bottom().min(self.rows);
            let right = footprint.right().min(self.columns());
            for y in footprint.position.y..=bottom {
                for x in footprint.position.x..=right {
                    if x >= 1 && y >= 1 {
                        cells[(y - 1) as usize][(x - 1) as usize] = Some(item.id());
                    }
                }
            }
        }
        cells
    }

    /// Items whose footprint is not fully inside the current bounds.
    pub fn stranded_items(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| !self.fits_in_bounds(&item.footprint()))
            .map(Item::id)
            .collect()
    }

    /// Pairs of items whose footprints intersect. Always empty unless the
    /// grid was rebuilt from inconsistent stored data.
    pub fn collisions(&self) -> Vec<(ItemId, ItemId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.items.iter().enumerate() {
            for b in &self.items[i + 1..] {
                if a.footprint().intersects(&b.footprint()) {
                    pairs.push((a.id(), b.id()));
                }
            }
        }
        pairs
    }

    // =========================================================================
    // Occupancy queries
    // =========================================================================

    /// Whether the footprint lies inside `[1, columns] × [1, rows]`.
    pub fn fits_in_bounds(&self, footprint: &Footprint) -> bool {
        footprint.within(self.columns(), self.rows)
    }

    /// True iff `(x, y)` is inside the grid and no item covers it.
    pub fn is_cell_free(&self, x: u32, y: u32) -> bool {
        if x < 1 || y < 1 || x > self.columns() || y > self.rows {
            return false;
        }
        self.item_at(x, y).is_none()
    }

    /// True iff `candidate` intersects any item other than `excluding`.
    pub fn would_overlap(&self, candidate: &Footprint, excluding: Option<ItemId>) -> bool {
        self.first_blocker(candidate, excluding).is_some()
    }

    /// First anchor, in row-major order, where a footprint of `size` is in
    /// bounds and overlap-free.
    pub fn find_first_free_cell(&self, size: ItemSize) -> Option<GridPosition> {
        if size.width() > self.columns() || size.height() > self.rows {
            return None;
        }
        for y in 1..=self.rows {
            for x in 1..=self.columns() {
                let candidate = Footprint::new(GridPosition::new(x, y), size);
                if self.fits_in_bounds(&candidate) && !self.would_overlap(&candidate, None) {
                    return Some(candidate.position);
                }
            }
        }
        None
    }

    fn first_blocker(&self, candidate: &Footprint, excluding: Option<ItemId>) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|item| Some(item.id()) != excluding)
            .find(|item| item.footprint().intersects(candidate))
            .map(Item::id)
    }

    fn index_of(&self, id: ItemId) -> Result<usize, DomainError> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DomainError::not_found("Item", id))
    }

    // =========================================================================
    // Placement operations
    // =========================================================================

    /// Place a new 1x1 item at the first free cell.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if the name is blank after trimming or too long
    /// - `NoSpace` if every visible cell is taken
    pub fn add_item(
        &mut self,
        name: &str,
        owner_id: Option<CharacterId>,
    ) -> Result<Item, DomainError> {
        let name = ItemName::new(name)?;
        let position = self
            .find_first_free_cell(ItemSize::UNIT)
            .ok_or_else(|| DomainError::no_space(1, 1))?;

        let item = Item::new(name, position, owner_id);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove an item, returning it.
    pub fn remove_item(&mut self, id: ItemId) -> Result<Item, DomainError> {
        let index = self.index_of(id)?;
        Ok(self.items.remove(index))
    }

    /// Move an item's anchor, keeping its size.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    /// - `OutOfBounds` if the footprint would leave the grid
    /// - `Overlap` if it would cover another item
    pub fn move_item(&mut self, id: ItemId, x: u32, y: u32) -> Result<ItemMoved, DomainError> {
        let index = self.index_of(id)?;
        let item = &self.items[index];
        let from = item.position();
        let size = item.size();

        let candidate = Footprint::new(GridPosition::new(x, y), size);
        if !self.fits_in_bounds(&candidate) {
            return Err(DomainError::OutOfBounds {
                x,
                y,
                width: size.width(),
                height: size.height(),
            });
        }
        if let Some(blocking) = self.first_blocker(&candidate, Some(id)) {
            return Err(DomainError::Overlap { blocking });
        }
        if candidate.position == from {
            return Ok(ItemMoved::Unchanged { item_id: id });
        }

        self.items[index].set_position(candidate.position);
        Ok(ItemMoved::Moved {
            item_id: id,
            from,
            to: candidate.position,
        })
    }

    /// Grow or shrink an item by one step along either axis.
    ///
    /// The anchor stays put; the new size is clamped so the footprint does
    /// not run past the right or bottom edge.
    ///
    /// # Errors
    ///
    /// - `InvalidResizeStep` if a delta is outside `-1..=1`
    /// - `NotFound` for an unknown id
    /// - `Overlap` if the clamped footprint would cover another item
    pub fn resize_item(
        &mut self,
        id: ItemId,
        delta_w: i32,
        delta_h: i32,
    ) -> Result<ItemResized, DomainError> {
        if !(-1..=1).contains(&delta_w) || !(-1..=1).contains(&delta_h) {
            return Err(DomainError::InvalidResizeStep { delta_w, delta_h });
        }
        let index = self.index_of(id)?;
        let item = &self.items[index];
        let anchor = item.position();
        let from = item.size();

        let max_w = self.columns().saturating_sub(anchor.x) + 1;
        let max_h = self.rows.saturating_sub(anchor.y) + 1;
        let width = step_clamped(from.width(), delta_w, max_w);
        let height = step_clamped(from.height(), delta_h, max_h);
        let to = ItemSize::new(width, height)?;

        let candidate = Footprint::new(anchor, to);
        if let Some(blocking) = self.first_blocker(&candidate, Some(id)) {
            return Err(DomainError::Overlap { blocking });
        }
        if to == from {
            return Ok(ItemResized::Unchanged {
                item_id: id,
                size: from,
            });
        }

        self.items[index].set_size(to);
        Ok(ItemResized::Resized {
            item_id: id,
            from,
            to,
        })
    }

    /// Rename an item. Blank input cancels the rename and keeps the old name;
    /// the current name again gives `Unchanged`.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    /// - `InvalidName` if the trimmed name is too long
    pub fn rename_item(&mut self, id: ItemId, new_name: &str) -> Result<ItemRenamed, DomainError> {
        let index = self.index_of(id)?;
        if new_name.trim().is_empty() {
            return Ok(ItemRenamed::Cancelled { item_id: id });
        }
        let to = ItemName::new(new_name)?;
        let from = self.items[index].name().clone();
        if from == to {
            return Ok(ItemRenamed::Unchanged { item_id: id });
        }

        self.items[index].set_name(to.clone());
        Ok(ItemRenamed::Renamed {
            item_id: id,
            from,
            to,
        })
    }

    /// Change the number of rows, clamped into `[1, max_rows]`.
    ///
    /// Under [`RowShrinkPolicy::Strand`] items are never moved; the outcome
    /// lists the ones left below the last row. Under
    /// [`RowShrinkPolicy::ClampToContents`] the row count stops at the lowest
    /// occupied row.
    pub fn set_row_count(&mut self, rows: u32) -> RowCountChanged {
        let mut target = self.limits.clamp_rows(rows);
        if self.shrink_policy == RowShrinkPolicy::ClampToContents {
            let lowest = self
                .items
                .iter()
                .map(|item| item.footprint().bottom())
                .max()
                .unwrap_or(1);
            target = target.max(self.limits.clamp_rows(lowest));
        }

        let from = self.rows;
        if target == from {
            return RowCountChanged::Unchanged { rows: from };
        }

        self.rows = target;
        RowCountChanged::Changed {
            from,
            to: target,
            stranded: self.stranded_items(),
        }
    }

    /// Give every ownerless item an owner, returning the ids that changed.
    pub fn assign_owner(&mut self, owner_id: CharacterId) -> Vec<ItemId> {
        self.items
            .iter_mut()
            .filter(|item| item.owner_id().is_none())
            .map(|item| {
                item.set_owner(Some(owner_id));
                item.id()
            })
            .collect()
    }
}

fn step_clamped(current: u32, delta: i32, max: u32) -> u32 {
    let stepped = i64::from(current) + i64::from(delta);
    stepped.clamp(1, i64::from(max.max(1))) as u32
}
