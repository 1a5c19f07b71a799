//! The per-category lists of entry rows that the user builds before submitting.

use crate::model::{Category, Kind};
use crate::Result;
use anyhow::{bail, Context};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// Identifies a row for as long as the `EntryLists` it came from lives. Ids are never reused, so a
/// stale id simply stops resolving once its row is removed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowId(u64);

impl RowId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RowId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let id = s.trim_start_matches('#');
        id.parse::<u64>()
            .map(RowId)
            .with_context(|| format!("'{s}' is not a row id"))
    }
}

/// One user-added record within a category. `quantity` holds the text exactly as it was entered;
/// it is only parsed and validated when the lists are submitted.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntryRow {
    id: RowId,
    kind: Kind,
    quantity: String,
}

impl EntryRow {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }
}

/// The rows of all three categories, each list kept in insertion order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntryLists {
    transport: Vec<EntryRow>,
    food: Vec<EntryRow>,
    energy: Vec<EntryRow>,
    next_id: u64,
}

impl Default for EntryLists {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryLists {
    /// The startup state of the form: exactly one empty row in each category.
    pub fn new() -> Self {
        let mut lists = Self::empty();
        for category in Category::ALL {
            lists.add_row(category);
        }
        lists
    }

    /// No rows at all.
    pub fn empty() -> Self {
        Self {
            transport: Vec::new(),
            food: Vec::new(),
            energy: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a row with the default kind of `category` and an empty quantity.
    pub fn add_row(&mut self, category: Category) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.list_mut(category).push(EntryRow {
            id,
            kind: Kind::default_for(category),
            quantity: String::new(),
        });
        debug!("Added {category} row {id}");
        id
    }

    /// Adds a row and fills in both of its fields.
    pub fn push(&mut self, kind: Kind, quantity: impl Into<String>) -> RowId {
        let id = self.add_row(kind.category());
        let quantity = quantity.into();
        if let Some(row) = self.row_mut(id) {
            row.kind = kind;
            row.quantity = quantity;
        }
        id
    }

    /// Removes the row with `id`, leaving every other row as it was. Returns `false`, and changes
    /// nothing, when no row has that id.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        for category in Category::ALL {
            let list = self.list_mut(category);
            if let Some(ix) = list.iter().position(|row| row.id == id) {
                let _ = list.remove(ix);
                debug!("Removed {category} row {id}");
                return true;
            }
        }
        false
    }

    /// The current rows of `category`, in insertion order.
    pub fn list_rows(&self, category: Category) -> &[EntryRow] {
        match category {
            Category::Transport => &self.transport,
            Category::Food => &self.food,
            Category::Energy => &self.energy,
        }
    }

    pub fn get(&self, id: RowId) -> Option<&EntryRow> {
        self.rows().find(|row| row.id == id)
    }

    /// Every row, category by category.
    pub fn rows(&self) -> impl Iterator<Item = &EntryRow> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.list_rows(c).iter())
    }

    pub fn len(&self) -> usize {
        self.transport.len() + self.food.len() + self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes the kind of a row. The kind must belong to the row's category.
    pub fn set_kind(&mut self, id: RowId, kind: Kind) -> Result<()> {
        let row = self.row_mut(id).with_context(|| format!("There is no row {id}"))?;
        if row.kind.category() != kind.category() {
            bail!(
                "Row {id} is a {} row, '{kind}' is a {} kind",
                row.kind.category(),
                kind.category()
            );
        }
        row.kind = kind;
        debug!("Set kind of row {id} to {kind}");
        Ok(())
    }

    /// Replaces the quantity text of a row.
    pub fn set_quantity(&mut self, id: RowId, quantity: impl Into<String>) -> Result<()> {
        let row = self.row_mut(id).with_context(|| format!("There is no row {id}"))?;
        row.quantity = quantity.into();
        debug!("Set quantity of row {id} to '{}'", row.quantity);
        Ok(())
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<EntryRow> {
        match category {
            Category::Transport => &mut self.transport,
            Category::Food => &mut self.food,
            Category::Energy => &mut self.energy,
        }
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut EntryRow> {
        self.transport
            .iter_mut()
            .chain(self.food.iter_mut())
            .chain(self.energy.iter_mut())
            .find(|row| row.id == id)
    }
}
