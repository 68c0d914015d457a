//! Board Grouping
//!
//! A board is the item list grouped into configured columns by status.

use std::collections::HashSet;

use crate::config::BoardConfig;
use crate::item::BoardItem;

/// One status column and the items currently shown in it
#[derive(Debug, Clone, PartialEq)]
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub color: String,
    pub items: Vec<T>,
}

/// All columns for one entity type, in configured order
#[derive(Debug, Clone, PartialEq)]
pub struct Board<T> {
    columns: Vec<Column<T>>,
}

impl<T: BoardItem> Board<T> {
    /// Board with every configured column and no items
    pub fn empty(config: &BoardConfig) -> Self {
        let columns = config
            .columns()
            .iter()
            .map(|def| Column {
                key: def.key.clone(),
                title: def.title.clone(),
                color: def.color.clone(),
                items: Vec::new(),
            })
            .collect();
        Self { columns }
    }

    /// Group items by status, keeping list order within each column.
    ///
    /// If the list repeats an id, only the first occurrence is placed.
    pub fn group(config: &BoardConfig, items: &[T]) -> Self {
        let mut board = Self::empty(config);
        let mut seen = HashSet::new();
        for item in items {
            if !seen.insert(item.id()) {
                continue;
            }
            let index = config.resolve_status(item.status());
            board.columns[index].items.push(item.clone());
        }
        board
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// (column index, position) of an item
    pub fn locate(&self, id: T::Id) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, column)| {
            column
                .items
                .iter()
                .position(|item| item.id() == id)
                .map(|pos| (col, pos))
        })
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.locate(id).map(|(col, pos)| &self.columns[col].items[pos])
    }

    /// Ids in a column, in display order
    pub fn ids(&self, key: &str) -> Vec<T::Id> {
        self.column(key)
            .map(|c| c.items.iter().map(BoardItem::id).collect())
            .unwrap_or_default()
    }

    /// Total number of items across all columns
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.items.is_empty())
    }

    pub(crate) fn take(&mut self, id: T::Id) -> Option<(usize, usize, T)> {
        let (col, pos) = self.locate(id)?;
        let item = self.columns[col].items.remove(pos);
        Some((col, pos, item))
    }

    /// Insert at `pos`, clamped to the column length
    pub(crate) fn insert(&mut self, col: usize, pos: usize, item: T) {
        let items = &mut self.columns[col].items;
        let pos = pos.min(items.len());
        items.insert(pos, item);
    }

    /// Move an item to the end of a column and give it that column's status.
    /// Returns false if the item is not on the board.
    pub(crate) fn move_to_end(&mut self, id: T::Id, col: usize) -> bool {
        match self.take(id) {
            Some((_, _, mut item)) => {
                item.set_status(&self.columns[col].key);
                self.columns[col].items.push(item);
                true
            }
            None => false,
        }
    }
}
