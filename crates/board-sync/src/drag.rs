//! Drag Movement
//!
//! Moves the dragged card around the displayed board while the pointer is
//! still down. Nothing here talks to the remote.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::error::DragError;
use crate::item::BoardItem;

/// What the pointer is currently over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget<Id> {
    /// Empty area of a column (by key)
    Column(String),
    /// Another card; `below_midpoint` is true when the pointer is below the
    /// hovered card's vertical midpoint
    Item { id: Id, below_midpoint: bool },
}

/// Drag in progress
#[derive(Debug, Clone)]
pub(crate) struct ActiveDrag<Id> {
    pub id: Id,
    pub origin_column: usize,
    pub origin_index: usize,
    pub origin_status: String,
}

/// Place the dragged card according to the hover target.
///
/// The card is lifted out first and the insertion point is computed on the
/// remaining cards, so hovering the same target again yields the same board.
pub(crate) fn apply_hover<T: BoardItem>(
    board: &mut Board<T>,
    config: &BoardConfig,
    dragged: T::Id,
    target: &HoverTarget<T::Id>,
) -> Result<(), DragError> {
    if board.locate(dragged).is_none() {
        return Err(DragError::UnknownItem(format!("{dragged:?}")));
    }

    match target {
        HoverTarget::Column(key) => {
            let col = config
                .column_index(key)
                .ok_or_else(|| DragError::UnknownColumn(key.clone()))?;
            if let Some((from, _, mut item)) = board.take(dragged) {
                if from != col {
                    item.set_status(key);
                }
                board.insert(col, usize::MAX, item);
            }
        }
        HoverTarget::Item { id, below_midpoint } => {
            if *id == dragged {
                return Ok(());
            }
            if board.locate(*id).is_none() {
                return Err(DragError::UnknownItem(format!("{id:?}")));
            }
            if let Some((from, _, mut item)) = board.take(dragged) {
                // Located again: lifting the dragged card may shift the target
                if let Some((col, pos)) = board.locate(*id) {
                    if from != col {
                        let key = board.columns()[col].key.clone();
                        item.set_status(&key);
                    }
                    board.insert(col, pos + usize::from(*below_midpoint), item);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnDef;
    use crate::tests::card;

    fn config() -> BoardConfig {
        BoardConfig::new(
            "tasks",
            vec![
                ColumnDef::new("TODO", "To Do", "#3b82f6"),
                ColumnDef::new("DONE", "Done", "#22c55e"),
            ],
            "TODO",
        )
        .unwrap()
    }

    #[test]
    fn test_hover_item_above_and_below_midpoint() {
        let config = config();
        let items = [card(1, "TODO"), card(2, "DONE"), card(3, "DONE")];

        let mut board = Board::group(&config, &items);
        let above = HoverTarget::Item { id: 3, below_midpoint: false };
        apply_hover(&mut board, &config, 1, &above).unwrap();
        assert_eq!(board.ids("DONE"), vec![2, 1, 3]);

        let mut board = Board::group(&config, &items);
        let below = HoverTarget::Item { id: 3, below_midpoint: true };
        apply_hover(&mut board, &config, 1, &below).unwrap();
        assert_eq!(board.ids("DONE"), vec![2, 3, 1]);
        assert_eq!(board.get(1).unwrap().status, "DONE");
    }

    #[test]
    fn test_hover_column_appends() {
        let config = config();
        let mut board = Board::group(&config, &[card(1, "TODO"), card(2, "DONE")]);
        apply_hover(&mut board, &config, 1, &HoverTarget::Column("DONE".into())).unwrap();
        assert_eq!(board.ids("TODO"), Vec::<u32>::new());
        assert_eq!(board.ids("DONE"), vec![2, 1]);
    }

    #[test]
    fn test_hover_is_idempotent() {
        let config = config();
        let items = [card(1, "TODO"), card(2, "TODO"), card(3, "DONE"), card(4, "DONE")];
        let targets = [
            HoverTarget::Column("DONE".to_string()),
            HoverTarget::Item { id: 3, below_midpoint: true },
            HoverTarget::Item { id: 2, below_midpoint: false },
            HoverTarget::Item { id: 1, below_midpoint: false },
        ];

        for target in &targets {
            let mut once = Board::group(&config, &items);
            apply_hover(&mut once, &config, 1, target).unwrap();

            let mut twice = once.clone();
            apply_hover(&mut twice, &config, 1, target).unwrap();
            assert_eq!(once, twice, "target {target:?}");
        }
    }

    #[test]
    fn test_reorder_within_column() {
        let config = config();
        let mut board = Board::group(&config, &[card(1, "TODO"), card(2, "TODO"), card(3, "TODO")]);
        let target = HoverTarget::Item { id: 3, below_midpoint: true };
        apply_hover(&mut board, &config, 1, &target).unwrap();
        assert_eq!(board.ids("TODO"), vec![2, 3, 1]);
    }

    #[test]
    fn test_unknown_targets_leave_board_untouched() {
        let config = config();
        let mut board = Board::group(&config, &[card(1, "TODO")]);
        let before = board.clone();

        let err = apply_hover(&mut board, &config, 1, &HoverTarget::Column("LATER".into()));
        assert_eq!(err, Err(DragError::UnknownColumn("LATER".into())));

        let err = apply_hover(&mut board, &config, 1, &HoverTarget::Item { id: 7, below_midpoint: false });
        assert_eq!(err, Err(DragError::UnknownItem("7".into())));

        let err = apply_hover(&mut board, &config, 9, &HoverTarget::Column("DONE".into()));
        assert_eq!(err, Err(DragError::UnknownItem("9".into())));

        assert_eq!(board, before);
    }
}
