//! UI Components
//!
//! Board chrome and the generic kanban board.

mod board_card;
mod board_column;
mod board_tab_bar;
mod kanban_board;
mod notice_bar;

pub use board_tab_bar::BoardTabBar;
pub use kanban_board::{LeadBoard, TaskBoard, TicketBoard};
