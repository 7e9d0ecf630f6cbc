//! Text views of a session: the board grid, each player's path, and how
//! often each square was landed on.

mod layout;
mod render;

pub use layout::{cell_to_square, square_to_cell};
pub use render::{landing_frequency, player_paths, render_board, render_heatmap, render_paths};
