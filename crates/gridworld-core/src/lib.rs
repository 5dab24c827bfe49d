mod action;
mod error;
mod grid;
mod ids;
mod io;
mod spec;
mod transition;

#[cfg(test)]
mod tests;

pub use action::{ActionModel, ActionSet, Outcome};
pub use error::ConfigError;
pub use grid::{GridModel, OBSTACLE_REWARD};
pub use ids::{ActionId, Coordinate, Delta, StateId};
pub use io::{
    TableLayout, build_table_yaml, load_grid_yaml, render_table, save_grid_yaml, write_table,
};
pub use spec::{ActionSpec, GridSpec, OutcomeSpec};
pub use transition::{PROB_TOLERANCE, TransitionBuilder, TransitionTable};
