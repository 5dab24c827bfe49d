use std::collections::HashSet;

use crate::{ConfigError, Coordinate, Delta, GridSpec, StateId};

/// Reward reported for blocked or off-grid cells. Only used to tell legal
/// cells apart; no state ever carries it.
pub const OBSTACLE_REWARD: f64 = -100_000.0;

#[derive(Debug, Clone, PartialEq)]
/// Coordinate system, reward lookup and state enumeration for one grid.
///
/// Live states are numbered from 1 in row-major order, skipping obstacles.
pub struct GridModel {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    rewards: Vec<f64>,
    state_to_coordinate: Vec<Coordinate>,
    coordinate_to_state: Vec<Option<StateId>>,
    goal: StateId,
    negative_terminals: Vec<StateId>,
}

impl GridModel {
    /// Validate a spec's geometry and rewards and enumerate its states.
    pub fn new(spec: &GridSpec) -> Result<Self, ConfigError> {
        let (rows, cols) = (spec.rows, spec.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        let cells = rows
            .checked_mul(cols)
            .ok_or(ConfigError::GridTooLarge { rows, cols })?;

        let mut blocked = vec![false; cells];
        for obstacle in &spec.obstacles {
            if obstacle.row >= rows || obstacle.col >= cols {
                return Err(ConfigError::ObstacleOutOfBounds {
                    row: obstacle.row,
                    col: obstacle.col,
                    rows,
                    cols,
                });
            }
            let cell = &mut blocked[obstacle.row * cols + obstacle.col];
            if *cell {
                return Err(ConfigError::DuplicateObstacle {
                    row: obstacle.row,
                    col: obstacle.col,
                });
            }
            *cell = true;
        }

        if spec.rewards.len() != rows {
            return Err(ConfigError::RewardRowCount {
                expected: rows,
                got: spec.rewards.len(),
            });
        }
        let mut rewards = Vec::with_capacity(cells);
        for (row, values) in spec.rewards.iter().enumerate() {
            if values.len() != cols {
                return Err(ConfigError::RewardRowLength {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if blocked[row * cols + col] {
                    rewards.push(OBSTACLE_REWARD);
                    continue;
                }
                if !value.is_finite() {
                    return Err(ConfigError::InvalidReward { row, col, value });
                }
                rewards.push(value);
            }
        }

        let mut state_to_coordinate = Vec::new();
        let mut coordinate_to_state = vec![None; cells];
        for row in 0..rows {
            for col in 0..cols {
                let cell = row * cols + col;
                if blocked[cell] {
                    continue;
                }
                state_to_coordinate.push(Coordinate::new(row, col));
                coordinate_to_state[cell] = Some(StateId::from(state_to_coordinate.len()));
            }
        }

        let mut model = GridModel {
            rows,
            cols,
            blocked,
            rewards,
            state_to_coordinate,
            coordinate_to_state,
            goal: StateId::from(0),
            negative_terminals: Vec::with_capacity(spec.negative_terminals.len()),
        };

        model.goal = model.terminal_state("goal", spec.goal)?;

        let mut seen = HashSet::from([model.goal]);
        for &coordinate in &spec.negative_terminals {
            let state = model.terminal_state("negative terminal", coordinate)?;
            if !seen.insert(state) {
                return Err(ConfigError::DuplicateTerminal {
                    row: coordinate.row,
                    col: coordinate.col,
                });
            }
            model.negative_terminals.push(state);
        }

        Ok(model)
    }

    fn terminal_state(
        &self,
        role: &'static str,
        coordinate: Coordinate,
    ) -> Result<StateId, ConfigError> {
        if !self.in_bounds(coordinate) {
            return Err(ConfigError::TerminalOutOfBounds {
                role,
                row: coordinate.row,
                col: coordinate.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.state_of(coordinate)
            .ok_or(ConfigError::TerminalOnObstacle {
                role,
                row: coordinate.row,
                col: coordinate.col,
            })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of live states, excluding the absorbing state.
    pub fn state_count(&self) -> usize {
        self.state_to_coordinate.len()
    }

    /// The sink state appended after the live states.
    pub fn absorbing_state(&self) -> StateId {
        StateId::from(self.state_count() + 1)
    }

    pub fn goal_state(&self) -> StateId {
        self.goal
    }

    pub fn negative_terminal_states(&self) -> &[StateId] {
        &self.negative_terminals
    }

    /// Goal followed by every negative terminal.
    pub fn terminal_states(&self) -> Vec<StateId> {
        let mut states = Vec::with_capacity(1 + self.negative_terminals.len());
        states.push(self.goal);
        states.extend_from_slice(&self.negative_terminals);
        states
    }

    pub fn is_terminal(&self, state: StateId) -> bool {
        state == self.goal || self.negative_terminals.contains(&state)
    }

    /// Iterate over live states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (1..=self.state_count()).map(StateId::from)
    }

    pub fn coordinate_of(&self, state: StateId) -> Option<Coordinate> {
        self.state_to_coordinate.get(state.slot()?).copied()
    }

    pub fn state_of(&self, coordinate: Coordinate) -> Option<StateId> {
        if !self.in_bounds(coordinate) {
            return None;
        }
        self.coordinate_to_state[self.cell(coordinate)]
    }

    /// Configured reward for entering a cell, or [`OBSTACLE_REWARD`] if the cell is not legal.
    pub fn reward_at(&self, coordinate: Coordinate) -> f64 {
        if !self.in_bounds(coordinate) {
            return OBSTACLE_REWARD;
        }
        self.rewards[self.cell(coordinate)]
    }

    /// Reward for entering a state. The absorbing state pays nothing.
    pub fn state_reward(&self, state: StateId) -> f64 {
        self.coordinate_of(state)
            .map_or(0.0, |coordinate| self.reward_at(coordinate))
    }

    /// Whether the agent may occupy a cell.
    pub fn is_legal(&self, coordinate: Coordinate) -> bool {
        self.in_bounds(coordinate) && !self.blocked[self.cell(coordinate)]
    }

    /// Destination of a move, or `None` if it would leave the grid or hit an obstacle.
    pub fn step(&self, from: Coordinate, delta: Delta) -> Option<Coordinate> {
        from.offset(delta).filter(|&to| self.is_legal(to))
    }

    fn in_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.rows && coordinate.col < self.cols
    }

    fn cell(&self, coordinate: Coordinate) -> usize {
        coordinate.row * self.cols + coordinate.col
    }
}
