use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for grid loading, validation and transition table construction.
pub enum ConfigError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid of {rows}x{cols} cells is too large to index")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("reward matrix must have {expected} rows, got {got}")]
    RewardRowCount { expected: usize, got: usize },

    #[error("reward row {row} must have {expected} entries, got {got}")]
    RewardRowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid reward at ({row}, {col}): {value}")]
    InvalidReward { row: usize, col: usize, value: f64 },

    #[error("obstacle ({row}, {col}) lies outside the {rows}x{cols} grid")]
    ObstacleOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("obstacle ({row}, {col}) is listed more than once")]
    DuplicateObstacle { row: usize, col: usize },

    #[error("{role} ({row}, {col}) lies outside the {rows}x{cols} grid")]
    TerminalOutOfBounds {
        role: &'static str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{role} ({row}, {col}) coincides with an obstacle")]
    TerminalOnObstacle {
        role: &'static str,
        row: usize,
        col: usize,
    },

    #[error("negative terminal ({row}, {col}) coincides with the goal or another terminal")]
    DuplicateTerminal { row: usize, col: usize },

    #[error("action set must contain at least one action")]
    NoActions,

    #[error("duplicate action name '{action}'")]
    DuplicateAction { action: String },

    #[error("action '{action}' must contain at least one outcome")]
    EmptyOutcomes { action: String },

    #[error("invalid probability in action '{action}', outcome {outcome_index}: {value}")]
    InvalidProbability {
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error(
        "probability sum for action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("unknown action '{action}'")]
    UnknownAction { action: String },
}
