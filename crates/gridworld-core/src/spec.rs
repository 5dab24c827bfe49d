use serde::{Deserialize, Serialize};

use crate::{
    ActionSet, ConfigError, Coordinate, Delta, GridModel, TransitionBuilder, TransitionTable,
};

const REFERENCE_GRID_YAML: &str = include_str!("../config/reference_grid.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serializable grid world schema used for YAML IO and validation.
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    /// Blocked cells. They have no state and moves into them leave the agent in place.
    #[serde(default)]
    pub obstacles: Vec<Coordinate>,
    /// Reward for entering each cell, row-major. Entries on obstacles are ignored.
    pub rewards: Vec<Vec<f64>>,
    pub goal: Coordinate,
    #[serde(default)]
    pub negative_terminals: Vec<Coordinate>,
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A named action and its movement outcome distribution.
pub struct ActionSpec {
    pub name: String,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One possible movement effect of an action.
pub struct OutcomeSpec {
    /// Human-readable name such as `success` or `veer_left`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub delta: Delta,
    pub prob: f64,
}

impl GridSpec {
    /// Return the YAML text of the reference 5x5 grid bundled with this crate.
    pub fn reference_yaml() -> &'static str {
        REFERENCE_GRID_YAML
    }

    /// Parse and validate the reference grid.
    pub fn reference() -> Result<Self, ConfigError> {
        Self::from_yaml_str(REFERENCE_GRID_YAML)
    }

    /// Parse a grid spec from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let spec: GridSpec = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Validate grid geometry, rewards, terminals and outcome probabilities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        GridModel::new(self)?;
        ActionSet::from_specs(&self.actions)?;
        Ok(())
    }

    /// Build the grid model and action set described by this spec.
    pub fn model(&self) -> Result<(GridModel, ActionSet), ConfigError> {
        Ok((GridModel::new(self)?, ActionSet::from_specs(&self.actions)?))
    }

    /// Validate this spec and derive its transition table.
    pub fn build_table(&self) -> Result<TransitionTable, ConfigError> {
        let (grid, actions) = self.model()?;
        Ok(TransitionBuilder::new(&grid, &actions).build())
    }
}
