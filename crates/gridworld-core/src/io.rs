use std::{fs, io, path::Path};

use crate::{ActionId, ConfigError, GridSpec, StateId, TransitionTable};

/// Load a grid spec from YAML on disk and validate it.
pub fn load_grid_yaml(path: impl AsRef<Path>) -> Result<GridSpec, ConfigError> {
    let yaml = fs::read_to_string(path)?;
    GridSpec::from_yaml_str(&yaml)
}

/// Load a grid spec from YAML and derive its transition table.
pub fn build_table_yaml(path: impl AsRef<Path>) -> Result<TransitionTable, ConfigError> {
    load_grid_yaml(path)?.build_table()
}

/// Serialize and write a grid spec to YAML.
pub fn save_grid_yaml(path: impl AsRef<Path>, spec: &GridSpec) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Row order of the transition block in an exported table.
pub enum TableLayout {
    /// One block per state, each listing every action in index order.
    StateMajor,
    /// One block per action in the given order, each listing every state.
    ActionMajor(Vec<ActionId>),
}

impl TableLayout {
    /// Action-major layout with actions looked up by name.
    pub fn action_major(table: &TransitionTable, names: &[&str]) -> Result<Self, ConfigError> {
        let order = names
            .iter()
            .map(|name| {
                table
                    .actions()
                    .find(|&action| table.action_name(action) == Some(*name))
                    .ok_or_else(|| ConfigError::UnknownAction {
                        action: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableLayout::ActionMajor(order))
    }
}

/// Render a table in the text format read by external solvers.
///
/// The first line holds the state count including the absorbing state,
/// followed by one entry reward per state, followed by one line per
/// `(state, action)` pair with the full next-state distribution.
pub fn render_table(table: &TransitionTable, layout: &TableLayout) -> Result<String, ConfigError> {
    let mut out = String::new();
    out.push_str(&format!("{}\n", table.state_count()));
    for reward in table.rewards() {
        out.push_str(&format!("{reward:.1}\n"));
    }

    match layout {
        TableLayout::StateMajor => {
            for state in table.states() {
                for action in table.actions() {
                    push_row(&mut out, table, state, action)?;
                }
            }
        }
        TableLayout::ActionMajor(order) => {
            for &action in order {
                for state in table.states() {
                    push_row(&mut out, table, state, action)?;
                }
            }
        }
    }

    Ok(out)
}

fn push_row(
    out: &mut String,
    table: &TransitionTable,
    state: StateId,
    action: ActionId,
) -> Result<(), ConfigError> {
    let distribution = table
        .distribution(state, action)
        .ok_or_else(|| ConfigError::UnknownAction {
            action: action.index().to_string(),
        })?;
    let line = distribution
        .iter()
        .map(|p| format!("{p:.2}"))
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&line);
    out.push('\n');
    Ok(())
}

/// Write a rendered table to any byte sink.
pub fn write_table<W: io::Write>(
    writer: &mut W,
    table: &TransitionTable,
    layout: &TableLayout,
) -> Result<(), ConfigError> {
    let text = render_table(table, layout)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
