use gridworld_core::{StateId, TransitionTable};

use crate::{Policy, SimError, StartDistribution};

fn slot(state: StateId) -> usize {
    state.value() - 1
}

/// Reject `(policy, start)` pairs under which an episode may never be absorbed.
///
/// In a finite chain absorption is almost sure iff every state reachable
/// from the start support can itself reach the absorbing state.
pub(crate) fn check_termination(
    table: &TransitionTable,
    policy: &Policy,
    start: &StartDistribution,
) -> Result<(), SimError> {
    let state_count = table.state_count();
    let absorbing = table.absorbing_state();

    let mut exits = vec![false; state_count];
    exits[slot(absorbing)] = true;
    let mut changed = true;
    while changed {
        changed = false;
        for state in table.states() {
            if exits[slot(state)] {
                continue;
            }
            let reaches = policy.support(state).into_iter().any(|action| {
                table.distribution(state, action).is_some_and(|row| {
                    row.iter()
                        .zip(&exits)
                        .any(|(p, exits)| *p > 0.0 && *exits)
                })
            });
            if reaches {
                exits[slot(state)] = true;
                changed = true;
            }
        }
    }

    let mut seen = vec![false; state_count];
    let mut frontier: Vec<StateId> = start.support().collect();
    for state in &frontier {
        seen[slot(*state)] = true;
    }
    while let Some(state) = frontier.pop() {
        if !exits[slot(state)] {
            return Err(SimError::NonTerminating {
                state: state.value(),
            });
        }
        if state == absorbing {
            continue;
        }
        for action in policy.support(state) {
            let Some(row) = table.distribution(state, action) else {
                continue;
            };
            for (next, p) in row.iter().enumerate() {
                if *p > 0.0 && !seen[next] {
                    seen[next] = true;
                    frontier.push(StateId::from(next + 1));
                }
            }
        }
    }

    Ok(())
}
