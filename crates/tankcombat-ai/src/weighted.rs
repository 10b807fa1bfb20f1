//! Weighted random state selection.

use rand::seq::SliceRandom;
use rand::Rng;

use tankcombat_core::constants::{AI_WEIGHTS_HIDDEN, AI_WEIGHTS_VISIBLE};
use tankcombat_core::enums::AiState;

const STATES: [AiState; 3] = [AiState::Patrol, AiState::Attack, AiState::Retreat];

/// Pick one of `items` with probability proportional to its weight.
///
/// Returns `None` if `items` and `weights` differ in length, the slice is
/// empty, or no weight is positive.
pub fn choose_weighted<'a, T, R>(items: &'a [T], weights: &[f64], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if items.len() != weights.len() {
        return None;
    }
    let indices: Vec<usize> = (0..items.len()).collect();
    indices
        .choose_weighted(rng, |&i| weights[i].max(0.0))
        .ok()
        .map(|&i| &items[i])
}

/// Next behavior state. Attack is favoured while the target is visible,
/// Patrol otherwise.
pub fn choose_state<R: Rng + ?Sized>(target_visible: bool, rng: &mut R) -> AiState {
    let weights = if target_visible {
        AI_WEIGHTS_VISIBLE
    } else {
        AI_WEIGHTS_HIDDEN
    };
    choose_weighted(&STATES, &weights, rng)
        .copied()
        .unwrap_or(AiState::Patrol)
}
