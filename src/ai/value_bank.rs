use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use crate::game::Game;

/// Value assigned to a state the first time it is seen.
pub const DEFAULT_VALUE: f64 = 0.5;

// Credit-assignment schedule: the most recent move of an episode is adjusted
// by ADJUST_START, decaying linearly to ADJUST_END at the oldest move.
const ADJUST_START: f64 = 0.80;
const ADJUST_END: f64 = 0.20;

/// Bank of discovered states and their learned desirability, plus the move
/// stack of the episode in progress. Values start at [`DEFAULT_VALUE`] and
/// live in [0, 1] up to floating rounding; states are never evicted.
pub struct ValueBank<G: Game> {
    values: HashMap<G, f64>,
    moves: Vec<G>,
    explore_rate: f64,
}

impl<G: Game> ValueBank<G> {
    pub fn new() -> Self {
        ValueBank {
            values: HashMap::new(),
            moves: Vec::new(),
            explore_rate: 0.0,
        }
    }

    /// Explore/exploit policy over a candidate successor set. Candidates are
    /// scanned in order, registering unseen states at the default value; the
    /// highest-valued state wins, first seen winning ties. With probability
    /// `explore_rate` the pick is overridden by a uniformly random candidate.
    /// The chosen state is pushed onto the move stack.
    ///
    /// # Panics
    ///
    /// Panics on an empty candidate list. The board engines never produce
    /// one for a caller: a blocked mover resolves through
    /// [`Game::blocked_outcome`] before any choice is made.
    pub fn choose_successor(&mut self, candidates: &[G], rng: &mut StdRng) -> G {
        assert!(
            !candidates.is_empty(),
            "choose_successor requires at least one candidate"
        );

        let mut best: Option<usize> = None;
        let mut best_value = 0.0;

        for (idx, state) in candidates.iter().enumerate() {
            let value = *self
                .values
                .entry(state.clone())
                .or_insert(DEFAULT_VALUE);
            if value > best_value {
                best = Some(idx);
                best_value = value;
            }
        }

        let mut chosen = best.unwrap_or(0);

        if rng.random_range(0.0..1.0) < self.explore_rate {
            chosen = rng.random_range(0..candidates.len());
        }

        let state = candidates[chosen].clone();
        self.moves.push(state.clone());
        state
    }

    /// Propagate a win back across the episode: pop the move stack from the
    /// most recent state to the oldest, nudging each value toward 1.0 by a
    /// linearly decaying fraction of the remaining headroom.
    pub fn reward(&mut self) {
        let n = self.moves.len();
        if n == 0 {
            return;
        }
        let step = (ADJUST_START - ADJUST_END) / n as f64;
        let mut pct = ADJUST_START;

        while let Some(state) = self.moves.pop() {
            let value = self.values.entry(state).or_insert(DEFAULT_VALUE);
            *value += (1.0 - *value) * pct;
            pct -= step;
        }
    }

    /// Mirror of [`ValueBank::reward`] for a loss: each popped value shrinks
    /// toward 0.0 on the same decaying schedule.
    pub fn penalize(&mut self) {
        let n = self.moves.len();
        if n == 0 {
            return;
        }
        let step = (ADJUST_START - ADJUST_END) / n as f64;
        let mut pct = ADJUST_START;

        while let Some(state) = self.moves.pop() {
            let value = self.values.entry(state).or_insert(DEFAULT_VALUE);
            *value -= *value * pct;
            pct -= step;
        }
    }

    /// Drop the episode's moves without touching any value (drawn episode).
    pub fn discard(&mut self) {
        self.moves.clear();
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    pub fn set_explore_rate(&mut self, rate: f64) {
        self.explore_rate = rate;
    }

    /// Number of discovered states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Depth of the in-progress episode's move stack.
    pub fn pending_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn value_of(&self, state: &G) -> Option<f64> {
        self.values.get(state).copied()
    }

    /// Iterate over every discovered state and its value, for export.
    pub fn entries(&self) -> impl Iterator<Item = (&G, f64)> + '_ {
        self.values.iter().map(|(state, &value)| (state, value))
    }

    /// Replace the table wholesale with imported entries. The move stack is
    /// cleared: an import never happens mid-episode.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = (G, f64)>) {
        self.values = entries.into_iter().collect();
        self.moves.clear();
    }
}

impl<G: Game> Default for ValueBank<G> {
    fn default() -> Self {
        Self::new()
    }
}
