use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::Game;

use super::value_bank::ValueBank;

/// A learning player: a value bank, the generator behind its explore rolls,
/// and running win/loss/draw tallies.
///
/// The generator is created once, at construction, and threaded through every
/// policy decision; per-call reseeding would correlate successive rolls.
pub struct Agent<G: Game> {
    bank: ValueBank<G>,
    rng: StdRng,
    wins: u64,
    losses: u64,
    draws: u64,
}

impl<G: Game> Agent<G> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Agent with a reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Agent {
            bank: ValueBank::new(),
            rng,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Pick one successor from `candidates` under the current explore rate
    /// and record it on the episode's move stack. One call per ply.
    pub fn act(&mut self, candidates: &[G]) -> G {
        self.bank.choose_successor(candidates, &mut self.rng)
    }

    pub fn set_explore_rate(&mut self, rate: f64) {
        self.bank.set_explore_rate(rate);
    }

    /// The episode ended in this agent's favor: reward the visited states.
    pub fn record_win(&mut self) {
        self.wins += 1;
        self.bank.reward();
    }

    /// The episode was lost: penalize the visited states.
    pub fn record_loss(&mut self) {
        self.losses += 1;
        self.bank.penalize();
    }

    /// The episode was drawn: drop the move stack, values untouched.
    pub fn record_draw(&mut self) {
        self.draws += 1;
        self.bank.discard();
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn bank(&self) -> &ValueBank<G> {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut ValueBank<G> {
        &mut self.bank
    }
}

impl<G: Game> Default for Agent<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Side, TicTacToeBoard};

    #[test]
    fn test_act_selects_from_candidates() {
        let mut agent: Agent<TicTacToeBoard> = Agent::seeded(11);
        let cands = TicTacToeBoard::initial().successors(Side::First);
        let chosen = agent.act(&cands);
        assert!(cands.contains(&chosen));
        assert_eq!(agent.bank().pending_moves(), 1);
    }

    #[test]
    fn test_outcomes_update_tallies_and_drain_the_stack() {
        let mut agent: Agent<TicTacToeBoard> = Agent::seeded(11);
        let cands = TicTacToeBoard::initial().successors(Side::First);

        agent.act(&cands);
        agent.record_win();
        agent.act(&cands);
        agent.record_loss();
        agent.act(&cands);
        agent.record_draw();

        assert_eq!(agent.wins(), 1);
        assert_eq!(agent.losses(), 1);
        assert_eq!(agent.draws(), 1);
        assert_eq!(agent.bank().pending_moves(), 0);
    }

    #[test]
    fn test_seeded_agents_replay_identically() {
        let cands = TicTacToeBoard::initial().successors(Side::First);

        let mut a: Agent<TicTacToeBoard> = Agent::seeded(42);
        let mut b: Agent<TicTacToeBoard> = Agent::seeded(42);
        a.set_explore_rate(1.0);
        b.set_explore_rate(1.0);

        for _ in 0..10 {
            assert_eq!(a.act(&cands), b.act(&cands));
        }
    }
}
