use crate::ai::Agent;
use crate::game::{Game, GameOutcome, Side};
use crate::training::metrics::{EpisodeResult, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Practice games to play before switching to competitive mode.
    pub num_episodes: usize,
    pub log_interval: usize,
    /// Seed for the agents' random generators; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 10_000,
            log_interval: 100,
            seed: None,
        }
    }
}

/// Self-play trainer. Two agents alternate turns; episode outcomes feed each
/// agent's credit assignment, and the shared explore rate is annealed toward
/// exploitation as training progresses.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training loop. `first` plays `Side::First`. Both agents
    /// finish in competitive mode (explore rate 0).
    pub fn train<G: Game>(
        &self,
        first: &mut Agent<G>,
        second: &mut Agent<G>,
        show_output: bool,
    ) -> TrainingMetrics {
        let target = self.config.num_episodes;
        let mut metrics = TrainingMetrics::new();

        first.set_explore_rate(1.0);
        second.set_explore_rate(1.0);

        if show_output {
            println!("Training {} for {} practice games...", G::NAME, target);
            println!("-------------------------------------------");
        }

        let mut board = G::initial();
        let mut mover = Side::First;
        let mut ply = 0usize;
        let mut quarters_applied = 0usize;

        while Self::completed_episodes(first, second) < target {
            let successors = board.successors(mover);

            // An empty successor set is the blocked-mover signal, not an
            // error: the game resolves through the game's blocked outcome.
            let (outcome, by_forfeit) = if successors.is_empty() {
                (Some(G::blocked_outcome(mover)), true)
            } else {
                let agent = match mover {
                    Side::First => &mut *first,
                    Side::Second => &mut *second,
                };
                board = agent.act(&successors);
                ply += 1;
                (board.goal_test(), false)
            };

            let Some(outcome) = outcome else {
                mover = mover.other();
                continue;
            };

            Self::settle(outcome, first, second);
            metrics.record_episode(EpisodeResult {
                winner: match outcome {
                    GameOutcome::Winner(side) => Some(side),
                    GameOutcome::Draw => None,
                },
                game_length: ply,
            });

            // Fresh board. A forfeit hands the opening move to the side that
            // did not forfeit; otherwise the first side opens as usual.
            board = G::initial();
            ply = 0;
            mover = match (by_forfeit, outcome) {
                (true, GameOutcome::Winner(winner)) => winner,
                _ => Side::First,
            };

            let episodes = Self::completed_episodes(first, second);

            // Anneal the explore rate downward in quarter-steps of progress:
            // 1.0, 0.75, 0.50, 0.25.
            let progress = (episodes * 4 / target).min(3);
            if progress > quarters_applied {
                quarters_applied = progress;
                let rate = 1.0 - 0.25 * quarters_applied as f64;
                first.set_explore_rate(rate);
                second.set_explore_rate(rate);
                if show_output {
                    println!("  >> explore rate now {:.2}", rate);
                }
            }

            if show_output && episodes % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                println!(
                    "Episode {}/{} | explore: {:.2} | {} win_rate({}): {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                    episodes,
                    target,
                    first.bank().explore_rate(),
                    G::side_name(Side::First),
                    window,
                    metrics.win_rate(Side::First, window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }
        }

        // Competitive mode: pure exploitation from here on.
        first.set_explore_rate(0.0);
        second.set_explore_rate(0.0);

        if show_output {
            println!("-------------------------------------------");
            println!(
                "Training complete. Episodes: {} | {} states discovered",
                metrics.total_episodes(),
                first.bank().len(),
            );
        }

        metrics
    }

    /// Episodes completed so far, by this engine's counting convention:
    /// both sides' wins plus the first agent's draws.
    fn completed_episodes<G: Game>(first: &Agent<G>, second: &Agent<G>) -> usize {
        (first.wins() + second.wins() + first.draws()) as usize
    }

    /// Route the outcome to each agent's credit assignment.
    fn settle<G: Game>(outcome: GameOutcome, first: &mut Agent<G>, second: &mut Agent<G>) {
        match outcome {
            GameOutcome::Winner(Side::First) => {
                first.record_win();
                second.record_loss();
            }
            GameOutcome::Winner(Side::Second) => {
                second.record_win();
                first.record_loss();
            }
            GameOutcome::Draw => {
                first.record_draw();
                second.record_draw();
            }
        }
    }
}
