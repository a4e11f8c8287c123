//! Interactive play: one human move and one engine move per turn, over
//! generic reader/writer handles so the loop is testable with in-memory
//! buffers.

use std::io::{self, BufRead, Write};

use crate::ai::Agent;
use crate::error::MoveSelectionError;
use crate::game::{Game, GameOutcome, Side};

/// A human-versus-agent game at the console. The agent plays `Side::First`
/// and therefore opens; the human picks among numbered successor boards.
pub struct Session<'a, G: Game, R: BufRead, W: Write> {
    agent: &'a mut Agent<G>,
    input: R,
    output: W,
}

impl<'a, G: Game, R: BufRead, W: Write> Session<'a, G, R, W> {
    pub fn new(agent: &'a mut Agent<G>, input: R, output: W) -> Self {
        Session {
            agent,
            input,
            output,
        }
    }

    /// Play a full game and return its outcome.
    pub fn run(&mut self) -> io::Result<GameOutcome> {
        let mut board = G::initial();

        loop {
            // Engine ply.
            let successors = board.successors(Side::First);
            if successors.is_empty() {
                return self.finish(G::blocked_outcome(Side::First));
            }
            board = self.agent.act(&successors);
            if let Some(outcome) = board.goal_test() {
                return self.finish(outcome);
            }

            // Human ply.
            let options = board.successors(Side::Second);
            if options.is_empty() {
                return self.finish(G::blocked_outcome(Side::Second));
            }
            self.print_options(&options)?;
            let index = self.prompt_selection(options.len())?;
            board = options[index].clone();
            if let Some(outcome) = board.goal_test() {
                return self.finish(outcome);
            }
        }
    }

    /// Announce the outcome and settle the agent's episode.
    fn finish(&mut self, outcome: GameOutcome) -> io::Result<GameOutcome> {
        match outcome {
            GameOutcome::Winner(Side::First) => {
                self.agent.record_win();
                writeln!(self.output, "Computer wins!")?;
            }
            GameOutcome::Winner(Side::Second) => {
                self.agent.record_loss();
                writeln!(self.output, "Human player wins!")?;
            }
            GameOutcome::Draw => {
                self.agent.record_draw();
                writeln!(self.output, "Cat's game!")?;
            }
        }
        Ok(outcome)
    }

    fn print_options(&mut self, options: &[G]) -> io::Result<()> {
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "--- Option {} ---", index + 1)?;
            writeln!(self.output, "{}", option)?;
        }
        Ok(())
    }

    /// Prompt until the human names one of the offered moves. Bad selections
    /// are reported and re-prompted; they touch neither board nor bank.
    fn prompt_selection(&mut self, count: usize) -> io::Result<usize> {
        loop {
            write!(self.output, "Please select a move: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a move was selected",
                ));
            }

            match parse_selection(&line, count) {
                Ok(index) => return Ok(index),
                Err(e) => {
                    writeln!(
                        self.output,
                        "Error: {}; please select from the options listed.",
                        e
                    )?;
                }
            }
        }
    }
}

/// Parse a 1-based selection against the number of offered options.
fn parse_selection(line: &str, count: usize) -> Result<usize, MoveSelectionError> {
    let trimmed = line.trim();
    let number: usize = trimmed
        .parse()
        .map_err(|_| MoveSelectionError::NotANumber(trimmed.to_string()))?;
    if number == 0 || number > count {
        return Err(MoveSelectionError::OutOfRange(number));
    }
    Ok(number - 1)
}
