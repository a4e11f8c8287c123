use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ai::ValueBank;
use crate::error::PersistError;
use crate::game::Game;

/// On-disk layout: the game the table belongs to, plus one record per
/// discovered state carrying the full board and its learned value.
#[derive(Serialize, Deserialize)]
struct ValueTableFile<G> {
    game: String,
    entries: Vec<TableEntry<G>>,
}

#[derive(Serialize, Deserialize)]
struct TableEntry<G> {
    board: G,
    value: f64,
}

/// Serialize every discovered state and its value to `writer` as JSON.
pub fn export_values<G, W>(bank: &ValueBank<G>, writer: W) -> Result<(), PersistError>
where
    G: Game + Serialize,
    W: Write,
{
    let file = ValueTableFile {
        game: G::NAME.to_string(),
        entries: bank
            .entries()
            .map(|(board, value)| TableEntry {
                board: board.clone(),
                value,
            })
            .collect(),
    };
    serde_json::to_writer(writer, &file)?;
    Ok(())
}

/// Replace `bank`'s table with the one read from `reader`. Returns the number
/// of imported entries. Refuses a table recorded for a different game.
pub fn import_values<G, R>(bank: &mut ValueBank<G>, reader: R) -> Result<usize, PersistError>
where
    G: Game + DeserializeOwned,
    R: Read,
{
    let file: ValueTableFile<G> = serde_json::from_reader(reader)?;
    if file.game != G::NAME {
        return Err(PersistError::GameMismatch {
            expected: G::NAME.to_string(),
            found: file.game,
        });
    }

    let count = file.entries.len();
    bank.replace(file.entries.into_iter().map(|e| (e.board, e.value)));
    Ok(count)
}
