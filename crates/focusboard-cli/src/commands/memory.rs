use std::io::{self, BufRead, Write};

use focusboard_core::widgets::memory::CardState;
use focusboard_core::widgets::{FlipOutcome, MemoryGame};

use super::CmdResult;

const COLUMNS: usize = 4;

pub fn run() -> CmdResult {
    let mut game = MemoryGame::new(&mut rand::thread_rng());
    let stdin = io::stdin();
    play(&mut game, stdin.lock(), io::stdout().lock())?;
    Ok(())
}

/// Read card numbers (1-based) one per line until the board is cleared or
/// input ends. `q` quits. Returns whether the game was won.
pub fn play<R: BufRead, W: Write>(game: &mut MemoryGame, input: R, mut out: W) -> io::Result<bool> {
    draw(game, &mut out)?;
    writeln!(out, "Pick a card (1-{}), or q to quit:", game.cards().len())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let Some(index) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            writeln!(out, "Not a card number: {line}")?;
            continue;
        };

        match game.flip(index) {
            FlipOutcome::Ignored => writeln!(out, "Can't flip that card.")?,
            FlipOutcome::Flipped => draw(game, &mut out)?,
            FlipOutcome::Matched { won } => {
                draw(game, &mut out)?;
                writeln!(out, "Match!")?;
                if won {
                    writeln!(out, "{}", game.win_message())?;
                    return Ok(true);
                }
            }
            FlipOutcome::Mismatch => {
                draw(game, &mut out)?;
                writeln!(out, "No match.")?;
                game.settle();
            }
        }
    }
    Ok(false)
}

fn draw<W: Write>(game: &MemoryGame, out: &mut W) -> io::Result<()> {
    for (r, row) in game.cards().chunks(COLUMNS).enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let number = r * COLUMNS + i + 1;
                match card.state {
                    CardState::Hidden => format!("{number:>2}:??"),
                    CardState::Flipped | CardState::Matched => {
                        format!("{number:>2}:{}", card.symbol)
                    }
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("  "))?;
    }
    writeln!(out, "Moves: {}", game.moves())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_to_a_win_from_scripted_input() {
        let mut game = MemoryGame::with_symbols(vec!["a", "b", "a", "b"]);
        let input = b"1\n2\n1\n3\n2\n4\n" as &[u8];
        let mut out = Vec::new();

        let won = play(&mut game, input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(won);
        assert!(text.contains("No match."));
        assert!(text.contains("You matched all pairs in 3 moves!"));
    }

    #[test]
    fn quit_and_bad_input_stop_without_winning() {
        let mut game = MemoryGame::with_symbols(vec!["a", "a"]);
        let input = b"zero\n9\nq\n1\n" as &[u8];
        let mut out = Vec::new();

        let won = play(&mut game, input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!won);
        assert!(text.contains("Not a card number: zero"));
        assert!(text.contains("Can't flip that card."));
        assert_eq!(game.moves(), 0);
    }
}
