//! The interactive menu game.

use std::io::{self, BufRead, Write};

use crossterm::style::Color;
use tracing::{error, info, warn};

use super::render::{clear_screen, colored_line, draw_board, draw_ranking, OFF_GLYPH, ON_GLYPH};
use crate::core::{GameConfig, Position};
use crate::ranking::{RankingBackend, RankingError, RankingStore};
use crate::session::{Session, SessionStatus};

/// Menu choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Play,
    Ranking,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Play),
            "2" => Some(MenuChoice::Ranking),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Terminal front end over a line-based input and an output stream.
///
/// Coordinates are 0-based, as everywhere else in the crate.
pub struct TerminalGame<'a, B, R, W> {
    store: &'a RankingStore<B>,
    config: GameConfig,
    input: R,
    output: W,
}

impl<'a, B, R, W> TerminalGame<'a, B, R, W>
where
    B: RankingBackend,
    R: BufRead,
    W: Write,
{
    /// Create a game. `config.move_limit` is ignored: the player picks a
    /// budget at the start of every round.
    pub fn new(store: &'a RankingStore<B>, config: GameConfig, input: R, output: W) -> Self {
        Self {
            store,
            config,
            input,
            output,
        }
    }

    /// Run the menu loop until the player exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.banner()?;

        loop {
            self.menu()?;
            let Some(line) = self.prompt("\n        Your choice: ")? else {
                break;
            };
            match MenuChoice::parse(&line) {
                Some(MenuChoice::Play) => self.play_round()?,
                Some(MenuChoice::Ranking) => self.show_ranking()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "\nLeaving the game . . .")?;
                    break;
                }
                None => writeln!(self.output, "\nEnter a valid option!")?,
            }
        }
        Ok(())
    }

    /// Consume the game and hand back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn banner(&mut self) -> io::Result<()> {
        clear_screen(&mut self.output)?;
        colored_line(&mut self.output, Color::Yellow, "<-------------- Lights Out -------------->")?;
        writeln!(
            self.output,
            "\n  Turn every light on in as few moves as possible.\n  \
             Choosing a light toggles it and its neighbors above, below, left and right.\n\n  \
             {OFF_GLYPH} -> light off\n  {ON_GLYPH} -> light on\n"
        )?;

        match self.store.champion() {
            Ok(Some(champion)) => colored_line(
                &mut self.output,
                Color::Red,
                &format!("  Champion ---> {} - {} moves", champion.name, champion.moves),
            )?,
            Ok(None) => {}
            Err(err) => error!(%err, "could not read the ranking"),
        }
        Ok(())
    }

    fn menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n        ********   Want to play?   ********\n")?;
        colored_line(&mut self.output, Color::Magenta, "        [ 1 ] - Play")?;
        colored_line(&mut self.output, Color::Green, "        [ 2 ] - Ranking")?;
        colored_line(&mut self.output, Color::White, "        [ 0 ] - Exit")
    }

    fn show_ranking(&mut self) -> io::Result<()> {
        match self.store.load() {
            Ok(entries) => draw_ranking(&mut self.output, &entries),
            Err(err) => writeln!(self.output, "\nCould not read the ranking: {err}"),
        }
    }

    /// Write a prompt and read one line. `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_move_budget(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(line) = self.prompt("How many moves do you want? ")? else {
                return Ok(None);
            };
            match line.parse::<u32>() {
                Ok(budget) if budget > 0 => return Ok(Some(budget)),
                _ => writeln!(self.output, "Enter a positive number of moves.")?,
            }
        }
    }

    fn ask_position(&mut self) -> io::Result<Option<Position>> {
        loop {
            let Some(row) = self.prompt("Which row? ")? else {
                return Ok(None);
            };
            let Some(col) = self.prompt("Which column? ")? else {
                return Ok(None);
            };

            let position = match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => Position::new(row, col).ok(),
                _ => None,
            };
            match position {
                Some(position) => return Ok(Some(position)),
                None => writeln!(self.output, "\nInvalid values! Enter them again.\n")?,
            }
        }
    }

    fn play_round(&mut self) -> io::Result<()> {
        let Some(budget) = self.ask_move_budget()? else {
            return Ok(());
        };
        let mut session = Session::new(self.config.clone().with_move_limit(budget));
        info!(layout = %session.config().layout, budget, "round started");

        while session.status() == SessionStatus::InProgress {
            draw_board(&mut self.output, session.grid())?;
            let Some(position) = self.ask_position()? else {
                return Ok(());
            };
            match session.toggle(position) {
                Ok(outcome) => {
                    if let Some(remaining) = outcome.remaining {
                        writeln!(self.output, "Moves left: {remaining}")?;
                    }
                }
                Err(err) => {
                    warn!(%position, %err, "move rejected");
                    writeln!(self.output, "Move rejected: {err}")?;
                }
            }
        }

        draw_board(&mut self.output, session.grid())?;
        match session.status() {
            SessionStatus::Solved => self.celebrate(session.moves()),
            _ => {
                writeln!(self.output, "You ran out of moves!")?;
                colored_line(&mut self.output, Color::Red, " -- Game over! -- ")
            }
        }
    }

    fn celebrate(&mut self, moves: u32) -> io::Result<()> {
        colored_line(
            &mut self.output,
            Color::Yellow,
            &format!("  Congratulations! You solved Lights Out in {moves} moves"),
        )?;

        loop {
            let Some(name) = self.prompt("Enter your name: ")? else {
                return Ok(());
            };
            match self.store.submit(&name, moves, None) {
                Ok(submission) => {
                    match submission.rank {
                        Some(rank) => writeln!(self.output, "You are number {rank} in the ranking!")?,
                        None => writeln!(self.output, "Not enough for the ranking this time.")?,
                    }
                    return Ok(());
                }
                Err(err @ (RankingError::EmptyName | RankingError::UnsupportedName)) => {
                    writeln!(self.output, "Invalid name: {err}")?;
                }
                Err(err @ RankingError::Storage(_)) => {
                    error!(%err, "could not save score");
                    writeln!(self.output, "Could not save your score: {err}")?;
                    return Ok(());
                }
                Err(err) => {
                    warn!(%err, moves, "score rejected");
                    writeln!(self.output, "Could not save your score: {err}")?;
                    return Ok(());
                }
            }
        }
    }
}
