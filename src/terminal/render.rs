//! Colored drawing of boards and leaderboards.
//!
//! Everything writes to a generic `Write` so the output can be captured.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::core::{Cell, Grid, COLS};
use crate::ranking::RankingEntry;

/// Glyph for a light that is off.
pub const OFF_GLYPH: &str = "X";

/// Glyph for a light that is on.
pub const ON_GLYPH: &str = "O";

/// Clear the screen and move the cursor home.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    out.flush()
}

fn cell_glyph<W: Write>(out: &mut W, cell: Cell) -> io::Result<()> {
    match cell {
        Cell::Off => queue!(out, SetForegroundColor(Color::Red), Print(OFF_GLYPH), ResetColor),
        Cell::On => queue!(out, SetForegroundColor(Color::Yellow), Print(ON_GLYPH), ResetColor),
    }
}

/// Draw the board with 0-based row and column labels.
pub fn draw_board<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    queue!(out, Print("\n    |"))?;
    for col in 0..COLS {
        queue!(out, SetForegroundColor(Color::Magenta), Print(format!("  {col}")), ResetColor)?;
    }
    queue!(out, Print("  |\n"))?;

    for (row, cells) in grid.rows().iter().enumerate() {
        queue!(
            out,
            SetForegroundColor(Color::Magenta),
            Print(format!("  {row}")),
            ResetColor,
            Print(" |")
        )?;
        for &cell in cells {
            queue!(out, Print("  "))?;
            cell_glyph(out, cell)?;
        }
        queue!(out, Print("  |\n"))?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

/// Draw the leaderboard, best first.
pub fn draw_ranking<W: Write>(out: &mut W, entries: &[RankingEntry]) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::Green),
        SetAttribute(Attribute::Bold),
        Print("\n    ########   Player ranking   ########\n\n"),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;

    if entries.is_empty() {
        queue!(out, Print("        No scores yet.\n"))?;
    }
    for (index, entry) in entries.iter().enumerate() {
        queue!(
            out,
            Print(format!(
                "        {:>2}. {} - {} moves ({})\n",
                index + 1,
                entry.name,
                entry.moves,
                entry.timestamp
            ))
        )?;
    }
    out.flush()
}

/// Print a line in the given color.
pub fn colored_line<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    queue!(out, SetForegroundColor(color), Print(text), ResetColor, Print("\n"))?;
    out.flush()
}
