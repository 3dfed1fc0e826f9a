//! Plain-text rendering of generated content for the terminal.

use std::fmt::Write;

use portal_core::crossword::{Clue, CrosswordPuzzle};
use portal_core::horoscope::{EntryValue, HoroscopeRun};

/// Glyph drawn for blocked squares.
const BLOCK: char = '█';

/// Tools listed on the home screen: command, title, blurb.
pub const TOOLS: &[(&str, &str, &str)] = &[
    (
        "crossword",
        "Crossword Generator",
        "AI-themed crossword puzzles, exported as XML",
    ),
    (
        "horoscope",
        "Horoscope Generator",
        "A full zodiac spread in your magazine's voice, exported as XML",
    ),
];

/// The tool launcher shown by `portal home`.
pub fn launcher() -> String {
    let mut out = String::from("Tools:\n");
    for (command, title, blurb) in TOOLS {
        let _ = writeln!(out, "  {command:<10} {title}: {blurb}");
    }
    out
}

/// The grid, one row per line, letters separated by a space.
pub fn grid(puzzle: &CrosswordPuzzle) -> String {
    let mut out = String::new();
    for row in &puzzle.grid {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                if cell.is_blocked() {
                    BLOCK.to_string()
                } else {
                    cell.letter.clone()
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn clue_list(out: &mut String, heading: &str, clues: &[Clue]) {
    let _ = writeln!(out, "{heading}:");
    if clues.is_empty() {
        out.push_str("  (none)\n");
    }
    for clue in clues {
        let _ = writeln!(out, "  {:>2}. {} ({})", clue.number, clue.clue, clue.answer);
    }
}

/// Header, grid and both clue lists.
pub fn puzzle(puzzle: &CrosswordPuzzle) -> String {
    let mut out = format!(
        "{} ({}x{}, {} words{})\n\n",
        puzzle.theme,
        puzzle.size,
        puzzle.size,
        puzzle.word_count,
        if puzzle.ai_generated { ", AI" } else { "" },
    );
    out.push_str(&grid(puzzle));
    out.push('\n');
    clue_list(&mut out, "Across", &puzzle.across);
    out.push('\n');
    clue_list(&mut out, "Down", &puzzle.down);
    out
}

/// Every sign in reference order with its forecast or status.
pub fn spread(run: &HoroscopeRun) -> String {
    let params = &run.params;
    let mut out = format!(
        "{}: {} horoscopes, {}\n",
        params.magazine, params.horoscope_type, params.tone
    );

    for (sign, entry) in run.board.iter() {
        let _ = writeln!(
            out,
            "\n{} {} ({})",
            sign.icon(),
            sign.name(),
            sign.date_range()
        );
        let body = match entry {
            EntryValue::Pending => "(not generated)",
            EntryValue::Forecast(text) | EntryValue::Failed(text) => text.as_str(),
        };
        let _ = writeln!(out, "  {body}");
    }
    out
}
