//! Crossword puzzle export.
//!
//! Document shape:
//!
//! ```text
//! <crosswordPuzzle>
//!   <metadata> theme, size, wordCount, aiGenerated </metadata>
//!   <grid>
//!     <row index="R">
//!       <cell col="C" row="R" number="N|" isBlack="true|false">letter|</cell>
//!     </row>
//!   </grid>
//!   <clues>
//!     <across><clue><number/><text/><answer/></clue>...</across>
//!     <down>...</down>
//!   </clues>
//! </crosswordPuzzle>
//! ```

use crate::crossword::{Cell, Clue, CrosswordPuzzle};
use crate::xml::{escape, XML_DECLARATION};

use super::filename::crossword_filename;
use super::ExportDocument;

/// Serialize a fully generated puzzle.
///
/// Rows and cells keep the grid's row-major order with zero-based indices.
/// Clue lists keep their input order. All free text is escaped.
pub fn crossword_xml(puzzle: &CrosswordPuzzle) -> String {
    let mut xml = String::with_capacity(256 + puzzle.size * puzzle.size * 64);

    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<crosswordPuzzle>\n");

    xml.push_str("  <metadata>\n");
    xml.push_str(&format!("    <theme>{}</theme>\n", escape(&puzzle.theme)));
    xml.push_str(&format!("    <size>{}</size>\n", puzzle.size));
    xml.push_str(&format!("    <wordCount>{}</wordCount>\n", puzzle.word_count));
    xml.push_str(&format!(
        "    <aiGenerated>{}</aiGenerated>\n",
        puzzle.ai_generated
    ));
    xml.push_str("  </metadata>\n");

    xml.push_str("  <grid>\n");
    for (r, row) in puzzle.grid.iter().enumerate() {
        xml.push_str(&format!("    <row index=\"{r}\">\n"));
        for (c, cell) in row.iter().enumerate() {
            write_cell(&mut xml, r, c, cell);
        }
        xml.push_str("    </row>\n");
    }
    xml.push_str("  </grid>\n");

    xml.push_str("  <clues>\n");
    write_clue_list(&mut xml, "across", &puzzle.across);
    write_clue_list(&mut xml, "down", &puzzle.down);
    xml.push_str("  </clues>\n");

    xml.push_str("</crosswordPuzzle>\n");
    xml
}

/// Serialize a puzzle into a document named after its theme.
pub fn build_crossword_export(puzzle: &CrosswordPuzzle) -> ExportDocument {
    ExportDocument::xml(crossword_filename(&puzzle.theme), crossword_xml(puzzle))
}

fn write_cell(xml: &mut String, r: usize, c: usize, cell: &Cell) {
    let number = cell.number.map(|n| n.to_string()).unwrap_or_default();
    let blocked = cell.is_blocked();
    let letter = if blocked {
        String::new()
    } else {
        escape(&cell.letter)
    };

    xml.push_str(&format!(
        "      <cell col=\"{c}\" row=\"{r}\" number=\"{number}\" isBlack=\"{blocked}\">{letter}</cell>\n"
    ));
}

fn write_clue_list(xml: &mut String, tag: &str, clues: &[Clue]) {
    xml.push_str(&format!("    <{tag}>\n"));
    for clue in clues {
        xml.push_str("      <clue>\n");
        xml.push_str(&format!("        <number>{}</number>\n", clue.number));
        xml.push_str(&format!("        <text>{}</text>\n", escape(&clue.clue)));
        xml.push_str(&format!("        <answer>{}</answer>\n", escape(&clue.answer)));
        xml.push_str("      </clue>\n");
    }
    xml.push_str(&format!("    </{tag}>\n"));
}
