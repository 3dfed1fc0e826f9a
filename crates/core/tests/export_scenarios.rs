//! End-to-end export scenarios: build content the way a generation run would,
//! serialize it, and inspect the resulting documents.

use chrono::Utc;
use portal_core::crossword::{Cell, Clue, CrosswordPuzzle};
use portal_core::export::{build_crossword_export, build_horoscope_export, crossword_xml};
use portal_core::horoscope::{
    BoardEvent, EntryValue, HoroscopeParams, HoroscopeRun, HoroscopeType, Tone, ZodiacSign,
};
use portal_core::xml::escape;

/// Grid of `size x size` where every third cell is blocked and the first open
/// cell of each row carries a number.
fn patterned_puzzle(size: usize) -> CrosswordPuzzle {
    let mut next = 1;
    let grid: Vec<Vec<Cell>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    if (r + c) % 3 == 2 {
                        Cell::blocked()
                    } else if c == 0 {
                        let cell = Cell::open('A', Some(next));
                        next += 1;
                        cell
                    } else {
                        Cell::open('B', None)
                    }
                })
                .collect()
        })
        .collect();

    CrosswordPuzzle {
        grid,
        across: Vec::new(),
        down: Vec::new(),
        theme: "Pattern".to_string(),
        size,
        word_count: 0,
        ai_generated: true,
    }
}

// ---------------------------------------------------------------------------
// Crossword
// ---------------------------------------------------------------------------

#[test]
fn grid_shape_matches_puzzle_size() {
    for size in [1, 2, 10, 15, 20] {
        let puzzle = patterned_puzzle(size);
        let xml = crossword_xml(&puzzle);

        assert_eq!(xml.matches("<row index=").count(), size, "size {size}");
        assert_eq!(xml.matches("<cell ").count(), size * size, "size {size}");

        for r in 0..size {
            assert!(xml.contains(&format!("<row index=\"{r}\">")));
            for c in 0..size {
                assert!(xml.contains(&format!("<cell col=\"{c}\" row=\"{r}\" ")));
            }
        }
    }
}

#[test]
fn cells_appear_in_row_major_order() {
    let xml = crossword_xml(&patterned_puzzle(4));
    let mut last = 0;
    for r in 0..4 {
        for c in 0..4 {
            let needle = format!("<cell col=\"{c}\" row=\"{r}\" ");
            let pos = xml.find(&needle).expect("cell present");
            assert!(pos >= last, "cell ({r}, {c}) out of order");
            last = pos;
        }
    }
}

#[test]
fn blocked_cells_are_black_and_empty() {
    let puzzle = patterned_puzzle(6);
    let xml = crossword_xml(&puzzle);

    for (r, row) in puzzle.grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let prefix = format!("<cell col=\"{c}\" row=\"{r}\" ");
            let line = xml
                .lines()
                .find(|l| l.trim_start().starts_with(&prefix))
                .expect("cell line present");
            if cell.is_blocked() {
                assert!(line.ends_with("isBlack=\"true\"></cell>"), "{line}");
            } else {
                assert!(line.contains("isBlack=\"false\""), "{line}");
                assert!(line.ends_with(&format!(">{}</cell>", cell.letter)), "{line}");
            }
        }
    }
}

#[test]
fn single_across_clue_with_empty_down_list() {
    let mut puzzle = patterned_puzzle(15);
    puzzle.across.push(Clue {
        number: 1,
        clue: "Capital of France".to_string(),
        answer: "PARIS".to_string(),
    });

    let doc = build_crossword_export(&puzzle);
    let xml = &doc.body;

    let across_start = xml.find("<across>").unwrap();
    let across_end = xml.find("</across>").unwrap();
    let across = &xml[across_start..across_end];
    assert_eq!(across.matches("<clue>").count(), 1);
    assert!(across.contains("<number>1</number>"));
    assert!(across.contains("<text>Capital of France</text>"));
    assert!(across.contains("<answer>PARIS</answer>"));

    let down_start = xml.find("<down>").unwrap();
    let down_end = xml.find("</down>").unwrap();
    assert!(!xml[down_start..down_end].contains("<clue>"));

    assert_eq!(doc.filename, "crossword_pattern.xml");
}

#[test]
fn clue_order_is_preserved() {
    let mut puzzle = patterned_puzzle(10);
    for number in [3, 1, 2] {
        puzzle.down.push(Clue {
            number,
            clue: format!("clue {number}"),
            answer: "WORD".to_string(),
        });
    }
    let xml = crossword_xml(&puzzle);
    let third = xml.find("<text>clue 3</text>").unwrap();
    let first = xml.find("<text>clue 1</text>").unwrap();
    let second = xml.find("<text>clue 2</text>").unwrap();
    assert!(third < first && first < second);
}

// ---------------------------------------------------------------------------
// Horoscope
// ---------------------------------------------------------------------------

#[test]
fn eleven_of_twelve_signs_exported() {
    let params = HoroscopeParams::new("Weekend Edition", HoroscopeType::Weekly, Tone::Practical);
    let mut run = HoroscopeRun::new(params);
    run.board.apply(BoardEvent::RunStarted).unwrap();

    for sign in ZodiacSign::ALL {
        let value = if sign == ZodiacSign::Cancer {
            EntryValue::from_raw("Error generating horoscope.")
        } else {
            EntryValue::from_raw(format!("{sign}: a steady week <ahead>."))
        };
        run.board.apply(BoardEvent::Settled { sign, value }).unwrap();
    }

    let doc = build_horoscope_export(&run, Utc::now());
    assert_eq!(doc.filename, "horoscope_export.xml");
    assert_eq!(doc.body.matches("<entry>").count(), 11);
    assert!(!doc.body.contains("<sign>Cancer</sign>"));

    for (sign, value) in run.board.iter() {
        if value.is_exportable() {
            let forecast = format!("<forecast>{}</forecast>", escape(value.as_raw()));
            assert!(doc.body.contains(&forecast), "{sign}");
        }
    }
}

// ---------------------------------------------------------------------------
// Escaper
// ---------------------------------------------------------------------------

#[test]
fn escaper_reference_string() {
    assert_eq!(
        escape(r#"O'Brien <said> "hi" & left"#),
        "O&apos;Brien &lt;said&gt; &quot;hi&quot; &amp; left"
    );
}
