#![cfg(feature = "std")]

//! Text rendering and coordinate parsing for the terminal front end.

use std::fmt::Write;

use crate::{
    ai::Heatmap,
    common::Coord,
    config::MAX_BOARD_SIZE,
    grid::{Cell, Grid},
    ship::Fleet,
};

/// Format a coordinate as column letter plus 1-based row, e.g. `B7`.
pub fn coord_to_string((row, col): Coord) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse `B7`-style input for a board of `size` columns.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("need a column letter and a row number (e.g. A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("no column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("invalid column '{}'", col_ch));
    }
    let last = (b'A' + size.min(MAX_BOARD_SIZE) as u8 - 1) as char;
    let col = (col_ch as u8 - b'A') as usize;
    if col >= size {
        return Err(format!("column '{}' out of bounds, must be A-{}", col_ch, last));
    }
    let row_str = chars.as_str();
    if !row_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid row '{}', must be a number 1-{}", row_str, size));
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("invalid row '{}', must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("row {} out of bounds, must be 1-{}", row, size));
    }
    Ok((row - 1, col))
}

fn header(out: &mut String, size: usize, width: usize) {
    out.push_str("    ");
    for c in 0..size {
        let _ = write!(out, "{:>width$}", (b'A' + c as u8) as char, width = width);
    }
    out.push('\n');
}

/// Render `grid`. With `reveal` off, intact ship cells look like water.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    let mut out = String::new();
    header(&mut out, grid.size(), 2);
    for (r, row) in grid.rows().enumerate() {
        let _ = write!(out, "  {:>2}", r + 1);
        for cell in row {
            let ch = match cell {
                Cell::Empty => '.',
                Cell::Occupied(_) if reveal => 'S',
                Cell::Occupied(_) => '.',
                Cell::Miss => 'o',
                Cell::Hit => 'X',
                Cell::Sunk => '#',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("  Legend: S=ship X=hit #=sunk o=miss .=water\n");
    } else {
        out.push_str("  Legend: X=hit #=sunk o=miss .=unknown\n");
    }
    out
}

/// Per-ship status lines. With `reveal` off only sunk ships are named as such.
pub fn render_fleet(fleet: &Fleet, reveal: bool) -> String {
    let mut out = String::new();
    for s in fleet.summaries() {
        let status = match (reveal, s.sunk) {
            (_, true) => format!("{}/{} sunk", s.hits, s.length),
            (true, false) => format!("{}/{}", s.hits, s.length),
            (false, false) => "???".to_string(),
        };
        let _ = writeln!(out, "  {:<11} ({}) {}", s.name, s.length, status);
    }
    out
}

/// Heatmap scores scaled to 0-9, `-` for cells already fired at.
pub fn render_heatmap(heat: &Heatmap, grid: &Grid) -> String {
    let mut out = String::new();
    let max = heat.max().max(1);
    header(&mut out, heat.size(), 2);
    for (r, row) in heat.rows().enumerate() {
        let _ = write!(out, "  {:>2}", r + 1);
        for (c, &score) in row.iter().enumerate() {
            if grid.is_targetable(r, c) {
                let _ = write!(out, " {}", score * 9 / max);
            } else {
                out.push_str(" -");
            }
        }
        out.push('\n');
    }
    out
}
