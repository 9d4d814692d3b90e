// src/core/csv.rs
//
// CSV rows for spreadsheet exports.
use std::io::{self, Write};

fn needs_quotes(field: &str) -> bool {
    field.contains(&[',', '"', '\n', '\r'][..])
}

/// One CRLF-terminated row; fields are quoted only when they have to be.
pub fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}
