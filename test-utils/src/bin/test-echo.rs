//! Reads one line and prints `Hello <line>`.

use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let mut out = io::stdout().lock();
    writeln!(out, "Hello {}", line.trim_end_matches(['\r', '\n']))?;
    out.flush()
}
