//! A 3-item menu driven by arrow keys.
//!
//! ```text
//! > Item A
//!   Item B
//!   Item C
//! ```
//!
//! Up and down move the marker (wrapping), enter prints
//! `You selected <item>` and exits 0. Ctrl+D or end of input exits 1.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use rustix::termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios};

const ITEMS: [&str; 3] = ["Item A", "Item B", "Item C"];

const EOF: u8 = 0x04;
const ESC: u8 = 0x1b;

/// Restores the saved terminal modes on drop.
struct RawMode(Option<Termios>);

impl RawMode {
    /// Turn off line buffering and echo on stdin, if it is a terminal.
    fn enable() -> Self {
        let stdin = io::stdin();
        let Ok(saved) = termios::tcgetattr(&stdin) else {
            return Self(None);
        };

        let mut raw = saved.clone();
        raw.local_modes -= LocalModes::ICANON | LocalModes::ECHO;
        raw.special_codes[SpecialCodeIndex::VMIN] = 1;
        raw.special_codes[SpecialCodeIndex::VTIME] = 0;

        match termios::tcsetattr(&stdin, OptionalActions::Now, &raw) {
            Ok(()) => Self(Some(saved)),
            Err(_) => Self(None),
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Some(saved) = self.0.take() {
            let _ = termios::tcsetattr(io::stdin(), OptionalActions::Now, &saved);
        }
    }
}

fn draw(out: &mut impl Write, selected: usize) -> io::Result<()> {
    for (i, item) in ITEMS.iter().enumerate() {
        let marker = if i == selected { ">" } else { " " };
        writeln!(out, "{marker} {item}")?;
    }
    out.flush()
}

fn redraw(out: &mut impl Write, selected: usize) -> io::Result<()> {
    // cursor up over the menu, clear to end of screen
    write!(out, "\x1b[{}F\x1b[J", ITEMS.len())?;
    draw(out, selected)
}

fn read_byte(input: &mut impl Read) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match input.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

fn run() -> io::Result<ExitCode> {
    let _raw = RawMode::enable();
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut selected = 0;

    draw(&mut out, selected)?;

    loop {
        let Some(byte) = read_byte(&mut input)? else {
            return Ok(ExitCode::FAILURE);
        };

        match byte {
            b'\n' | b'\r' => {
                writeln!(out, "You selected {}", ITEMS[selected])?;
                out.flush()?;
                return Ok(ExitCode::SUCCESS);
            }
            EOF => return Ok(ExitCode::FAILURE),
            ESC => {
                let (Some(b'['), Some(code)) = (read_byte(&mut input)?, read_byte(&mut input)?) else {
                    continue;
                };
                match code {
                    b'A' => selected = (selected + ITEMS.len() - 1) % ITEMS.len(),
                    b'B' => selected = (selected + 1) % ITEMS.len(),
                    _ => continue,
                }
                redraw(&mut out, selected)?;
            }
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    run().unwrap_or_else(|e| {
        eprintln!("test-menu: {e}");
        ExitCode::FAILURE
    })
}
