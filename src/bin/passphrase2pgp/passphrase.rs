use std::io::{self, Write};
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;
use passphrase2pgp::errors::{Error, Result};
use zeroize::Zeroizing;

/// Keeps the terminal in raw mode, so typed characters are not echoed.
///
/// Raw mode is left when the guard is dropped, on every exit path.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads one line from the terminal without echo.
fn read_hidden(prompt: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = Zeroizing::new(String::new());
    {
        let _raw = RawModeGuard::new()?;
        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }

            match code {
                KeyCode::Enter => break,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(Error::Input {
                        message: "interrupted".into(),
                    });
                }
                KeyCode::Char(c) => line.push(c),
                KeyCode::Backspace => {
                    line.pop();
                }
                _ => {}
            }
        }
    }
    writeln!(stderr)?;

    Ok(Zeroizing::new(line.as_bytes().to_vec()))
}

/// Prompts for the passphrase, then asks `repeat` times to confirm it.
pub fn prompt(repeat: u32) -> Result<Zeroizing<Vec<u8>>> {
    confirm(repeat, read_hidden)
}

fn confirm<F>(repeat: u32, mut read: F) -> Result<Zeroizing<Vec<u8>>>
where
    F: FnMut(&str) -> Result<Zeroizing<Vec<u8>>>,
{
    let passphrase = read("passphrase: ")?;
    for _ in 0..repeat {
        let again = read("passphrase (repeat): ")?;
        if again != passphrase {
            return Err(Error::Input {
                message: "passphrases do not match".into(),
            });
        }
    }

    Ok(passphrase)
}

/// Reads the passphrase from the first line of a file.
pub fn from_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let contents = Zeroizing::new(std::fs::read(path).map_err(|err| Error::Input {
        message: format!("open {}: {err}", path.display()),
    })?);
    debug!("read passphrase from {}", path.display());

    Ok(Zeroizing::new(first_line(&contents).to_vec()))
}

/// The first line without its line ending. Empty input gives an empty line.
fn first_line(contents: &[u8]) -> &[u8] {
    let line = match contents.iter().position(|&b| b == b'\n') {
        Some(end) => &contents[..end],
        None => contents,
    };
    line.strip_suffix(b"\r").unwrap_or(line)
}
