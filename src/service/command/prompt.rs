use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter stock symbol (uppercase) (or 'done' to finish): ";
pub const DONE_SENTINEL: &str = "DONE";

/// Read ticker symbols line by line until `done` is entered.
///
/// Symbols are trimmed and upper-cased and kept in entry order; duplicates are kept.
/// `done` with nothing collected re-prompts. End of input returns whatever was collected,
/// which may be empty.
pub fn collect_symbols<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Vec<String>> {
    let mut symbols = Vec::new();
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(symbols);
        }

        let symbol = line.trim().to_uppercase();
        if symbol.is_empty() {
            continue;
        }

        if symbol == DONE_SENTINEL {
            if symbols.is_empty() {
                writeln!(output, "Please enter at least one symbol.")?;
                continue;
            }
            return Ok(symbols);
        }

        symbols.push(symbol);
    }
}
