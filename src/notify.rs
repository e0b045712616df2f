//! User-facing collaborator for the rename engine.
//!
//! The engine reports finished moves and asks before replacing an existing
//! destination through the `Notifier` trait; it never talks to a terminal
//! directly. `ConsoleNotifier` is the interactive implementation used by the
//! binary.

use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::warn;

pub trait Notifier {
    /// A file was placed at `destination` (only called for verbose runs).
    fn notify_moved(&mut self, filename: &str, destination: &Path);

    /// Ask whether the existing `destination` may be replaced by `filename`.
    fn confirm_overwrite(&mut self, filename: &str, destination: &Path) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify_moved(&mut self, filename: &str, destination: &Path) {
        (**self).notify_moved(filename, destination)
    }

    fn confirm_overwrite(&mut self, filename: &str, destination: &Path) -> bool {
        (**self).confirm_overwrite(filename, destination)
    }
}

/// Prompts on `output`, reads answers from `input`.
///
/// Answers must be exactly `y` or `n`; anything else re-prompts. A closed
/// input stream (or a read error) counts as `n`.
pub struct ConsoleNotifier<R, W> {
    input: R,
    output: W,
}

impl ConsoleNotifier<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleNotifier<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, destination: &Path) -> io::Result<bool> {
        let mut line = String::new();
        loop {
            write!(self.output, "Overwrite {} (y/n): ", destination.display())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }
            match line.trim_end_matches(['\n', '\r']) {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }
}

impl<R: BufRead, W: Write> Notifier for ConsoleNotifier<R, W> {
    fn notify_moved(&mut self, filename: &str, destination: &Path) {
        if let Err(e) = writeln!(self.output, "{} moved to {}", filename, destination.display()) {
            warn!(error = %e, "Failed to write move notification");
        }
    }

    fn confirm_overwrite(&mut self, _filename: &str, destination: &Path) -> bool {
        match self.ask(destination) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, dest = %destination.display(), "Confirmation prompt failed; not overwriting");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn notifier(input: &str) -> ConsoleNotifier<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleNotifier::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reprompts_until_exact_answer() {
        let mut n = notifier("yes\nY\n\ny\n");
        assert!(n.confirm_overwrite("a.txt", Path::new("b.txt")));
        let (_, out) = n.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Overwrite b.txt (y/n): ").count(), 4);
    }

    #[test]
    fn no_answer_declines() {
        let mut n = notifier("n\n");
        assert!(!n.confirm_overwrite("a.txt", Path::new("b.txt")));
    }

    #[test]
    fn closed_input_declines() {
        let mut n = notifier("maybe\n");
        assert!(!n.confirm_overwrite("a.txt", Path::new("b.txt")));
    }

    #[test]
    fn crlf_answer_accepted() {
        let mut n = notifier("y\r\n");
        assert!(n.confirm_overwrite("a.txt", Path::new("b.txt")));
    }

    #[test]
    fn moved_line_format() {
        let mut n = notifier("");
        n.notify_moved("HIM-song.mp3", Path::new("HIM/song.mp3"));
        let (_, out) = n.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "HIM-song.mp3 moved to HIM/song.mp3\n");
    }
}
