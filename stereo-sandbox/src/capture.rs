use log::*;
use std::io::{self, BufRead, Write};
use stereo::{CorrespondenceSet, PixelPoint};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("capture aborted with {picked} of {capacity} correspondences")]
    Aborted { picked: usize, capacity: usize },
    #[error("input ended with {picked} of {capacity} correspondences")]
    UnexpectedEof { picked: usize, capacity: usize },
    #[error("failed to read picks: {0}")]
    Io(#[from] io::Error),
}

/// A single line of the capture protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// `l <x> <y>`
    Left(PixelPoint),
    /// `r <x>`
    Right(u32),
    /// `q`
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments produce `None`.
    pub fn parse(line: usize, text: &str) -> Result<Option<Self>, CaptureError> {
        let text = text.trim();
        if text.starts_with('#') {
            return Ok(None);
        }
        let fail = |reason: String| CaptureError::Parse { line, reason };
        let coordinate = |word: Option<&str>, name: &str| -> Result<u32, CaptureError> {
            let word = word.ok_or_else(|| fail(format!("missing {} coordinate", name)))?;
            word.parse()
                .map_err(|e| fail(format!("invalid {} coordinate {:?}: {}", name, word, e)))
        };

        let mut words = text.split_whitespace();
        let command = match words.next() {
            Some("l") => Self::Left(PixelPoint::new(
                coordinate(words.next(), "x")?,
                coordinate(words.next(), "y")?,
            )),
            Some("r") => Self::Right(coordinate(words.next(), "x")?),
            Some("q") => Self::Quit,
            Some(other) => return Err(fail(format!("unknown command {:?}", other))),
            None => return Ok(None),
        };
        if let Some(extra) = words.next() {
            return Err(fail(format!("unexpected {:?}", extra)));
        }
        Ok(Some(command))
    }
}

/// Reads commands until `set` is complete.
///
/// Malformed lines and picks the set refuses are logged and skipped so that an interactive user can retry.
/// A prompt telling which pick comes next is written to `prompt` before every line.
pub fn capture(
    reader: impl BufRead,
    set: &mut CorrespondenceSet,
    mut prompt: impl Write,
) -> Result<(), CaptureError> {
    let mut lines = reader.lines().enumerate();
    while !set.is_complete() {
        write_prompt(&mut prompt, set)?;
        let (ix, text) = match lines.next() {
            Some((ix, text)) => (ix + 1, text?),
            None => {
                return Err(CaptureError::UnexpectedEof {
                    picked: set.len(),
                    capacity: set.capacity(),
                })
            }
        };
        let result = match Command::parse(ix, &text) {
            Ok(Some(Command::Left(point))) => set.add_left(point),
            Ok(Some(Command::Right(x))) => set.add_right(x),
            Ok(Some(Command::Quit)) => {
                return Err(CaptureError::Aborted {
                    picked: set.len(),
                    capacity: set.capacity(),
                })
            }
            Ok(None) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        match result {
            Ok(()) => debug!("line {}: accepted {:?}", ix, text.trim()),
            Err(e) => warn!("line {}: rejected pick: {}", ix, e),
        }
    }
    info!("captured {} correspondences", set.len());
    Ok(())
}

fn write_prompt(prompt: &mut impl Write, set: &CorrespondenceSet) -> io::Result<()> {
    let left = set.left_points().len();
    let right = set.right_points().len();
    if left < set.capacity() {
        write!(
            prompt,
            "left {}/{} (right {}/{})> ",
            left + 1,
            set.capacity(),
            right,
            set.capacity()
        )?;
    } else {
        write!(prompt, "right {}/{}> ", right + 1, set.capacity())?;
    }
    prompt.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{sink, Cursor};

    fn run(input: &str, capacity: usize) -> (Result<(), CaptureError>, CorrespondenceSet) {
        let mut set = CorrespondenceSet::new(capacity).unwrap();
        let result = capture(Cursor::new(input), &mut set, sink());
        (result, set)
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            Command::parse(1, "l 700 400").unwrap(),
            Some(Command::Left(PixelPoint::new(700, 400)))
        );
        assert_eq!(
            Command::parse(1, "  r 650 ").unwrap(),
            Some(Command::Right(650))
        );
        assert_eq!(Command::parse(1, "q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse(1, "").unwrap(), None);
        assert_eq!(Command::parse(1, "# left camera").unwrap(), None);
    }

    #[test]
    fn parse_errors() {
        for text in ["l 700", "l -1 4", "r", "r 1 2", "x 1", "l 1.5 2"] {
            assert!(
                matches!(
                    Command::parse(9, text),
                    Err(CaptureError::Parse { line: 9, .. })
                ),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn interleaved_picks() {
        let (result, set) = run("l 700 400\nr 650\n# next\n\nl 300 120\nr 280\n", 2);
        result.unwrap();
        assert!(set.is_complete());
        assert_eq!(
            set.right_points(),
            &[PixelPoint::new(650, 400), PixelPoint::new(280, 120)]
        );
    }

    #[test]
    fn all_left_then_all_right() {
        let (result, set) = run("l 1 2\nl 3 4\nl 5 6\nr 0\nr 1\nr 2\n", 3);
        result.unwrap();
        assert_eq!(set.right_points()[2], PixelPoint::new(2, 6));
    }

    #[test]
    fn rejected_lines_are_skipped() {
        let (result, set) = run("r 10\nl 1 2\nbogus\nl 3 4\nr 0\n", 1);
        result.unwrap();
        assert_eq!(set.left_points(), &[PixelPoint::new(1, 2)]);
        assert_eq!(set.right_points(), &[PixelPoint::new(0, 2)]);
    }

    #[test]
    fn stops_when_complete() {
        let (result, set) = run("l 1 2\nr 0\nq\n", 1);
        result.unwrap();
        assert!(set.is_complete());
    }

    #[test]
    fn quit_aborts() {
        let (result, _) = run("l 1 2\nr 0\nq\nl 3 4\n", 2);
        assert!(matches!(
            result,
            Err(CaptureError::Aborted {
                picked: 1,
                capacity: 2
            })
        ));
    }

    #[test]
    fn early_end_of_input() {
        let (result, _) = run("l 1 2\n", 2);
        assert!(matches!(
            result,
            Err(CaptureError::UnexpectedEof {
                picked: 0,
                capacity: 2
            })
        ));
    }

    #[test]
    fn prompts_for_next_pick() {
        let mut set = CorrespondenceSet::new(2).unwrap();
        let mut prompt = vec![];
        capture(Cursor::new("l 1 2\nl 3 4\nr 0\nr 1\n"), &mut set, &mut prompt).unwrap();
        let prompt = String::from_utf8(prompt).unwrap();
        assert!(prompt.starts_with("left 1/2 (right 0/2)> left 2/2 (right 0/2)> right 1/2> "));
    }
}
