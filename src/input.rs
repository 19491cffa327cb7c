//! Operator-typed dice faces.
//!
//! A human player types the faces they rolled, separated by spaces or
//! commas. Bad input is reported and the prompt repeats until the line is
//! valid.

use std::io::{BufRead, Write};

use smallvec::SmallVec;
use tracing::warn;

use crate::core::{GameRng, InputError, Player, Strategy};
use crate::dice::{DiceSpec, OperatorInput, RollSet};

/// Parse one line of faces for `spec`.
///
/// ```
/// use ladder_race::dice::DiceSpec;
/// use ladder_race::input::parse_roll_line;
///
/// let rolls = parse_roll_line("6, 2", DiceSpec::new(2, 6)).unwrap();
/// assert_eq!(rolls.sum(), 8);
/// assert!(parse_roll_line("7", DiceSpec::new(1, 6)).is_err());
/// ```
pub fn parse_roll_line(line: &str, spec: DiceSpec) -> Result<RollSet, InputError> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(InputError::Empty);
    }

    let mut faces: SmallVec<[u8; 4]> = SmallVec::new();
    for token in &tokens {
        let value: u32 = token
            .parse()
            .map_err(|_| InputError::NotANumber((*token).to_string()))?;
        if value == 0 || value > u32::from(spec.faces) {
            return Err(InputError::OutOfRange {
                value,
                faces: spec.faces,
            });
        }
        faces.push(value as u8);
    }

    if faces.len() != usize::from(spec.count) {
        return Err(InputError::WrongCount {
            expected: usize::from(spec.count),
            got: faces.len(),
        });
    }
    Ok(RollSet::from_faces(faces))
}

/// Prompts on a writer and reads answers from a line reader.
///
/// If the reader closes or fails, the roll is made at random instead so the
/// race can still finish.
#[derive(Debug)]
pub struct ConsoleOperator<R, W> {
    reader: R,
    writer: W,
    fallback: GameRng,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    /// Operator over `reader`/`writer`, rolling with `fallback` if input ends.
    pub fn new(reader: R, writer: W, fallback: GameRng) -> Self {
        Self {
            reader,
            writer,
            fallback,
        }
    }

    /// Where prompts were written.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Prompt until a valid line arrives. `Ok(None)` on end of input.
    fn prompt(&mut self, player: &Player, spec: DiceSpec) -> std::io::Result<Option<RollSet>> {
        loop {
            write!(
                self.writer,
                "{}, enter {} dice value(s) between 1 and {}: ",
                player.name, spec.count, spec.faces
            )?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match parse_roll_line(&line, spec) {
                Ok(rolls) => return Ok(Some(rolls)),
                Err(err) => writeln!(self.writer, "Invalid input: {err}. Try again.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> OperatorInput for ConsoleOperator<R, W> {
    fn read_roll(&mut self, player: &Player, spec: DiceSpec) -> RollSet {
        match self.prompt(player, spec) {
            Ok(Some(rolls)) => rolls,
            Ok(None) => {
                warn!(player = %player.name, "operator input closed, rolling at random");
                Strategy::UniformRandom.roll(&mut self.fallback, spec)
            }
            Err(error) => {
                warn!(player = %player.name, %error, "operator input failed, rolling at random");
                Strategy::UniformRandom.roll(&mut self.fallback, spec)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use std::io::Cursor;

    #[test]
    fn test_parse_accepts_spaces_and_commas() {
        let spec = DiceSpec::new(3, 6);
        let rolls = parse_roll_line(" 1 ,2  3\n", spec).unwrap();
        assert_eq!(rolls.faces(), &[1, 2, 3]);
    }

    #[test]
    fn test_parse_errors() {
        let spec = DiceSpec::new(2, 6);

        assert_eq!(parse_roll_line("   \n", spec), Err(InputError::Empty));
        assert_eq!(
            parse_roll_line("3 x", spec),
            Err(InputError::NotANumber("x".to_string()))
        );
        assert_eq!(
            parse_roll_line("3", spec),
            Err(InputError::WrongCount { expected: 2, got: 1 })
        );
        assert_eq!(
            parse_roll_line("0 3", spec),
            Err(InputError::OutOfRange { value: 0, faces: 6 })
        );
        assert_eq!(
            parse_roll_line("3 9", spec),
            Err(InputError::OutOfRange { value: 9, faces: 6 })
        );
        assert!(parse_roll_line("-1 2", spec).is_err());
    }

    #[test]
    fn test_console_reprompts_until_valid() {
        let input = Cursor::new(b"abc\n7\n\n5\n".to_vec());
        let mut operator = ConsoleOperator::new(input, Vec::new(), GameRng::new(1));
        let player = Player::human(PlayerId::new(0), "Human1");

        let rolls = operator.read_roll(&player, DiceSpec::new(1, 6));
        assert_eq!(rolls.faces(), &[5]);

        let output = String::from_utf8(operator.writer().clone()).unwrap();
        assert_eq!(output.matches("Human1, enter 1 dice value(s)").count(), 4);
        assert_eq!(output.matches("Invalid input").count(), 3);
        assert!(output.contains("'abc' is not a number"));
    }

    #[test]
    fn test_console_falls_back_at_end_of_input() {
        let mut operator = ConsoleOperator::new(Cursor::new(Vec::new()), Vec::new(), GameRng::new(1));
        let player = Player::human(PlayerId::new(0), "Human1");

        let rolls = operator.read_roll(&player, DiceSpec::new(2, 6));
        assert_eq!(rolls.len(), 2);
        assert!(rolls.faces().iter().all(|&f| (1..=6).contains(&f)));
    }
}
