//! Line-oriented console prompts.
//!
//! Every `ask_*` method writes a prompt, reads one line and parses it. A
//! line that does not parse is reported as `Invalid input: ...` and the
//! prompt is repeated. End of input surfaces as `InputError::Eof`; console
//! write failures surface as `Error::Io`.

use std::io::{BufRead, Write};

use crate::core::Square;
use crate::error::{InputError, Result};

/// Parse a signed integer, ignoring surrounding whitespace.
pub fn parse_int(line: &str) -> std::result::Result<i64, InputError> {
    let line = line.trim();
    line.parse()
        .map_err(|_| InputError::NotAnInteger(line.to_string()))
}

/// Parse an integer and check it against `[min, max]`.
pub fn parse_int_in(line: &str, min: i64, max: i64) -> std::result::Result<i64, InputError> {
    let value = parse_int(line)?;
    if value < min || value > max {
        return Err(InputError::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Parse a `start,end` pair of squares such as `16,6`.
pub fn parse_pair(line: &str) -> std::result::Result<(Square, Square), InputError> {
    let line = line.trim();
    let malformed = || InputError::MalformedPair(line.to_string());

    let (start, end) = line.split_once(',').ok_or_else(malformed)?;
    let start = start.trim().parse().map_err(|_| malformed())?;
    let end = end.trim().parse().map_err(|_| malformed())?;
    Ok((start, end))
}

/// Parse `y`/`yes`/`n`/`no`, case-insensitive.
pub fn parse_yes_no(line: &str) -> std::result::Result<bool, InputError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputError::NotYesNo(line.to_string())),
    }
}

/// Console prompter over any line reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of output.
    pub fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prompt and return the trimmed line, which may be empty.
    pub fn ask_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Eof.into());
        }
        Ok(line.trim().to_string())
    }

    /// Prompt until `parse` accepts the line.
    pub fn ask_with<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> std::result::Result<T, InputError>,
    ) -> Result<T> {
        loop {
            let line = self.ask_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!(input = %line, "rejected input: {}", err);
                    self.say(format_args!("Invalid input: {err}"))?;
                }
            }
        }
    }

    pub fn ask_int(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
        self.ask_with(prompt, |line| parse_int_in(line, min, max))
    }

    pub fn ask_pair(&mut self, prompt: &str) -> Result<(Square, Square)> {
        self.ask_with(prompt, parse_pair)
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.ask_with(prompt, parse_yes_no)
    }

    /// Prompt and discard whatever line comes back.
    pub fn wait_enter(&mut self, prompt: &str) -> Result<()> {
        self.ask_line(prompt).map(|_| ())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" 42 "), Ok(42));
        assert_eq!(parse_int("-3"), Ok(-3));
        assert_eq!(parse_int("ten"), Err(InputError::NotAnInteger("ten".into())));
        assert_eq!(
            parse_int_in("5", 2, 4),
            Err(InputError::OutOfRange {
                value: 5,
                min: 2,
                max: 4
            })
        );
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("16,6"), Ok((16, 6)));
        assert_eq!(parse_pair(" 9 , 31 "), Ok((9, 31)));
        assert!(matches!(parse_pair("16"), Err(InputError::MalformedPair(_))));
        assert!(matches!(parse_pair("16,x"), Err(InputError::MalformedPair(_))));
        assert!(matches!(parse_pair("-1,4"), Err(InputError::MalformedPair(_))));
        assert!(matches!(parse_pair("1,2,3"), Err(InputError::MalformedPair(_))));
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no("no"), Ok(false));
        assert!(parse_yes_no("maybe").is_err());
    }

    #[test]
    fn test_ask_int_reprompts() {
        let mut p = prompter("abc\n9\n3\n");
        assert_eq!(p.ask_int("Players: ", 2, 4).unwrap(), 3);

        let out = transcript(p);
        assert_eq!(out.matches("Players: ").count(), 3);
        assert!(out.contains("Invalid input: 'abc' is not an integer"));
        assert!(out.contains("Invalid input: value must be between 2 and 4, got 9"));
    }

    #[test]
    fn test_ask_pair_and_yes_no() {
        let mut p = prompter("16;6\n16,6\nsure\ny\n");
        assert_eq!(p.ask_pair("Snake: ").unwrap(), (16, 6));
        assert!(p.ask_yes_no("Save? ").unwrap());
    }

    #[test]
    fn test_eof_propagates() {
        let mut p = prompter("oops\n");
        let err = p.ask_int("Size: ", 1, 10).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Eof)));

        let mut p = prompter("");
        assert!(p.wait_enter("Press enter").is_err());
    }

    #[test]
    fn test_ask_line_trims() {
        let mut p = prompter("  Ada  \r\n\n");
        assert_eq!(p.ask_line("Name: ").unwrap(), "Ada");
        assert_eq!(p.ask_line("Name: ").unwrap(), "");
    }
}
