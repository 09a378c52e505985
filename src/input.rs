use crate::engine::Command;
use crate::session::SessionId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Engine(Command),
    Show,
    Json,
    /// Recent stopwatch activity, optionally limited to the last `n` entries.
    Log(Option<usize>),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputParseError {
    UnknownCommand(String),
    MissingSessionId,
    InvalidSessionId(String),
    InvalidCount(String),
}

impl Display for InputParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputParseError::UnknownCommand(command) => write!(f, "unknown command: {command}"),
            InputParseError::MissingSessionId => write!(f, "missing session identifier"),
            InputParseError::InvalidSessionId(id) => write!(f, "invalid session identifier: {id}"),
            InputParseError::InvalidCount(count) => write!(f, "invalid entry count: {count}"),
        }
    }
}

impl Error for InputParseError {}

impl FromStr for Input {
    type Err = InputParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A bare space toggles, like a stopwatch button.
        if s == " " {
            return Ok(Input::Engine(Command::StartPause));
        }

        let s = s.trim();
        let (command, rest) = match s.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (s, ""),
        };

        let input = match command.to_ascii_lowercase().as_str() {
            "" | "show" => Input::Show,
            "s" | "start" | "pause" | "toggle" => Input::Engine(Command::StartPause),
            "l" | "lap" => Input::Engine(Command::Lap),
            "r" | "reset" => Input::Engine(Command::Reset),
            "save" => {
                let name = Some(rest.to_string()).filter(|name| !name.is_empty());
                Input::Engine(Command::Save(name))
            }
            "rm" | "delete" => {
                if rest.is_empty() {
                    return Err(InputParseError::MissingSessionId);
                }
                let id: SessionId = rest
                    .parse()
                    .map_err(|_| InputParseError::InvalidSessionId(rest.to_string()))?;
                Input::Engine(Command::DeleteSession(id))
            }
            "json" => Input::Json,
            "log" if rest.is_empty() => Input::Log(None),
            "log" => {
                let limit = rest
                    .parse()
                    .map_err(|_| InputParseError::InvalidCount(rest.to_string()))?;
                Input::Log(Some(limit))
            }
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other => return Err(InputParseError::UnknownCommand(other.to_string())),
        };

        Ok(input)
    }
}

pub const HELP: &str = "\
commands:
  s, start, pause     start or pause the stopwatch
  l, lap              record a lap
  r, reset            stop and clear the stopwatch
  save [name]         save the current run and reset
  rm, delete <id>     delete a saved session
  show                show the stopwatch (or press enter)
  json                show the stopwatch as JSON
  log [n]             show recent activity, or the last n entries
  q, quit             exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_commands() {
        assert_eq!("s".parse(), Ok(Input::Engine(Command::StartPause)));
        assert_eq!(" ".parse(), Ok(Input::Engine(Command::StartPause)));
        assert_eq!("PAUSE".parse(), Ok(Input::Engine(Command::StartPause)));
        assert_eq!("lap".parse(), Ok(Input::Engine(Command::Lap)));
        assert_eq!(" r ".parse(), Ok(Input::Engine(Command::Reset)));
    }

    #[test]
    fn test_parse_save() {
        assert_eq!("save".parse(), Ok(Input::Engine(Command::Save(None))));
        assert_eq!("save   ".parse(), Ok(Input::Engine(Command::Save(None))));
        assert_eq!(
            "save  morning  run ".parse(),
            Ok(Input::Engine(Command::Save(Some(String::from("morning  run")))))
        );
    }

    #[test]
    fn test_parse_delete() {
        let id: SessionId = "0000beef".parse().unwrap();
        assert_eq!("rm beef".parse(), Ok(Input::Engine(Command::DeleteSession(id))));
        assert_eq!("delete".parse::<Input>(), Err(InputParseError::MissingSessionId));
        assert_eq!(
            "delete nope".parse::<Input>(),
            Err(InputParseError::InvalidSessionId(String::from("nope")))
        );
    }

    #[test]
    fn test_parse_view_requests() {
        assert_eq!("".parse(), Ok(Input::Show));
        assert_eq!("json".parse(), Ok(Input::Json));
        assert_eq!("log".parse(), Ok(Input::Log(None)));
        assert_eq!("log 5".parse(), Ok(Input::Log(Some(5))));
        assert_eq!(
            "log five".parse::<Input>(),
            Err(InputParseError::InvalidCount(String::from("five")))
        );
        assert_eq!("?".parse(), Ok(Input::Help));
        assert_eq!("exit".parse(), Ok(Input::Quit));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "launch".parse::<Input>(),
            Err(InputParseError::UnknownCommand(String::from("launch")))
        );
    }
}
