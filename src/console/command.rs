//! Parsing of console input lines into [`Command`]s.

use std::fmt;

/// Console input commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Add { list: String, name: String },
    Toggle { list: String, index: usize },
    Rename { list: String, index: usize, name: String },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    Usage(&'static str),
    BadIndex(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(word) => write!(f, "unknown command `{word}` (try `help`)"),
            CommandError::Usage(usage) => write!(f, "usage: {usage}"),
            CommandError::BadIndex(raw) => write!(f, "not an index: {raw}"),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP: &str = "\
commands:
  show                          render every watched list
  add <list> <name...>          append a todo
  toggle <list> <index>         flip a todo's completion
  rename <list> <index> <name...>
  help
  quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb {
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "add" => match rest.as_slice() {
            [list, name @ ..] if !name.is_empty() => Command::Add {
                list: list.to_string(),
                name: name.join(" "),
            },
            _ => return Err(CommandError::Usage("add <list> <name...>")),
        },
        "toggle" => match rest.as_slice() {
            [list, index] => Command::Toggle {
                list: list.to_string(),
                index: parse_index(index)?,
            },
            _ => return Err(CommandError::Usage("toggle <list> <index>")),
        },
        "rename" => match rest.as_slice() {
            [list, index, name @ ..] if !name.is_empty() => Command::Rename {
                list: list.to_string(),
                index: parse_index(index)?,
                name: name.join(" "),
            },
            _ => return Err(CommandError::Usage("rename <list> <index> <name...>")),
        },
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.parse().map_err(|_| CommandError::BadIndex(raw.to_string()))
}
