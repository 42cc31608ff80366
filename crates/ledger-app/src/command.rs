use std::str::FromStr;

use ledger_types::Month;
use ledger_view::{PageInputError, PageSize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for the list of commands")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a month, use 1-12 or Ene..Dic")]
    InvalidMonth(String),
    #[error("'{0}' is not a row count")]
    InvalidRows(String),
    #[error(transparent)]
    Page(#[from] PageInputError),
}

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty line: redraw the screen.
    Redraw,
    Reload,
    Search(String),
    ClearSearch,
    Recompute(Month),
    First,
    Previous,
    Next,
    Last,
    /// Raw page input; validated against the current page count.
    Page(String),
    Rows(PageSize),
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  reload            recargar la base de datos
  search <texto>    filtrar por CeCo o Código
  clear             quitar el filtro
  calc <mes>        calcular hasta el mes (1-12 o Ene..Dic)
  first | prev | next | last
  page <n>          ir a la página n
  rows <n>          registros por página (20, 50, 100, 500)
  export            exportar el filtro actual a Excel
  help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Redraw,
            "reload" | "r" => Self::Reload,
            "search" | "s" | "/" => {
                if rest.is_empty() {
                    Self::ClearSearch
                } else {
                    Self::Search(rest.to_string())
                }
            }
            "clear" => Self::ClearSearch,
            "calc" | "c" => Self::Recompute(parse_month(require(rest, "calc", "a month")?)?),
            "first" => Self::First,
            "prev" | "p" => Self::Previous,
            "next" | "n" => Self::Next,
            "last" => Self::Last,
            "page" | "g" => Self::Page(require(rest, "page", "a page number")?.to_string()),
            "rows" => {
                let rows = require(rest, "rows", "20, 50, 100 or 500")?;
                let rows: usize = rows
                    .parse()
                    .map_err(|_| CommandError::InvalidRows(rows.to_string()))?;
                Self::Rows(PageSize::try_from(rows)?)
            }
            "export" | "x" => Self::Export,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

const fn require<'a>(
    arg: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    Ok(arg)
}

fn parse_month(arg: &str) -> Result<Month, CommandError> {
    let invalid = || CommandError::InvalidMonth(arg.to_string());
    match arg.parse::<i64>() {
        Ok(number) => Month::try_from(number).map_err(|_| invalid()),
        Err(_) => arg.parse::<Month>().map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!("".parse(), Ok(Command::Redraw));
        assert_eq!("  NEXT ".parse(), Ok(Command::Next));
        assert_eq!("prev".parse(), Ok(Command::Previous));
        assert_eq!("last".parse(), Ok(Command::Last));
        assert_eq!("page 4".parse(), Ok(Command::Page("4".to_string())));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_search_keeps_inner_spaces() {
        assert_eq!(
            "search  CC 10 ".parse(),
            Ok(Command::Search("CC 10".to_string()))
        );
        assert_eq!("search".parse(), Ok(Command::ClearSearch));
    }

    #[test]
    fn test_parse_recompute_month() {
        assert_eq!("calc 3".parse(), Ok(Command::Recompute(Month::Mar)));
        assert_eq!("calc ago".parse(), Ok(Command::Recompute(Month::Aug)));
        assert_eq!(
            "calc 13".parse::<Command>(),
            Err(CommandError::InvalidMonth("13".to_string()))
        );
        assert_eq!(
            "calc".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "calc",
                expected: "a month"
            })
        );
    }

    #[test]
    fn test_parse_rows() {
        assert_eq!("rows 100".parse(), Ok(Command::Rows(PageSize::Hundred)));
        assert_eq!(
            "rows 30".parse::<Command>(),
            Err(CommandError::Page(PageInputError::UnsupportedPageSize(30)))
        );
        assert_eq!(
            "rows many".parse::<Command>(),
            Err(CommandError::InvalidRows("many".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            "frobnicate now".parse::<Command>(),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
