use std::{path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::{
    geometry::{PixelPoint, Triangle},
    layout::{CellRef, LayoutOptions, MAX_ROWS},
    parsers,
};

#[derive(Debug, PartialEq)]
pub enum Action {
    Vertices {
        cell: CellRef,
    },
    Locate {
        triangle: Triangle,
    },
    Check,
    Render {
        output: PathBuf,
        highlight: Option<CellRef>,
        magnify: usize,
        padding: usize,
    },
}

#[derive(Debug, PartialEq)]
pub struct Command {
    pub options: LayoutOptions,
    pub action: Action,
}

pub struct CommandBuilder {
    b_options: LayoutOptions,
    b_action: Option<Action>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("no command given")]
    MissingCommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error("'{given}' is not a valid value for {option} ({expected})")]
    BadValue {
        option: String,
        given: String,
        expected: &'static str,
    },
    #[error("'{0}' is not a cell label (a row letter followed by a column number, like B7)")]
    BadLabel(String),
    #[error("'{0}' is not a pixel point (two non-negative numbers as x,y)")]
    BadPoint(String),
    #[error("a layout can hold at most {MAX_ROWS} rows")]
    TooManyRows,
    #[error("command '{command}' expects {expected}")]
    WrongArguments {
        command: String,
        expected: &'static str,
    },
}

impl CommandBuilder {
    pub fn new() -> Self {
        CommandBuilder {
            b_options: LayoutOptions::default(),
            b_action: None,
        }
    }

    pub fn rows(mut self, row_count: usize) -> Self {
        self.b_options.row_count = row_count;
        self
    }

    pub fn cols(mut self, col_count: usize) -> Self {
        self.b_options.col_count = col_count;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.b_options.scale = scale;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.b_action = Some(action);
        self
    }

    pub fn build(self) -> Option<Command> {
        Some(Command {
            options: self.b_options,
            action: self.b_action?,
        })
    }
}

pub fn usage() -> &'static str {
    "usage: trigrid <command> [options]

commands:
  vertices <LABEL>           print the vertex triple of a cell, e.g. trigrid vertices B7
  locate <X,Y> <X,Y> <X,Y>   find the cell a vertex triple belongs to
  check                      round-trip every cell and print the report
  render <OUT.png>           draw the layout to a PNG

options:
  --rows N      number of rows (default 6)
  --cols N      number of columns (default 12)
  --scale N     triangle leg length in layout pixels (default 10)

render options:
  --cell LABEL  highlight one cell
  --magnify N   image pixels per layout pixel (default 8)
  --padding N   margin in image pixels (default 10)"
}

/// Interprets command-line words into a [`Command`].
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut words = args.iter().map(String::as_str);
    let command = words.next().ok_or(UsageError::MissingCommand)?;

    let mut builder = CommandBuilder::new();
    let mut positionals: Vec<&str> = vec![];
    let mut highlight = None;
    let mut magnify = 8;
    let mut padding = 10;

    while let Some(word) = words.next() {
        match word {
            "--rows" => builder = builder.rows(positive_value(&mut words, "--rows")?),
            "--cols" => builder = builder.cols(positive_value(&mut words, "--cols")?),
            "--scale" => builder = builder.scale(positive_value(&mut words, "--scale")?),
            "--cell" => {
                let label = value(&mut words, "--cell")?;
                highlight = Some(
                    parsers::parse_cell_label(label)
                        .ok_or_else(|| UsageError::BadLabel(label.to_string()))?,
                );
            }
            "--magnify" => magnify = positive_value(&mut words, "--magnify")?,
            "--padding" => padding = number_value(&mut words, "--padding")?,
            _ if word.starts_with('-') => {
                return Err(UsageError::UnknownOption(word.to_string()));
            }
            _ => positionals.push(word),
        }
    }
    if builder.b_options.row_count > MAX_ROWS {
        return Err(UsageError::TooManyRows);
    }

    let action = match command {
        "vertices" => {
            let [label] = positionals[..] else {
                return Err(wrong_arguments(command, "one cell label"));
            };
            let cell = parsers::parse_cell_label(label)
                .ok_or_else(|| UsageError::BadLabel(label.to_string()))?;
            Action::Vertices { cell }
        }
        "locate" => {
            let [a, b, c] = positionals[..] else {
                return Err(wrong_arguments(command, "three x,y points"));
            };
            let triangle = Triangle::new(point(a)?, point(b)?, point(c)?);
            Action::Locate { triangle }
        }
        "check" => {
            if !positionals.is_empty() {
                return Err(wrong_arguments(command, "no arguments"));
            }
            Action::Check
        }
        "render" => {
            let [output] = positionals[..] else {
                return Err(wrong_arguments(command, "one output path"));
            };
            Action::Render {
                output: PathBuf::from(output),
                highlight,
                magnify,
                padding,
            }
        }
        other => return Err(UsageError::UnknownCommand(other.to_string())),
    };

    builder
        .action(action)
        .build()
        .ok_or(UsageError::MissingCommand)
}

fn wrong_arguments(command: &str, expected: &'static str) -> UsageError {
    UsageError::WrongArguments {
        command: command.to_string(),
        expected,
    }
}

fn point(word: &str) -> Result<PixelPoint, UsageError> {
    parsers::parse_point(word).ok_or_else(|| UsageError::BadPoint(word.to_string()))
}

fn value<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    option: &str,
) -> Result<&'a str, UsageError> {
    words
        .next()
        .ok_or_else(|| UsageError::MissingValue(option.to_string()))
}

fn number_value<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    option: &str,
) -> Result<usize, UsageError> {
    let word = value(words, option)?;
    word.parse().map_err(|_| UsageError::BadValue {
        option: option.to_string(),
        given: word.to_string(),
        expected: "a number",
    })
}

fn positive_value<'a, N: FromStr + PartialOrd + From<u8>>(
    words: &mut impl Iterator<Item = &'a str>,
    option: &str,
) -> Result<N, UsageError> {
    let word = value(words, option)?;
    match word.parse::<N>() {
        Ok(n) if n > N::from(0) => Ok(n),
        _ => Err(UsageError::BadValue {
            option: option.to_string(),
            given: word.to_string(),
            expected: "a positive number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn vertices_command_parses() {
        let command = parse_args(&args(&["vertices", "b7"])).unwrap();
        assert_eq!(command.options, LayoutOptions::default());
        assert_eq!(
            command.action,
            Action::Vertices {
                cell: CellRef { row: 'B', col: 7 }
            }
        );
    }

    #[test]
    fn locate_command_parses() {
        let command = parse_args(&args(&["locate", "0,10", "0,0", "10,10"])).unwrap();
        assert_eq!(
            command.action,
            Action::Locate {
                triangle: Triangle::new(
                    PixelPoint::new(0, 10),
                    PixelPoint::new(0, 0),
                    PixelPoint::new(10, 10),
                )
            }
        );
    }

    #[test]
    fn layout_options_apply_to_any_command() {
        let command =
            parse_args(&args(&["vertices", "A1", "--scale", "25", "--rows", "3"])).unwrap();
        assert_eq!(
            command.options,
            LayoutOptions {
                row_count: 3,
                col_count: 12,
                scale: 25,
            }
        );
    }

    #[test]
    fn render_command_parses_with_options() {
        let command = parse_args(&args(&[
            "render", "out.png", "--cell", "A5", "--magnify", "2", "--padding", "0",
        ]))
        .unwrap();
        assert_eq!(
            command.action,
            Action::Render {
                output: PathBuf::from("out.png"),
                highlight: Some(CellRef { row: 'A', col: 5 }),
                magnify: 2,
                padding: 0,
            }
        );
    }

    #[test]
    fn check_takes_no_arguments() {
        assert_eq!(parse_args(&args(&["check"])).unwrap().action, Action::Check);
        assert_eq!(
            parse_args(&args(&["check", "A1"])),
            Err(UsageError::WrongArguments {
                command: "check".to_string(),
                expected: "no arguments",
            })
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse_args(&[]), Err(UsageError::MissingCommand));
        assert_eq!(
            parse_args(&args(&["explode"])),
            Err(UsageError::UnknownCommand("explode".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["vertices", "A1", "--sideways"])),
            Err(UsageError::UnknownOption("--sideways".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["vertices", "A1", "--scale"])),
            Err(UsageError::MissingValue("--scale".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["vertices", "11"])),
            Err(UsageError::BadLabel("11".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["locate", "0,10", "0,0", "ten,ten"])),
            Err(UsageError::BadPoint("ten,ten".to_string()))
        );
    }

    #[test]
    fn option_values_are_checked() {
        assert_eq!(
            parse_args(&args(&["check", "--scale", "0"])),
            Err(UsageError::BadValue {
                option: "--scale".to_string(),
                given: "0".to_string(),
                expected: "a positive number",
            })
        );
        assert_eq!(
            parse_args(&args(&["check", "--rows", "27"])),
            Err(UsageError::TooManyRows)
        );
    }
}
