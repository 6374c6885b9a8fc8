use super::Command;
use crate::memory::PlacementMethod;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script ends before the {0}")]
    MissingHeader(&'static str),

    #[error("unknown placement method {0} (expected 1, 2 or 3)")]
    InvalidMethod(u32),

    #[error("memory size must be greater than 0")]
    EmptyAddressSpace,

    #[error("expected {what}, found {token:?}")]
    InvalidNumber { what: &'static str, token: String },

    #[error("command {command} is missing its {operand}")]
    MissingOperand {
        command: char,
        operand: &'static str,
    },
}

/// A parsed command script: header plus the commands in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub method: PlacementMethod,
    pub total_size: u64,
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses whitespace-separated tokens: method selector, memory size, then
    /// commands. A command is recognised by the first character of its token,
    /// tokens starting with anything other than `A`, `D` or `P` are skipped.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut tokens = Tokens::new(text);

        let selector = tokens
            .next()
            .ok_or(ScriptError::MissingHeader("placement method"))?;
        let selector: u32 = parse_number(selector, "placement method")?;
        let method = PlacementMethod::try_from(selector).map_err(ScriptError::InvalidMethod)?;

        let total_size = tokens
            .next()
            .ok_or(ScriptError::MissingHeader("memory size"))?;
        let total_size: u64 = parse_number(total_size, "memory size")?;
        if total_size == 0 {
            return Err(ScriptError::EmptyAddressSpace);
        }

        let mut commands = Vec::new();
        while let Some(token) = tokens.next() {
            match token.chars().next() {
                Some('A') => {
                    let pid = tokens.operand('A', "pid")?;
                    let size = parse_number(tokens.operand('A', "size")?, "allocation size")?;
                    commands.push(Command::Allocate {
                        pid: pid.to_string(),
                        size,
                    });
                }
                Some('D') => {
                    let pid = tokens.operand('D', "pid")?;
                    commands.push(Command::Deallocate {
                        pid: pid.to_string(),
                    });
                }
                Some('P') => commands.push(Command::Print),
                _ => log::warn!("skipping unknown command {:?}", token),
            }
        }

        Ok(Script {
            method,
            total_size,
            commands,
        })
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn operand(&mut self, command: char, operand: &'static str) -> Result<&'a str, ScriptError> {
        self.inner
            .next()
            .ok_or(ScriptError::MissingOperand { command, operand })
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

fn parse_number<T: std::str::FromStr>(token: &str, what: &'static str) -> Result<T, ScriptError> {
    token.parse().map_err(|_| ScriptError::InvalidNumber {
        what,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_commands() {
        let script = Script::parse("2\n512\nA p1 100\nA p2 20\nD p1\nP\n").unwrap();
        assert_eq!(script.method, PlacementMethod::BestFit);
        assert_eq!(script.total_size, 512);
        assert_eq!(
            script.commands,
            vec![
                Command::Allocate {
                    pid: "p1".to_string(),
                    size: 100
                },
                Command::Allocate {
                    pid: "p2".to_string(),
                    size: 20
                },
                Command::Deallocate {
                    pid: "p1".to_string()
                },
                Command::Print,
            ]
        );
    }

    #[test]
    fn test_tokens_may_span_lines() {
        let script = Script::parse("1 100 A\np1\n30 P D p1").unwrap();
        assert_eq!(script.commands.len(), 3);
        assert_eq!(script.commands[2].name(), "deallocate");
    }

    #[test]
    fn test_commands_match_on_first_character() {
        let script = Script::parse("3 64 Alloc x 8 Print Dealloc x").unwrap();
        assert_eq!(
            script.commands,
            vec![
                Command::Allocate {
                    pid: "x".to_string(),
                    size: 8
                },
                Command::Print,
                Command::Deallocate {
                    pid: "x".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_commands_are_skipped() {
        let script = Script::parse("1 64 X P").unwrap();
        assert_eq!(script.commands, vec![Command::Print]);
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            Script::parse(""),
            Err(ScriptError::MissingHeader("placement method"))
        ));
        assert!(matches!(
            Script::parse("1"),
            Err(ScriptError::MissingHeader("memory size"))
        ));
        assert!(matches!(
            Script::parse("4 100"),
            Err(ScriptError::InvalidMethod(4))
        ));
        assert!(matches!(
            Script::parse("first 100"),
            Err(ScriptError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Script::parse("1 0"),
            Err(ScriptError::EmptyAddressSpace)
        ));
    }

    #[test]
    fn test_command_errors_are_fatal() {
        assert!(matches!(
            Script::parse("1 100 A p1"),
            Err(ScriptError::MissingOperand {
                command: 'A',
                operand: "size"
            })
        ));
        assert!(matches!(
            Script::parse("1 100 A p1 -5"),
            Err(ScriptError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Script::parse("1 100 P D"),
            Err(ScriptError::MissingOperand {
                command: 'D',
                operand: "pid"
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Script::from_file("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
