use crate::config::ActivationTrigger;
use crate::gesture::{DEFAULT_MAXIMUM_FORCE, GesturePhase};
use orbit::Point;
use std::str::FromStr;
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Command(Command),
    ConfigReload,
}

/// One line of the control socket protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `attach W H [TOP]`
    Attach {
        width: f64,
        height: f64,
        top_inset: f64,
    },
    Detach,
    /// Long press began.
    Press(Point),
    Drag(Point),
    Release,
    Cancel,
    /// `force PHASE X Y FORCE [MAX]`
    Force {
        phase: GesturePhase,
        location: Point,
        force: f64,
        maximum_possible_force: f64,
    },
    Tap(Point),
    /// Tap on the item at this index.
    Item(usize),
    Scrim,
    Trigger(ActivationTrigger),
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument `{arg}` for `{command}`")]
    MissingArgument {
        command: &'static str,
        arg: &'static str,
    },
    #[error("Invalid value `{value}` for `{arg}`")]
    InvalidArgument { arg: &'static str, value: String },
    #[error("Unexpected trailing input: {0}")]
    Trailing(String),
}

struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn next<T: FromStr>(&mut self, arg: &'static str) -> Result<T, CommandError> {
        let word = self.words.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            arg,
        })?;
        parse(arg, word)
    }

    fn optional<T: FromStr>(&mut self, arg: &'static str) -> Result<Option<T>, CommandError> {
        self.words.next().map(|word| parse(arg, word)).transpose()
    }

    fn point(&mut self) -> Result<Point, CommandError> {
        Ok(Point::new(self.next("x")?, self.next("y")?))
    }

    fn finish<T>(mut self, value: T) -> Result<T, CommandError> {
        match self.words.next() {
            None => Ok(value),
            Some(extra) => Err(CommandError::Trailing(extra.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Attach,
    Detach,
    Press,
    Drag,
    Release,
    Cancel,
    Force,
    Tap,
    Item,
    Scrim,
    Trigger,
}

fn parse<T: FromStr>(arg: &'static str, word: &str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidArgument {
        arg,
        value: word.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?;
        let verb: Verb = word
            .parse()
            .map_err(|_| CommandError::Unknown(word.to_string()))?;
        let mut args = Args {
            command: verb.into(),
            words,
        };

        let parsed = match verb {
            Verb::Attach => Command::Attach {
                width: args.next("width")?,
                height: args.next("height")?,
                top_inset: args.optional("top")?.unwrap_or(0.0),
            },
            Verb::Detach => Command::Detach,
            Verb::Press => Command::Press(args.point()?),
            Verb::Drag => Command::Drag(args.point()?),
            Verb::Release => Command::Release,
            Verb::Cancel => Command::Cancel,
            Verb::Force => Command::Force {
                phase: args.next("phase")?,
                location: args.point()?,
                force: args.next("force")?,
                maximum_possible_force: args.optional("max")?.unwrap_or(DEFAULT_MAXIMUM_FORCE),
            },
            Verb::Tap => Command::Tap(args.point()?),
            Verb::Item => Command::Item(args.next("index")?),
            Verb::Scrim => Command::Scrim,
            Verb::Trigger => Command::Trigger(args.next("trigger")?),
        };
        args.finish(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_commands() {
        assert_eq!(
            "press 10 20.5".parse::<Command>(),
            Ok(Command::Press(Point::new(10.0, 20.5)))
        );
        assert_eq!(
            "  DRAG -3 4 ".parse::<Command>(),
            Ok(Command::Drag(Point::new(-3.0, 4.0)))
        );
        assert_eq!("release".parse::<Command>(), Ok(Command::Release));
        assert_eq!("cancel".parse::<Command>(), Ok(Command::Cancel));
        assert_eq!("item 2".parse::<Command>(), Ok(Command::Item(2)));
        assert_eq!("scrim".parse::<Command>(), Ok(Command::Scrim));
    }

    #[test]
    fn test_every_verb_is_case_insensitive() {
        assert_eq!("DETACH".parse::<Command>(), Ok(Command::Detach));
        assert_eq!("Scrim".parse::<Command>(), Ok(Command::Scrim));
        assert_eq!(
            "Trigger tap".parse::<Command>(),
            Ok(Command::Trigger(ActivationTrigger::Tap))
        );
        assert_eq!(
            "TAP 1 2".parse::<Command>(),
            Ok(Command::Tap(Point::new(1.0, 2.0)))
        );
    }

    #[test]
    fn test_parse_attach() {
        assert_eq!(
            "attach 800 600".parse::<Command>(),
            Ok(Command::Attach {
                width: 800.0,
                height: 600.0,
                top_inset: 0.0
            })
        );
        assert_eq!(
            "attach 800 600 44".parse::<Command>(),
            Ok(Command::Attach {
                width: 800.0,
                height: 600.0,
                top_inset: 44.0
            })
        );
    }

    #[test]
    fn test_parse_force() {
        assert_eq!(
            "force changed 1 2 3".parse::<Command>(),
            Ok(Command::Force {
                phase: GesturePhase::Changed,
                location: Point::new(1.0, 2.0),
                force: 3.0,
                maximum_possible_force: DEFAULT_MAXIMUM_FORCE,
            })
        );
        assert_eq!(
            "force Ended 1 2 3 6.5".parse::<Command>().map(|c| match c {
                Command::Force {
                    phase,
                    maximum_possible_force,
                    ..
                } => (phase, maximum_possible_force),
                _ => unreachable!(),
            }),
            Ok((GesturePhase::Ended, 6.5))
        );
    }

    #[test]
    fn test_parse_trigger_aliases() {
        assert_eq!(
            "trigger force".parse::<Command>(),
            Ok(Command::Trigger(ActivationTrigger::PressureTouch))
        );
        assert_eq!(
            "trigger Long-Press".parse::<Command>(),
            Ok(Command::Trigger(ActivationTrigger::LongPress))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "wiggle 1 2".parse::<Command>(),
            Err(CommandError::Unknown("wiggle".to_string()))
        );
        assert_eq!(
            "Triggers tap".parse::<Command>(),
            Err(CommandError::Unknown("Triggers".to_string()))
        );
        assert_eq!(
            "DRAG 1".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "drag",
                arg: "y"
            })
        );
        assert_eq!(
            "press 10".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "press",
                arg: "y"
            })
        );
        assert_eq!(
            "item -1".parse::<Command>(),
            Err(CommandError::InvalidArgument {
                arg: "index",
                value: "-1".to_string()
            })
        );
        assert_eq!(
            "release now".parse::<Command>(),
            Err(CommandError::Trailing("now".to_string()))
        );
        assert!(matches!(
            "trigger sideways".parse::<Command>(),
            Err(CommandError::InvalidArgument { arg: "trigger", .. })
        ));
    }
}
