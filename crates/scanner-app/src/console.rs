//! Line-based operator input.
//!
//! The selected object kind is presentation state: it lives here and is
//! passed to the engine explicitly with each `AddObject`.

use scanner_core::commands::OperatorCommand;
use scanner_core::enums::ObjectKind;

/// What one line of input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Forward a command to the engine.
    Command(OperatorCommand),
    /// Change the selected object kind.
    Select(ObjectKind),
    /// Print the help text.
    Help,
    /// Stop the scanner.
    Quit,
    /// Nothing to do (blank line).
    Nothing,
    /// Unrecognised input.
    Unknown(String),
}

pub const HELP: &str = "commands: ship | whale | sub | iceberg  (select kind),  \
a [angle] [distance]  (add),  c  (clear),  h  (help),  q  (quit)";

/// Console input state.
#[derive(Debug, Clone, Default)]
pub struct Console {
    selected: ObjectKind,
}

impl Console {
    pub fn new(selected: ObjectKind) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> ObjectKind {
        self.selected
    }

    /// Parse one line. Selection changes are applied immediately.
    pub fn parse(&mut self, line: &str) -> InputAction {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return InputAction::Nothing;
        };

        match head.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => InputAction::Quit,
            "h" | "help" | "?" => InputAction::Help,
            "c" | "clear" => InputAction::Command(OperatorCommand::ClearAll),
            "a" | "add" => {
                let coords = (parse_coord(words.next()), parse_coord(words.next()));
                match (coords, words.next()) {
                    ((Ok(angle_deg), Ok(distance_norm)), None) => {
                        InputAction::Command(OperatorCommand::AddObject {
                            kind: self.selected,
                            angle_deg,
                            distance_norm,
                        })
                    }
                    _ => InputAction::Unknown(line.trim().to_string()),
                }
            }
            "sub" => self.select(ObjectKind::Submarine),
            other => match other.parse::<ObjectKind>() {
                Ok(kind) => self.select(kind),
                Err(_) => InputAction::Unknown(line.trim().to_string()),
            },
        }
    }

    fn select(&mut self, kind: ObjectKind) -> InputAction {
        self.selected = kind;
        InputAction::Select(kind)
    }
}

/// An absent word is `None`; a word that is not a number is an error.
fn parse_coord(word: Option<&str>) -> Result<Option<f64>, ()> {
    word.map(|w| w.parse::<f64>().map_err(|_| ())).transpose()
}
