use std::collections::VecDeque;

use egui::Color32;
use thiserror::Error;

use crate::state::ShapeMode;

/// A parsed console line. Each variant maps onto exactly one editor call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Load(String),
    Save(String),
    Clear,
    SetEraser(bool),
    SetMode(ShapeMode),
    SetPenSize(f32),
    SetFill(Color32),
    SetBackground(Color32),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("bad argument `{value}` for `{command}`: {reason}")]
    BadArgument {
        command: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parses one console line.
///
/// Commands: `load <path>`, `save <path>`, `clear`, `draw`, `erase`,
/// `plot`, `path`, `size <n>`, `fill [r g b a]`, `bg [r g b a]`.
/// Color channels are given in 0..=1 and default to `0 0 0 1`, so a bare
/// `fill` means opaque black.
pub fn parse(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut words = line.split_whitespace();
    let name = words.next().ok_or(ParseError::Empty)?;
    match name {
        "load" => Ok(ConsoleCommand::Load(rest_as_path("load", words)?)),
        "save" => Ok(ConsoleCommand::Save(rest_as_path("save", words)?)),
        "clear" => Ok(ConsoleCommand::Clear),
        "erase" => Ok(ConsoleCommand::SetEraser(true)),
        "draw" => Ok(ConsoleCommand::SetEraser(false)),
        "plot" => Ok(ConsoleCommand::SetMode(ShapeMode::Freehand)),
        "path" => Ok(ConsoleCommand::SetMode(ShapeMode::Path)),
        "size" => {
            let value = words.next().ok_or(ParseError::MissingArgument {
                command: "size",
                expected: "a pen size",
            })?;
            let size: f32 = value.parse().map_err(|_| ParseError::BadArgument {
                command: "size",
                value: value.to_owned(),
                reason: "not a number",
            })?;
            if !size.is_finite() || size <= 0.0 {
                return Err(ParseError::BadArgument {
                    command: "size",
                    value: value.to_owned(),
                    reason: "pen size must be positive",
                });
            }
            Ok(ConsoleCommand::SetPenSize(size))
        }
        "fill" => Ok(ConsoleCommand::SetFill(parse_color("fill", words)?)),
        "bg" => Ok(ConsoleCommand::SetBackground(parse_color("bg", words)?)),
        other => Err(ParseError::Unknown(other.to_owned())),
    }
}

/// The remaining words joined back together, so paths may contain spaces.
fn rest_as_path<'a>(
    command: &'static str,
    words: impl Iterator<Item = &'a str>,
) -> Result<String, ParseError> {
    let path = words.collect::<Vec<_>>().join(" ");
    if path.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            expected: "a file path",
        });
    }
    Ok(path)
}

/// Up to four channel values in 0..=1; missing channels default to
/// `0 0 0 1`. Out-of-range values are clamped, surplus words are rejected.
fn parse_color<'a>(
    command: &'static str,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<Color32, ParseError> {
    let mut channels = [0.0f32, 0.0, 0.0, 1.0];
    for (slot, word) in channels.iter_mut().zip(words.by_ref()) {
        let value: f32 = word.parse().map_err(|_| ParseError::BadArgument {
            command,
            value: word.to_owned(),
            reason: "not a number",
        })?;
        *slot = value.clamp(0.0, 1.0);
    }
    if let Some(extra) = words.next() {
        return Err(ParseError::BadArgument {
            command,
            value: extra.to_owned(),
            reason: "at most four channels",
        });
    }
    let [r, g, b, a] = channels.map(|c| (c * 255.0).round() as u8);
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

const MAX_FEEDBACK_LINES: usize = 8;

/// Console widget state: the input line and a bounded feedback scrollback.
#[derive(Default)]
pub struct Console {
    input: String,
    feedback: VecDeque<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the feedback lines and the input field. Returns a command when
    /// the user submits a line that parses.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<ConsoleCommand> {
        for line in &self.feedback {
            ui.weak(line.as_str());
        }

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.input)
                .hint_text("load save clear draw erase plot path size fill bg")
                .desired_width(f32::INFINITY),
        );

        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if !submitted {
            return None;
        }
        response.request_focus();

        let line = std::mem::take(&mut self.input);
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match parse(line) {
            Ok(command) => {
                self.push_feedback(format!("> {line}"));
                Some(command)
            }
            Err(err) => {
                log::warn!("console: {err}");
                self.push_feedback(err.to_string());
                None
            }
        }
    }

    pub fn push_feedback(&mut self, line: impl Into<String>) {
        self.feedback.push_back(line.into());
        while self.feedback.len() > MAX_FEEDBACK_LINES {
            self.feedback.pop_front();
        }
    }
}
