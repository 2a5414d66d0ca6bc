//! Parsing of terminal input lines into host actions.

use crate::overlay::ControlInput;

/// One line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostInput {
    Control(ControlInput),
    /// Turn the viewer to `yaw`/`pitch` degrees.
    Aim { yaw_deg: f32, pitch_deg: f32 },
    Resize { width: u32, height: u32 },
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  f              fire
  r              restart (after game over)
  a YAW PITCH    aim, degrees
  w WIDTH HEIGHT resize viewport
  s              print status as JSON
  h              help
  q              quit";

/// Parse one input line. Unknown or malformed input yields `None`.
pub fn parse(line: &str) -> Option<HostInput> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let rest: Vec<&str> = words.collect();

    match (head, rest.as_slice()) {
        ("f" | "fire", []) => Some(HostInput::Control(ControlInput::Fire)),
        ("r" | "restart", []) => Some(HostInput::Control(ControlInput::Restart)),
        ("a" | "aim", [yaw, pitch]) => {
            let yaw_deg: f32 = yaw.parse().ok()?;
            let pitch_deg: f32 = pitch.parse().ok()?;
            (yaw_deg.is_finite() && pitch_deg.is_finite())
                .then_some(HostInput::Aim { yaw_deg, pitch_deg })
        }
        ("w" | "resize", [width, height]) => Some(HostInput::Resize {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        }),
        ("s" | "status", []) => Some(HostInput::Status),
        ("h" | "help" | "?", []) => Some(HostInput::Help),
        ("q" | "quit", []) => Some(HostInput::Quit),
        _ => None,
    }
}
