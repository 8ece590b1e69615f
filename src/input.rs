use anyhow::{Context, Result, bail, ensure};

use crate::events::{InputEvent, Key};

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Events(Vec<InputEvent>),
    Status,
    Quit,
}

impl From<InputEvent> for Command {
    fn from(event: InputEvent) -> Self {
        Command::Events(vec![event])
    }
}

/// Parses console commands. Blank lines yield `None`.
///
/// `n|next|right`, `p|prev|left`, `go <i>`, `swipe <x0> <x1>`, `esc`, `space`,
/// `enter`, `leave`, `click`, `audio`, `status`, `q|quit`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "n" | "next" => InputEvent::NextButton.into(),
        "right" => InputEvent::Key(Key::ArrowRight).into(),
        "p" | "prev" => InputEvent::PreviousButton.into(),
        "left" => InputEvent::Key(Key::ArrowLeft).into(),
        "go" => {
            let raw = words.next().context("go needs a slide number")?;
            let index: usize = raw
                .parse()
                .with_context(|| format!("invalid slide number {raw:?}"))?;
            InputEvent::Indicator(index).into()
        }
        "swipe" => {
            let mut coord = |name: &str| -> Result<f32> {
                let raw = words
                    .next()
                    .with_context(|| format!("swipe needs {name}"))?;
                let value: f32 = raw
                    .parse()
                    .with_context(|| format!("invalid {name} {raw:?}"))?;
                ensure!(value.is_finite(), "{name} must be a finite number");
                Ok(value)
            };
            let from = coord("start x")?;
            let to = coord("end x")?;
            Command::Events(vec![
                InputEvent::TouchStart { x: from, y: 0.0 },
                InputEvent::TouchMove { x: to, y: 0.0 },
                InputEvent::TouchEnd { x: to, y: 0.0 },
            ])
        }
        "esc" | "escape" => InputEvent::Key(Key::Escape).into(),
        "space" => InputEvent::Key(Key::Space).into(),
        "enter" => InputEvent::PointerEnter.into(),
        "leave" => InputEvent::PointerLeave.into(),
        "click" => InputEvent::Click.into(),
        "audio" => InputEvent::AudioButton.into(),
        "status" => Command::Status,
        "q" | "quit" => Command::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(
            parse_line("n").unwrap(),
            Some(Command::from(InputEvent::NextButton))
        );
        assert_eq!(
            parse_line("  LEFT ").unwrap(),
            Some(Command::from(InputEvent::Key(Key::ArrowLeft)))
        );
        assert_eq!(
            parse_line("go 3").unwrap(),
            Some(Command::from(InputEvent::Indicator(3)))
        );
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn swipe_expands_to_touch_sequence() {
        let Some(Command::Events(events)) = parse_line("swipe 300 200").unwrap() else {
            panic!("expected events");
        };
        assert_eq!(
            events,
            vec![
                InputEvent::TouchStart { x: 300.0, y: 0.0 },
                InputEvent::TouchMove { x: 200.0, y: 0.0 },
                InputEvent::TouchEnd { x: 200.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("go").is_err());
        assert!(parse_line("go two").is_err());
        assert!(parse_line("swipe 10").is_err());
        assert!(parse_line("swipe nan 0").is_err());
        assert!(parse_line("swipe 0 inf").is_err());
        assert!(parse_line("dance").is_err());
    }
}
