use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use rand::Rng;
use tracing::info;

use nautiloid::GameState;
use nautiloid::config::Config;
use nautiloid::error::{GameError, GameResult};
use nautiloid::load_world_from_file;
use nautiloid::player::Direction;
use nautiloid::render::frame::{DrawCommand, Frame};
use nautiloid::ui::{FloatingNumber, Frontend, InputEvent, Menu};

/// Line-oriented frontend over stdin/stdout. Frames are summarised as their text
/// labels; everything else is drawn for a graphical frontend only.
struct Terminal<R, W> {
    input: R,
    out: W,
    pending: VecDeque<InputEvent>,
    last_frame: Option<Frame>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn new(input: R, out: W) -> Self {
        Terminal {
            input,
            out,
            pending: VecDeque::new(),
            last_frame: None,
        }
    }

    /// Next non-empty line; EOF means the player is gone.
    fn read_line(&mut self) -> GameResult<String> {
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out, "\nGoodbye.")?;
                return Err(GameError::Quit);
            }
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line.to_string());
            }
        }
    }

    fn print_frame(&mut self) -> GameResult<()> {
        let Some(frame) = self.last_frame.take() else {
            return Ok(());
        };
        writeln!(self.out)?;
        for command in &frame.commands {
            let DrawCommand::Text { at, text, .. } = command else {
                continue;
            };
            writeln!(self.out, "  {text:<24} ({}, {})", at.x, at.y)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
    fn present(&mut self, frame: &Frame) -> GameResult<()> {
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn poll_input(&mut self) -> GameResult<InputEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            self.print_frame()?;
            let line = self.read_line()?;
            match parse_command(&line) {
                Some(events) => self.pending.extend(events),
                None => writeln!(
                    self.out,
                    "Commands: w/a/s/d [count], e interact, i inventory, p party, q quit"
                )?,
            }
        }
    }

    fn message(&mut self, lines: &[String]) -> GameResult<()> {
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let rule = "-".repeat(width + 4);
        writeln!(self.out, "+{rule}+")?;
        for line in lines {
            writeln!(self.out, "|  {line:<width$}  |")?;
        }
        writeln!(self.out, "+{rule}+")?;
        Ok(())
    }

    fn menu(&mut self, menu: &Menu<'_>) -> GameResult<usize> {
        self.print_frame()?;
        match menu.speaker {
            Some(speaker) => writeln!(self.out, "{speaker}: {}", menu.question)?,
            None => writeln!(self.out, "{}", menu.question)?,
        }
        for (i, option) in menu.options.iter().enumerate() {
            writeln!(self.out, "  {}. {option}", i + 1)?;
        }
        let line = self.read_line()?;
        if line.eq_ignore_ascii_case("q") {
            return Err(GameError::Quit);
        }
        // Anything unparsable is out of range and gets re-asked.
        Ok(line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .unwrap_or(usize::MAX))
    }

    fn text_input(&mut self, prompt: &str) -> GameResult<String> {
        writeln!(self.out, "{prompt}")?;
        self.read_line()
    }

    fn floating_number(&mut self, number: &FloatingNumber) -> GameResult<()> {
        writeln!(self.out, "  [{}] {}", number.label(), number.caption)?;
        Ok(())
    }

    fn credits(&mut self, lines: &[String]) -> GameResult<()> {
        writeln!(self.out)?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "\nThanks for playing.")?;
        Ok(())
    }
}

/// `w`, `a 5`, `up 3`, `e`, `i`, `p`, `q`. Unknown input yields `None`.
fn parse_command(line: &str) -> Option<Vec<InputEvent>> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?.to_lowercase();
    let count = match parts.next() {
        Some(n) => n.parse::<usize>().ok()?.clamp(1, 100),
        None => 1,
    };
    let event = match verb.as_str() {
        "w" | "up" => InputEvent::Move(Direction::Up),
        "a" | "left" => InputEvent::Move(Direction::Left),
        "s" | "down" => InputEvent::Move(Direction::Down),
        "d" | "right" => InputEvent::Move(Direction::Right),
        "e" => InputEvent::Interact,
        "i" => InputEvent::Inventory,
        "p" => InputEvent::Party,
        "q" | "quit" => InputEvent::Quit,
        _ => return None,
    };
    match event {
        InputEvent::Move(_) => Some(vec![event; count]),
        _ => Some(vec![event]),
    }
}

fn play(config: &Config) -> GameResult<()> {
    let world = load_world_from_file(&config.world)?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    info!(world = %config.world.display(), seed, "session starting");

    let stdin = io::stdin();
    let mut ui = Terminal::new(stdin.lock(), io::stdout());
    writeln!(ui.out, "Welcome to {}!", world.name)?;
    if !world.desc.trim().is_empty() {
        writeln!(ui.out, "{}", world.desc.trim())?;
    }

    let mut game = GameState::create(world, seed, &mut ui)?;
    let ending = game.run(&mut ui)?;
    info!(?ending, "session over");
    Ok(())
}

fn main() -> ExitCode {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(io::stderr)
        .init();

    match play(&config) {
        Ok(()) | Err(GameError::Quit) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_repeat() {
        assert_eq!(
            parse_command("d 3"),
            Some(vec![InputEvent::Move(Direction::Right); 3])
        );
        assert_eq!(parse_command("up"), Some(vec![InputEvent::Move(Direction::Up)]));
    }

    #[test]
    fn junk_is_rejected() {
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command("w many"), None);
    }

    #[test]
    fn menu_reads_one_based_choices() {
        let mut term = Terminal::new("2\n".as_bytes(), Vec::new());
        let menu = Menu::new("Pick", vec!["a".into(), "b".into()]);
        assert_eq!(term.menu(&menu).unwrap(), 1);
    }

    #[test]
    fn eof_quits() {
        let mut term = Terminal::new("".as_bytes(), Vec::new());
        assert!(term.poll_input().unwrap_err().is_quit());
    }

    #[test]
    fn zero_is_out_of_range() {
        let mut term = Terminal::new("0\n".as_bytes(), Vec::new());
        let menu = Menu::new("Pick", vec!["a".into()]);
        assert_eq!(term.menu(&menu).unwrap(), usize::MAX);
    }
}
