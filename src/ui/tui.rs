use std::io::{Stdout, stdout};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
};
use std::time::Duration;

use crate::core::events::UiCommand;
use crate::core::traits::CountdownDisplay;
use crate::ui::led;

/// Full-screen LED clock on the terminal.
///
/// Grey block digits on black, the look of the original desk timer. A left
/// click anywhere (or Enter/Space/`s`) starts the countdown.
pub struct LedClockDisplay {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    current: String,
}

impl LedClockDisplay {
    pub fn new() -> Self {
        Self {
            terminal: None,
            current: String::new(),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };

        let lines: Vec<Line> = led::render_lines(&self.current)
            .into_iter()
            .map(Line::from)
            .collect();
        let width = led::rendered_width(&self.current) as u16;
        let height = led::GLYPH_ROWS as u16;

        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(Color::Black)),
                area,
            );

            let clock = Paragraph::new(lines.clone())
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(clock, centered(area, width, height));
        })?;
        Ok(())
    }

    fn map_key(key: KeyEvent) -> Option<UiCommand> {
        let command = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => UiCommand::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => UiCommand::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => UiCommand::StartTimer,
            KeyCode::Char('r') => UiCommand::ResetTimer,
            KeyCode::Char('+') | KeyCode::Char('=') => UiCommand::VolumeUp,
            KeyCode::Char('-') => UiCommand::VolumeDown,
            KeyCode::Up => UiCommand::DurationUp,
            KeyCode::Down => UiCommand::DurationDown,
            _ => return None,
        };
        Some(command)
    }
}

/// Center a `width` x `height` box inside `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl CountdownDisplay for LedClockDisplay {
    fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        if let Some(mut terminal) = self.terminal.take() {
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn show_remaining(&mut self, formatted: &str) -> Result<()> {
        self.current = formatted.to_string();
        self.draw()
    }

    fn poll_input(&mut self) -> Result<Vec<UiCommand>> {
        let mut commands = Vec::new();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.is_press() => {
                    if let Some(command) = Self::map_key(key) {
                        commands.push(command);
                    }
                }
                // Click-to-start, as on the original clock face.
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
                        commands.push(UiCommand::StartTimer);
                    }
                }
                Event::Resize(..) => self.draw()?,
                _ => {}
            }
        }

        Ok(commands)
    }
}
