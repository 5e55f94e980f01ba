use std::{
    io::stdout,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::Paragraph};
use tracing::info;

use crate::{
    layout::{split_bar, with_status_bar},
    views::render_help,
};

use super::types::{Command, CommandOutcome, Mode};
use super::App;

const LIST_HINTS: &str = "1 catalog  2 shelf  3 publish  4 profile  ? help  q quit";

const HELP: &[&str] = &[
    "q / Ctrl-C: quit",
    "1 / 2 / 3 / 4: catalog, shelf, publish, profile",
    "j / k or arrows: move; Enter: open book details",
    "r: read the selected book; R: reload",
    "c (book details): write a comment",
    "Enter (publish): edit field; s: submit; y / n: confirm",
    "Esc: back",
    "",
    "Reader:",
    "←/→ or h/l: previous / next page; g / G: first / last",
    "j / k or arrows: scroll within the page",
    "/: search as you type; Enter keeps, Esc clears",
    "n / N: next / previous match",
    "+ / -: font size; Space: read aloud",
    "?: toggle this help",
];

impl App {
    pub fn run(mut self) -> std::io::Result<()> {
        let mut stdout = stdout();
        let raw_ok = enable_raw_mode().is_ok();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.show(Mode::Catalog);
        info!("quillify started");

        if !raw_ok {
            // Non-interactive fallback: draw once and exit cleanly
            let _ = terminal.draw(|f| self.draw(f));
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            return Ok(());
        }

        let mut exit = false;
        while !exit {
            self.poll_loaded();
            if let Some(session) = self.reader.as_mut() {
                session.tick(Instant::now());
            }
            terminal.draw(|f| self.draw(f))?;

            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        if let Some(command) = Command::from_key(&self, key) {
                            if self.apply_command(command) == CommandOutcome::Exit {
                                exit = true;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {
                        exit = true;
                    }
                },
                Ok(false) => {}
                Err(_) => {
                    exit = true;
                }
            }
        }

        self.close_reader();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        info!("quillify exited");
        Ok(())
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let width = self.column_width();
        if self.mode == Mode::Reader {
            if let Some(session) = &self.reader {
                self.reader_view
                    .render(f, size, session, &self.theme, self.status.as_deref());
            } else if let Some(pending) = &self.reader_pending {
                self.reader_view
                    .render_pending(f, size, &pending.title, &pending.message);
            }
        } else {
            let (content, status_area) = with_status_bar(size);
            match self.mode {
                Mode::Catalog => self.catalog.render(f, content, width, &self.theme),
                Mode::Shelf => self.shelf.render(f, content, width, &self.theme),
                Mode::Detail => self.detail.render(f, content, width),
                Mode::Publish => self.publish.render(f, content, width, &self.theme),
                Mode::Profile => self.profile.render(f, content, width),
                Mode::Reader => {}
            }
            let bar = split_bar(
                self.status.as_deref().unwrap_or(""),
                LIST_HINTS,
                status_area.width as usize,
                Style::default().fg(Color::Red),
                Style::default(),
                Style::default().fg(Color::DarkGray),
            );
            f.render_widget(Paragraph::new(bar), status_area);
        }
        if let Some((_, prompt)) = &self.prompt {
            prompt.render(f, size);
        }
        if self.show_help {
            render_help(f, size, HELP);
        }
    }
}
