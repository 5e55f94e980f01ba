use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reader_core::{publish::PublishStep, speech::SpeechOutcome};
use tracing::warn;

use crate::prompt_view::PromptView;

use super::types::{Command, CommandOutcome, InputCommand, Mode, PromptKind};
use super::App;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        if app.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Command::Input(InputCommand::Cancel)),
                KeyCode::Enter => Some(Command::Input(InputCommand::Submit)),
                KeyCode::Backspace => Some(Command::Input(InputCommand::Backspace)),
                KeyCode::Char(c) => Some(Command::Input(InputCommand::Insert(c))),
                _ => None,
            };
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Some(Command::Exit),
            KeyCode::Char('q') => return Some(Command::Exit),
            KeyCode::Char('?') => return Some(Command::ToggleHelp),
            _ => {}
        }

        match app.mode {
            Mode::Reader => match key.code {
                KeyCode::Esc => Some(Command::Back),
                KeyCode::Char('j') | KeyCode::Down => Some(Command::Down),
                KeyCode::Char('k') | KeyCode::Up => Some(Command::Up),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Some(Command::NextPage),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Some(Command::PrevPage),
                KeyCode::Home | KeyCode::Char('g') => Some(Command::FirstPage),
                KeyCode::End | KeyCode::Char('G') => Some(Command::LastPage),
                KeyCode::Char('/') => Some(Command::StartSearch),
                KeyCode::Char('n') => Some(Command::NextMatch),
                KeyCode::Char('N') => Some(Command::PrevMatch),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::FontLarger),
                KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::FontSmaller),
                KeyCode::Char(' ') => Some(Command::ToggleSpeech),
                _ => None,
            },
            Mode::Publish if app.publish.flow.step() == PublishStep::Confirming => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => Some(Command::Confirm),
                    KeyCode::Char('n') | KeyCode::Esc => Some(Command::Decline),
                    _ => None,
                }
            }
            Mode::Publish if app.publish.flow.step() == PublishStep::Publishing => None,
            mode => match key.code {
                KeyCode::Char('1') => Some(Command::Show(Mode::Catalog)),
                KeyCode::Char('2') => Some(Command::Show(Mode::Shelf)),
                KeyCode::Char('3') => Some(Command::Show(Mode::Publish)),
                KeyCode::Char('4') => Some(Command::Show(Mode::Profile)),
                KeyCode::Esc => Some(Command::Back),
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Command::Down),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Command::Up),
                KeyCode::Enter => Some(Command::Open),
                KeyCode::Char('r') if mode != Mode::Publish => Some(Command::Read),
                KeyCode::Char('R') => Some(Command::Refresh),
                KeyCode::Char('c') if mode == Mode::Detail => Some(Command::StartComment),
                KeyCode::Char('s') if mode == Mode::Publish => Some(Command::SubmitForm),
                _ => None,
            },
        }
    }
}

impl App {
    pub(super) fn apply_command(&mut self, command: Command) -> CommandOutcome {
        if !matches!(command, Command::Input(_)) {
            self.status = None;
        }
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::CloseHelp => self.show_help = false,
            Command::Input(input) => self.apply_input(input),
            Command::Show(mode) => self.show(mode),
            Command::Refresh => match self.mode {
                Mode::Catalog => self.request_catalog(),
                Mode::Shelf => self.request_shelf(),
                Mode::Detail => {
                    if let Some(id) = self.detail.book_id {
                        self.request_detail(id);
                    }
                }
                _ => {}
            },
            Command::Back => match self.mode {
                Mode::Reader => self.close_reader(),
                Mode::Detail => self.mode = self.return_mode,
                Mode::Catalog => {}
                _ => self.mode = Mode::Catalog,
            },
            Command::Down => match self.mode {
                Mode::Catalog => self.catalog.down(),
                Mode::Shelf => self.shelf.down(),
                Mode::Detail => self.detail.scroll_down(),
                Mode::Profile => self.profile.scroll_down(),
                Mode::Publish => self.publish.focus = self.publish.focus.next(),
                Mode::Reader => {
                    if let Some(session) = self.reader.as_mut() {
                        session.scroll_down(1);
                    }
                }
            },
            Command::Up => match self.mode {
                Mode::Catalog => self.catalog.up(),
                Mode::Shelf => self.shelf.up(),
                Mode::Detail => self.detail.scroll_up(),
                Mode::Profile => self.profile.scroll_up(),
                Mode::Publish => self.publish.focus = self.publish.focus.prev(),
                Mode::Reader => {
                    if let Some(session) = self.reader.as_mut() {
                        session.scroll_up(1);
                    }
                }
            },
            Command::Open => match self.mode {
                Mode::Catalog | Mode::Shelf => {
                    if let Some(id) = self.selected_book().map(|b| b.id) {
                        self.return_mode = self.mode;
                        self.mode = Mode::Detail;
                        self.request_detail(id);
                    }
                }
                Mode::Publish => {
                    let focus = self.publish.focus;
                    let value = self.publish.value(focus);
                    self.prompt = Some((
                        PromptKind::Field(focus),
                        PromptView::with_query(focus.label(), &value),
                    ));
                }
                _ => {}
            },
            Command::Read => {
                let book = match self.mode {
                    Mode::Detail => self.detail.detail.as_ref().map(|d| d.book.clone()),
                    _ => self.selected_book().cloned(),
                };
                if let Some(book) = book {
                    self.open_reader(book);
                }
            }
            Command::StartComment => {
                if self.detail.detail.is_some() {
                    self.prompt = Some((PromptKind::Comment, PromptView::new("Comment")));
                }
            }
            Command::SubmitForm => {
                self.publish.flow.submit();
            }
            Command::Confirm => self.request_publish(),
            Command::Decline => self.publish.flow.cancel(),
            Command::StartSearch => {
                if let Some(session) = &self.reader {
                    let query = session.search().query().to_string();
                    self.prompt = Some((PromptKind::Search, PromptView::with_query("Search", &query)));
                }
            }
            Command::NextPage
            | Command::PrevPage
            | Command::FirstPage
            | Command::LastPage
            | Command::NextMatch
            | Command::PrevMatch
            | Command::FontLarger
            | Command::FontSmaller
            | Command::ToggleSpeech => self.apply_reader_command(command),
        }
        CommandOutcome::Continue
    }

    fn apply_reader_command(&mut self, command: Command) {
        let Some(session) = self.reader.as_mut() else {
            return;
        };
        match command {
            Command::NextPage => {
                session.next_page();
            }
            Command::PrevPage => {
                session.prev_page();
            }
            Command::FirstPage => session.jump(1),
            Command::LastPage => session.jump(session.total_pages()),
            Command::NextMatch => {
                session.next_match();
            }
            Command::PrevMatch => {
                session.prev_match();
            }
            Command::FontLarger => session.font_larger(),
            Command::FontSmaller => session.font_smaller(),
            Command::ToggleSpeech => match session.toggle_speech() {
                SpeechOutcome::Started | SpeechOutcome::Stopped => {}
                SpeechOutcome::Unavailable => self.status = Some("speech unavailable".into()),
                SpeechOutcome::Failed(message) => {
                    warn!("speech failed: {message}");
                    self.status = Some(message);
                }
            },
            _ => {}
        }
    }

    fn apply_input(&mut self, input: InputCommand) {
        let Some((kind, prompt)) = self.prompt.as_mut() else {
            return;
        };
        let kind = *kind;
        match input {
            InputCommand::Insert(c) => prompt.push_char(c),
            InputCommand::Backspace => prompt.backspace(),
            InputCommand::Cancel => {
                self.prompt = None;
                if kind == PromptKind::Search {
                    if let Some(session) = self.reader.as_mut() {
                        session.clear_query();
                    }
                }
                return;
            }
            InputCommand::Submit => {
                let Some((_, prompt)) = self.prompt.take() else {
                    return;
                };
                match kind {
                    PromptKind::Search => {}
                    PromptKind::Comment => {
                        if let Some(id) = self.detail.book_id {
                            self.request_comment(id, prompt.query);
                        }
                    }
                    PromptKind::Field(focus) => self.publish.commit(focus, &prompt.query),
                }
                return;
            }
        }
        // Search follows the query as it is typed.
        if kind == PromptKind::Search {
            let query = prompt.query.clone();
            if let Some(session) = self.reader.as_mut() {
                session.set_query(&query);
            }
        }
    }

    pub(super) fn show(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Catalog if self.catalog.books.is_empty() && !self.catalog.loading => {
                self.request_catalog()
            }
            Mode::Shelf if self.shelf.books.is_empty() && !self.shelf.loading => {
                self.request_shelf()
            }
            _ => {}
        }
    }

    fn selected_book(&self) -> Option<&reader_core::types::Book> {
        match self.mode {
            Mode::Catalog => self.catalog.selected_book(),
            Mode::Shelf => self.shelf.selected_book(),
            _ => None,
        }
    }
}
