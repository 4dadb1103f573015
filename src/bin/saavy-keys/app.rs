//! App - screen navigation and the terminal event loop

use std::{cell::Cell, rc::Rc, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{layout::Rect, widgets::ListState, DefaultTerminal, Frame};

use super::audio::AudioOutput;
use super::input::pointer_event;
use super::ui;

use saavy_keys::{
    dsp::VoiceConfig,
    keyboard::{KeyboardConfig, PointerEvent},
    screen::{
        default_exercises, route_for, Exercise, KeyboardScreen, Orientation, OrientationControl,
        Route,
    },
    synth::mixer::{MixerBackend, MixerConfig},
};

/// Orientation requests from a screen, remembered for the status bar.
///
/// A terminal cannot rotate, so the request is only displayed.
#[derive(Clone, Default)]
pub struct TerminalDisplay {
    requested: Rc<Cell<Orientation>>,
}

impl OrientationControl for TerminalDisplay {
    fn requested(&self) -> Orientation {
        self.requested.get()
    }

    fn request(&mut self, orientation: Orientation) {
        log::debug!("orientation requested: {}", orientation.label());
        self.requested.set(orientation);
    }
}

/// A live keyboard session.
///
/// Field order matters: the screen is dropped (note-offs, releases) while
/// the audio stream is still running.
pub struct KeyboardView {
    pub screen: KeyboardScreen<MixerBackend, TerminalDisplay>,
    pub audio: AudioOutput,
    pub area: Rect,
}

impl KeyboardView {
    fn open(config: &KeyboardConfig, display: TerminalDisplay) -> Self {
        let (backend, audio) = AudioOutput::open(MixerConfig::new());
        let screen = KeyboardScreen::enter(config, VoiceConfig::new(), backend, display);
        Self {
            screen,
            audio,
            area: Rect::default(),
        }
    }

    fn set_area(&mut self, area: Rect) {
        if self.area != area {
            self.area = area;
            self.screen.resize(area.width as f32, area.height as f32);
        }
    }
}

pub struct HomeView {
    pub exercises: Vec<Exercise>,
    pub list: ListState,
    pub notice: Option<String>,
}

impl HomeView {
    fn new() -> Self {
        Self {
            exercises: default_exercises(),
            list: ListState::default().with_selected(Some(0)),
            notice: None,
        }
    }

    fn step(&mut self, delta: isize) {
        let last = self.exercises.len().saturating_sub(1);
        let current = self.list.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.list.select(Some(next));
        self.notice = None;
    }

    fn selected(&self) -> Option<&Exercise> {
        self.list.selected().and_then(|i| self.exercises.get(i))
    }
}

pub struct App {
    keyboard_config: KeyboardConfig,
    display: TerminalDisplay,
    pub home: HomeView,
    pub keyboard: Option<KeyboardView>,
    should_quit: bool,
    dirty: bool,
    last_revision: Option<u64>,
}

impl App {
    pub fn new(keyboard_config: KeyboardConfig, route: Route) -> Self {
        let mut app = Self {
            keyboard_config,
            display: TerminalDisplay::default(),
            home: HomeView::new(),
            keyboard: None,
            should_quit: false,
            dirty: true,
            last_revision: None,
        };
        app.navigate(route);
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if let Some(view) = &mut self.keyboard {
                view.audio.tick();
            }

            // Keyboard geometry follows the terminal size
            let size = terminal.size().wrap_err("failed to read terminal size")?;
            let area = Rect::new(0, 0, size.width, size.height);
            if let Some(view) = &mut self.keyboard {
                view.set_area(ui::keyboard_area(area));
            }

            if self.needs_redraw() {
                terminal
                    .draw(|frame| self.render(frame))
                    .wrap_err("failed to draw frame")?;
            }

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                self.handle_event(event::read()?);
            }
        }

        self.navigate(Route::Home);
        Ok(())
    }

    fn needs_redraw(&mut self) -> bool {
        let revision = self
            .keyboard
            .as_ref()
            .map(|view| view.screen.surface().pressed().revision());
        if revision != self.last_revision {
            self.last_revision = revision;
            self.dirty = true;
        }
        std::mem::take(&mut self.dirty)
    }

    fn render(&mut self, frame: &mut Frame) {
        match &self.keyboard {
            Some(view) => ui::render_keyboard(frame, view, self.display.requested()),
            None => ui::render_home(frame, &mut self.home),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            Event::Mouse(mouse) => {
                if let Some(view) = &mut self.keyboard {
                    if let Some(pointer) = pointer_event(mouse, view.area) {
                        view.screen.handle_pointer(pointer);
                    }
                }
            }
            Event::FocusLost => {
                if let Some(view) = &mut self.keyboard {
                    view.screen.handle_pointer(PointerEvent::Cancel);
                }
            }
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc if self.keyboard.is_some() => self.navigate(Route::Home),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up if self.keyboard.is_none() => {
                self.home.step(-1);
                self.dirty = true;
            }
            KeyCode::Down if self.keyboard.is_none() => {
                self.home.step(1);
                self.dirty = true;
            }
            KeyCode::Enter if self.keyboard.is_none() => self.open_selected(),
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let Some(exercise) = self.home.selected().copied() else {
            return;
        };
        match route_for(&exercise) {
            Some(route) => self.navigate(route),
            None => {
                log::info!("exercise {} has no screen yet", exercise.id);
                self.home.notice = Some(format!("{} is coming soon", exercise.title));
                self.dirty = true;
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        match route {
            Route::Home => {
                // Dropping the view disposes the screen, then stops audio
                if self.keyboard.take().is_some() {
                    log::info!("back to home");
                }
            }
            Route::Keyboard => {
                if self.keyboard.is_none() {
                    self.keyboard = Some(KeyboardView::open(
                        &self.keyboard_config,
                        self.display.clone(),
                    ));
                }
            }
        }
        self.dirty = true;
    }
}
