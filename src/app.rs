use crate::animation::{FeedEffects, STAGGER_MS};
use crate::clock::Clock;
use crate::compose::Compose;
use crate::entry_store::EntryStore;
use crate::theme::ThemeState;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const QUOTES: [&str; 7] = [
    "The palest ink is better than the best memory.",
    "Keep some room in your heart for the unimaginable.",
    "What is a diary but a truce with time?",
    "Memory is the scribe of the soul.",
    "We write to taste life twice, in the moment and in retrospect.",
    "Preserve your memories, keep them well, what you forget you can never retell.",
    "Every moment is a golden one for him who has the vision to recognize it as such.",
];

/// Which surface receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Compose,
    Feed,
}

/// Application root: the two stateful components, the transient
/// presentation effects, and the input surfaces. All mutation funnels
/// through the key handler and the tick.
pub struct App {
    pub store: EntryStore,
    pub theme: ThemeState,
    pub effects: FeedEffects,
    pub compose: Compose,
    pub focus: Focus,
    pub selected: usize,
    pub quote: &'static str,
    pub today: String,
    clock: Box<dyn Clock>,
    should_quit: bool,
}

impl App {
    pub fn new(store: EntryStore, theme: ThemeState, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let mut effects = FeedEffects::new();
        for (index, entry) in store.entries().iter().enumerate() {
            effects.track(&entry.id, index as i64 * STAGGER_MS, now);
        }
        // One quote per session, seeded by the start time.
        let quote = QUOTES[(now.unsigned_abs() as usize) % QUOTES.len()];
        App {
            store,
            theme,
            effects,
            compose: Compose::new(),
            focus: Focus::Compose,
            selected: 0,
            quote,
            today: Local::now().format("%A, %B %-d").to_string(),
            clock,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.focus {
            Focus::Compose => self.on_compose_key(key),
            Focus::Feed => self.on_feed_key(key),
        }
    }

    /// Advances animations and commits any deletes whose exit effect has
    /// finished. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        for id in self.effects.tick(now) {
            self.store.delete(&id);
            self.effects.forget(&id);
        }
        if self.store.is_empty() {
            self.focus = Focus::Compose;
            self.selected = 0;
        } else if self.selected >= self.store.len() {
            self.selected = self.store.len() - 1;
        }
    }

    fn on_compose_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('t') if ctrl => self.theme.toggle(),
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Tab | KeyCode::Esc => {
                if !self.store.is_empty() {
                    self.focus = Focus::Feed;
                }
            }
            KeyCode::Enter => self.compose.newline(),
            KeyCode::Char(c) if !ctrl => self.compose.insert(c),
            KeyCode::Backspace => self.compose.backspace(),
            KeyCode::Delete => self.compose.delete_forward(),
            KeyCode::Left => self.compose.move_left(),
            KeyCode::Right => self.compose.move_right(),
            KeyCode::Up => self.compose.move_up(),
            KeyCode::Down => self.compose.move_down(),
            _ => {}
        }
    }

    fn on_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char('i') => self.focus = Focus::Compose,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('t') => self.theme.toggle(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete_selected(),
            _ => {}
        }
    }

    /// Submits the compose buffer. Disabled while the trimmed buffer is
    /// empty; clears the buffer on success.
    fn submit(&mut self) {
        if self.compose.is_blank() {
            return;
        }
        let text = self.compose.take();
        if let Some(id) = self.store.save(&text) {
            self.effects.track(&id, 0, self.clock.now_ms());
            self.selected = 0;
        }
    }

    /// Starts the exit effect for the selected entry. The store delete is
    /// deferred until the effect finishes; repeat requests are no-ops.
    fn request_delete_selected(&mut self) {
        let Some(entry) = self.store.entries().get(self.selected) else {
            return;
        };
        let id = entry.id.clone();
        self.effects.begin_exit(&id, self.clock.now_ms());
    }
}
