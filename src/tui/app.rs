//! TUI application state and key handling.
//!
//! The current screen owns all of its state. Navigating replaces the screen
//! wholesale and bumps the mount id, which is how results from abandoned
//! requests are recognised and dropped.

use super::input::{
    backspace_masked, format_birth_date_input, format_birth_time_input, TextInput,
    DATE_INPUT_LEN, TIME_INPUT_LEN,
};
use super::views::View;
use super::worker::{self, WorkerMessage};
use crate::gateway::{ChatSession, DailyWisdom, DreamInterpretation, Gateway, StarMapReading};
use crate::rituals::{RitualState, RitualTask, GRATITUDE_SLOTS};
use crate::storage::{today_key, RitualJournal};
use crate::timer::BreathingTimer;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, error};

pub const DREAM_ERROR_MESSAGE: &str =
    "Não foi possível conectar com Órion no momento. Tente novamente.";
pub const STAR_MAP_INCOMPLETE_MESSAGE: &str =
    "Por favor, preencha a data (DD/MM/AAAA) e hora (HH:MM) completas.";

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct HomeState {
    /// `None` until the worker reports.
    pub wisdom: Option<DailyWisdom>,
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct OracleState {
    /// `None` when the gateway has no credential.
    pub session: Option<ChatSession>,
    pub input: TextInput,
    pub waiting: bool,
}

#[derive(Debug, Default)]
pub struct DreamState {
    pub input: TextInput,
    pub loading: bool,
    pub result: Option<DreamInterpretation>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct MeditationState {
    pub timer: BreathingTimer,
    /// Wall-clock instant of the last applied tick while running.
    last_tick: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarField {
    #[default]
    Date,
    Time,
}

#[derive(Debug, Default)]
pub struct StarMapState {
    pub date: String,
    pub time: String,
    pub focus: StarField,
    pub loading: bool,
    pub result: Option<StarMapReading>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct RitualsState {
    pub day_key: String,
    pub state: RitualState,
    /// Rows `0..3` are gratitude entries, the rest are tasks.
    pub selected: usize,
    pub save_error: Option<String>,
}

impl RitualsState {
    pub fn row_count() -> usize {
        GRATITUDE_SLOTS + RitualTask::all().len()
    }

    /// The task under the cursor, if the cursor is on the checklist.
    pub fn selected_task(&self) -> Option<RitualTask> {
        self.selected
            .checked_sub(GRATITUDE_SLOTS)
            .and_then(|i| RitualTask::all().get(i).copied())
    }
}

#[derive(Debug)]
pub enum Screen {
    Home(HomeState),
    Oracle(OracleState),
    Dreams(DreamState),
    Meditation(MeditationState),
    StarMap(StarMapState),
    Rituals(RitualsState),
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Home(_) => View::Home,
            Screen::Oracle(_) => View::Oracle,
            Screen::Dreams(_) => View::Dreams,
            Screen::Meditation(_) => View::Meditation,
            Screen::StarMap(_) => View::StarMap,
            Screen::Rituals(_) => View::Rituals,
        }
    }
}

/// Handles for starting background requests from a screen.
struct Ctx<'a> {
    gateway: &'a Gateway,
    tx: &'a Sender<WorkerMessage>,
    mount: u64,
}

pub struct CosmosApp {
    screen: Screen,
    mount_id: u64,
    gateway: Gateway,
    journal: RitualJournal,
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    should_quit: bool,
}

impl CosmosApp {
    /// Create the app on the Home screen. Starts the daily wisdom request.
    pub fn new(gateway: Gateway, journal: RitualJournal) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            screen: Screen::Home(HomeState::default()),
            mount_id: 0,
            gateway,
            journal,
            tx,
            rx,
            should_quit: false,
        };
        app.screen = app.mount(View::Home);
        app
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_view(&self) -> View {
        self.screen.view()
    }

    pub fn is_available(&self) -> bool {
        self.gateway.is_available()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn navigate(&mut self, view: View) {
        self.mount_id += 1;
        debug!(view = %view, mount = self.mount_id, "navigate");
        self.screen = self.mount(view);
    }

    fn mount(&self, view: View) -> Screen {
        match view {
            View::Home => {
                let mut home = HomeState::default();
                if self.gateway.is_available() {
                    worker::spawn_wisdom(self.gateway.clone(), self.tx.clone(), self.mount_id);
                } else {
                    home.wisdom = Some(DailyWisdom::unconfigured());
                }
                Screen::Home(home)
            }
            View::Oracle => Screen::Oracle(OracleState {
                session: self.gateway.create_chat_session().ok(),
                ..OracleState::default()
            }),
            View::Dreams => Screen::Dreams(DreamState::default()),
            View::Meditation => Screen::Meditation(MeditationState::default()),
            View::StarMap => Screen::StarMap(StarMapState::default()),
            View::Rituals => {
                let day_key = today_key();
                let state = self.journal.load(&day_key);
                Screen::Rituals(RitualsState {
                    day_key,
                    state,
                    selected: 0,
                    save_error: None,
                })
            }
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let view = self.current_view();

        match code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if view == View::Home {
                    self.should_quit = true;
                } else {
                    self.navigate(View::Home);
                }
                return;
            }
            KeyCode::BackTab => {
                self.navigate(view.prev());
                return;
            }
            // The star map uses Tab to move between its two fields.
            KeyCode::Tab if view != View::StarMap => {
                self.navigate(view.next());
                return;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if !ctrl && !view.accepts_text() => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let ctx = Ctx {
            gateway: &self.gateway,
            tx: &self.tx,
            mount: self.mount_id,
        };
        let target = match &mut self.screen {
            Screen::Home(s) => home_key(s, code),
            Screen::Oracle(s) => {
                oracle_key(s, code, ctrl, &ctx);
                None
            }
            Screen::Dreams(s) => {
                dream_key(s, code, ctrl, &ctx);
                None
            }
            Screen::Meditation(s) => {
                meditation_key(s, code);
                None
            }
            Screen::StarMap(s) => {
                star_map_key(s, code, ctrl, &ctx);
                None
            }
            Screen::Rituals(s) => {
                rituals_key(s, code, ctrl, &self.journal);
                None
            }
        };

        if let Some(view) = target {
            self.navigate(view);
        }
    }

    /// Advance the breathing timer by whole seconds elapsed since the last tick.
    pub fn tick(&mut self, now: Instant) {
        let Screen::Meditation(s) = &mut self.screen else {
            return;
        };
        let Some(mut last) = s.last_tick else {
            return;
        };
        while s.timer.is_running() && now.duration_since(last) >= TICK {
            s.timer.tick();
            last += TICK;
        }
        s.last_tick = s.timer.is_running().then_some(last);
    }

    /// Apply every finished worker result.
    pub fn poll_workers(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: WorkerMessage) {
        if msg.mount() != self.mount_id {
            debug!(
                mount = msg.mount(),
                current = self.mount_id,
                "discarding stale worker result"
            );
            return;
        }

        match (msg, &mut self.screen) {
            (WorkerMessage::Wisdom { wisdom, .. }, Screen::Home(s)) => {
                s.wisdom = Some(wisdom);
            }
            (WorkerMessage::Dream { result, .. }, Screen::Dreams(s)) => {
                s.loading = false;
                match result {
                    Ok(reading) => s.result = Some(reading),
                    Err(e) => {
                        debug!(error = %e, "dream screen showing failure");
                        s.error = Some(DREAM_ERROR_MESSAGE.to_string());
                    }
                }
            }
            (WorkerMessage::StarMap { result, .. }, Screen::StarMap(s)) => {
                s.loading = false;
                match result {
                    Ok(reading) => s.result = Some(reading),
                    Err(e) => s.error = Some(e.to_string()),
                }
            }
            (
                WorkerMessage::Chat {
                    user_text, result, ..
                },
                Screen::Oracle(s),
            ) => {
                s.waiting = false;
                if let Some(session) = s.session.as_mut() {
                    session.complete_turn(&user_text, result);
                }
            }
            (msg, screen) => {
                debug!(mount = msg.mount(), view = %screen.view(), "worker result for another screen");
            }
        }
    }
}

fn home_key(s: &mut HomeState, code: KeyCode) -> Option<View> {
    let destinations = View::destinations();
    match code {
        KeyCode::Up => {
            s.selected = s.selected.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            if s.selected + 1 < destinations.len() {
                s.selected += 1;
            }
            None
        }
        KeyCode::Enter => destinations.get(s.selected).copied(),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| destinations.get(i).copied()),
        _ => None,
    }
}

fn oracle_key(s: &mut OracleState, code: KeyCode, ctrl: bool, ctx: &Ctx) {
    let Some(session) = s.session.as_mut() else {
        return;
    };
    if s.waiting {
        return;
    }
    match code {
        KeyCode::Enter => {
            if s.input.is_blank() {
                return;
            }
            let text = s.input.take().trim().to_string();
            session.push_user(&text);
            s.waiting = true;
            worker::spawn_chat(
                ctx.gateway.clone(),
                ctx.tx.clone(),
                ctx.mount,
                session.history().to_vec(),
                text,
            );
        }
        KeyCode::Backspace => s.input.backspace(),
        KeyCode::Char(c) if !ctrl => s.input.push(c),
        _ => {}
    }
}

fn dream_key(s: &mut DreamState, code: KeyCode, ctrl: bool, ctx: &Ctx) {
    if s.loading {
        return;
    }
    if ctrl && matches!(code, KeyCode::Char('r')) {
        *s = DreamState::default();
        return;
    }
    if s.result.is_some() {
        return;
    }
    match code {
        KeyCode::Enter => {
            if s.input.is_blank() {
                return;
            }
            s.loading = true;
            s.error = None;
            worker::spawn_dream(
                ctx.gateway.clone(),
                ctx.tx.clone(),
                ctx.mount,
                s.input.value().to_string(),
            );
        }
        KeyCode::Backspace => s.input.backspace(),
        KeyCode::Char(c) if !ctrl => s.input.push(c),
        _ => {}
    }
}

fn meditation_key(s: &mut MeditationState, code: KeyCode) {
    match code {
        KeyCode::Char(' ') => {
            s.timer.toggle();
            s.last_tick = s.timer.is_running().then(Instant::now);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            s.timer.reset();
            s.last_tick = None;
        }
        KeyCode::Left => {
            s.timer.set_length(s.timer.length().prev());
            s.last_tick = None;
        }
        KeyCode::Right => {
            s.timer.set_length(s.timer.length().next());
            s.last_tick = None;
        }
        _ => {}
    }
}

fn star_map_key(s: &mut StarMapState, code: KeyCode, ctrl: bool, ctx: &Ctx) {
    if s.loading {
        return;
    }
    if ctrl && matches!(code, KeyCode::Char('r')) {
        *s = StarMapState::default();
        return;
    }
    if s.result.is_some() {
        return;
    }
    match code {
        KeyCode::Tab => {
            s.focus = match s.focus {
                StarField::Date => StarField::Time,
                StarField::Time => StarField::Date,
            };
        }
        KeyCode::Backspace => match s.focus {
            StarField::Date => s.date = backspace_masked(&s.date, format_birth_date_input),
            StarField::Time => s.time = backspace_masked(&s.time, format_birth_time_input),
        },
        KeyCode::Char(c) if c.is_ascii_digit() => match s.focus {
            StarField::Date => s.date = format_birth_date_input(&format!("{}{}", s.date, c)),
            StarField::Time => s.time = format_birth_time_input(&format!("{}{}", s.time, c)),
        },
        KeyCode::Enter => {
            if s.date.len() < DATE_INPUT_LEN || s.time.len() < TIME_INPUT_LEN {
                s.error = Some(STAR_MAP_INCOMPLETE_MESSAGE.to_string());
                return;
            }
            s.loading = true;
            s.error = None;
            worker::spawn_star_map(
                ctx.gateway.clone(),
                ctx.tx.clone(),
                ctx.mount,
                s.date.clone(),
                s.time.clone(),
            );
        }
        _ => {}
    }
}

fn rituals_key(s: &mut RitualsState, code: KeyCode, ctrl: bool, journal: &RitualJournal) {
    let changed = match (code, s.selected_task()) {
        (KeyCode::Up, _) => {
            s.selected = s.selected.saturating_sub(1);
            false
        }
        (KeyCode::Down, _) => {
            if s.selected + 1 < RitualsState::row_count() {
                s.selected += 1;
            }
            false
        }
        (KeyCode::Enter | KeyCode::Char(' '), Some(task)) => {
            s.state.toggle_task(task);
            true
        }
        (KeyCode::Enter, None) => {
            s.selected += 1;
            false
        }
        (KeyCode::Backspace, None) => {
            let mut text = s.state.gratitude_list[s.selected].clone();
            text.pop().is_some() && s.state.set_gratitude(s.selected, text).is_ok()
        }
        (KeyCode::Char(c), None) if !ctrl => {
            let mut text = s.state.gratitude_list[s.selected].clone();
            text.push(c);
            s.state.set_gratitude(s.selected, text).is_ok()
        }
        _ => false,
    };

    if changed {
        match journal.save(&s.day_key, &s.state) {
            Ok(()) => s.save_error = None,
            Err(e) => {
                error!(key = %s.day_key, error = %e, "failed to save rituals");
                s.save_error = Some(e.to_string());
            }
        }
    }
}
