use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::event::Event;
use crate::kill_prompt::{KillPrompt, PromptOutcome};
use crate::sort::{SortMode, sort_processes};
use crate::system::collector::Collector;
use crate::system::kill::{KillResult, SignalTerminator, Terminate};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    KillPrompt,
}

/// What the main loop does after one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Quit,
    /// Dialog open: redraw it, sample nothing.
    RedrawOnly,
    /// Sample, sort and draw. `clear` wipes the terminal first.
    Refresh { clear: bool },
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub sort_cpu: KeyCode,
    pub sort_memory: KeyCode,
    pub sort_pid: KeyCode,
    pub kill: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            sort_cpu: parse_key(&kb.sort_cpu).unwrap_or(KeyCode::Char('c')),
            sort_memory: parse_key(&kb.sort_memory).unwrap_or(KeyCode::Char('m')),
            sort_pid: parse_key(&kb.sort_pid).unwrap_or(KeyCode::Char('p')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
        }
    }
}

impl Default for ResolvedKeybinds {
    fn default() -> Self {
        Self::from_config(&crate::config::KeybindsConfig::default())
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub snapshot: SystemSnapshot,
    pub input_mode: InputMode,
    pub kill_prompt: KillPrompt,
    pub sort_mode: SortMode,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    /// Text, success flag, creation time.
    pub status_message: Option<(String, bool, Instant)>,
    /// Set when a dialog closes; the main loop clears the terminal once.
    pub full_redraw: bool,
    report_kill_result: bool,
    terminator: Box<dyn Terminate>,
}

impl App {
    pub fn new(config: Config) -> Self {
        App::with_parts(config, Collector::new(), Box::new(SignalTerminator::new()))
    }

    pub fn with_parts(
        config: Config,
        collector: Collector,
        terminator: Box<dyn Terminate>,
    ) -> Self {
        App {
            running: true,
            collector,
            snapshot: SystemSnapshot::default(),
            input_mode: InputMode::Normal,
            kill_prompt: KillPrompt::default(),
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            status_message: None,
            full_redraw: false,
            report_kill_result: config.kill.report_result,
            terminator,
        }
    }

    /// One sample → delta → sort pass.
    pub fn refresh_data(&mut self) {
        let mut snapshot = self.collector.refresh();
        sort_processes(&mut snapshot.processes, self.sort_mode);
        self.snapshot = snapshot;

        if let Some((_, _, created)) = &self.status_message
            && created.elapsed() >= STATUS_MESSAGE_TTL
        {
            self.status_message = None;
        }
    }

    pub fn is_prompting(&self) -> bool {
        self.input_mode == InputMode::KillPrompt
    }

    /// Applies one event and decides the loop's next step. No I/O happens
    /// here; the caller samples and draws.
    pub fn on_event(&mut self, event: Event) -> Step {
        if let Event::Key(key) = event {
            let action = self.map_key(key);
            self.dispatch(action);
        }
        if !self.running {
            return Step::Quit;
        }
        if self.is_prompting() {
            return Step::RedrawOnly;
        }
        Step::Refresh {
            clear: std::mem::take(&mut self.full_redraw),
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::KillPrompt => Action::PromptKey(key.code),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.sort_cpu {
            return Action::SetSort(SortMode::Cpu);
        }
        if code == kb.sort_memory {
            return Action::SetSort(SortMode::Memory);
        }
        if code == kb.sort_pid {
            return Action::SetSort(SortMode::Pid);
        }
        if code == kb.kill {
            return Action::OpenKillPrompt;
        }

        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SetSort(mode) => self.sort_mode = mode,
            Action::OpenKillPrompt => {
                self.kill_prompt.reset();
                self.input_mode = InputMode::KillPrompt;
            }
            Action::PromptKey(code) => match self.kill_prompt.handle_key(code) {
                PromptOutcome::Pending => {}
                PromptOutcome::Confirmed(pid) => {
                    let result = self.terminator.terminate(pid);
                    self.record_kill_result(result);
                    self.close_kill_prompt();
                }
                PromptOutcome::Cancelled | PromptOutcome::Invalid => self.close_kill_prompt(),
            },
            Action::None => {}
        }
    }

    fn close_kill_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.full_redraw = true;
    }

    fn record_kill_result(&mut self, result: KillResult) {
        #[cfg(feature = "perf-tracing")]
        tracing::debug!(?result, success = result.is_success(), "terminate requested");

        if self.report_kill_result {
            self.status_message = Some((
                result.message(),
                result.is_success(),
                Instant::now(),
            ));
        }
    }
}
