use crate::config::ScannerConfig;
use crate::features::generator::GeneratorState;
use crate::features::scanner::ScanState;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// Id for a background job, unique for the life of the process. A worker result
/// is only applied while its id is still the one the state is waiting for.
pub fn next_job_id() -> u64 {
    NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    Scanner,
    Creator,
}

/// Width breakpoint of the host window. Only layout decisions read it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindowWidthClass {
    #[default]
    Compact,
    Medium,
    Expanded,
}

/// One-shot instruction for the host, delivered exactly once in the next response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Effect {
    CopyToClipboard { text: String },
    Vibrate { duration_ms: u64 },
    ShareText { text: String, mime: String, open_url: bool },
    ShareImage { path: String, mime: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub nav_stack: Vec<Screen>,
    pub scanner: ScanState,
    pub generator: GeneratorState,
    pub config: ScannerConfig,
    pub locale: String,
    pub window_width_class: WindowWidthClass,
    pub last_error: Option<String>,
    #[serde(skip)]
    pub pending_effects: Vec<Effect>,
    /// Image scan the worker is running for this session.
    #[serde(skip)]
    pub pending_scan: Option<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            nav_stack: Vec::new(),
            scanner: ScanState::new(),
            generator: GeneratorState::new(),
            config: ScannerConfig::new(),
            locale: "en".into(),
            window_width_class: WindowWidthClass::Compact,
            last_error: None,
            pending_effects: Vec::new(),
            pending_scan: None,
        }
    }

    pub fn ensure_navigation(&mut self) {
        if self.nav_stack.is_empty() {
            self.nav_stack.push(Screen::Scanner);
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.nav_stack.last().copied().unwrap_or(Screen::Scanner)
    }

    pub fn scan_pending(&self) -> bool {
        self.pending_scan.is_some()
    }

    pub fn has_pending_job(&self) -> bool {
        self.scan_pending() || self.generator.is_pending()
    }

    /// Bottom-bar navigation: the scanner is the start destination and every
    /// other screen sits directly on top of it.
    pub fn navigate_to(&mut self, screen: Screen) {
        self.reset_navigation();
        if screen != Screen::Scanner {
            self.nav_stack.push(screen);
        }
        self.sync_screen_flags();
    }

    pub fn pop_screen(&mut self) {
        self.ensure_navigation();
        if self.nav_stack.len() > 1 {
            self.nav_stack.pop();
        }
        self.sync_screen_flags();
    }

    pub fn reset_navigation(&mut self) {
        self.nav_stack.clear();
        self.nav_stack.push(Screen::Scanner);
    }

    /// Scanner actions are visible exactly while the scanner screen is showing.
    pub fn sync_screen_flags(&mut self) {
        let on_scanner = self.current_screen() == Screen::Scanner;
        if self.scanner.show_scanner_actions != on_scanner {
            self.scanner.set_show_scanner_actions(on_scanner);
        }
    }

    pub fn push_effects(&mut self, effects: Vec<Effect>) {
        self.pending_effects.extend(effects);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    /// Drops session data; configuration, locale and window class survive.
    pub fn reset_runtime(&mut self) {
        self.scanner.reset();
        self.generator.reset();
        self.last_error = None;
        self.pending_effects.clear();
        self.pending_scan = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
