use std::io::{self, Stderr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use signal_hook::SigId;
use signal_hook::consts::TERM_SIGNALS;

use crate::core::{Candidate, Input, Picker};
use crate::ui::keys::input_for;
use crate::ui::view::{PickerView, Theme};

/// How often a blocked read wakes up to look for a termination signal.
const SIGNAL_CHECK: Duration = Duration::from_millis(50);

/// The UI draws on stderr so stdout only ever carries the chosen path.
pub type StderrTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Source of terminal events for the picker loop.
pub trait EventSource {
    /// Waits for the next event. `None` means the session was interrupted.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Blocking reads from the controlling terminal, cut short by SIGINT,
/// SIGTERM or SIGQUIT sent from outside.
///
/// Raw mode turns a typed Ctrl-C into a key event, so these only arrive via
/// `kill` or a closing session.
pub struct TerminalEvents {
    interrupted: Arc<AtomicBool>,
    hooks: Vec<SigId>,
}

impl TerminalEvents {
    pub fn new() -> io::Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let mut hooks = Vec::with_capacity(TERM_SIGNALS.len());
        for &signal in TERM_SIGNALS {
            hooks.push(signal_hook::flag::register(signal, Arc::clone(&interrupted))?);
        }
        Ok(TerminalEvents { interrupted, hooks })
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        for hook in self.hooks.drain(..) {
            signal_hook::low_level::unregister(hook);
        }
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            if self.interrupted() {
                return Ok(None);
            }
            if event::poll(SIGNAL_CHECK)? {
                return event::read().map(Some);
            }
        }
    }
}

/// Runs an interactive session and returns the accepted bookmark, if any.
/// The terminal is restored before returning, also on error.
pub fn pick(picker: &mut Picker, theme: &Theme) -> io::Result<Option<Candidate>> {
    let mut events = TerminalEvents::new()?;
    let mut terminal = init()?;
    debug!("picking from {} bookmarks", picker.total());

    let result = run(&mut terminal, picker, theme, &mut events);
    let restored = restore(&mut terminal);
    result?;
    restored?;

    Ok(picker.selection().cloned())
}

/// Enters raw mode and the alternate screen, both on stderr.
///
/// The full-screen viewport never asks the terminal for the cursor position;
/// crossterm sends that query to stdout, which belongs to the caller.
pub fn init() -> io::Result<StderrTerminal> {
    set_panic_hook();
    enable_raw_mode()?;

    let mut stderr = io::stderr();
    let terminal = execute!(stderr, EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stderr)));
    if terminal.is_err() {
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    terminal
}

/// Leaves the alternate screen and hands the terminal back to the shell.
pub fn restore(terminal: &mut StderrTerminal) -> io::Result<()> {
    let left = execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .and_then(|()| terminal.show_cursor());
    disable_raw_mode()?;
    left
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, Show);
        hook(info);
    }));
}

/// Feeds events into `picker` until it exits, redrawing after each one.
/// The last frame drawn is the empty one of an exited picker.
pub fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    picker: &mut Picker,
    theme: &Theme,
    events: &mut E,
) -> io::Result<()> {
    while !picker.is_exited() {
        draw(terminal, picker, theme)?;

        match events.next_event()? {
            Some(Event::Key(key)) => {
                if let Some(input) = input_for(key) {
                    picker.handle(input);
                }
            }
            Some(_) => {}
            None => picker.handle(Input::Cancel),
        }
    }

    debug!("picker exited: {:?}", picker.phase());
    draw(terminal, picker, theme)
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, picker: &Picker, theme: &Theme) -> io::Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        let view = PickerView::new(picker, theme);
        if let Some(position) = view.cursor_position(area) {
            frame.set_cursor_position(position);
        }
        frame.render_widget(view, area);
    })?;
    Ok(())
}
