pub mod app;
pub mod event;
pub mod keys;
pub mod layout;
pub mod theme;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use app::App;
use event::{AppEvent, EventHandler};

/// Run the interactive address picker until the user confirms or quits.
///
/// Must be called from inside a Tokio runtime: the widget's debounce timers
/// and requests are spawned onto it.
pub fn run_picker(app: &mut App) -> Result<()> {
    // Install panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = std::io::stdout().execute(DisableMouseCapture);
        let _ = std::io::stdout().execute(LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let size = terminal.size()?;
    app.area = Rect::new(0, 0, size.width, size.height);

    // Short tick so responses show up without waiting for a key.
    let event_handler = EventHandler::new(Duration::from_millis(50));

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, app))?;

            match event_handler.next()? {
                AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers),
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(w, h) => app.area = Rect::new(0, 0, w, h),
                AppEvent::Tick => {}
            }
            app.tick();

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
