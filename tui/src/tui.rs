use std::io::BufWriter;
use std::io::Result;
use std::io::Stdout;
use std::io::stdout;

use crossterm::cursor::Hide;
use crossterm::cursor::Show;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::disable_raw_mode;
use ratatui::crossterm::terminal::enable_raw_mode;

use crate::config::Config;

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Put the terminal in raw mode and, unless disabled in config, switch to
/// the alternate screen.
pub fn init(config: &Config) -> Result<Tui> {
    execute!(stdout(), EnableBracketedPaste)?;
    if config.alternate_screen {
        execute!(stdout(), EnterAlternateScreen)?;
    }
    enable_raw_mode()?;
    set_panic_hook(config.alternate_screen);
    execute!(stdout(), Hide)?;

    // Wrap stdout in a BufWriter to reduce syscalls during rendering.
    let backend = CrosstermBackend::new(BufWriter::new(stdout()));
    let mut tui = Terminal::new(backend)?;
    tui.clear()?;
    Ok(tui)
}

fn set_panic_hook(alternate_screen: bool) {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore(alternate_screen); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Restore the terminal to its original state
pub fn restore(alternate_screen: bool) -> Result<()> {
    execute!(stdout(), DisableBracketedPaste, Show)?;
    disable_raw_mode()?;
    if alternate_screen {
        execute!(stdout(), LeaveAlternateScreen)?;
    }
    Ok(())
}
