use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
    tty::IsTty,
};

/// Everything the shop loop needs from the outside world.
///
/// The loop never touches the terminal directly, so the same state machine
/// runs against a real terminal or a scripted session in tests.
pub trait ShopConsole {
    /// Start a fresh screen for the next car
    fn clear(&mut self) -> io::Result<()>;

    fn print_line(&mut self, line: &str) -> io::Result<()>;

    /// Show `prompt` and read one line. `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show `prompt` and wait for a single key. `None` means input is exhausted.
    fn read_key(&mut self, prompt: &str) -> io::Result<Option<char>>;
}

/// Restores cooked mode even if reading the key fails
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// The interactive terminal, driven through crossterm
pub struct TerminalConsole {
    stdout: io::Stdout,
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        let stdin = io::stdin();
        TerminalConsole {
            stdout: io::stdout(),
            interactive: stdin.is_tty(),
        }
    }

    fn show_prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.stdout, "{}", prompt)?;
        self.stdout.flush()
    }

    /// Block until a key is pressed. Ctrl+C and Esc count as end of input.
    fn wait_for_key(&mut self) -> io::Result<Option<char>> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let CEvent::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => None,
                    KeyCode::Esc => None,
                    KeyCode::Char(c) => Some(c),
                    KeyCode::Enter => Some('\n'),
                    _ => Some(' '),
                });
            }
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        TerminalConsole::new()
    }
}

impl ShopConsole for TerminalConsole {
    fn clear(&mut self) -> io::Result<()> {
        if self.interactive {
            execute!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", line)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.show_prompt(prompt)?;
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_key(&mut self, prompt: &str) -> io::Result<Option<char>> {
        self.show_prompt(prompt)?;

        // Piped input has no key events; take the first character of a line
        if !self.interactive {
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            return Ok(Some(line.chars().next().unwrap_or('\n')));
        }

        let key = self.wait_for_key()?;
        writeln!(self.stdout)?;
        Ok(key)
    }
}
