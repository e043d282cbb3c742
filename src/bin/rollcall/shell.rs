use std::io::{BufRead, Write};

use anyhow::Result;
use rollcall::{app::AppState, models::AttendeeId};
use tracing::error;

use crate::commands::{attendance, events};

/// Raised by the prompt helpers when stdin is exhausted. The menu loop
/// treats it like choosing to quit.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
pub struct EndOfInput;

enum Flow {
    Continue,
    Quit,
}

/// Numbered-menu front end over an [`AppState`].
pub struct Shell<R, W> {
    pub state: AppState,
    pub out: W,
    input: R,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Self { state, out, input }
    }

    /// Signs the user in, then serves the menu until they quit or input
    /// runs out, saving on the way out. Hands the state back afterwards.
    pub fn run(mut self) -> Result<AppState> {
        let me = match self.sign_in() {
            Ok(me) => me,
            Err(e) if e.is::<EndOfInput>() => return Ok(self.state),
            Err(e) => return Err(e),
        };

        let mut failure = None;
        loop {
            match self.step(me) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.is::<EndOfInput>() => {
                    writeln!(self.out).ok();
                    break;
                }
                Err(e) => {
                    error!(error = %e, "console i/o failed, stopping");
                    failure = Some(e);
                    break;
                }
            }
        }

        // the session is saved however the loop ended
        let notice = match failure {
            None => writeln!(self.out, "Saving events and exiting..."),
            Some(_) => Ok(()),
        };
        if let Err(e) = self.state.save() {
            error!(error = %e, "failed to save events");
            if failure.is_none() {
                writeln!(self.out, "Could not save events: {e}")?;
            }
        }
        notice?;
        match failure {
            Some(e) => Err(e),
            None => Ok(self.state),
        }
    }

    fn sign_in(&mut self) -> Result<AttendeeId> {
        writeln!(self.out, "\n--- Sign in ---")?;
        let name = self.prompt("Your name: ")?;
        let email = self.prompt("Your email: ")?;
        let city = self.prompt("Your city: ")?;
        let me = self.state.sign_in(&name, &email, &city);
        writeln!(self.out, "Welcome, {name}!")?;
        Ok(me)
    }

    fn step(&mut self, me: AttendeeId) -> Result<Flow> {
        writeln!(self.out, "\n--- Events ---")?;
        writeln!(self.out, "1. List events")?;
        writeln!(self.out, "2. Register a new event")?;
        writeln!(self.out, "3. My confirmed events")?;
        writeln!(self.out, "4. Edit an event")?;
        writeln!(self.out, "5. Delete an event")?;
        writeln!(self.out, "6. Save and quit")?;

        let Some(choice) = self.prompt_number("Choose an option: ")? else {
            return Ok(Flow::Continue);
        };
        match choice {
            1 => events::list(self, me)?,
            2 => events::register(self)?,
            3 => attendance::my_events(self, me)?,
            4 => events::edit(self)?,
            5 => events::delete(self)?,
            6 => return Ok(Flow::Quit),
            _ => writeln!(self.out, "Invalid option, try again.")?,
        }
        Ok(Flow::Continue)
    }

    /// Prints `label` and reads one line, without its line ending. Bytes
    /// that aren't UTF-8 are replaced rather than rejected.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(EndOfInput.into());
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Like [`prompt`](Self::prompt) but expects a non-negative number.
    /// Anything else is reported and yields `None`.
    pub fn prompt_number(&mut self, label: &str) -> Result<Option<usize>> {
        let reply = self.prompt(label)?;
        match reply.trim().parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.out, "Please enter a number.")?;
                Ok(None)
            }
        }
    }

    /// Asks for a 1-based choice, 0 meaning "go back". Returns the zero-based
    /// position, or `None` to go back.
    pub fn prompt_position(&mut self, label: &str) -> Result<Option<usize>> {
        Ok(self.prompt_number(label)?.and_then(|n| n.checked_sub(1)))
    }

    /// Shows a failed operation to the user. The menu carries on.
    pub fn report(&mut self, err: rollcall::Error) -> Result<()> {
        match err {
            // positions are shown 1-based
            rollcall::Error::IndexOutOfRange { index, len } => writeln!(
                self.out,
                "Error: there is no entry number {} (choose 1 to {len})",
                index + 1
            )?,
            err => writeln!(self.out, "Error: {err}")?,
        }
        Ok(())
    }
}
