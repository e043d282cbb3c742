use std::io::{BufRead, Write};

use anyhow::Result;
use rollcall::models::{event::format_date_time, AttendeeId};

use crate::shell::Shell;

/// Lists what `me` confirmed and offers to cancel one.
pub fn my_events<R: BufRead, W: Write>(shell: &mut Shell<R, W>, me: AttendeeId) -> Result<()> {
    writeln!(shell.out, "\n--- My confirmed events ---")?;
    let mine: Vec<String> = shell
        .state
        .my_events(me)
        .iter()
        .map(|e| format!("{} - {}", e.name, format_date_time(&e.start_time)))
        .collect();
    if mine.is_empty() {
        writeln!(shell.out, "You haven't confirmed any events yet.")?;
        return Ok(());
    }
    for (i, line) in mine.iter().enumerate() {
        writeln!(shell.out, "{}. {line}", i + 1)?;
    }

    let Some(index) = shell
        .prompt_position("\nEnter an event number to cancel your attendance, or 0 to go back: ")?
    else {
        return Ok(());
    };
    match shell.state.cancel_attendance(me, index) {
        Ok(event) => writeln!(shell.out, "Attendance to '{}' cancelled.", event.name)?,
        Err(e) => shell.report(e)?,
    }
    Ok(())
}
