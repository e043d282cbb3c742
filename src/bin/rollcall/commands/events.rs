use std::io::{BufRead, Write};

use anyhow::Result;
use rollcall::{
    app::EventForm,
    models::{event::format_date_time, AttendeeId, Category, EventField, EventStatus, ListOrder},
};

use crate::shell::Shell;

pub fn list<R: BufRead, W: Write>(shell: &mut Shell<R, W>, me: AttendeeId) -> Result<()> {
    writeln!(shell.out, "\n--- Events ---")?;
    let listing = shell.state.list_events();
    if listing.is_empty() {
        writeln!(shell.out, "No events registered yet.")?;
        return Ok(());
    }
    for row in &listing {
        let marker = match row.status {
            EventStatus::Ongoing => " (ONGOING NOW)",
            EventStatus::Past => " (ALREADY HAPPENED)",
            EventStatus::Upcoming => "",
        };
        writeln!(
            shell.out,
            "{}. {} - {}{marker}",
            row.position + 1,
            row.event.name,
            format_date_time(&row.event.start_time)
        )?;
    }

    let Some(index) =
        shell.prompt_position("\nEnter an event number for details, or 0 to go back: ")?
    else {
        return Ok(());
    };
    let details = match shell.state.event_at(index).map(|e| e.to_string()) {
        Ok(details) => details,
        Err(e) => return shell.report(e),
    };
    writeln!(shell.out, "{details}")?;

    let answer = shell.prompt("Confirm your attendance? (y/n): ")?;
    if answer.trim().eq_ignore_ascii_case("y") {
        match shell.state.confirm_attendance(me, index) {
            Ok(true) => writeln!(shell.out, "Attendance confirmed.")?,
            Ok(false) => writeln!(shell.out, "You had already confirmed this event.")?,
            Err(e) => shell.report(e)?,
        }
    }
    Ok(())
}

pub fn register<R: BufRead, W: Write>(shell: &mut Shell<R, W>) -> Result<()> {
    writeln!(shell.out, "\n--- Register a new event ---")?;
    let name = shell.prompt("Name: ")?;
    let address = shell.prompt("Address: ")?;
    writeln!(shell.out, "Categories: {}", categories())?;
    let category = shell.prompt("Category: ")?;
    let start_time = shell.prompt("Start time (dd/MM/yyyy HH:mm): ")?;
    let description = shell.prompt("Description: ")?;

    let form = EventForm {
        name,
        address,
        category,
        start_time,
        description,
    };
    match shell.state.add_event(form) {
        Ok(_) => writeln!(shell.out, "Event registered.")?,
        Err(e) => shell.report(e)?,
    }
    Ok(())
}

pub fn edit<R: BufRead, W: Write>(shell: &mut Shell<R, W>) -> Result<()> {
    writeln!(shell.out, "\n--- Edit an event ---")?;
    if shell.state.repository().is_empty() {
        writeln!(shell.out, "There are no events to edit.")?;
        return Ok(());
    }
    print_names(shell)?;

    let Some(index) =
        shell.prompt_position("\nEnter the number of the event to edit, or 0 to go back: ")?
    else {
        return Ok(());
    };
    let name = match shell.state.event_at(index).map(|e| e.name.clone()) {
        Ok(name) => name,
        Err(e) => return shell.report(e),
    };
    writeln!(shell.out, "\nEditing: {name}")?;
    for (i, field) in EventField::ALL.iter().enumerate() {
        writeln!(shell.out, "{}. {field}", i + 1)?;
    }

    let reply = shell.prompt("Field to edit (number or name): ")?;
    let field = match field_from_reply(&reply) {
        Ok(field) => field,
        Err(e) => return shell.report(e),
    };
    let hint = match field {
        EventField::Category => format!(" ({})", categories()),
        EventField::StartTime => String::from(" (dd/MM/yyyy HH:mm)"),
        _ => String::new(),
    };
    let value = shell.prompt(&format!("New {field}{hint}: "))?;
    match shell.state.update_event(index, field.as_str(), &value) {
        Ok(()) => writeln!(shell.out, "Event updated.")?,
        Err(e) => shell.report(e)?,
    }
    Ok(())
}

pub fn delete<R: BufRead, W: Write>(shell: &mut Shell<R, W>) -> Result<()> {
    writeln!(shell.out, "\n--- Delete an event ---")?;
    if shell.state.repository().is_empty() {
        writeln!(shell.out, "There are no events to delete.")?;
        return Ok(());
    }
    print_names(shell)?;

    let Some(index) =
        shell.prompt_position("\nEnter the number of the event to delete, or 0 to go back: ")?
    else {
        return Ok(());
    };
    match shell.state.remove_event(index) {
        Ok(event) => writeln!(shell.out, "Event '{}' deleted.", event.name)?,
        Err(e) => shell.report(e)?,
    }
    Ok(())
}

fn print_names<R: BufRead, W: Write>(shell: &mut Shell<R, W>) -> Result<()> {
    for (i, event) in shell
        .state
        .repository()
        .list(ListOrder::Chronological)
        .iter()
        .enumerate()
    {
        writeln!(shell.out, "{}. {}", i + 1, event.name)?;
    }
    Ok(())
}

/// Accepts either the number shown in the field menu or a field name.
fn field_from_reply(reply: &str) -> rollcall::Result<EventField> {
    match reply.trim().parse::<usize>() {
        Ok(n) if (1..=EventField::ALL.len()).contains(&n) => Ok(EventField::ALL[n - 1]),
        _ => reply.parse(),
    }
}

fn categories() -> String {
    Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
