use rollcall::models::{
    event::{format_date_time, parse_date_time},
    ledger, Category, Database, EventBuilder, EventRepository, ListOrder,
};

fn main() -> rollcall::Result<()> {
    // A database is just a path, nothing touches the disk until we load or save.
    let db = Database::new("db/events.ron");
    // Loading a file that doesn't exist yet gives an empty repository.
    let mut repo: EventRepository = db.load()?;

    // Attendees are registered on the repository, ids are handed out for us
    let alice = repo.register_attendee("Alice", "alice@mail.com", "Recife");
    let bob = repo.register_attendee("Bob", "bob@mail.com", "Olinda");

    // Same with events, using the builders is recommended
    let birthday = repo.add(
        EventBuilder::new("Alice's Birthday", parse_date_time("14/02/2027 20:00")?)
            .address("Rua da Aurora, 100")
            .category(Category::Party),
    );
    let meeting = repo.add(
        EventBuilder::new("Monthly club meeting", parse_date_time("03/11/2026 19:00")?)
            .description("Monthly updates of the activities related to the club")
            .category(Category::Cultural),
    );

    // Attendance is always recorded on both sides at once
    ledger::confirm(&mut repo, alice, birthday);
    ledger::confirm(&mut repo, alice, meeting);
    ledger::confirm(&mut repo, bob, birthday);

    // Listing is chronological, so the meeting comes first
    for (i, event) in repo.list(ListOrder::Chronological).iter().enumerate() {
        println!(
            "{}. {} - {} ({} attending)",
            i + 1,
            event.name,
            format_date_time(&event.start_time),
            event.attendees().len()
        );
    }

    // Deleting an event also drops it from everyone's confirmations
    repo.remove(0)?;
    println!("Alice now attends {} event(s)", ledger::confirmed_events(&repo, alice).len());

    db.save(&repo)?;
    Ok(())
}
