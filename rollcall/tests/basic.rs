use chrono::{Duration, Local};
use rollcall::{
    app::{AppState, EventForm},
    models::{
        event::parse_date_time, ledger, Database, EventBuilder, EventRepository, EventStatus,
        ListOrder,
    },
    Error,
};
use tempfile::tempdir;

fn at(s: &str) -> chrono::NaiveDateTime {
    parse_date_time(s).unwrap()
}

#[test]
fn status_relative_to_wall_clock() {
    let now = Local::now().naive_local();
    let mut repo = EventRepository::new();
    let ongoing = repo.add(EventBuilder::new("ongoing", now - Duration::hours(1)));
    let past = repo.add(EventBuilder::new("past", now - Duration::hours(3)));
    let upcoming = repo.add(EventBuilder::new("upcoming", now + Duration::hours(1)));

    assert_eq!(repo.get(ongoing).unwrap().status(now), EventStatus::Ongoing);
    assert_eq!(repo.get(past).unwrap().status(now), EventStatus::Past);
    assert_eq!(repo.get(upcoming).unwrap().status(now), EventStatus::Upcoming);
}

#[test]
fn shared_attendee_survives_round_trip() {
    let dir = tempdir().unwrap();
    let db = Database::new(dir.path().join("events.ron"));

    let mut repo = EventRepository::new();
    let carol = repo.register_attendee("Carol", "carol@mail.com", "Olinda");
    let first = repo.add(EventBuilder::new("First", at("01/12/2026 10:00")));
    let second = repo.add(EventBuilder::new("Second", at("02/12/2026 10:00")));
    ledger::confirm(&mut repo, carol, first);
    ledger::confirm(&mut repo, carol, second);
    db.save(&repo).unwrap();

    let mut loaded = db.load().unwrap();
    assert_eq!(loaded.attendees().count(), 1);
    assert_eq!(loaded.get(first).unwrap().attendees(), &[carol]);
    assert_eq!(loaded.get(second).unwrap().attendees(), &[carol]);

    // one record behind both events: a change through one link shows through the other
    ledger::cancel(&mut loaded, carol, first);
    assert_eq!(loaded.attendee(carol).unwrap().confirmed_events(), &[second]);
    assert_eq!(loaded.get(second).unwrap().attendees(), &[carol]);
}

#[test]
fn delete_cascades_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.ron");

    let mut app = AppState::load(Database::new(&path));
    let me = app.sign_in("Dan", "dan@mail.com", "Recife");
    let schedule = [
        ("ten", "20/10/2026 10:00"),
        ("nine", "20/10/2026 09:00"),
        ("eleven", "20/10/2026 11:00"),
    ];
    for (name, start) in schedule {
        app.add_event(EventForm {
            name: String::from(name),
            category: String::from("other"),
            start_time: String::from(start),
            ..EventForm::default()
        })
        .unwrap();
    }
    let listed: Vec<String> = app
        .repository()
        .list(ListOrder::Chronological)
        .iter()
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(listed, ["nine", "ten", "eleven"]);

    app.confirm_attendance(me, 0).unwrap();
    app.confirm_attendance(me, 2).unwrap();
    app.save().unwrap();

    let mut app = AppState::load(Database::new(&path));
    let me = app.sign_in("Dan", "dan@mail.com", "Recife");
    let removed = app.remove_event(0).unwrap();
    assert_eq!(removed.name, "nine");
    let mine: Vec<&str> = app.my_events(me).iter().map(|e| e.name.as_str()).collect();
    assert_eq!(mine, ["eleven"]);
}

#[test]
fn failed_edit_leaves_everything_in_place() {
    let mut repo = EventRepository::new();
    repo.add(EventBuilder::new("Only", at("20/10/2026 10:00")));

    let edits = [(1, "name", "x"), (0, "colour", "red"), (0, "start_time", "noon")];
    for (index, field, value) in edits {
        assert!(repo.update(index, field, value).is_err());
    }
    let event = repo.list(ListOrder::Insertion)[0];
    assert_eq!(event.name, "Only");
    assert_eq!(event.start_time, at("20/10/2026 10:00"));
    assert!(matches!(repo.update(1, "name", "x"), Err(Error::IndexOutOfRange { .. })));
}
