use super::{repository::EventRepository, Attendee, AttendeeId, Event, EventId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fs::{self, create_dir_all, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// On-disk form of a repository.
///
/// Attendees are written once in `attendees` and referenced by id from each
/// event, so someone attending several events stays a single record.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    attendees: Vec<&'a Attendee>,
    events: &'a [Event],
}
#[derive(Deserialize)]
struct Snapshot {
    attendees: Vec<Attendee>,
    events: Vec<Event>,
}

/// Reads and writes the whole event collection as one RON file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}
impl Database {
    pub fn new<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the data file with the current contents of `repo`.
    ///
    /// The snapshot is written next to the target first and renamed over it,
    /// so an interrupted save never leaves a half-written file behind.
    pub fn save(&self, repo: &EventRepository) -> Result<()> {
        let snapshot = SnapshotRef {
            attendees: repo
                .attendees
                .values()
                .filter(|a| !a.confirmed_events.is_empty())
                .collect(),
            events: &repo.events,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let tmp = self.tmp_path();
        let written = self
            .write_snapshot(&tmp, &snapshot)
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }

        info!(
            path = %self.path.display(),
            events = snapshot.events.len(),
            attendees = snapshot.attendees.len(),
            "saved events"
        );
        Ok(())
    }

    /// Rebuilds a repository from the data file. A missing file is an empty
    /// repository; a file that can't be parsed, or whose attendee links don't
    /// line up, is [`Error::CorruptData`].
    pub fn load(&self) -> Result<EventRepository> {
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no data file, starting empty");
                return Ok(EventRepository::new());
            }
            Err(e) => return Err(e.into()),
        };
        let mut bytes = vec![];
        file.read_to_end(&mut bytes)?;

        let snapshot: Snapshot =
            ron::de::from_bytes(&bytes).map_err(|e| Error::CorruptData(e.to_string()))?;
        let repo = rebuild(snapshot)?;
        info!(
            path = %self.path.display(),
            events = repo.events.len(),
            attendees = repo.attendees.len(),
            "loaded events"
        );
        Ok(repo)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
    fn open_buf_writer(&self, path: &Path) -> io::Result<BufWriter<File>> {
        debug!(path = %path.display(), "writing snapshot");
        Ok(BufWriter::new(File::create(path)?))
    }
    fn write_snapshot(&self, path: &Path, snapshot: &SnapshotRef<'_>) -> io::Result<()> {
        let mut buf = self.open_buf_writer(path)?;
        ron::ser::to_writer_pretty(&mut buf, snapshot, ron::ser::PrettyConfig::default())
            .map_err(io::Error::other)?;
        buf.flush()
    }
}

fn rebuild(snapshot: Snapshot) -> Result<EventRepository> {
    let mut repo = EventRepository::new();

    for attendee in snapshot.attendees {
        let id = attendee.id;
        if has_duplicates(&attendee.confirmed_events) {
            return Err(corrupt(format!("attendee {id} confirms an event twice")));
        }
        repo.attendee_ids.observe(id.0);
        if repo.attendees.insert(id, attendee).is_some() {
            return Err(corrupt(format!("attendee {id} appears twice")));
        }
    }

    let mut seen: HashSet<EventId> = HashSet::new();
    for event in &snapshot.events {
        if !seen.insert(event.id) {
            return Err(corrupt(format!("event {} appears twice", event.id)));
        }
        if has_duplicates(&event.attendees) {
            return Err(corrupt(format!("event {} lists an attendee twice", event.id)));
        }
        for a in &event.attendees {
            let holds = repo
                .attendees
                .get(a)
                .ok_or_else(|| {
                    corrupt(format!("event {} refers to unknown attendee {a}", event.id))
                })?
                .confirmed_events
                .contains(&event.id);
            if !holds {
                return Err(corrupt(format!(
                    "attendee {a} is listed on event {} but has not confirmed it",
                    event.id
                )));
            }
        }
        repo.event_ids.observe(event.id.0);
    }

    let listed: BTreeMap<EventId, &[AttendeeId]> = snapshot
        .events
        .iter()
        .map(|e| (e.id, e.attendees.as_slice()))
        .collect();
    for attendee in repo.attendees.values() {
        for e in &attendee.confirmed_events {
            let on_event = listed.get(e).ok_or_else(|| {
                corrupt(format!("attendee {} confirmed unknown event {e}", attendee.id))
            })?;
            if !on_event.contains(&attendee.id) {
                return Err(corrupt(format!(
                    "attendee {} confirmed event {e} but is not listed on it",
                    attendee.id
                )));
            }
        }
    }

    repo.events = snapshot.events;
    Ok(repo)
}

fn has_duplicates<T: Eq + std::hash::Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|i| seen.insert(i))
}

fn corrupt(reason: String) -> Error {
    Error::CorruptData(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        event::{parse_date_time, Category, EventBuilder},
        ledger, ListOrder,
    };
    use tempfile::tempdir;

    fn sample() -> (EventRepository, AttendeeId, EventId, EventId) {
        let mut repo = EventRepository::new();
        let alice = repo.register_attendee("Alice", "alice@mail.com", "Recife");
        let bob = repo.register_attendee("Bob", "bob@mail.com", "Natal");
        let party = repo.add(
            EventBuilder::new("Party", parse_date_time("31/12/2026 22:00").unwrap())
                .address("Beach")
                .category(Category::Party),
        );
        let match_ = repo.add(
            EventBuilder::new("Match", parse_date_time("01/11/2026 16:00").unwrap())
                .category(Category::Sports)
                .description("Final"),
        );
        ledger::confirm(&mut repo, alice, party);
        ledger::confirm(&mut repo, alice, match_);
        ledger::confirm(&mut repo, bob, party);
        (repo, alice, party, match_)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("nothing.ron"));
        assert!(db.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_shared_attendees() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("events.ron"));
        let (repo, alice, party, match_) = sample();
        db.save(&repo).unwrap();

        let loaded = db.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.attendees().count(), 2);
        assert!(loaded.get(party).unwrap().attendees().contains(&alice));
        assert!(loaded.get(match_).unwrap().attendees().contains(&alice));
        assert_eq!(
            loaded.attendee(alice).unwrap().confirmed_events(),
            &[party, match_]
        );
        let names: Vec<&str> = loaded
            .list(ListOrder::Insertion)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Party", "Match"]);

        let party = loaded.get(party).unwrap();
        assert_eq!(party.address, "Beach");
        assert_eq!(party.category, Category::Party);
        assert_eq!(party.start_time, parse_date_time("31/12/2026 22:00").unwrap());
        assert_eq!(party.description, "");
        let match_ = loaded.get(match_).unwrap();
        assert_eq!(match_.address, "");
        assert_eq!(match_.category, Category::Sports);
        assert_eq!(match_.start_time, parse_date_time("01/11/2026 16:00").unwrap());
        assert_eq!(match_.description, "Final");
        let alice = loaded.attendee(alice).unwrap();
        assert_eq!(
            (alice.name.as_str(), alice.email.as_str(), alice.city.as_str()),
            ("Alice", "alice@mail.com", "Recife")
        );
    }

    #[test]
    fn loaded_repository_keeps_allocating_fresh_ids() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("events.ron"));
        let (repo, _, party, match_) = sample();
        db.save(&repo).unwrap();

        let mut loaded = db.load().unwrap();
        let fresh = loaded.add(EventBuilder::new(
            "Fresh",
            parse_date_time("02/11/2026 10:00").unwrap(),
        ));
        assert!(fresh != party && fresh != match_);
        let carol = loaded.register_attendee("Carol", "carol@mail.com", "Olinda");
        assert!(loaded.attendee(carol).unwrap().confirmed_events().is_empty());
        assert_eq!(loaded.attendees().count(), 3);
    }

    #[test]
    fn attendees_without_confirmations_are_not_written() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("events.ron"));
        let mut repo = EventRepository::new();
        repo.register_attendee("Lurker", "lurker@mail.com", "Recife");
        db.save(&repo).unwrap();
        assert_eq!(db.load().unwrap().attendees().count(), 0);
    }

    #[test]
    fn save_overwrites_and_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("nested/dir/events.ron"));
        let (mut repo, ..) = sample();
        db.save(&repo).unwrap();
        repo.remove(0).unwrap();
        db.save(&repo).unwrap();
        assert_eq!(db.load().unwrap().len(), 1);
        assert!(!db.tmp_path().exists());
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.ron");
        fs::write(&path, "this is not ron").unwrap();
        assert!(matches!(Database::new(&path).load(), Err(Error::CorruptData(_))));
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.ron");
        // a non-empty directory in the way makes the final rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();
        let db = Database::new(&path);

        let (repo, ..) = sample();
        assert!(matches!(db.save(&repo), Err(Error::Io(_))));
        assert!(!db.tmp_path().exists());
    }

    fn attendee(id: u64, confirmed: &str) -> String {
        format!(
            "(id: {id}, name: \"A\", email: \"a@mail.com\", city: \"X\", \
             confirmed_events: [{confirmed}])"
        )
    }

    fn event(id: u64, attendees: &str) -> String {
        format!(
            "(id: {id}, name: \"E\", address: \"\", category: Show, \
             start_time: \"2026-10-20T21:00:00\", description: \"\", attendees: [{attendees}])"
        )
    }

    fn write_doc(attendees: &[String], events: &[String]) -> (tempfile::TempDir, Database) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.ron");
        let doc = format!(
            "(attendees: [{}], events: [{}])",
            attendees.join(", "),
            events.join(", ")
        );
        fs::write(&path, doc).unwrap();
        (dir, Database::new(path))
    }

    fn corruption(attendees: &[String], events: &[String]) -> String {
        let (_dir, db) = write_doc(attendees, events);
        match db.load() {
            Err(Error::CorruptData(reason)) => reason,
            other => panic!("expected corrupt data, got {other:?}"),
        }
    }

    #[test]
    fn handwritten_consistent_file_loads() {
        let (_dir, db) = write_doc(&[attendee(1, "1")], &[event(1, "1")]);
        let repo = db.load().unwrap();
        assert_eq!(repo.get(EventId(1)).unwrap().attendees(), &[AttendeeId(1)]);
    }

    #[test]
    fn garbage_is_corrupt_dup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.ron");
        fs::write(&path, "this is not ron").unwrap();
        assert!(matches!(Database::new(&path).load(), Err(Error::CorruptData(_))));
    }

    #[test]
    fn attendee_missing_from_own_confirmation_is_corrupt() {
        let reason = corruption(&[attendee(1, "")], &[event(1, "1")]);
        assert!(reason.contains("has not confirmed"), "{reason}");
    }

    #[test]
    fn confirmation_missing_from_event_is_corrupt() {
        let reason = corruption(&[attendee(1, "1")], &[event(1, "")]);
        assert!(reason.contains("confirmed event 1 but is not listed on it"), "{reason}");
    }

    #[test]
    fn dangling_attendee_is_corrupt() {
        let reason = corruption(&[], &[event(3, "9")]);
        assert!(reason.contains("unknown attendee 9"), "{reason}");
    }

    #[test]
    fn confirmation_of_unknown_event_is_corrupt() {
        let reason = corruption(&[attendee(1, "5")], &[]);
        assert!(reason.contains("confirmed unknown event 5"), "{reason}");
    }

    #[test]
    fn repeated_event_id_is_corrupt() {
        let reason = corruption(&[], &[event(1, ""), event(1, "")]);
        assert!(reason.contains("event 1 appears twice"), "{reason}");
    }

    #[test]
    fn repeated_attendee_id_is_corrupt() {
        let reason = corruption(&[attendee(1, ""), attendee(1, "")], &[]);
        assert!(reason.contains("attendee 1 appears twice"), "{reason}");
    }

    #[test]
    fn repeated_confirmation_is_corrupt() {
        let reason = corruption(&[attendee(1, "1, 1")], &[event(1, "1")]);
        assert!(reason.contains("confirms an event twice"), "{reason}");
    }

    #[test]
    fn repeated_attendee_on_event_is_corrupt() {
        let reason = corruption(&[attendee(1, "1")], &[event(1, "1, 1")]);
        assert!(reason.contains("lists an attendee twice"), "{reason}");
    }
}
