use time::Month;

use super::*;
use crate::clock::ManualClock;

fn at_secs(secs: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(secs).unwrap()
}

fn list() -> (DraftList<MemoryStorage, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_000.0);
    (DraftList::new(MemoryStorage::new(), clock.clone()), clock)
}

/// Storage whose reads and writes always fail.
struct BrokenStorage;

impl DraftStorage for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, DraftError> {
        Err(DraftError::Unavailable("disabled".into()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), DraftError> {
        Err(DraftError::Write("quota exceeded".into()))
    }
}

// =============================================================
// get_all
// =============================================================

#[test]
fn empty_storage_reads_empty_list() {
    let (drafts, _) = list();
    assert!(drafts.get_all().is_empty());
}

#[test]
fn corrupt_storage_reads_empty_list() {
    let mut storage = MemoryStorage::new();
    storage.set_item(DRAFTS_KEY, "{not json").unwrap();
    let drafts = DraftList::new(storage, ManualClock::new(0.0));
    assert!(drafts.get_all().is_empty());
}

#[test]
fn unreadable_storage_reads_empty_list() {
    let drafts = DraftList::new(BrokenStorage, ManualClock::new(0.0));
    assert!(drafts.get_all().is_empty());
}

// =============================================================
// save
// =============================================================

#[test]
fn save_new_assigns_id_and_timestamp() {
    let (mut drafts, _) = list();
    let saved = drafts.save("Mom", CardFields::default(), None).unwrap();
    assert_eq!(saved.name, "Mom");
    assert_eq!(saved.last_modified, at_secs(1));
    assert_eq!(drafts.get_all(), vec![saved]);
}

#[test]
fn save_with_existing_id_replaces_in_place() {
    let (mut drafts, clock) = list();
    let first = drafts.save("A", CardFields::default(), None).unwrap();
    let second = drafts.save("B", CardFields::default(), None).unwrap();

    clock.set(5_000.0);
    let edited = CardFields { header: "Edited".into(), ..CardFields::default() };
    drafts.save("A2", edited, Some(first.id)).unwrap();

    let all = drafts.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].name, "A2");
    assert_eq!(all[0].data.header, "Edited");
    assert_eq!(all[0].last_modified, at_secs(5));
    assert_eq!(all[1], second);
}

#[test]
fn save_with_unknown_id_inserts_under_that_id() {
    let (mut drafts, _) = list();
    let id = Uuid::new_v4();
    drafts.save("X", CardFields::default(), Some(id)).unwrap();
    assert_eq!(drafts.get_by_id(id).map(|c| c.name), Some("X".to_owned()));
}

#[test]
fn save_surfaces_write_errors() {
    let mut drafts = DraftList::new(BrokenStorage, ManualClock::new(0.0));
    let err = drafts.save("X", CardFields::default(), None).unwrap_err();
    assert!(matches!(err, DraftError::Write(_)));
}

#[test]
fn stored_json_uses_camel_case() {
    let mut storage = MemoryStorage::new();
    {
        let mut drafts = DraftList::new(&mut storage, ManualClock::new(7_000.0));
        drafts.save("Dad", CardFields::default(), None).unwrap();
    }
    let raw = storage.get_item(DRAFTS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"lastModified\":\"1970-01-01T00:00:07Z\""));
    assert!(raw.contains("\"cardImage\":\"birthday\""));
}

#[test]
fn reads_drafts_written_by_the_web_editor() {
    let raw = r#"[{
        "id": "0b6f6a52-5d1f-4a53-9a39-2d7c4f0e8a11",
        "name": "Grandma",
        "data": {
            "cardName": "Grandma",
            "header": "Happy Birthday!",
            "message": "Experience your AR card below.",
            "cardImage": "birthday",
            "cardTop": "Dear Grandma,",
            "cardMiddle": "Have a great birthday!",
            "cardBottom": "Love Sam"
        },
        "lastModified": "2025-02-14T09:30:00.123Z"
    }]"#;
    let mut storage = MemoryStorage::new();
    storage.set_item(DRAFTS_KEY, raw).unwrap();
    let mut drafts = DraftList::new(&mut storage, ManualClock::new(0.0));

    let all = drafts.get_all();
    assert_eq!(all.len(), 1);
    let stamp = all[0].last_modified;
    assert_eq!(stamp.year(), 2025);
    assert_eq!(stamp.month(), Month::February);
    assert_eq!(stamp.day(), 14);
    assert_eq!(stamp.hour(), 9);
    assert_eq!(stamp.millisecond(), 123);
    assert_eq!(all[0].data.card_top, "Dear Grandma,");

    // Saving another draft keeps the existing entry.
    drafts.save("New", CardFields::default(), None).unwrap();
    assert_eq!(drafts.get_all().len(), 2);
}

#[test]
fn fractional_clock_reading_rounds_to_whole_ms() {
    let (mut drafts, clock) = list();
    clock.set(1_500.4);
    let saved = drafts.save("A", CardFields::default(), None).unwrap();
    assert_eq!(saved.last_modified.unix_timestamp(), 1);
    assert_eq!(saved.last_modified.millisecond(), 500);
}

#[test]
fn out_of_range_clock_reading_stamps_the_epoch() {
    let (mut drafts, clock) = list();
    clock.set(1e300);
    let saved = drafts.save("A", CardFields::default(), None).unwrap();
    assert_eq!(saved.last_modified, OffsetDateTime::UNIX_EPOCH);
}

// =============================================================
// get_by_id / delete
// =============================================================

#[test]
fn get_by_id_missing_is_none() {
    let (drafts, _) = list();
    assert_eq!(drafts.get_by_id(Uuid::new_v4()), None);
}

#[test]
fn delete_removes_only_that_draft() {
    let (mut drafts, _) = list();
    let a = drafts.save("A", CardFields::default(), None).unwrap();
    let b = drafts.save("B", CardFields::default(), None).unwrap();
    drafts.delete(a.id).unwrap();
    assert_eq!(drafts.get_all(), vec![b]);
}

#[test]
fn delete_unknown_id_is_ok() {
    let (mut drafts, _) = list();
    drafts.save("A", CardFields::default(), None).unwrap();
    drafts.delete(Uuid::new_v4()).unwrap();
    assert_eq!(drafts.get_all().len(), 1);
}
