use inventory_core::{
    parse_registration_date, CsvRecordStore, Listing, LoadReport, Record, RecordStore, StoreError,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn record(id: u64, name: &str, quantity: u64, date: &str) -> Record {
    Record::new(id, name, quantity, parse_registration_date(date).unwrap()).unwrap()
}

fn items_path(dir: &TempDir) -> PathBuf {
    dir.path().join("items.csv")
}

fn listed_ids(store: &CsvRecordStore) -> Vec<u64> {
    match store.list() {
        Listing::NoRecords => Vec::new(),
        Listing::Records(records) => records.iter().map(Record::id).collect(),
    }
}

#[test]
fn open_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let (store, report) = CsvRecordStore::open(items_path(&dir)).unwrap();

    assert_eq!(report, LoadReport::default());
    assert!(store.is_empty());
    assert_eq!(store.list(), Listing::NoRecords);
    assert!(!items_path(&dir).exists());
}

#[test]
fn add_appends_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    let mut store = CsvRecordStore::new(&path);

    store.add(record(1, "Wrench", 10, "2024-01-01")).unwrap();
    store.add(record(2, "Bolt", 5, "2024-01-02")).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "1,Wrench,10,2024-01-01\n2,Bolt,5,2024-01-02\n"
    );
}

#[test]
fn add_then_list_reflects_the_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvRecordStore::new(items_path(&dir));

    store.add(record(7, "Washer", 250, "2023-12-31")).unwrap();

    let Listing::Records(records) = store.list() else {
        panic!("expected records");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].to_string(),
        "Item ID: 7    Item Name: Washer    Quantity: 250    Reg Date: 2023-12-31"
    );
}

#[test]
fn duplicate_id_is_rejected_and_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    let mut store = CsvRecordStore::new(&path);

    store.add(record(1, "Wrench", 10, "2024-01-01")).unwrap();
    let err = store.add(record(1, "Hammer", 3, "2024-02-01")).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateId(1)));
    assert_eq!(err.to_string(), "Item with ID 1 already exists.");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1).unwrap().name(), "Wrench");
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn list_sorts_by_name_case_sensitively_then_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvRecordStore::new(items_path(&dir));

    store.add(record(1, "bolt", 1, "2024-01-01")).unwrap();
    store.add(record(2, "Wrench", 1, "2024-01-01")).unwrap();
    store.add(record(4, "Bolt", 1, "2024-01-01")).unwrap();
    store.add(record(3, "Bolt", 1, "2024-01-01")).unwrap();

    assert_eq!(listed_ids(&store), vec![3, 4, 2, 1]);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(&path, "9,Gear,4,2022-06-30\n").unwrap();

    let (mut store, _) = CsvRecordStore::open(&path).unwrap();
    store.add(record(1, "Wrench", 10, "2024-01-01")).unwrap();
    store.save().unwrap();

    let (reloaded, report) = CsvRecordStore::open(&path).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(reloaded.list(), store.list());
    assert!(!dir.path().join("items.csv.tmp").exists());
}

#[test]
fn save_rewrites_file_without_skipped_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(&path, "1,Wrench,10,2024-01-01\nnot,a,record\n").unwrap();

    let (store, report) = CsvRecordStore::open(&path).unwrap();
    assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });

    store.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1,Wrench,10,2024-01-01\n");
}

#[test]
fn load_skips_lines_with_wrong_field_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(
        &path,
        "1,Wrench,10,2024-01-01\n2,Bolt,5\n\n3,Nut,1,2024-01-03,extra\r\n4,Gear,2,2024-01-04\r\n",
    )
    .unwrap();

    let (store, report) = CsvRecordStore::open(&path).unwrap();

    assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
    assert_eq!(listed_ids(&store), vec![4, 1]);
}

#[test]
fn load_fails_whole_file_on_bad_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(&path, "1,Wrench,10,2024-01-01\n2,Bolt,many,2024-01-02\n").unwrap();

    let err = CsvRecordStore::open(&path).unwrap_err();

    match err {
        StoreError::InvalidData { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("quantity"), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_fails_on_impossible_date_and_repeated_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);

    fs::write(&path, "1,Wrench,10,2024-02-30\n").unwrap();
    assert!(matches!(
        CsvRecordStore::open(&path).unwrap_err(),
        StoreError::InvalidData { line: 1, .. }
    ));

    fs::write(&path, "1,Wrench,10,2024-01-01\n1,Bolt,5,2024-01-02\n").unwrap();
    assert!(matches!(
        CsvRecordStore::open(&path).unwrap_err(),
        StoreError::InvalidData { line: 2, .. }
    ));
}

#[test]
fn failed_load_keeps_previous_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    let mut store = CsvRecordStore::new(&path);
    store.add(record(1, "Wrench", 10, "2024-01-01")).unwrap();

    fs::write(&path, "x,Wrench,10,2024-01-01\n").unwrap();
    assert!(store.load().is_err());

    assert_eq!(store.len(), 1);
    assert!(store.get(1).is_some());
}

#[test]
fn add_repairs_missing_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(&path, "1,Wrench,10,2024-01-01").unwrap();

    let (mut store, _) = CsvRecordStore::open(&path).unwrap();
    store.add(record(2, "Bolt", 5, "2024-01-02")).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "1,Wrench,10,2024-01-01\n2,Bolt,5,2024-01-02\n"
    );
}

#[test]
fn add_reports_io_error_and_keeps_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened for appending.
    let mut store = CsvRecordStore::new(dir.path());

    let err = store.add(record(1, "Wrench", 10, "2024-01-01")).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }), "unexpected error: {err}");
    assert!(store.is_empty());
}

#[test]
fn load_reports_unreadable_path_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let items_dir = dir.path().join("items.csv");
    fs::create_dir(&items_dir).unwrap();

    let err = CsvRecordStore::open(&items_dir).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }), "unexpected error: {err}");
    assert_eq!(err.code(), "io");
}

#[test]
fn load_trims_every_field_alike() {
    let dir = tempfile::tempdir().unwrap();
    let path = items_path(&dir);
    fs::write(&path, "1, Wrench ,10, 2024-01-01\n").unwrap();

    let (store, report) = CsvRecordStore::open(&path).unwrap();

    assert_eq!(report.loaded, 1);
    assert_eq!(store.get(1).unwrap().name(), "Wrench");
}
