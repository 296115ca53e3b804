use super::*;
use std::fs;
use tempfile::tempdir;

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/census_data_sample.csv")
}

fn loaded_sample() -> CensusStore {
    let mut store = CensusStore::new(sample_path());
    assert!(store.load().expect("load census"));
    store
}

const PREAMBLE: &str = "\"Table\"\n\"All people\"\n\"Counting\"\n\n";

#[test]
fn regions_loaded_in_file_order() {
    let store = loaded_sample();
    assert!(store.is_loaded());
    assert_eq!(store.regions(), vec!["Cherryville", "Appleburgh", "Pearlin"]);
}

#[test]
fn regions_unloaded_is_empty() {
    let store = CensusStore::new(sample_path());
    assert!(!store.is_loaded());
    assert!(store.regions().is_empty());
}

#[test]
fn total_population_all_ages() {
    let store = loaded_sample();
    assert_eq!(store.total_population("Cherryville", 100).expect("total"), Some(115_700));
}

#[test]
fn total_population_under_two() {
    let store = loaded_sample();
    assert_eq!(store.total_population("Appleburgh", 2).expect("total"), Some(46_000));
}

#[test]
fn total_population_includes_band_at_boundary() {
    let store = loaded_sample();
    assert_eq!(store.total_population("Cherryville", 15).expect("total"), Some(26_750));
    assert_eq!(store.total_population("Pearlin", 15).expect("total"), Some(11_360));
}

#[test]
fn total_population_unloaded_is_none() {
    let store = CensusStore::new(sample_path());
    assert_eq!(store.total_population("Pearlin", 100).expect("total"), None);
}

#[test]
fn total_population_unknown_region_is_none() {
    let store = loaded_sample();
    assert_eq!(store.total_population("Melonshire", 100).expect("total"), None);
    assert_eq!(store.total_population("Melonshire", 0).expect("total"), None);
}

#[test]
fn missing_file_returns_false() {
    let dir = tempdir().expect("tempdir");
    let mut store = CensusStore::new(dir.path().join("absent.csv"));
    assert!(!store.load().expect("load"));
    assert!(store.regions().is_empty());
}

#[test]
fn directory_path_returns_false() {
    let dir = tempdir().expect("tempdir");
    let mut store = CensusStore::new(dir.path());
    assert!(!store.load().expect("load"));
}

#[test]
fn load_twice_is_idempotent() {
    let mut store = loaded_sample();
    let first = store.total_population("Cherryville", 100).expect("total");
    assert!(store.load().expect("reload"));
    assert_eq!(store.regions(), vec!["Cherryville", "Appleburgh", "Pearlin"]);
    assert_eq!(store.total_population("Cherryville", 100).expect("total"), first);
}

#[test]
fn early_exit_follows_file_order() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people\n\
                Plumtown,Under 1,10\n\
                Plumtown,20 to 44,500\n\
                Plumtown,5 to 9,40\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    // the 5 to 9 row sits after an older band and is never reached
    assert_eq!(store.total_population("Plumtown", 10).expect("total"), Some(10));
    assert_eq!(store.total_population("Plumtown", 50).expect("total"), Some(550));
}

#[test]
fn repeated_band_keeps_position_and_last_count() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people\n\
                Plumtown,Under 1,10\n\
                Plumtown,1 to 4,20\n\
                Plumtown,Under 1,15\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    let bands: Vec<(&str, &str, u64)> = store
        .bands("Plumtown")
        .expect("region")
        .map(|(label, row)| (label, row.count.as_str(), row.line))
        .collect();
    assert_eq!(bands, vec![("Under 1", "15", 8), ("1 to 4", "20", 7)]);
    assert_eq!(store.total_population("Plumtown", 4).expect("total"), Some(35));
}

#[test]
fn latin1_region_names_are_decoded() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let mut bytes = PREAMBLE.as_bytes().to_vec();
    bytes.extend_from_slice(b"\"Region\",\"Range\",\"All people\"\n\"Cr\xe8me\",\"Under 1\",\"7\"\n");
    fs::write(&path, bytes).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    assert_eq!(store.regions(), vec!["Crème"]);
    assert_eq!(store.total_population("Crème", 0).expect("total"), Some(7));
}

#[test]
fn file_shorter_than_preamble_loads_empty() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    fs::write(&path, "only\ntwo\n").expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    assert!(store.regions().is_empty());
}

#[test]
fn custom_preamble_length() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    fs::write(&path, "Region,Range,All people\nPlumtown,Under 1,3\n").expect("write file");

    let mut store = CensusStore::with_preamble(&path, 0);
    assert!(store.load().expect("load"));
    assert_eq!(store.total_population("Plumtown", 0).expect("total"), Some(3));
}

#[test]
fn bad_values_past_the_boundary_are_never_parsed() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people\n\
                Plumtown,All people,-\n\
                Plumtown,Under 1,15\n\
                Plumtown,90 to 94,-\n\
                Plumtown,Total,9\n\
                Oakham,Under 1,-\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    assert_eq!(store.regions(), vec!["Plumtown", "Oakham"]);
    assert_eq!(store.total_population("Plumtown", 15).expect("total"), Some(15));
}

#[test]
fn bad_count_inside_the_boundary_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people\nPlumtown,Under 1,ten\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    let err = store.total_population("Plumtown", 15).unwrap_err();
    match err {
        InputError::InvalidNumber { line, column, value } => {
            assert_eq!(line, 6);
            assert_eq!(column, COUNT_COLUMN);
            assert_eq!(value, "ten");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_band_label_before_the_boundary_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people\nPlumtown,Total,10\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    let err = store.total_population("Plumtown", 15).unwrap_err();
    assert!(matches!(err, InputError::InvalidAgeBand { line: 6, label } if label == "Total"));
}

#[test]
fn overflowing_total_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = format!(
        "Region,Range,All people\nPlumtown,Under 1,{max}\nPlumtown,1,1\n",
        max = u64::MAX
    );
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    let err = store.total_population("Plumtown", 15).unwrap_err();
    assert!(matches!(err, InputError::Overflow(region) if region == "Plumtown"));
}

#[test]
fn carriage_return_only_preamble() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let text = "\"Table\"\r\"All people\"\r\"Counting\"\r\rRegion,Range,All people\rPlumtown,Under 1,4\rPlumtown,1,6\r";
    fs::write(&path, text).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    assert_eq!(store.regions(), vec!["Plumtown"]);
    assert_eq!(store.total_population("Plumtown", 1).expect("total"), Some(10));
}

#[test]
fn duplicated_column_uses_the_last_one() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Range,All people,All people\nPlumtown,Under 1,1,2\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    assert!(store.load().expect("load"));
    assert_eq!(store.total_population("Plumtown", 0).expect("total"), Some(2));
}

#[test]
fn missing_column_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("census.csv");
    let body = "Region,Band,All people\nPlumtown,Under 1,10\n";
    fs::write(&path, format!("{PREAMBLE}{body}")).expect("write file");

    let mut store = CensusStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, InputError::MissingColumn(name) if name == RANGE_COLUMN));
}
