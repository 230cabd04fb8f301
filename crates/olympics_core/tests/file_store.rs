//! Flat-file backend checks: persistence, layout and error reporting.

use olympics_core::{Athlete, Competition, FlatFileRepository, RepoError, Repository};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn store_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn sample(id: i64) -> Athlete {
    Athlete::new(id, "Armand", "Duplantis", "SWE", 24)
}

#[test]
fn missing_store_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let repo = FlatFileRepository::<Athlete>::new(store_path(&dir, "athletes.txt"));

    assert!(repo.find_all().unwrap().is_empty());
    assert_eq!(repo.find_by_id(1).unwrap(), None);
}

#[test]
fn records_survive_a_reopen_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");

    {
        let mut repo = FlatFileRepository::<Athlete>::new(&path);
        repo.save(&sample(5)).unwrap();
        repo.save(&sample(2)).unwrap();
        repo.save(&sample(8)).unwrap();
    }

    let reopened = FlatFileRepository::<Athlete>::new(&path);
    let ids: Vec<i64> = reopened.find_all().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![5, 2, 8]);
}

#[test]
fn line_layout_uses_the_pipe_separator() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");

    let mut repo = FlatFileRepository::<Athlete>::new(&path);
    repo.save(&sample(1)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "1|Armand|Duplantis|SWE|24\n");
}

#[test]
fn competition_dates_round_trip_in_day_month_year_layout() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "competitions.txt");

    let date = Competition::parse_date("26-07-2024").unwrap();
    let competition = Competition::new(1, date, "Paris", "Games of 2024", "Summer games");

    {
        let mut repo = FlatFileRepository::<Competition>::new(&path);
        repo.save(&competition).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("|26-07-2024|"));

    let reopened = FlatFileRepository::<Competition>::new(&path);
    assert_eq!(reopened.find_by_id(1).unwrap(), Some(competition));
}

#[test]
fn malformed_line_reports_file_and_line_number() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");
    fs::write(&path, "1|Armand|Duplantis|SWE|24\n2|too|few|fields\n").unwrap();

    let repo = FlatFileRepository::<Athlete>::new(&path);
    let error = repo.find_all().unwrap_err();
    match error {
        RepoError::Format { line, .. } => assert_eq!(line, 2),
        other => panic!("expected a format error, got {other}"),
    }
}

#[test]
fn persisted_record_breaking_a_domain_rule_is_rejected_on_read() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");
    fs::write(&path, "1|Armand||SWE|24\n").unwrap();

    let repo = FlatFileRepository::<Athlete>::new(&path);
    assert!(matches!(
        repo.find_all().unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn save_rejects_duplicate_id_without_touching_the_file() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");

    let mut repo = FlatFileRepository::<Athlete>::new(&path);
    repo.save(&sample(1)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(matches!(
        repo.save(&sample(1)).unwrap_err(),
        RepoError::DuplicateId { id: 1, .. }
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn update_and_delete_rewrite_the_file() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "athletes.txt");

    let mut repo = FlatFileRepository::<Athlete>::new(&path);
    repo.save(&sample(1)).unwrap();
    repo.save(&sample(2)).unwrap();

    let mut changed = sample(1);
    changed.country = "NOR".to_string();
    repo.update(&changed).unwrap();
    repo.delete(2).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "1|Armand|Duplantis|NOR|24\n");
}

#[test]
fn update_and_delete_reject_unknown_id() {
    let dir = TempDir::new().unwrap();
    let mut repo = FlatFileRepository::<Athlete>::new(store_path(&dir, "athletes.txt"));

    assert!(matches!(
        repo.update(&sample(7)).unwrap_err(),
        RepoError::UnknownId { id: 7, .. }
    ));
    assert!(matches!(
        repo.delete(7).unwrap_err(),
        RepoError::UnknownId { id: 7, .. }
    ));
}
