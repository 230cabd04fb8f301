//! CRUD contract checks against the in-memory backend.

use olympics_core::{Athlete, InMemoryRepository, RepoError, Repository};

fn sample(id: i64) -> Athlete {
    Athlete::new(id, "Simone", "Biles", "USA", 27)
}

#[test]
fn save_then_find_round_trips() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    let athlete = sample(1);
    repo.save(&athlete).unwrap();

    assert_eq!(repo.find_by_id(1).unwrap(), Some(athlete));
    assert_eq!(repo.find_by_id(2).unwrap(), None);
}

#[test]
fn find_all_keeps_insertion_order() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    repo.save(&sample(3)).unwrap();
    repo.save(&sample(1)).unwrap();
    repo.save(&sample(2)).unwrap();

    let ids: Vec<i64> = repo.find_all().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn save_rejects_duplicate_id() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    repo.save(&sample(1)).unwrap();

    let error = repo.save(&sample(1)).unwrap_err();
    assert!(matches!(
        error,
        RepoError::DuplicateId {
            entity: "athlete",
            id: 1
        }
    ));
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn update_replaces_the_stored_record() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    repo.save(&sample(1)).unwrap();

    let mut changed = sample(1);
    changed.country = "FRA".to_string();
    repo.update(&changed).unwrap();

    assert_eq!(repo.find_by_id(1).unwrap().unwrap().country, "FRA");
}

#[test]
fn update_and_delete_reject_unknown_id() {
    let mut repo = InMemoryRepository::<Athlete>::new();

    assert!(matches!(
        repo.update(&sample(9)).unwrap_err(),
        RepoError::UnknownId { id: 9, .. }
    ));
    assert!(matches!(
        repo.delete(9).unwrap_err(),
        RepoError::UnknownId { id: 9, .. }
    ));
}

#[test]
fn delete_removes_only_the_target() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    repo.save(&sample(1)).unwrap();
    repo.save(&sample(2)).unwrap();

    repo.delete(1).unwrap();

    let ids: Vec<i64> = repo.find_all().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn invalid_record_is_rejected_and_names_every_bad_field() {
    let mut repo = InMemoryRepository::<Athlete>::new();
    let broken = Athlete::new(-1, "", "Biles", "", 0);

    let error = repo.save(&broken).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("id"));
    assert!(message.contains("first_name"));
    assert!(message.contains("country"));
    assert!(message.contains("age"));

    // The failed save must not leave anything behind.
    assert!(repo.find_all().unwrap().is_empty());
}
