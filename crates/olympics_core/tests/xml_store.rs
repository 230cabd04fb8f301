//! XML backend checks: document round-trips and error reporting.

use olympics_core::{Participation, RepoError, Repository, Sponsorship, XmlRepository};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn store_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn sample(id: i64) -> Sponsorship {
    Sponsorship::new(id, 10, 20, 5_000)
}

#[test]
fn missing_store_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let repo = XmlRepository::<Sponsorship>::new(store_path(&dir, "sponsorships.xml"));

    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn records_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "sponsorships.xml");

    {
        let mut repo = XmlRepository::<Sponsorship>::new(&path);
        repo.save(&sample(1)).unwrap();
        repo.save(&sample(2)).unwrap();
    }

    let reopened = XmlRepository::<Sponsorship>::new(&path);
    let ids: Vec<i64> = reopened.find_all().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(reopened.find_by_id(2).unwrap(), Some(sample(2)));
}

#[test]
fn document_uses_camel_case_field_tags() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "sponsorships.xml");

    let mut repo = XmlRepository::<Sponsorship>::new(&path);
    repo.save(&sample(1)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("<entities>"));
    assert!(content.contains("<sponsorship>"));
    assert!(content.contains("<competitionId>10</competitionId>"));
    assert!(content.contains("<sponsorId>20</sponsorId>"));
    assert!(content.contains("<moneyContribution>5000</moneyContribution>"));
}

#[test]
fn foreign_entity_documents_can_share_a_directory() {
    let dir = TempDir::new().unwrap();

    let mut sponsorships = XmlRepository::<Sponsorship>::new(store_path(&dir, "s.xml"));
    let mut participations = XmlRepository::<Participation>::new(store_path(&dir, "p.xml"));
    sponsorships.save(&sample(1)).unwrap();
    participations
        .save(&Participation::new(1, 4, 10, 3))
        .unwrap();

    assert_eq!(sponsorships.find_all().unwrap().len(), 1);
    assert_eq!(participations.find_all().unwrap().len(), 1);
}

#[test]
fn truncated_document_reports_a_position() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "sponsorships.xml");
    fs::write(
        &path,
        "<entities><sponsorship><id>1</id><competitionId>10</mismatch>",
    )
    .unwrap();

    let repo = XmlRepository::<Sponsorship>::new(&path);
    assert!(matches!(
        repo.find_all().unwrap_err(),
        RepoError::Xml { .. }
    ));
}

#[test]
fn element_missing_a_mandatory_node_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "sponsorships.xml");
    fs::write(
        &path,
        "<entities><sponsorship><id>1</id><sponsorId>20</sponsorId>\
         <moneyContribution>5000</moneyContribution></sponsorship></entities>",
    )
    .unwrap();

    let repo = XmlRepository::<Sponsorship>::new(&path);
    let error = repo.find_all().unwrap_err();
    assert!(error.to_string().contains("competitionId"));
}

#[test]
fn save_rejects_duplicate_id() {
    let dir = TempDir::new().unwrap();
    let mut repo = XmlRepository::<Sponsorship>::new(store_path(&dir, "sponsorships.xml"));
    repo.save(&sample(1)).unwrap();

    assert!(matches!(
        repo.save(&sample(1)).unwrap_err(),
        RepoError::DuplicateId { id: 1, .. }
    ));
}

#[test]
fn update_and_delete_round_trip_through_the_document() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "sponsorships.xml");

    let mut repo = XmlRepository::<Sponsorship>::new(&path);
    repo.save(&sample(1)).unwrap();
    repo.save(&sample(2)).unwrap();

    let mut changed = sample(1);
    changed.money_contribution = 9_999;
    repo.update(&changed).unwrap();
    repo.delete(2).unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].money_contribution, 9_999);

    assert!(matches!(
        repo.delete(2).unwrap_err(),
        RepoError::UnknownId { id: 2, .. }
    ));
}
