//! Service-level filters and the four aggregate reports.

use olympics_core::service::reports;
use olympics_core::{
    Athlete, AthleteService, Competition, CompetitionService, InMemoryRepository, Participation,
    ParticipationService, RepoError, Sponsor, SponsorService, Sponsorship, SponsorshipService,
};

fn athlete_service() -> AthleteService {
    AthleteService::new(Box::new(InMemoryRepository::new()))
}

fn seeded_athletes() -> AthleteService {
    let mut service = athlete_service();
    service
        .add(&Athlete::new(1, "Simone", "Biles", "USA", 27))
        .unwrap();
    service
        .add(&Athlete::new(2, "Katie", "Ledecky", "USA", 27))
        .unwrap();
    service
        .add(&Athlete::new(3, "Leon", "Marchand", "FRA", 22))
        .unwrap();
    service
}

#[test]
fn athletes_filter_by_country_and_first_name() {
    let service = seeded_athletes();

    let usa: Vec<i64> = service
        .filter_by_country("USA")
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(usa, vec![1, 2]);

    let simone = service.filter_by_first_name("Simone").unwrap();
    assert_eq!(simone.len(), 1);
    assert_eq!(simone[0].id, 1);

    assert!(service.filter_by_country("GER").unwrap().is_empty());
}

#[test]
fn competitions_filter_by_location() {
    let mut service = CompetitionService::new(Box::new(InMemoryRepository::new()));
    let date = Competition::parse_date("26-07-2024").unwrap();
    service
        .add(&Competition::new(1, date, "Paris", "Opening", "Ceremony"))
        .unwrap();
    service
        .add(&Competition::new(2, date, "Lille", "Handball", "Group stage"))
        .unwrap();

    let paris = service.filter_by_location("Paris").unwrap();
    assert_eq!(paris.len(), 1);
    assert_eq!(paris[0].id, 1);
}

#[test]
fn participations_filter_by_rank_and_competition() {
    let mut service = ParticipationService::new(Box::new(InMemoryRepository::new()));
    service.add(&Participation::new(1, 1, 10, 1)).unwrap();
    service.add(&Participation::new(2, 2, 10, 2)).unwrap();
    service.add(&Participation::new(3, 1, 11, 1)).unwrap();

    let winners: Vec<i64> = service
        .filter_by_rank(1)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(winners, vec![1, 3]);

    let in_ten: Vec<i64> = service
        .filter_by_competition(10)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(in_ten, vec![1, 2]);
}

#[test]
fn sponsorships_filter_by_sponsor_and_minimum_contribution() {
    let mut service = SponsorshipService::new(Box::new(InMemoryRepository::new()));
    service.add(&Sponsorship::new(1, 10, 20, 1_000)).unwrap();
    service.add(&Sponsorship::new(2, 11, 20, 5_000)).unwrap();
    service.add(&Sponsorship::new(3, 10, 21, 3_000)).unwrap();

    let by_sponsor: Vec<i64> = service
        .filter_by_sponsor(20)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(by_sponsor, vec![1, 2]);

    // The threshold is inclusive.
    let big: Vec<i64> = service
        .filter_by_min_contribution(3_000)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(big, vec![2, 3]);
}

#[test]
fn rejected_record_does_not_reach_the_store() {
    let mut service = athlete_service();
    let broken = Athlete::new(1, "Simone", "", "USA", 27);

    let error = service.add(&broken).unwrap_err();
    assert!(matches!(error, RepoError::Validation(_)));
    assert!(error.to_string().contains("last_name"));
    assert!(service.get_all().unwrap().is_empty());
}

#[test]
fn sponsor_contribution_report_totals_and_sorts_descending() {
    let sponsors = vec![
        Sponsor::new(1, "Acme", "USA"),
        Sponsor::new(2, "Globex", "GER"),
        Sponsor::new(3, "Initech", "USA"),
    ];
    let sponsorships = vec![
        Sponsorship::new(1, 10, 1, 1_000),
        Sponsorship::new(2, 11, 1, 2_500),
        Sponsorship::new(3, 10, 2, 4_000),
        // Unknown sponsor id; the row is skipped.
        Sponsorship::new(4, 10, 99, 9_999),
    ];

    let rows = reports::sponsor_contributions(&sponsors, &sponsorships);
    let summary: Vec<(i64, i64)> = rows.iter().map(|(s, total)| (s.id, *total)).collect();
    assert_eq!(summary, vec![(2, 4_000), (1, 3_500), (3, 0)]);
}

#[test]
fn competition_sponsorship_report_counts_rows() {
    let date = Competition::parse_date("26-07-2024").unwrap();
    let competitions = vec![
        Competition::new(10, date, "Paris", "Opening", "Ceremony"),
        Competition::new(11, date, "Lille", "Handball", "Group stage"),
    ];
    let sponsorships = vec![
        Sponsorship::new(1, 10, 1, 1_000),
        Sponsorship::new(2, 10, 2, 2_000),
        Sponsorship::new(3, 11, 1, 3_000),
    ];

    let rows = reports::competition_sponsorship_counts(&competitions, &sponsorships);
    let summary: Vec<(i64, i64)> = rows.iter().map(|(c, count)| (c.id, *count)).collect();
    assert_eq!(summary, vec![(10, 2), (11, 1)]);
}

#[test]
fn athlete_participation_report_keeps_zero_count_athletes() {
    let athletes = vec![
        Athlete::new(1, "Simone", "Biles", "USA", 27),
        Athlete::new(2, "Katie", "Ledecky", "USA", 27),
    ];
    let participations = vec![
        Participation::new(1, 1, 10, 1),
        Participation::new(2, 1, 11, 3),
    ];

    let rows = reports::athlete_participation_counts(&athletes, &participations);
    let summary: Vec<(i64, i64)> = rows.iter().map(|(a, count)| (a.id, *count)).collect();
    assert_eq!(summary, vec![(1, 2), (2, 0)]);
}

#[test]
fn competition_participation_report_breaks_ties_by_id() {
    let date = Competition::parse_date("26-07-2024").unwrap();
    let competitions = vec![
        Competition::new(11, date, "Lille", "Handball", "Group stage"),
        Competition::new(10, date, "Paris", "Opening", "Ceremony"),
    ];
    let participations = vec![
        Participation::new(1, 1, 10, 1),
        Participation::new(2, 2, 11, 1),
    ];

    let rows = reports::competition_participation_counts(&competitions, &participations);
    let summary: Vec<(i64, i64)> = rows.iter().map(|(c, count)| (c.id, *count)).collect();
    assert_eq!(summary, vec![(10, 1), (11, 1)]);
}

#[test]
fn reports_over_service_backed_data_compose() {
    let mut sponsors = SponsorService::new(Box::new(InMemoryRepository::new()));
    let mut sponsorships = SponsorshipService::new(Box::new(InMemoryRepository::new()));
    sponsors.add(&Sponsor::new(1, "Acme", "USA")).unwrap();
    sponsorships.add(&Sponsorship::new(1, 10, 1, 750)).unwrap();

    let rows = reports::sponsor_contributions(
        &sponsors.get_all().unwrap(),
        &sponsorships.get_all().unwrap(),
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1, 750);
}
