//! Menu-driven console over the catalog services.
//!
//! # Responsibility
//! - Own one service per entity type for the lifetime of the session.
//! - Translate menu choices into service calls and print the outcome.
//! - Check cross-entity references before saving link records.
//!
//! # Invariants
//! - A failed command prints its error and returns to the menu; only
//!   end of input or an explicit exit leaves the loop.
//! - Referential checks read through the services, never the stores
//!   directly.

use crate::input::{prompt, prompt_date, prompt_i64, prompt_id, prompt_text, prompt_u32};
use log::{info, warn};
use olympics_core::service::reports;
use olympics_core::{
    AppConfig, Athlete, AthleteService, Competition, CompetitionService, ConfigError, Entity,
    Participation, ParticipationService, RepoError, Sponsor, SponsorService, Sponsorship,
    SponsorshipService,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// One failed console command. The menu loop reports it and continues.
#[derive(Debug)]
pub enum CommandError {
    /// The typed value could not be parsed into what the command needs.
    Input(String),
    /// The store rejected the operation.
    Store(RepoError),
    /// Reading from or writing to the terminal failed.
    Io(io::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(message) => write!(f, "bad input: {message}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Input(_) => None,
        }
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// The interactive session: five services and a menu loop.
pub struct Console {
    athletes: AthleteService,
    competitions: CompetitionService,
    participations: ParticipationService,
    sponsors: SponsorService,
    sponsorships: SponsorshipService,
}

impl Console {
    /// Opens every configured store and wraps each in its service.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let database = config.database.as_ref();
        Ok(Self {
            athletes: AthleteService::new(
                config.athletes.open_repository("athletes", database)?,
            ),
            competitions: CompetitionService::new(
                config.competitions.open_repository("competitions", database)?,
            ),
            participations: ParticipationService::new(
                config
                    .participations
                    .open_repository("participations", database)?,
            ),
            sponsors: SponsorService::new(
                config.sponsors.open_repository("sponsors", database)?,
            ),
            sponsorships: SponsorshipService::new(
                config.sponsorships.open_repository("sponsorships", database)?,
            ),
        })
    }

    /// Runs the top-level menu until exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!("event=console_start module=console status=ok");
        loop {
            println!();
            println!("Olympic games catalog");
            println!("  1. athletes");
            println!("  2. competitions");
            println!("  3. participations");
            println!("  4. sponsors");
            println!("  5. sponsorships");
            println!("  6. reports");
            println!("  0. exit");
            let choice = match prompt("> ") {
                Ok(choice) => choice,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err),
            };
            let outcome = match choice.as_str() {
                "1" => self.athlete_menu(),
                "2" => self.competition_menu(),
                "3" => self.participation_menu(),
                "4" => self.sponsor_menu(),
                "5" => self.sponsorship_menu(),
                "6" => self.report_menu(),
                "0" => break,
                other => Err(CommandError::Input(format!("`{other}` is not a menu item"))),
            };
            if let Err(err) = outcome {
                match err {
                    CommandError::Io(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => {
                        break;
                    }
                    CommandError::Io(io_err) => return Err(io_err),
                    other => {
                        warn!("event=command module=console status=error error={other}");
                        println!("error: {other}");
                    }
                }
            }
        }
        info!("event=console_stop module=console status=ok");
        println!("bye");
        Ok(())
    }

    fn athlete_menu(&mut self) -> Result<(), CommandError> {
        println!("athletes: 1 add, 2 update, 3 delete, 4 find by id, 5 list,");
        println!("          6 filter by country, 7 filter by first name");
        match prompt("athletes> ")?.as_str() {
            "1" => {
                let athlete = read_athlete()?;
                self.athletes.add(&athlete)?;
                println!("saved {athlete}");
            }
            "2" => {
                let athlete = read_athlete()?;
                self.athletes.update(&athlete)?;
                println!("updated {athlete}");
            }
            "3" => {
                let id = prompt_id("id: ")?;
                self.athletes.remove(id)?;
                println!("deleted athlete #{id}");
            }
            "4" => {
                let id = prompt_id("id: ")?;
                match self.athletes.get(id)? {
                    Some(athlete) => println!("{athlete}"),
                    None => println!("no athlete with id {id}"),
                }
            }
            "5" => print_all(&self.athletes.get_all()?),
            "6" => {
                let country = prompt_text("country: ")?;
                print_all(&self.athletes.filter_by_country(&country)?);
            }
            "7" => {
                let first_name = prompt_text("first name: ")?;
                print_all(&self.athletes.filter_by_first_name(&first_name)?);
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    fn competition_menu(&mut self) -> Result<(), CommandError> {
        println!("competitions: 1 add, 2 update, 3 delete, 4 find by id, 5 list,");
        println!("              6 filter by location");
        match prompt("competitions> ")?.as_str() {
            "1" => {
                let competition = read_competition()?;
                self.competitions.add(&competition)?;
                println!("saved {competition}");
            }
            "2" => {
                let competition = read_competition()?;
                self.competitions.update(&competition)?;
                println!("updated {competition}");
            }
            "3" => {
                let id = prompt_id("id: ")?;
                self.competitions.remove(id)?;
                println!("deleted competition #{id}");
            }
            "4" => {
                let id = prompt_id("id: ")?;
                match self.competitions.get(id)? {
                    Some(competition) => println!("{competition}"),
                    None => println!("no competition with id {id}"),
                }
            }
            "5" => print_all(&self.competitions.get_all()?),
            "6" => {
                let location = prompt_text("location: ")?;
                print_all(&self.competitions.filter_by_location(&location)?);
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    fn participation_menu(&mut self) -> Result<(), CommandError> {
        println!("participations: 1 add, 2 update, 3 delete, 4 find by id, 5 list,");
        println!("                6 filter by rank, 7 filter by competition");
        match prompt("participations> ")?.as_str() {
            "1" => {
                let participation = read_participation()?;
                self.check_participation_links(&participation)?;
                self.participations.add(&participation)?;
                println!("saved {participation}");
            }
            "2" => {
                let participation = read_participation()?;
                self.check_participation_links(&participation)?;
                self.participations.update(&participation)?;
                println!("updated {participation}");
            }
            "3" => {
                let id = prompt_id("id: ")?;
                self.participations.remove(id)?;
                println!("deleted participation #{id}");
            }
            "4" => {
                let id = prompt_id("id: ")?;
                match self.participations.get(id)? {
                    Some(participation) => println!("{participation}"),
                    None => println!("no participation with id {id}"),
                }
            }
            "5" => print_all(&self.participations.get_all()?),
            "6" => {
                let rank = prompt_u32("rank: ")?;
                print_all(&self.participations.filter_by_rank(rank)?);
            }
            "7" => {
                let competition_id = prompt_id("competition id: ")?;
                print_all(&self.participations.filter_by_competition(competition_id)?);
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    fn sponsor_menu(&mut self) -> Result<(), CommandError> {
        println!("sponsors: 1 add, 2 update, 3 delete, 4 find by id, 5 list,");
        println!("          6 filter by country");
        match prompt("sponsors> ")?.as_str() {
            "1" => {
                let sponsor = read_sponsor()?;
                self.sponsors.add(&sponsor)?;
                println!("saved {sponsor}");
            }
            "2" => {
                let sponsor = read_sponsor()?;
                self.sponsors.update(&sponsor)?;
                println!("updated {sponsor}");
            }
            "3" => {
                let id = prompt_id("id: ")?;
                self.sponsors.remove(id)?;
                println!("deleted sponsor #{id}");
            }
            "4" => {
                let id = prompt_id("id: ")?;
                match self.sponsors.get(id)? {
                    Some(sponsor) => println!("{sponsor}"),
                    None => println!("no sponsor with id {id}"),
                }
            }
            "5" => print_all(&self.sponsors.get_all()?),
            "6" => {
                let country = prompt_text("country: ")?;
                print_all(&self.sponsors.filter_by_country(&country)?);
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    fn sponsorship_menu(&mut self) -> Result<(), CommandError> {
        println!("sponsorships: 1 add, 2 update, 3 delete, 4 find by id, 5 list,");
        println!("              6 filter by sponsor, 7 filter by minimum contribution");
        match prompt("sponsorships> ")?.as_str() {
            "1" => {
                let sponsorship = read_sponsorship()?;
                self.check_sponsorship_links(&sponsorship)?;
                self.sponsorships.add(&sponsorship)?;
                println!("saved {sponsorship}");
            }
            "2" => {
                let sponsorship = read_sponsorship()?;
                self.check_sponsorship_links(&sponsorship)?;
                self.sponsorships.update(&sponsorship)?;
                println!("updated {sponsorship}");
            }
            "3" => {
                let id = prompt_id("id: ")?;
                self.sponsorships.remove(id)?;
                println!("deleted sponsorship #{id}");
            }
            "4" => {
                let id = prompt_id("id: ")?;
                match self.sponsorships.get(id)? {
                    Some(sponsorship) => println!("{sponsorship}"),
                    None => println!("no sponsorship with id {id}"),
                }
            }
            "5" => print_all(&self.sponsorships.get_all()?),
            "6" => {
                let sponsor_id = prompt_id("sponsor id: ")?;
                print_all(&self.sponsorships.filter_by_sponsor(sponsor_id)?);
            }
            "7" => {
                let minimum = prompt_i64("minimum contribution: ")?;
                print_all(&self.sponsorships.filter_by_min_contribution(minimum)?);
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    fn report_menu(&mut self) -> Result<(), CommandError> {
        println!("reports: 1 money per sponsor, 2 sponsorships per competition,");
        println!("         3 participations per athlete, 4 participations per competition");
        match prompt("reports> ")?.as_str() {
            "1" => {
                let rows = reports::sponsor_contributions(
                    &self.sponsors.get_all()?,
                    &self.sponsorships.get_all()?,
                );
                print_report(&rows, "total contribution");
            }
            "2" => {
                let rows = reports::competition_sponsorship_counts(
                    &self.competitions.get_all()?,
                    &self.sponsorships.get_all()?,
                );
                print_report(&rows, "sponsorships");
            }
            "3" => {
                let rows = reports::athlete_participation_counts(
                    &self.athletes.get_all()?,
                    &self.participations.get_all()?,
                );
                print_report(&rows, "participations");
            }
            "4" => {
                let rows = reports::competition_participation_counts(
                    &self.competitions.get_all()?,
                    &self.participations.get_all()?,
                );
                print_report(&rows, "participations");
            }
            other => return Err(CommandError::Input(format!("`{other}` is not a menu item"))),
        }
        Ok(())
    }

    /// Rejects a participation whose athlete or competition is unknown.
    fn check_participation_links(
        &self,
        participation: &Participation,
    ) -> Result<(), CommandError> {
        self.require_known(&self.athletes.get(participation.athlete_id)?, || {
            RepoError::UnknownId {
                entity: Athlete::KIND,
                id: participation.athlete_id,
            }
        })?;
        self.require_known(&self.competitions.get(participation.competition_id)?, || {
            RepoError::UnknownId {
                entity: Competition::KIND,
                id: participation.competition_id,
            }
        })
    }

    /// Rejects a sponsorship whose sponsor or competition is unknown.
    fn check_sponsorship_links(&self, sponsorship: &Sponsorship) -> Result<(), CommandError> {
        self.require_known(&self.sponsors.get(sponsorship.sponsor_id)?, || {
            RepoError::UnknownId {
                entity: Sponsor::KIND,
                id: sponsorship.sponsor_id,
            }
        })?;
        self.require_known(&self.competitions.get(sponsorship.competition_id)?, || {
            RepoError::UnknownId {
                entity: Competition::KIND,
                id: sponsorship.competition_id,
            }
        })
    }

    fn require_known<T>(
        &self,
        found: &Option<T>,
        missing: impl FnOnce() -> RepoError,
    ) -> Result<(), CommandError> {
        match found {
            Some(_) => Ok(()),
            None => Err(CommandError::Store(missing())),
        }
    }
}

fn read_athlete() -> Result<Athlete, CommandError> {
    let id = prompt_id("id: ")?;
    let first_name = prompt_text("first name: ")?;
    let last_name = prompt_text("last name: ")?;
    let country = prompt_text("country: ")?;
    let age = prompt_u32("age: ")?;
    Ok(Athlete::new(id, first_name, last_name, country, age))
}

fn read_competition() -> Result<Competition, CommandError> {
    let id = prompt_id("id: ")?;
    let date = prompt_date("date (dd-mm-YYYY): ")?;
    let location = prompt_text("location: ")?;
    let name = prompt_text("name: ")?;
    let description = prompt_text("description: ")?;
    Ok(Competition::new(id, date, location, name, description))
}

fn read_participation() -> Result<Participation, CommandError> {
    let id = prompt_id("id: ")?;
    let athlete_id = prompt_id("athlete id: ")?;
    let competition_id = prompt_id("competition id: ")?;
    let rank = prompt_u32("rank: ")?;
    Ok(Participation::new(id, athlete_id, competition_id, rank))
}

fn read_sponsorship() -> Result<Sponsorship, CommandError> {
    let id = prompt_id("id: ")?;
    let competition_id = prompt_id("competition id: ")?;
    let sponsor_id = prompt_id("sponsor id: ")?;
    let money_contribution = prompt_i64("money contribution: ")?;
    Ok(Sponsorship::new(
        id,
        competition_id,
        sponsor_id,
        money_contribution,
    ))
}

fn read_sponsor() -> Result<Sponsor, CommandError> {
    let id = prompt_id("id: ")?;
    let name = prompt_text("name: ")?;
    let country = prompt_text("country: ")?;
    Ok(Sponsor::new(id, name, country))
}

fn print_all<T: Display>(records: &[T]) {
    if records.is_empty() {
        println!("(no records)");
        return;
    }
    for record in records {
        println!("{record}");
    }
}

fn print_report<T: Display>(rows: &[(T, i64)], label: &str) {
    if rows.is_empty() {
        println!("(no records)");
        return;
    }
    for (entity, total) in rows {
        println!("{entity} | {label}: {total}");
    }
}
