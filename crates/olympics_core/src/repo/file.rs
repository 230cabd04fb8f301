//! Flat-file storage backend.
//!
//! # Responsibility
//! - Persist one record per line, fields joined by a fixed separator.
//! - Keep the line layout stable so records round-trip byte-for-byte.
//!
//! # Invariants
//! - Every call re-reads and re-parses the whole file; no caching.
//! - Every mutation rewrites the whole file from the in-memory set.
//! - A malformed line aborts the read with the file and line number;
//!   no partial state is exposed.

use crate::model::{
    Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship,
};
use crate::repo::{
    parse_date_field, parse_i64_field, parse_id_field, parse_u32_field, RepoError, RepoResult,
    Repository,
};
use log::info;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Field separator of the line layout. Must match exactly on read and
/// write for round-trip fidelity.
pub const SEPARATOR: char = '|';

/// Line codec implemented by every record the flat-file backend stores.
pub trait FlatFileRecord: Entity + Sized {
    /// Renders the record as one line, fields in fixed order.
    fn to_line(&self) -> String;

    /// Parses one line back into a record. The error is a message
    /// fragment; the repository attaches file and line number.
    fn parse_line(line: &str) -> Result<Self, String>;
}

/// Text-file repository; the file is the single source of truth.
#[derive(Debug)]
pub struct FlatFileRepository<T: FlatFileRecord> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: FlatFileRecord> FlatFileRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(
            "event=store_open module=repo backend=file entity={} path={}",
            T::KIND,
            path.display()
        );
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> RepoResult<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // A store that was never written reads as empty.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(RepoError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let record = T::parse_line(line).map_err(|message| RepoError::Format {
                path: self.path.clone(),
                line: index + 1,
                message,
            })?;
            record.validate()?;
            records.push(record);
        }
        Ok(records)
    }

    fn write_records(&self, records: &[T]) -> RepoResult<()> {
        let mut content = records
            .iter()
            .map(FlatFileRecord::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|err| RepoError::Io {
            path: self.path.clone(),
            source: err,
        })
    }
}

impl<T: FlatFileRecord> Repository<T> for FlatFileRepository<T> {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>> {
        Ok(self
            .read_records()?
            .into_iter()
            .find(|record| record.id() == id))
    }

    fn find_all(&self) -> RepoResult<Vec<T>> {
        self.read_records()
    }

    fn save(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        let mut records = self.read_records()?;
        if records.iter().any(|record| record.id() == entity.id()) {
            return Err(RepoError::DuplicateId {
                entity: T::KIND,
                id: entity.id(),
            });
        }
        records.push(entity.clone());
        self.write_records(&records)
    }

    fn update(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        let mut records = self.read_records()?;
        match records.iter().position(|record| record.id() == entity.id()) {
            Some(index) => {
                records[index] = entity.clone();
                self.write_records(&records)
            }
            None => Err(RepoError::UnknownId {
                entity: T::KIND,
                id: entity.id(),
            }),
        }
    }

    fn delete(&mut self, id: EntityId) -> RepoResult<()> {
        let mut records = self.read_records()?;
        match records.iter().position(|record| record.id() == id) {
            Some(index) => {
                records.remove(index);
                self.write_records(&records)
            }
            None => Err(RepoError::UnknownId {
                entity: T::KIND,
                id,
            }),
        }
    }
}

fn split_fields(line: &str, expected: usize, kind: &str) -> Result<Vec<String>, String> {
    let fields: Vec<String> = line.split(SEPARATOR).map(str::to_string).collect();
    if fields.len() != expected {
        return Err(format!(
            "a {kind} line must have {expected} fields, found {}",
            fields.len()
        ));
    }
    Ok(fields)
}

impl FlatFileRecord for Athlete {
    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.country.clone(),
            self.age.to_string(),
        ]
        .join("|")
    }

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, 5, Self::KIND)?;
        Ok(Self {
            id: parse_id_field(&fields[0])?,
            first_name: fields[1].clone(),
            last_name: fields[2].clone(),
            country: fields[3].clone(),
            age: parse_u32_field(&fields[4], "age")?,
        })
    }
}

impl FlatFileRecord for Competition {
    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.date_string(),
            self.location.clone(),
            self.name.clone(),
            self.description.clone(),
        ]
        .join("|")
    }

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, 5, Self::KIND)?;
        Ok(Self {
            id: parse_id_field(&fields[0])?,
            date: parse_date_field(&fields[1])?,
            location: fields[2].clone(),
            name: fields[3].clone(),
            description: fields[4].clone(),
        })
    }
}

impl FlatFileRecord for Sponsor {
    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.name.clone(),
            self.country.clone(),
        ]
        .join("|")
    }

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, 3, Self::KIND)?;
        Ok(Self {
            id: parse_id_field(&fields[0])?,
            name: fields[1].clone(),
            country: fields[2].clone(),
        })
    }
}

impl FlatFileRecord for Sponsorship {
    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.competition_id.to_string(),
            self.sponsor_id.to_string(),
            self.money_contribution.to_string(),
        ]
        .join("|")
    }

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, 4, Self::KIND)?;
        Ok(Self {
            id: parse_id_field(&fields[0])?,
            competition_id: parse_id_field(&fields[1])?,
            sponsor_id: parse_id_field(&fields[2])?,
            money_contribution: parse_i64_field(&fields[3], "money contribution")?,
        })
    }
}

impl FlatFileRecord for Participation {
    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.athlete_id.to_string(),
            self.competition_id.to_string(),
            self.rank.to_string(),
        ]
        .join("|")
    }

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, 4, Self::KIND)?;
        Ok(Self {
            id: parse_id_field(&fields[0])?,
            athlete_id: parse_id_field(&fields[1])?,
            competition_id: parse_id_field(&fields[2])?,
            rank: parse_u32_field(&fields[3], "rank")?,
        })
    }
}
