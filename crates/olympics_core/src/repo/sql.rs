//! Relational storage backend over SQLite.
//!
//! # Responsibility
//! - Map one table per entity type, id as primary key.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Each CRUD operation is a single parameterized statement, its own
//!   unit of work.
//! - A primary-key violation on insert surfaces as `DuplicateId`; zero
//!   affected rows on update/delete surface as `UnknownId`.
//! - The connection is held for the repository's lifetime.

use crate::model::{
    Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship,
};
use crate::repo::{RepoError, RepoResult, Repository};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::marker::PhantomData;
use std::path::Path;
use std::time::Instant;

/// Row codec and statement set implemented by every record the
/// relational backend stores.
pub trait SqlRecord: Entity + Sized {
    /// Table name, fixed per entity schema.
    const TABLE: &'static str;
    /// Idempotent table bootstrap, run when the repository opens.
    const CREATE_TABLE_SQL: &'static str;
    /// Projection shared by `find_by_id` and `find_all`.
    const SELECT_SQL: &'static str;
    const INSERT_SQL: &'static str;
    const UPDATE_SQL: &'static str;

    /// Values for `INSERT_SQL`, id first, then fields in column order.
    fn insert_params(&self) -> Vec<Value>;

    /// Values for `UPDATE_SQL`, fields in column order, id last.
    fn update_params(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// SQLite-backed repository holding its own connection.
pub struct SqliteRepository<T: SqlRecord> {
    conn: Connection,
    _marker: PhantomData<T>,
}

impl<T: SqlRecord> SqliteRepository<T> {
    /// Opens the database file and bootstraps the entity's table.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let started_at = Instant::now();
        let conn = Connection::open(path)?;
        let repo = Self::with_connection(conn)?;
        info!(
            "event=store_open module=repo backend=sqlite entity={} table={} duration_ms={}",
            T::KIND,
            T::TABLE,
            started_at.elapsed().as_millis()
        );
        Ok(repo)
    }

    /// Opens a private in-memory database. Used by tests.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> RepoResult<Self> {
        conn.execute_batch(T::CREATE_TABLE_SQL)?;
        Ok(Self {
            conn,
            _marker: PhantomData,
        })
    }
}

impl<T: SqlRecord> Repository<T> for SqliteRepository<T> {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", T::SELECT_SQL))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(T::from_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id;", T::SELECT_SQL))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }
        Ok(records)
    }

    fn save(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        match self
            .conn
            .execute(T::INSERT_SQL, params_from_iter(entity.insert_params()))
        {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(cause, _))
                if cause.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateId {
                    entity: T::KIND,
                    id: entity.id(),
                })
            }
            Err(err) => Err(RepoError::Sqlite(err)),
        }
    }

    fn update(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        let changed = self
            .conn
            .execute(T::UPDATE_SQL, params_from_iter(entity.update_params()))?;
        if changed == 0 {
            return Err(RepoError::UnknownId {
                entity: T::KIND,
                id: entity.id(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: EntityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            params![id],
        )?;
        if changed == 0 {
            return Err(RepoError::UnknownId {
                entity: T::KIND,
                id,
            });
        }
        Ok(())
    }
}

impl SqlRecord for Athlete {
    const TABLE: &'static str = "athletes";
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS athletes (
        id INTEGER PRIMARY KEY NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        country TEXT NOT NULL,
        age INTEGER NOT NULL
    );";
    const SELECT_SQL: &'static str =
        "SELECT id, first_name, last_name, country, age FROM athletes";
    const INSERT_SQL: &'static str =
        "INSERT INTO athletes (id, first_name, last_name, country, age)
         VALUES (?1, ?2, ?3, ?4, ?5);";
    const UPDATE_SQL: &'static str =
        "UPDATE athletes SET first_name = ?1, last_name = ?2, country = ?3, age = ?4
         WHERE id = ?5;";

    fn insert_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Text(self.country.clone()),
            Value::Integer(i64::from(self.age)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Text(self.country.clone()),
            Value::Integer(i64::from(self.age)),
            Value::Integer(self.id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            country: row.get("country")?,
            age: row.get("age")?,
        })
    }
}

impl SqlRecord for Competition {
    const TABLE: &'static str = "competitions";
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS competitions (
        id INTEGER PRIMARY KEY NOT NULL,
        date TEXT NOT NULL,
        location TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL
    );";
    const SELECT_SQL: &'static str =
        "SELECT id, date, location, name, description FROM competitions";
    const INSERT_SQL: &'static str =
        "INSERT INTO competitions (id, date, location, name, description)
         VALUES (?1, ?2, ?3, ?4, ?5);";
    const UPDATE_SQL: &'static str =
        "UPDATE competitions SET date = ?1, location = ?2, name = ?3, description = ?4
         WHERE id = ?5;";

    fn insert_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.date_string()),
            Value::Text(self.location.clone()),
            Value::Text(self.name.clone()),
            Value::Text(self.description.clone()),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            Value::Text(self.date_string()),
            Value::Text(self.location.clone()),
            Value::Text(self.name.clone()),
            Value::Text(self.description.clone()),
            Value::Integer(self.id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let date_text: String = row.get("date")?;
        let date = Self::parse_date(&date_text).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })?;
        Ok(Self {
            id: row.get("id")?,
            date,
            location: row.get("location")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }
}

impl SqlRecord for Sponsor {
    const TABLE: &'static str = "sponsors";
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS sponsors (
        id INTEGER PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        country TEXT NOT NULL
    );";
    const SELECT_SQL: &'static str = "SELECT id, name, country FROM sponsors";
    const INSERT_SQL: &'static str =
        "INSERT INTO sponsors (id, name, country) VALUES (?1, ?2, ?3);";
    const UPDATE_SQL: &'static str =
        "UPDATE sponsors SET name = ?1, country = ?2 WHERE id = ?3;";

    fn insert_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Text(self.country.clone()),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.country.clone()),
            Value::Integer(self.id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            country: row.get("country")?,
        })
    }
}

impl SqlRecord for Sponsorship {
    const TABLE: &'static str = "sponsorships";
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS sponsorships (
        id INTEGER PRIMARY KEY NOT NULL,
        competition_id INTEGER NOT NULL,
        sponsor_id INTEGER NOT NULL,
        money_contribution INTEGER NOT NULL
    );";
    const SELECT_SQL: &'static str =
        "SELECT id, competition_id, sponsor_id, money_contribution FROM sponsorships";
    const INSERT_SQL: &'static str =
        "INSERT INTO sponsorships (id, competition_id, sponsor_id, money_contribution)
         VALUES (?1, ?2, ?3, ?4);";
    const UPDATE_SQL: &'static str =
        "UPDATE sponsorships SET competition_id = ?1, sponsor_id = ?2, money_contribution = ?3
         WHERE id = ?4;";

    fn insert_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Integer(self.competition_id),
            Value::Integer(self.sponsor_id),
            Value::Integer(self.money_contribution),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.competition_id),
            Value::Integer(self.sponsor_id),
            Value::Integer(self.money_contribution),
            Value::Integer(self.id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            competition_id: row.get("competition_id")?,
            sponsor_id: row.get("sponsor_id")?,
            money_contribution: row.get("money_contribution")?,
        })
    }
}

impl SqlRecord for Participation {
    const TABLE: &'static str = "participations";
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS participations (
        id INTEGER PRIMARY KEY NOT NULL,
        athlete_id INTEGER NOT NULL,
        competition_id INTEGER NOT NULL,
        rank INTEGER NOT NULL
    );";
    const SELECT_SQL: &'static str =
        "SELECT id, athlete_id, competition_id, rank FROM participations";
    const INSERT_SQL: &'static str =
        "INSERT INTO participations (id, athlete_id, competition_id, rank)
         VALUES (?1, ?2, ?3, ?4);";
    const UPDATE_SQL: &'static str =
        "UPDATE participations SET athlete_id = ?1, competition_id = ?2, rank = ?3
         WHERE id = ?4;";

    fn insert_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Integer(self.athlete_id),
            Value::Integer(self.competition_id),
            Value::Integer(i64::from(self.rank)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.athlete_id),
            Value::Integer(self.competition_id),
            Value::Integer(i64::from(self.rank)),
            Value::Integer(self.id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            athlete_id: row.get("athlete_id")?,
            competition_id: row.get("competition_id")?,
            rank: row.get("rank")?,
        })
    }
}
