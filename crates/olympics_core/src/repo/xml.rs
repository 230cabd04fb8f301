//! XML storage backend.
//!
//! # Responsibility
//! - Persist one XML document per entity type, one element per record,
//!   child text elements per field.
//! - Keep element and tag names stable per entity schema.
//!
//! # Invariants
//! - Mutations load the full document, apply the change in memory and
//!   serialize the whole document back.
//! - Malformed XML aborts the read with the byte position; no partial
//!   state is exposed.

use crate::model::{
    Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship,
};
use crate::repo::{
    parse_date_field, parse_i64_field, parse_id_field, parse_u32_field, RepoError, RepoResult,
    Repository,
};
use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Root element wrapping every record element in a store document.
const ROOT_ELEMENT: &str = "entities";

/// Tag-to-text field set of one record element, in document order.
pub struct XmlFields(Vec<(String, String)>);

impl XmlFields {
    /// Returns the text of the given child tag, or a message fragment
    /// naming the missing tag.
    pub fn text(&self, tag: &str) -> Result<&str, String> {
        self.0
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| format!("missing mandatory node `{tag}`"))
    }
}

/// Element codec implemented by every record the XML backend stores.
pub trait XmlRecord: Entity + Sized {
    /// Record element name, e.g. `athlete`.
    const ELEMENT: &'static str;

    /// Renders the record as (tag, text) pairs in fixed order.
    fn xml_fields(&self) -> Vec<(&'static str, String)>;

    /// Rebuilds the record from the element's child text nodes.
    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String>;
}

/// Document-per-type repository; the XML file is the single source of
/// truth and is re-read on every call.
#[derive(Debug)]
pub struct XmlRepository<T: XmlRecord> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: XmlRecord> XmlRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(
            "event=store_open module=repo backend=xml entity={} path={}",
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

    fn xml_error(&self, position: u64, message: impl Display) -> RepoError {
        RepoError::Xml {
            path: self.path.clone(),
            position,
            message: message.to_string(),
        }
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

        let mut reader = Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut current: Option<Vec<(String, String)>> = None;
        let mut current_tag: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    if current.is_none() {
                        if name == T::ELEMENT {
                            current = Some(Vec::new());
                        }
                    } else {
                        current_tag = Some(name);
                    }
                }
                Ok(Event::Text(text)) => {
                    if let (Some(fields), Some(tag)) = (current.as_mut(), current_tag.as_ref()) {
                        let value = text
                            .unescape()
                            .map_err(|err| self.xml_error(reader.buffer_position(), err))?;
                        fields.push((tag.clone(), value.into_owned()));
                    }
                }
                Ok(Event::End(end)) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    if name == T::ELEMENT {
                        if let Some(fields) = current.take() {
                            let record = T::from_xml_fields(&XmlFields(fields)).map_err(
                                |message| self.xml_error(reader.buffer_position(), message),
                            )?;
                            record.validate()?;
                            records.push(record);
                        }
                    } else {
                        current_tag = None;
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(self.xml_error(reader.buffer_position(), err)),
            }
        }

        Ok(records)
    }

    fn write_records(&self, records: &[T]) -> RepoResult<()> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|err| self.xml_error(0, err))?;
        writer
            .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
            .map_err(|err| self.xml_error(0, err))?;
        for record in records {
            writer
                .write_event(Event::Start(BytesStart::new(T::ELEMENT)))
                .map_err(|err| self.xml_error(0, err))?;
            for (tag, value) in record.xml_fields() {
                writer
                    .write_event(Event::Start(BytesStart::new(tag)))
                    .map_err(|err| self.xml_error(0, err))?;
                writer
                    .write_event(Event::Text(BytesText::new(&value)))
                    .map_err(|err| self.xml_error(0, err))?;
                writer
                    .write_event(Event::End(BytesEnd::new(tag)))
                    .map_err(|err| self.xml_error(0, err))?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(T::ELEMENT)))
                .map_err(|err| self.xml_error(0, err))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(|err| self.xml_error(0, err))?;

        fs::write(&self.path, writer.into_inner()).map_err(|err| RepoError::Io {
            path: self.path.clone(),
            source: err,
        })
    }
}

impl<T: XmlRecord> Repository<T> for XmlRepository<T> {
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

impl XmlRecord for Athlete {
    const ELEMENT: &'static str = "athlete";

    fn xml_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("country", self.country.clone()),
            ("age", self.age.to_string()),
        ]
    }

    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String> {
        Ok(Self {
            id: parse_id_field(fields.text("id")?)?,
            first_name: fields.text("firstName")?.to_string(),
            last_name: fields.text("lastName")?.to_string(),
            country: fields.text("country")?.to_string(),
            age: parse_u32_field(fields.text("age")?, "age")?,
        })
    }
}

impl XmlRecord for Competition {
    const ELEMENT: &'static str = "competition";

    fn xml_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("date", self.date_string()),
            ("location", self.location.clone()),
            ("name", self.name.clone()),
            ("description", self.description.clone()),
        ]
    }

    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String> {
        Ok(Self {
            id: parse_id_field(fields.text("id")?)?,
            date: parse_date_field(fields.text("date")?)?,
            location: fields.text("location")?.to_string(),
            name: fields.text("name")?.to_string(),
            description: fields.text("description")?.to_string(),
        })
    }
}

impl XmlRecord for Sponsor {
    const ELEMENT: &'static str = "sponsor";

    fn xml_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("country", self.country.clone()),
        ]
    }

    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String> {
        Ok(Self {
            id: parse_id_field(fields.text("id")?)?,
            name: fields.text("name")?.to_string(),
            country: fields.text("country")?.to_string(),
        })
    }
}

impl XmlRecord for Sponsorship {
    const ELEMENT: &'static str = "sponsorship";

    fn xml_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("competitionId", self.competition_id.to_string()),
            ("sponsorId", self.sponsor_id.to_string()),
            ("moneyContribution", self.money_contribution.to_string()),
        ]
    }

    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String> {
        Ok(Self {
            id: parse_id_field(fields.text("id")?)?,
            competition_id: parse_id_field(fields.text("competitionId")?)?,
            sponsor_id: parse_id_field(fields.text("sponsorId")?)?,
            money_contribution: parse_i64_field(
                fields.text("moneyContribution")?,
                "money contribution",
            )?,
        })
    }
}

impl XmlRecord for Participation {
    const ELEMENT: &'static str = "participation";

    fn xml_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("athleteId", self.athlete_id.to_string()),
            ("competitionId", self.competition_id.to_string()),
            ("rank", self.rank.to_string()),
        ]
    }

    fn from_xml_fields(fields: &XmlFields) -> Result<Self, String> {
        Ok(Self {
            id: parse_id_field(fields.text("id")?)?,
            athlete_id: parse_id_field(fields.text("athleteId")?)?,
            competition_id: parse_id_field(fields.text("competitionId")?)?,
            rank: parse_u32_field(fields.text("rank")?, "rank")?,
        })
    }
}
