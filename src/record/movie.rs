//! Movie entity
//!
//! The seven-field record kept in the default data file.

use crate::error::{Result, SlotDbError};

use super::{parse_key, Key, Record};

/// A movie row: `id|title|director|year|genre|duration|cast`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: Key,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub genre: String,
    /// Running time in minutes
    pub duration: u32,
    /// Comma separated cast list
    pub cast: String,
}

impl Record for Movie {
    const FIELD_COUNT: usize = 7;

    fn key(&self) -> Key {
        self.id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.director.clone(),
            self.year.to_string(),
            self.genre.clone(),
            self.duration.to_string(),
            self.cast.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let [id, title, director, year, genre, duration, cast] = fields else {
            return Err(SlotDbError::MalformedRecord(format!(
                "movie needs {} fields, got {}",
                Self::FIELD_COUNT,
                fields.len()
            )));
        };

        Ok(Self {
            id: parse_key(id)?,
            title: title.to_string(),
            director: director.to_string(),
            year: parse_number(year, "year")?,
            genre: genre.to_string(),
            duration: parse_number(duration, "duration")?,
            cast: cast.to_string(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, name: &str) -> Result<T> {
    field
        .trim()
        .parse()
        .map_err(|_| SlotDbError::MalformedRecord(format!("invalid {} {:?}", name, field)))
}
