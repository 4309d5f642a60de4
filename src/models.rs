use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{entities::movie, error::AppError};

/// Movie as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub year: Option<i32>,
    pub title: String,
    pub origin_ethnicity: String,
    pub directors: Option<String>,
    pub cast: Option<String>,
    pub genre: String,
    pub wiki_url: String,
    pub plot: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl From<movie::Model> for Movie {
    fn from(row: movie::Model) -> Self {
        Self {
            id: row.id,
            year: row.year,
            title: row.title,
            origin_ethnicity: row.origin_ethnicity,
            directors: row.directors,
            cast: row.cast,
            genre: row.genre,
            wiki_url: row.wiki_url,
            plot: row.plot,
            date_created: row.date_created,
        }
    }
}

/// Request body for create and update. Every mutable field is overwritten.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default)]
    pub year: Option<i32>,
    pub title: String,
    pub origin_ethnicity: String,
    #[serde(default)]
    pub directors: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    pub genre: String,
    pub wiki_url: String,
    #[serde(default)]
    pub plot: Option<String>,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("origin_ethnicity", &self.origin_ethnicity),
            ("genre", &self.genre),
            ("wiki_url", &self.wiki_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} must not be blank")));
            }
        }
        Ok(())
    }

    pub fn into_active_model(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: NotSet,
            year: Set(self.year),
            title: Set(self.title),
            origin_ethnicity: Set(self.origin_ethnicity),
            directors: Set(self.directors),
            cast: Set(self.cast),
            genre: Set(self.genre),
            wiki_url: Set(self.wiki_url),
            plot: Set(self.plot),
            date_created: Set(Utc::now()),
        }
    }

    /// Overwrites the mutable columns; `id` and `date_created` are left alone.
    pub fn apply_to(self, model: &mut movie::ActiveModel) {
        model.year = Set(self.year);
        model.title = Set(self.title);
        model.origin_ethnicity = Set(self.origin_ethnicity);
        model.directors = Set(self.directors);
        model.cast = Set(self.cast);
        model.genre = Set(self.genre);
        model.wiki_url = Set(self.wiki_url);
        model.plot = Set(self.plot);
    }
}

#[derive(Debug, Serialize)]
pub struct MovieList {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub success: bool,
}

/// Columns that may be searched by substring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchField {
    Title,
    OriginEthnicity,
    Directors,
    Cast,
    Genre,
    WikiUrl,
    Plot,
}

impl SearchField {
    pub const ALL: [SearchField; 7] = [
        SearchField::Title,
        SearchField::OriginEthnicity,
        SearchField::Directors,
        SearchField::Cast,
        SearchField::Genre,
        SearchField::WikiUrl,
        SearchField::Plot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::OriginEthnicity => "origin_ethnicity",
            SearchField::Directors => "directors",
            SearchField::Cast => "cast",
            SearchField::Genre => "genre",
            SearchField::WikiUrl => "wiki_url",
            SearchField::Plot => "plot",
        }
    }

    pub fn column(self) -> movie::Column {
        match self {
            SearchField::Title => movie::Column::Title,
            SearchField::OriginEthnicity => movie::Column::OriginEthnicity,
            SearchField::Directors => movie::Column::Directors,
            SearchField::Cast => movie::Column::Cast,
            SearchField::Genre => movie::Column::Genre,
            SearchField::WikiUrl => movie::Column::WikiUrl,
            SearchField::Plot => movie::Column::Plot,
        }
    }
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or_else(|| {
            let allowed = Self::ALL.map(SearchField::as_str).join(", ");
            AppError::validation(format!("cannot search by {s:?}; expected one of {allowed}"))
        })
    }
}
