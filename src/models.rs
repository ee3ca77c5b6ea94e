use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::images::{still_image_url, StillSize};
use crate::settings::SETTINGS;

/// Provider identifier of a show (or movie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ShowId {
    fn from(id: u64) -> Self {
        ShowId(id)
    }
}

/// Whether a title is a movie or a series; drives rating rules and player URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

// The provider sends `null` for some blank text fields
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Response types for API calls
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Season {
    #[serde(rename = "season_number")]
    pub number: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub episode_count: i64,
}

impl Season {
    /// Specials (season 0) and empty seasons cannot be browsed.
    pub fn is_navigable(&self) -> bool {
        self.number > 0 && self.episode_count > 0
    }

    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Season {}", self.number)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Episode {
    #[serde(rename = "episode_number")]
    pub number: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(rename = "runtime", default)]
    pub runtime_minutes: Option<u32>,
    #[serde(rename = "still_path", default)]
    pub still_image_path: Option<String>,
}

impl Episode {
    /// Still image URL on the configured image host, if the episode has one.
    pub fn still_url(&self, size: StillSize) -> Option<String> {
        self.still_image_path
            .as_deref()
            .map(|path| still_image_url(&SETTINGS.image_base_url, size, path))
    }

    /// Runtime formatted the way the picker lists it ("42m"); empty when unknown.
    pub fn runtime_label(&self) -> String {
        self.runtime_minutes
            .map(|m| format!("{}m", m))
            .unwrap_or_default()
    }
}

/// Raw body of `GET /tv/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

/// Raw body of `GET /tv/{id}/season/{n}`
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone)]
pub struct Show {
    pub id: ShowId,
    pub name: Option<String>,
    pub genre_ids: BTreeSet<i64>,
    pub genre_names: Vec<String>,
    /// Provider order, including seasons that are not navigable.
    pub seasons: Vec<Season>,
}

impl Show {
    /// Seasons the viewer can pick, in provider order.
    pub fn navigable_seasons(&self) -> Vec<Season> {
        self.seasons
            .iter()
            .filter(|s| s.is_navigable())
            .cloned()
            .collect()
    }

    pub fn is_navigable_season(&self, season_number: i64) -> bool {
        self.seasons
            .iter()
            .any(|s| s.number == season_number && s.is_navigable())
    }

    /// Genre names joined for the detail line, e.g. "Crime, Drama".
    pub fn genre_label(&self) -> String {
        self.genre_names.join(", ")
    }

    pub fn content_rating(&self, media_type: MediaType) -> ContentRating {
        ContentRating::from_genres(media_type, &self.genre_ids)
    }
}

impl From<ShowDetails> for Show {
    fn from(details: ShowDetails) -> Self {
        Show {
            id: ShowId(details.id),
            name: details.name,
            genre_ids: details.genres.iter().map(|g| g.id).collect(),
            genre_names: details.genres.into_iter().map(|g| g.name).collect(),
            seasons: details.seasons,
        }
    }
}

// TMDB genre ids used by the rating rules
const ROMANCE: i64 = 10749;
const HORROR: i64 = 27;
const CRIME: i64 = 80;
const WAR: i64 = 10752;
const THRILLER: i64 = 53;
const FAMILY: i64 = 10751;
const ANIMATION: i64 = 16;
const DRAMA: i64 = 18;
const COMEDY: i64 = 35;
const KIDS: i64 = 10762;
const WAR_AND_POLITICS: i64 = 10768;

/// Coarse audience badge shown next to the season title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRating {
    Adult,
    All,
}

impl ContentRating {
    pub fn from_genres(media_type: MediaType, genre_ids: &BTreeSet<i64>) -> Self {
        let any = |ids: &[i64]| ids.iter().any(|id| genre_ids.contains(id));
        match media_type {
            MediaType::Movie => {
                if any(&[ROMANCE, HORROR, CRIME, WAR, THRILLER]) {
                    ContentRating::Adult
                } else if any(&[FAMILY, ANIMATION, DRAMA, COMEDY]) {
                    ContentRating::All
                } else {
                    ContentRating::Adult
                }
            }
            MediaType::Tv => {
                if any(&[CRIME, WAR_AND_POLITICS]) {
                    ContentRating::Adult
                } else if any(&[KIDS, FAMILY, DRAMA, COMEDY, ANIMATION]) {
                    ContentRating::All
                } else {
                    ContentRating::Adult
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentRating::Adult => "18+",
            ContentRating::All => "All",
        }
    }
}
