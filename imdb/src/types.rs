//! Structured types
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single IMDb title.
///
/// The search endpoint returns partial records where only a handful of fields are populated,
/// while the title endpoint returns the full record. Fields that are absent from the response
/// are left at their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Title {
    /// The IMDb title id (e.g. "tt0133093").
    #[serde(rename = "ID")]
    pub id: String,
    /// The canonical URL of the title on IMDb.
    #[serde(rename = "URL")]
    pub url: String,
    /// The name of the title.
    pub name: String,
    /// The kind of title, e.g. "Movie" or "TV Series".
    pub r#type: String,
    /// The year of the first release, or 0 when unknown.
    pub year: u16,
    /// The aggregate user rating, as a string (e.g. "8.7").
    pub rating: String,
    /// The number of votes behind the rating.
    pub rating_count: u64,
    /// The runtime, e.g. "2h16m".
    pub duration: String,
    /// Credited directors.
    pub directors: Vec<Name>,
    /// Credited writers.
    pub writers: Vec<Name>,
    /// Credited actors.
    pub actors: Vec<Name>,
    /// List of genres, e.g. "Action".
    pub genres: Vec<String>,
    /// Spoken languages.
    pub languages: Vec<String>,
    /// Countries of origin.
    pub nationalities: Vec<String>,
    /// A short plot description.
    pub description: String,
    /// The poster image, if any.
    pub poster: Option<Media>,
    /// Alternative titles.
    #[serde(rename = "AKA")]
    pub aka: Vec<String>,
}

/// A person credited on a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Name {
    /// The IMDb name id (e.g. "nm0000206").
    #[serde(rename = "ID")]
    pub id: String,
    /// The full name of the person.
    pub full_name: String,
}

/// An image attached to a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Media {
    /// The IMDb media id.
    #[serde(rename = "ID")]
    pub id: String,
    /// The id of the title the media belongs to.
    #[serde(rename = "TitleID")]
    pub title_id: String,
    /// The URL of the media page.
    #[serde(rename = "URL")]
    pub url: String,
    /// The direct URL of the image.
    #[serde(rename = "ContentURL")]
    pub content_url: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

impl fmt::Display for Title {
    /// Formats the title as a single dash-separated line.
    ///
    /// Long credit lists are capped so the line stays readable: at most 3 genres, 2 directors
    /// and 3 actors are included. Empty fields are omitted entirely.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<String> = Vec::new();

        if self.year > 0 {
            segments.push(format!("{} ({})", self.name, self.year));
        } else {
            segments.push(self.name.clone());
        }

        if !self.genres.is_empty() {
            segments.push(join_capped(self.genres.iter(), 3));
        }

        if !self.directors.is_empty() {
            segments.push(join_capped(self.directors.iter().map(Name::to_string), 2));
        }

        if !self.actors.is_empty() {
            segments.push(join_capped(self.actors.iter().map(Name::to_string), 3));
        }

        if !self.duration.is_empty() {
            segments.push(self.duration.clone());
        }

        if !self.rating.is_empty() {
            segments.push(self.rating.clone());
        }

        if !self.url.is_empty() {
            segments.push(self.url.clone());
        }

        write!(f, "{}", segments.join(" - "))
    }
}

/// Joins up to `cap` items with a comma separator.
fn join_capped<I>(items: I, cap: usize) -> String
where
    I: IntoIterator,
    I::Item: ToString,
{
    items
        .into_iter()
        .take(cap)
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Title {
        Title {
            id: "tt0133093".to_string(),
            url: "https://www.imdb.com/title/tt0133093".to_string(),
            name: "The Matrix".to_string(),
            r#type: "Movie".to_string(),
            year: 1999,
            rating: "8.7".to_string(),
            rating_count: 1_900_000,
            duration: "2h16m".to_string(),
            directors: vec![
                Name {
                    id: "nm0905154".to_string(),
                    full_name: "Lana Wachowski".to_string(),
                },
                Name {
                    id: "nm0905152".to_string(),
                    full_name: "Lilly Wachowski".to_string(),
                },
            ],
            actors: vec![
                Name {
                    id: "nm0000206".to_string(),
                    full_name: "Keanu Reeves".to_string(),
                },
                Name {
                    id: "nm0000401".to_string(),
                    full_name: "Laurence Fishburne".to_string(),
                },
                Name {
                    id: "nm0005251".to_string(),
                    full_name: "Carrie-Anne Moss".to_string(),
                },
                Name {
                    id: "nm0915989".to_string(),
                    full_name: "Hugo Weaving".to_string(),
                },
            ],
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            ..Title::default()
        }
    }

    #[test]
    fn display_joins_segments_with_dashes() {
        assert_eq!(
            matrix().to_string(),
            "The Matrix (1999) - Action, Sci-Fi - Lana Wachowski, Lilly Wachowski - \
             Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss - 2h16m - 8.7 - \
             https://www.imdb.com/title/tt0133093"
        );
    }

    #[test]
    fn display_omits_empty_segments() {
        let title = Title {
            name: "Untitled Project".to_string(),
            ..Title::default()
        };

        assert_eq!(title.to_string(), "Untitled Project");
    }

    #[test]
    fn deserialize_search_result() {
        let json = r#"[
            {"ID": "tt0133093", "Name": "The Matrix", "Year": 1999},
            {"ID": "tt10838180", "Name": "The Matrix Resurrections", "Year": 2021}
        ]"#;

        let titles: Vec<Title> = serde_json::from_str(json).expect("failed to deserialize");

        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].id, "tt0133093");
        assert_eq!(titles[0].name, "The Matrix");
        assert_eq!(titles[0].year, 1999);
        // fields missing from the partial record fall back to their defaults
        assert!(titles[0].genres.is_empty());
        assert_eq!(titles[0].rating, "");
    }

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let json = r#"{
            "ID": "tt0133093",
            "Name": "The Matrix",
            "Year": 1999,
            "SomethingNew": {"Nested": true}
        }"#;

        let title: Title = serde_json::from_str(json).expect("failed to deserialize");

        assert_eq!(title.name, "The Matrix");
    }
}
