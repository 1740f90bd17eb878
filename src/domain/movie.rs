use serde::{Deserialize, Serialize};

use crate::domain::query::{BaseQuery, FieldKind, FilterField, FilterValue, ResourceQuery};
use crate::domain::types::{NamedRef, Resource};

/// Genre attached to a movie. The API spells the collection `gernes`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    #[serde(default)]
    pub genre_name: String,
}

/// Movie as returned by `/movies/admin`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub director: String,
    pub duration: i64,
    pub from_date: String,
    pub to_date: String,
    pub limited_age: String,
    pub trailer: Option<String>,
    pub nation: String,
    pub production_company: String,
    pub thumbnail: Option<String>,
    pub banner: Option<String>,
    pub is_deleted: bool,
    pub actors: Vec<NamedRef>,
    pub gernes: Vec<Genre>,
    pub versions: Vec<NamedRef>,
}

const FIELDS: &[FilterField] = &[
    FilterField::new("director", "Đạo diễn", FieldKind::Text),
    FilterField::new("nation", "Quốc gia", FieldKind::Text),
    FilterField::new("fromDate", "Từ ngày chiếu", FieldKind::Date),
    FilterField::new("toDate", "Đến ngày chiếu", FieldKind::Date),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub base: BaseQuery,
    pub director: Option<String>,
    pub nation: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl ResourceQuery for MovieQuery {
    type Row = Movie;

    const RESOURCE: Resource = Resource::Movies;
    const SORT_KEYS: &'static [&'static str] =
        &["movie.id", "movie.name", "movie.nation", "movie.director"];

    fn base(&self) -> &BaseQuery {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseQuery {
        &mut self.base
    }

    fn filter_fields() -> &'static [FilterField] {
        FIELDS
    }

    fn filter_value(&self, key: &str) -> Option<FilterValue> {
        let value = match key {
            "director" => &self.director,
            "nation" => &self.nation,
            "fromDate" => &self.from_date,
            "toDate" => &self.to_date,
            _ => return None,
        };
        value.clone().map(FilterValue::Text)
    }

    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>) {
        let value = value.and_then(FilterValue::into_text);
        match key {
            "director" => self.director = value,
            "nation" => self.nation = value,
            "fromDate" => self.from_date = value,
            "toDate" => self.to_date = value,
            _ => {}
        }
    }
}
