use serde::{Deserialize, Serialize};

use crate::domain::query::{BaseQuery, FieldKind, FilterField, FilterValue, ResourceQuery};
use crate::domain::types::Resource;

pub const GENDERS: &[(&str, &str)] = &[("male", "Nam"), ("female", "Nữ")];

/// Actor as returned by `/actor/admin`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub stage_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub biography: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_deleted: bool,
}

impl Actor {
    pub fn gender_label(&self) -> &'static str {
        if self.gender == "male" { "Nam" } else { "Nữ" }
    }
}

const FIELDS: &[FilterField] = &[
    FilterField::new("name", "Tên thật", FieldKind::Text),
    FilterField::new("stage_name", "Nghệ danh", FieldKind::Text),
    FilterField::new("nationality", "Quốc tịch", FieldKind::Text),
    FilterField::new("gender", "Giới tính", FieldKind::Choice(GENDERS)),
    FilterField::new("date_of_birth", "Ngày sinh", FieldKind::Date),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorQuery {
    pub base: BaseQuery,
    pub name: Option<String>,
    pub stage_name: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
}

impl ResourceQuery for ActorQuery {
    type Row = Actor;

    const RESOURCE: Resource = Resource::Actors;
    const SORT_KEYS: &'static [&'static str] =
        &["name", "stage_name", "gender", "date_of_birth", "nationality"];

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
            "name" => &self.name,
            "stage_name" => &self.stage_name,
            "nationality" => &self.nationality,
            "gender" => &self.gender,
            "date_of_birth" => &self.date_of_birth,
            _ => return None,
        };
        value.clone().map(FilterValue::Text)
    }

    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>) {
        let value = value.and_then(FilterValue::into_text);
        match key {
            "name" => self.name = value,
            "stage_name" => self.stage_name = value,
            "nationality" => self.nationality = value,
            "gender" => self.gender = value,
            "date_of_birth" => self.date_of_birth = value,
            _ => {}
        }
    }
}
