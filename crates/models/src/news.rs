use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published_on: Date,
    pub link: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct NewsInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl NewsInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("title", &self.title, 200)?;
        validate::required("content", &self.content, usize::MAX)?;
        validate::optional_url("link", self.link.as_deref())?;
        validate::optional_url("photo_url", self.photo_url.as_deref())
    }

    /// `published_on` is set once at creation and never rewritten.
    pub fn apply(self, am: &mut ActiveModel) {
        am.title = Set(self.title.trim().to_string());
        am.content = Set(self.content);
        am.link = Set(validate::blank_to_none(self.link));
        am.photo_url = Set(validate::blank_to_none(self.photo_url));
    }
}

pub async fn create(db: &DatabaseConnection, input: NewsInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am = ActiveModel {
        id: Set(Uuid::new_v4()),
        published_on: Set(Utc::now().date_naive()),
        ..Default::default()
    };
    input.apply(&mut am);
    am.insert(db).await.map_err(errors::ModelError::from)
}
