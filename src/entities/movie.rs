use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: Option<i32>,
    pub title: String,
    pub origin_ethnicity: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub directors: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cast: Option<String>,
    pub genre: String,
    pub wiki_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub plot: Option<String>,
    pub date_created: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
