use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub popularity: i32,
    pub top_movie_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::TopMovieId",
        to = "super::movie::Column::Id"
    )]
    TopMovie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TopMovie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
