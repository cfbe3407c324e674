use sea_orm::entity::prelude::*;

/// Student row. The `first_*`/`second_*` columns are a denormalized copy of
/// the enrollment slots, maintained on every save for the read side.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub first_course_name: Option<String>,
    pub first_course_credits: Option<i32>,
    pub first_course_grade: Option<String>,
    pub second_course_name: Option<String>,
    pub second_course_credits: Option<i32>,
    pub second_course_grade: Option<String>,
    pub number_of_enrollments: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::disenrollments::Entity")]
    Disenrollments,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::disenrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Disenrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
