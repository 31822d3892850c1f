//! Team members and news.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use models::{news, team_member};

use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::errors::ServiceError;

pub async fn list_team(db: &DatabaseConnection) -> Result<Vec<team_member::Model>, ServiceError> {
    Ok(team_member::Entity::find().order_by_asc(team_member::Column::Name).all(db).await?)
}

pub async fn get_team_member(db: &DatabaseConnection, id: Uuid) -> Result<team_member::Model, ServiceError> {
    team_member::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("team member"))
}

pub async fn create_team_member(db: &DatabaseConnection, principal: &Principal, input: team_member::TeamMemberInput) -> Result<team_member::Model, ServiceError> {
    require_superuser(principal)?;
    Ok(team_member::create(db, input).await?)
}

pub async fn update_team_member(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: team_member::TeamMemberInput,
) -> Result<team_member::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: team_member::ActiveModel = get_team_member(db, id).await?.into();
    input.apply(&mut am);
    Ok(am.update(db).await?)
}

pub async fn delete_team_member(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = team_member::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("team member"));
    }
    Ok(())
}

/// Newest first.
pub async fn list_news(db: &DatabaseConnection) -> Result<Vec<news::Model>, ServiceError> {
    Ok(news::Entity::find()
        .order_by_desc(news::Column::PublishedOn)
        .order_by_asc(news::Column::Title)
        .all(db)
        .await?)
}

pub async fn get_news(db: &DatabaseConnection, id: Uuid) -> Result<news::Model, ServiceError> {
    news::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("news"))
}

pub async fn create_news(db: &DatabaseConnection, principal: &Principal, input: news::NewsInput) -> Result<news::Model, ServiceError> {
    require_superuser(principal)?;
    Ok(news::create(db, input).await?)
}

pub async fn update_news(db: &DatabaseConnection, principal: &Principal, id: Uuid, input: news::NewsInput) -> Result<news::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: news::ActiveModel = get_news(db, id).await?.into();
    input.apply(&mut am);
    Ok(am.update(db).await?)
}

pub async fn delete_news(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = news::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("news"));
    }
    Ok(())
}
