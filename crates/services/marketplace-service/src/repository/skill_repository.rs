//! Skill repository, including the attributed user/skill association.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base;
use super::entities::{skill, user_skill, SkillEntity, UserEntity, UserSkillEntity};
use common::{AppError, AppResult};
use domain::{NewSkill, Skill, SkillChanges, SkillHolder, SkillProficiency, UserSkill};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Skill repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Skill>>;

    async fn create(&self, input: NewSkill) -> AppResult<Skill>;

    async fn update(&self, id: i32, changes: SkillChanges) -> AppResult<Skill>;

    /// Delete a skill; its association rows cascade away
    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Skill>>;

    /// Pair a user with a skill. A pairing exists at most once.
    async fn attach(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill>;

    /// Change the proficiency level of an existing pairing
    async fn set_proficiency(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill>;

    /// Remove a pairing
    async fn detach(&self, user_id: i32, skill_id: i32) -> AppResult<()>;

    /// Skills held by a user, ordered by skill ID
    async fn skills_of_user(&self, user_id: i32) -> AppResult<Vec<SkillProficiency>>;

    /// Users holding a skill, ordered by user ID
    async fn users_of_skill(&self, skill_id: i32) -> AppResult<Vec<SkillHolder>>;
}

/// Concrete implementation of SkillRepository
pub struct SkillStore {
    db: DatabaseConnection,
}

impl SkillStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_pairing(&self, user_id: i32, skill_id: i32) -> AppResult<user_skill::Model> {
        UserSkillEntity::find_by_id((user_id, skill_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl SkillRepository for SkillStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Skill>> {
        let result = base::find_by_id::<SkillEntity>(&self.db, id).await?;
        Ok(result.map(Skill::from))
    }

    async fn create(&self, input: NewSkill) -> AppResult<Skill> {
        let active_model = skill::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(skill_id = model.id, name = %model.name, "Skill created");
        Ok(Skill::from(model))
    }

    async fn update(&self, id: i32, changes: SkillChanges) -> AppResult<Skill> {
        let model = base::get_by_id::<SkillEntity>(&self.db, id).await?;
        if changes.name.is_none() && changes.description.is_none() {
            return Ok(Skill::from(model));
        }

        let mut active: skill::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Skill::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        base::delete_by_id::<SkillEntity>(&self.db, id).await?;
        tracing::info!(skill_id = id, "Skill deleted");
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Skill>> {
        let models = SkillEntity::find()
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Skill::from).collect())
    }

    async fn attach(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill> {
        let active_model = user_skill::ActiveModel {
            user_id: Set(user_id),
            skill_id: Set(skill_id),
            proficiency_level: Set(proficiency_level),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(user_id, skill_id, "Skill attached to user");
        Ok(UserSkill::from(model))
    }

    async fn set_proficiency(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill> {
        let mut active: user_skill::ActiveModel =
            self.find_pairing(user_id, skill_id).await?.into();
        active.proficiency_level = Set(proficiency_level);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(UserSkill::from(model))
    }

    async fn detach(&self, user_id: i32, skill_id: i32) -> AppResult<()> {
        let result = UserSkillEntity::delete_by_id((user_id, skill_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id, skill_id, "Skill detached from user");
        Ok(())
    }

    async fn skills_of_user(&self, user_id: i32) -> AppResult<Vec<SkillProficiency>> {
        let rows = UserSkillEntity::find()
            .filter(user_skill::Column::UserId.eq(user_id))
            .find_also_related(SkillEntity)
            .order_by_asc(user_skill::Column::SkillId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, skill)| {
                skill.map(|skill| SkillProficiency {
                    skill: skill.into(),
                    proficiency_level: link.proficiency_level,
                })
            })
            .collect())
    }

    async fn users_of_skill(&self, skill_id: i32) -> AppResult<Vec<SkillHolder>> {
        let rows = UserSkillEntity::find()
            .filter(user_skill::Column::SkillId.eq(skill_id))
            .find_also_related(UserEntity)
            .order_by_asc(user_skill::Column::UserId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, user)| {
                user.map(|user| SkillHolder {
                    user: user.into(),
                    proficiency_level: link.proficiency_level,
                })
            })
            .collect())
    }
}
