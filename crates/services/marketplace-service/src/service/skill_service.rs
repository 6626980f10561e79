//! Skill service - skills and the attributed user/skill pairing.

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{
    validate_input, Listing, NewSkill, Skill, SkillChanges, SkillHolder, UserSkill,
    PROFICIENCY_LEVEL_MAX_LENGTH,
};

use crate::repository::Repositories;

#[async_trait]
pub trait SkillService: Send + Sync {
    async fn create_skill(&self, input: NewSkill) -> AppResult<Skill>;

    async fn get_skill(&self, id: i32) -> AppResult<Skill>;

    async fn list_skills(&self) -> AppResult<Vec<Skill>>;

    async fn update_skill(&self, id: i32, changes: SkillChanges) -> AppResult<Skill>;

    /// Delete a skill. Refused while listings offer it.
    async fn delete_skill(&self, id: i32) -> AppResult<()>;

    /// Record that a user holds a skill. Pairing twice is a
    /// `ConstraintViolation`; use [`SkillService::set_proficiency`] instead.
    async fn add_user_skill(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill>;

    async fn set_proficiency(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill>;

    async fn remove_user_skill(&self, user_id: i32, skill_id: i32) -> AppResult<()>;

    /// Users holding a skill, with their proficiency
    async fn users(&self, skill_id: i32) -> AppResult<Vec<SkillHolder>>;

    async fn listings(&self, skill_id: i32) -> AppResult<Vec<Listing>>;
}

pub struct SkillManager {
    repos: Repositories,
}

impl SkillManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

fn check_proficiency(level: Option<&str>) -> AppResult<()> {
    match level {
        Some(level) if level.chars().count() > PROFICIENCY_LEVEL_MAX_LENGTH as usize => {
            Err(AppError::validation(format!(
                "Proficiency level must be at most {} characters",
                PROFICIENCY_LEVEL_MAX_LENGTH
            )))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl SkillService for SkillManager {
    async fn create_skill(&self, input: NewSkill) -> AppResult<Skill> {
        validate_input(&input)?;
        self.repos.skills.create(input).await
    }

    async fn get_skill(&self, id: i32) -> AppResult<Skill> {
        self.repos.skills.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_skills(&self) -> AppResult<Vec<Skill>> {
        self.repos.skills.list().await
    }

    async fn update_skill(&self, id: i32, changes: SkillChanges) -> AppResult<Skill> {
        validate_input(&changes)?;
        self.repos.skills.update(id, changes).await
    }

    async fn delete_skill(&self, id: i32) -> AppResult<()> {
        self.repos.skills.delete(id).await
    }

    async fn add_user_skill(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill> {
        check_proficiency(proficiency_level.as_deref())?;
        self.repos
            .skills
            .attach(user_id, skill_id, proficiency_level)
            .await
    }

    async fn set_proficiency(
        &self,
        user_id: i32,
        skill_id: i32,
        proficiency_level: Option<String>,
    ) -> AppResult<UserSkill> {
        check_proficiency(proficiency_level.as_deref())?;
        self.repos
            .skills
            .set_proficiency(user_id, skill_id, proficiency_level)
            .await
    }

    async fn remove_user_skill(&self, user_id: i32, skill_id: i32) -> AppResult<()> {
        self.repos.skills.detach(user_id, skill_id).await
    }

    async fn users(&self, skill_id: i32) -> AppResult<Vec<SkillHolder>> {
        self.get_skill(skill_id).await?;
        self.repos.skills.users_of_skill(skill_id).await
    }

    async fn listings(&self, skill_id: i32) -> AppResult<Vec<Listing>> {
        self.get_skill(skill_id).await?;
        self.repos.listings.list_by_skill(skill_id).await
    }
}
