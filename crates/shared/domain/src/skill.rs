//! Skill entity and the attributed user/skill pairing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::User;

/// Something a user can offer or learn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Skill creation input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSkill {
    #[validate(length(min = 1, max = 100, message = "Skill name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 250, message = "Skill description must be at most 250 characters"))]
    pub description: Option<String>,
}

impl NewSkill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Partial skill update.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SkillChanges {
    #[validate(length(min = 1, max = 100, message = "Skill name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 250, message = "Skill description must be at most 250 characters"))]
    pub description: Option<Option<String>>,
}

/// One row of the user/skill association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    pub user_id: i32,
    pub skill_id: i32,
    pub proficiency_level: Option<String>,
}

/// A skill as seen from one of its holders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProficiency {
    pub skill: Skill,
    pub proficiency_level: Option<String>,
}

/// A user as seen from one of their skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHolder {
    pub user: User,
    pub proficiency_level: Option<String>,
}
