//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Reverse collections (a user's listings, a skill's holders) are not
//! stored anywhere: repositories derive them by filtering on the foreign key.

pub mod listing;
pub mod review;
pub mod skill;
pub mod transaction;
pub mod user;
pub mod user_skill;

pub use listing::Entity as ListingEntity;
pub use review::Entity as ReviewEntity;
pub use skill::Entity as SkillEntity;
pub use transaction::Entity as TransactionEntity;
pub use user::Entity as UserEntity;
pub use user_skill::Entity as UserSkillEntity;
