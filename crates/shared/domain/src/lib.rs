//! Domain layer - Marketplace entities and value objects.
//!
//! This crate contains the plain data shapes of the skill marketplace
//! (users, skills, listings, transactions, reviews) with no database
//! dependency. Persistence lives in the marketplace service crate.

pub mod constants;
pub mod error;
pub mod listing;
pub mod password;
pub mod review;
pub mod skill;
pub mod transaction;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use listing::{Listing, ListingChanges, NewListing};
pub use password::Password;
pub use review::{NewReview, Review, ReviewChanges};
pub use skill::{NewSkill, Skill, SkillChanges, SkillHolder, SkillProficiency, UserSkill};
pub use transaction::{NewTransaction, Transaction, TransactionStatus};
pub use user::{NewUser, User, UserChanges};
pub use validation::validate_input;
