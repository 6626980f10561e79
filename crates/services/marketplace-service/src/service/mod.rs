//! Service layer - application rules on top of the repositories.

mod container;
mod listing_service;
mod review_service;
mod skill_service;
mod transaction_service;
mod user_service;

pub use container::{ServiceContainer, Services};
pub use listing_service::{ListingManager, ListingService};
pub use review_service::{ReviewManager, ReviewService};
pub use skill_service::{SkillManager, SkillService};
pub use transaction_service::{TransactionManager, TransactionService};
pub use user_service::{UserManager, UserService};
