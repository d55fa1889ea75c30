//! Services module
//!
//! High-level business logic built on the repository layer:
//! - `session`: account sign-in state and change notification
//! - `bootstrap`: first-use family creation
//! - `family_data`: the in-memory family state store and entity mutators

pub mod bootstrap;
pub mod family_data;
pub mod session;

pub use bootstrap::FamilyService;
pub use family_data::{FamilyDataService, FamilyState};
pub use session::{Identity, SessionService};
