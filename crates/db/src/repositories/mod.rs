//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement invariants
//! (draft submission, favorite toggle) run inside explicit transactions.

pub mod draft_repo;
pub mod event_repo;
pub mod favorite_repo;
pub mod lead_repo;
pub mod listing_repo;
pub mod session_repo;
pub mod user_repo;

pub use draft_repo::DraftRepo;
pub use event_repo::EventRepo;
pub use favorite_repo::FavoriteRepo;
pub use lead_repo::LeadRepo;
pub use listing_repo::ListingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
