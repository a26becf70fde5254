//! Trait definitions for Fortnox operations.
//!
//! Each resource type implements the traits its endpoints support, so the
//! compiler rejects operations the API does not offer (there is no `Save`
//! for vouchers, for instance).

mod create;
mod get;
mod list;
mod save;

pub use create::Create;
pub use get::Get;
pub use list::List;
pub use save::Save;
