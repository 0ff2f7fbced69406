//! Local Database Adapters
//!
//! - `ArtisanDatabase` - the local database through the project's snapshot tool

mod artisan;

pub use artisan::ArtisanDatabase;
