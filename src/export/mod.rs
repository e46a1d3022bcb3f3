pub mod archive;
pub mod roster;

pub use archive::archive_events;
pub use roster::write_roster;
