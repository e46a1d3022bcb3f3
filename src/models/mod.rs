pub mod card;
pub mod day_summary;
pub mod employee;
pub mod event;
pub mod event_kind;
pub mod group;
pub mod special_day;

pub use card::CardId;
pub use day_summary::{DailySummary, DayStatus};
pub use employee::{DailyHours, Employee};
pub use event::AttendanceEvent;
pub use event_kind::EventKind;
pub use group::Group;
pub use special_day::{SpecialDay, SpecialDayKind};
