//! Application layer - Use cases and orchestration

pub mod build_site;
pub mod check_curriculum;
pub mod init;
pub mod list_lessons;
pub mod manage_config;
pub mod new_lesson;
pub mod open_lesson;
pub mod reading_order;

pub use build_site::{BuildOptions, BuildSiteService, BuildSummary};
pub use check_curriculum::{CheckOptions, CheckService};
pub use list_lessons::{list_lessons, LessonOverview};
pub use manage_config::ConfigService;
pub use new_lesson::NewLessonService;
pub use open_lesson::OpenLessonService;
pub use reading_order::{reading_order, OrderedLesson, ReadingOrderReport};
