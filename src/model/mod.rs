pub mod book;
pub mod calendar;
pub mod coords;
pub mod hack;
pub mod scheduler;
pub mod timeline;
pub mod zoom;

pub use book::HackBook;
pub use calendar::{CalendarMetadata, CalendarRange, MonthDescriptor};
pub use coords::{BarPlacement, CoordinateMapper, ViewportAnchor};
pub use hack::{DateRange, Document, Hack, PhaseKind, Phases};
pub use scheduler::FrameScheduler;
pub use timeline::{MonthStep, ScrollOutcome, ScrollSample, Timeline};
pub use zoom::{ZoomController, ZoomIndicator, ZoomInput, ZoomOutcome};
