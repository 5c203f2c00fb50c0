pub mod calendar_view;
pub mod dialogs;
pub mod sidebar;
pub mod theme;
pub mod toast;
pub mod toolbar;
