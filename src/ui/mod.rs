pub mod task_form;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;
