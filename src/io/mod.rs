pub mod store;

pub use store::{load_tasks, save_tasks, TaskStore};
