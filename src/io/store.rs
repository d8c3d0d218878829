use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, RoadmapError};
use crate::model::Task;

const STORE_FILENAME: &str = "roadmap-tasks.json";

/// Platform directories for this application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "roadmap-timeline")
}

/// Local JSON store for the task list.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn default_location() -> Result<Self> {
        let dirs = project_dirs().ok_or(RoadmapError::NoDataDir)?;
        Ok(Self::at(dirs.data_dir().join(STORE_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored tasks, or `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_tasks(&self.path).map(Some)
    }

    /// Persist `tasks`. An empty list is not written, so a cleared roadmap
    /// falls back to the last saved state on next launch.
    pub fn save(&self, tasks: &[Task]) -> Result<bool> {
        if tasks.is_empty() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RoadmapError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        save_tasks(tasks, &self.path)?;
        Ok(true)
    }
}

/// Write tasks as a pretty JSON array.
pub fn save_tasks(tasks: &[Task], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks).map_err(|source| RoadmapError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| RoadmapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON array of tasks.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let json = std::fs::read_to_string(path).map_err(|source| RoadmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| RoadmapError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Roadmap;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::at(dir.path().join("nested").join(STORE_FILENAME));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saves_and_reloads_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::at(dir.path().join("nested").join(STORE_FILENAME));
        let tasks = Roadmap::sample().tasks;

        assert!(store.save(&tasks).unwrap());
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn empty_list_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::at(dir.path().join(STORE_FILENAME));
        assert!(!store.save(&[]).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILENAME);
        std::fs::write(&path, "[{\"id\": 3").unwrap();
        let err = TaskStore::at(&path).load().unwrap_err();
        assert!(matches!(err, RoadmapError::Json { .. }));
    }

    #[test]
    fn reads_original_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        std::fs::write(
            &path,
            r##"[{
                "id": "6f1c2d3e-1111-4a2b-9c3d-5e6f7a8b9c0d",
                "name": "Kickoff",
                "startDate": "2024-01-10",
                "endDate": "2024-01-31",
                "bufferBefore": 2,
                "bufferAfter": 3,
                "color": "#4A90E2"
            }]"##,
        )
        .unwrap();
        let tasks = load_tasks(&path).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].buffer_before, 2);
        assert_eq!(tasks[0].duration_days(), 21);
    }

    fn write_single(dir: &tempfile::TempDir, record: &str) -> PathBuf {
        let path = dir.path().join(STORE_FILENAME);
        std::fs::write(&path, format!("[{}]", record)).unwrap();
        path
    }

    #[test]
    fn accepts_plain_string_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single(
            &dir,
            r##"{"id": "1", "name": "Project planning", "startDate": "2024-01-10",
                "endDate": "2024-01-31", "bufferBefore": 2, "bufferAfter": 3,
                "color": "#4A90E2"}"##,
        );
        let tasks = TaskStore::at(&path).load().unwrap().unwrap();
        assert_eq!(tasks[0].id, "1");

        // Ids survive a save/load cycle untouched.
        let store = TaskStore::at(dir.path().join("copy.json"));
        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap().unwrap()[0].id, "1");
    }

    #[test]
    fn rejects_inverted_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single(
            &dir,
            r##"{"id": "x", "name": "Backwards", "startDate": "2024-03-01",
                "endDate": "2024-02-20", "bufferBefore": 0, "bufferAfter": 0,
                "color": "#4A90E2"}"##,
        );
        let err = TaskStore::at(&path).load().unwrap_err();
        assert!(matches!(err, RoadmapError::Json { .. }));
    }

    #[test]
    fn rejects_buffer_beyond_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single(
            &dir,
            r##"{"id": "x", "name": "Huge", "startDate": "2024-03-01",
                "endDate": "2024-03-20", "bufferBefore": 4000000000, "bufferAfter": 0,
                "color": "#4A90E2"}"##,
        );
        assert!(load_tasks(&path).is_err());
    }
}
