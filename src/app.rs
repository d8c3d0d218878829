use std::path::Path;

use crate::io::TaskStore;
use crate::model::{Roadmap, Task, ZoomController};
use crate::settings::AppSettings;
use crate::ui;
use crate::ui::task_form::{FormAction, TaskForm};

/// Main application state.
pub struct RoadmapApp {
    pub roadmap: Roadmap,
    pub zoom: ZoomController,
    pub store: Option<TaskStore>,

    /// Open add/edit dialog, if any.
    pub form: Option<TaskForm>,

    // Status message
    pub status_message: String,
}

impl RoadmapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let store = match &settings.data_file {
            Some(path) => Some(TaskStore::at(path)),
            None => match TaskStore::default_location() {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(error = %e, "task store unavailable, changes will not be saved");
                    None
                }
            },
        };

        Self::with_state(store, ZoomController::new(settings.zoom))
    }

    /// Build the app around a store, seeding the sample roadmap when it is empty.
    pub fn with_state(store: Option<TaskStore>, zoom: ZoomController) -> Self {
        let (roadmap, status_message) = match store.as_ref().map(TaskStore::load) {
            Some(Ok(Some(tasks))) => {
                tracing::info!(count = tasks.len(), "loaded tasks");
                let message = format!("Loaded {} tasks", tasks.len());
                (Roadmap::from_tasks(tasks), message)
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load tasks, using sample roadmap");
                (Roadmap::sample(), format!("Error loading tasks: {}", e))
            }
            Some(Ok(None)) | None => (Roadmap::sample(), "Ready".to_string()),
        };

        Self {
            roadmap,
            zoom,
            store,
            form: None,
            status_message,
        }
    }

    // --- Task operations ---

    pub fn open_add_form(&mut self) {
        let color = ui::theme::task_color(self.roadmap.tasks.len());
        self.form = Some(TaskForm::new_task(chrono::Local::now().date_naive(), color));
    }

    pub fn open_edit_form(&mut self, id: &str) {
        if let Some(task) = self.roadmap.find(id) {
            self.form = Some(TaskForm::edit(task));
        }
    }

    pub fn add_task(&mut self, task: Task) {
        tracing::info!(task = %task.name, "task added");
        self.status_message = format!("Added '{}'", task.name);
        self.roadmap.add_task(task);
        self.persist();
    }

    /// Replace a record after an edit or a drag.
    pub fn commit_task(&mut self, task: Task) {
        let message = format!(
            "Updated '{}' ({} → {})",
            task.name,
            task.start.format("%Y-%m-%d"),
            task.end.format("%Y-%m-%d")
        );
        if self.roadmap.replace_task(task) {
            self.status_message = message;
            self.persist();
        } else {
            tracing::warn!("update for a task that no longer exists was dropped");
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        if let Some(task) = self.roadmap.remove_task(id) {
            tracing::info!(task = %task.name, "task deleted");
            self.status_message = format!("Deleted '{}'", task.name);
            self.persist();
        }
    }

    pub fn reset_to_sample(&mut self) {
        self.roadmap = Roadmap::sample();
        self.zoom.reset();
        self.status_message = "Sample roadmap restored".to_string();
        self.persist();
    }

    fn apply_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::None => {}
            FormAction::Cancel => self.form = None,
            FormAction::Delete(id) => {
                self.form = None;
                self.delete_task(&id);
            }
            FormAction::Submit(task) => {
                let is_edit = self.roadmap.find(&task.id).is_some();
                self.form = None;
                if is_edit {
                    self.commit_task(task);
                } else {
                    self.add_task(task);
                }
            }
        }
    }

    // --- File operations ---

    fn persist(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.save(&self.roadmap.tasks) {
            Ok(true) => tracing::debug!(path = ?store.path(), "tasks saved"),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to save tasks");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn import_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap tasks", &["json"])
            .pick_file()
        {
            self.import_from(&path);
        }
    }

    pub fn import_from(&mut self, path: &Path) {
        match crate::io::load_tasks(path) {
            Ok(tasks) => {
                self.status_message = format!("Imported {} tasks", tasks.len());
                self.roadmap = Roadmap::from_tasks(tasks);
                self.persist();
            }
            Err(e) => {
                tracing::warn!(error = %e, "import failed");
                self.status_message = format!("Import failed: {}", e);
            }
        }
    }

    pub fn export_json(&mut self) {
        let default_name = format!("roadmap-{}.json", chrono::Local::now().format("%Y-%m-%d"));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap tasks", &["json"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::save_tasks(&self.roadmap.tasks, &path) {
                Ok(()) => {
                    self.status_message = format!("Exported {} tasks", self.roadmap.tasks.len());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "export failed");
                    self.status_message = format!("Export failed: {}", e);
                }
            }
        }
    }
}

impl eframe::App for RoadmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let edited = self.roadmap.modified.with_timezone(&chrono::Local);
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Edited {}",
                                self.roadmap.tasks.len(),
                                edited.format("%H:%M")
                            ))
                                .font(ui::theme::font_status())
                                .color(ui::theme::TEXT_SECONDARY),
                        );
                    });
                });
            });

        // Central panel: timeline
        let frame = egui::Frame::default()
            .fill(ui::theme::BG_CANVAS)
            .inner_margin(egui::Margin::ZERO);
        let action = egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| {
                ui::timeline_view::show_timeline(&self.roadmap.tasks, &mut self.zoom, ui)
            })
            .inner;

        if let Some(task) = action.rescheduled {
            self.commit_task(task);
        }
        if let Some(id) = action.edit {
            self.open_edit_form(&id);
        }

        // Dialogs
        if let Some(form) = self.form.as_mut() {
            let form_action = ui::task_form::show_task_form(form, ctx);
            self.apply_form_action(form_action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reschedule;

    fn app_in(dir: &tempfile::TempDir) -> RoadmapApp {
        let store = TaskStore::at(dir.path().join("tasks.json"));
        RoadmapApp::with_state(Some(store), ZoomController::default())
    }

    #[test]
    fn first_launch_seeds_sample() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);
        assert_eq!(app.roadmap.tasks.len(), 10);
        assert_eq!(app.zoom.scale(), 50.0);
    }

    #[test]
    fn dropped_bar_is_committed_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let task = app.roadmap.tasks[0].clone();
        let moved = reschedule(&task, 125.0, app.zoom.scale());

        app.commit_task(moved.clone());
        assert_eq!(app.roadmap.find(&task.id), Some(&moved));

        let reopened = app_in(&dir);
        assert_eq!(reopened.roadmap.find(&task.id), Some(&moved));
    }

    #[test]
    fn form_submit_adds_then_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.open_add_form();
        let mut form = app.form.clone().unwrap();
        form.name = "Retrospective".into();
        let task = form.build().unwrap();
        app.apply_form_action(FormAction::Submit(task.clone()));
        assert!(app.form.is_none());
        assert_eq!(app.roadmap.tasks.len(), 11);

        app.open_edit_form(&task.id);
        let mut form = app.form.clone().unwrap();
        form.buffer_after = 9;
        app.apply_form_action(FormAction::Submit(form.build().unwrap()));
        assert_eq!(app.roadmap.tasks.len(), 11);
        assert_eq!(app.roadmap.find(&task.id).unwrap().buffer_after, 9);
    }

    #[test]
    fn delete_removes_task() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let id = app.roadmap.tasks[3].id.clone();
        app.open_edit_form(&id);
        app.apply_form_action(FormAction::Delete(id.clone()));
        assert!(app.roadmap.find(&id).is_none());
        assert!(app.form.is_none());
    }

    #[test]
    fn failed_import_keeps_current_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.import_from(&dir.path().join("missing.json"));
        assert_eq!(app.roadmap.tasks.len(), 10);
        assert!(app.status_message.starts_with("Import failed"));
    }
}
