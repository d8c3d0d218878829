use crate::error::Result;
use crate::model::task::parse_date;
use crate::model::Task;
use crate::ui::theme;
use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};

/// Whether the dialog creates a task or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(String),
}

/// Field state of the add/edit dialog.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub mode: FormMode,
    pub name: String,
    pub color: Color32,
    /// Dates are kept as typed; they are parsed on submit.
    pub start: String,
    pub end: String,
    pub buffer_before: u32,
    pub buffer_after: u32,
    pub error: Option<String>,
}

/// Result of showing the dialog for one frame.
#[derive(Debug, Clone)]
pub enum FormAction {
    None,
    Submit(Task),
    Delete(String),
    Cancel,
}

impl TaskForm {
    /// Empty form for a new task, dated from `today` for one week.
    pub fn new_task(today: NaiveDate, color: Color32) -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            color,
            start: today.format("%Y-%m-%d").to_string(),
            end: (today + chrono::Duration::days(7)).format("%Y-%m-%d").to_string(),
            buffer_before: 0,
            buffer_after: 0,
            error: None,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id.clone()),
            name: task.name.clone(),
            color: task.color,
            start: task.start.format("%Y-%m-%d").to_string(),
            end: task.end.format("%Y-%m-%d").to_string(),
            buffer_before: task.buffer_before,
            buffer_after: task.buffer_after,
            error: None,
        }
    }

    /// Build the record described by the form.
    ///
    /// New tasks get a fresh id; edits keep the id of the task being edited.
    pub fn build(&self) -> Result<Task> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        let name = if self.name.trim().is_empty() {
            "New Task".to_string()
        } else {
            self.name.trim().to_string()
        };
        let mut task = Task::new(name, start, end)?
            .with_buffers(self.buffer_before, self.buffer_after)
            .with_color(self.color);
        if let FormMode::Edit(id) = &self.mode {
            task.id = id.clone();
        }
        Ok(task)
    }
}

/// Render the add/edit task dialog.
pub fn show_task_form(form: &mut TaskForm, ctx: &Context) -> FormAction {
    let mut action = FormAction::None;
    let title = match form.mode {
        FormMode::Add => "Add Task",
        FormMode::Edit(_) => "Edit Task",
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            egui::Grid::new("task_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut form.name).hint_text("Task name..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Colour").color(theme::TEXT_SECONDARY));
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut form.color,
                        egui::color_picker::Alpha::Opaque,
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    date_field(ui, &mut form.start, "form_dp_start");
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    date_field(ui, &mut form.end, "form_dp_end");
                    ui.end_row();

                    ui.label(RichText::new("Buffer before (days)").color(theme::TEXT_SECONDARY));
                    ui.add(egui::DragValue::new(&mut form.buffer_before).range(0..=365));
                    ui.end_row();

                    ui.label(RichText::new("Buffer after (days)").color(theme::TEXT_SECONDARY));
                    ui.add(egui::DragValue::new(&mut form.buffer_after).range(0..=365));
                    ui.end_row();
                });

            if let Some(error) = &form.error {
                ui.add_space(4.0);
                ui.label(RichText::new(error).color(theme::TEXT_ERROR));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let submit_label = match form.mode {
                    FormMode::Add => "Add",
                    FormMode::Edit(_) => "Save",
                };
                let submit = egui::Button::new(RichText::new(submit_label).color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], submit).clicked() {
                    match form.build() {
                        Ok(task) => action = FormAction::Submit(task),
                        Err(e) => form.error = Some(e.to_string()),
                    }
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = FormAction::Cancel;
                }
                if let FormMode::Edit(id) = &form.mode {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(
                            RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH))
                                .color(theme::TEXT_ERROR),
                        );
                        if ui.add(delete).clicked() {
                            action = FormAction::Delete(id.clone());
                        }
                    });
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = FormAction::Cancel;
    }
    action
}

/// Text field for an ISO date with a picker that writes back into it.
fn date_field(ui: &mut egui::Ui, text: &mut String, salt: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 24.0],
            egui::TextEdit::singleline(text).hint_text("YYYY-MM-DD"),
        );
        let mut picked = parse_date(text).unwrap_or_else(|_| chrono::Local::now().date_naive());
        let before = picked;
        ui.add(egui_extras::DatePickerButton::new(&mut picked).id_salt(salt));
        if picked != before {
            *text = picked.format("%Y-%m-%d").to_string();
        }
    });
}
