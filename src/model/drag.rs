use chrono::Duration;

use super::task::Task;

/// Whole days covered by a horizontal drag of `delta_x` pixels.
///
/// Rounds to the nearest day, with ties away from zero. A non-positive or
/// non-finite scale moves nothing.
pub fn day_delta(delta_x: f32, scale: f32) -> i64 {
    if !(scale > 0.0 && scale.is_finite() && delta_x.is_finite()) {
        return 0;
    }
    (delta_x / scale).round() as i64
}

/// Shift a task by the drag distance, keeping its duration and buffers.
///
/// A shift that would leave the supported calendar returns the task unchanged.
pub fn reschedule(task: &Task, delta_x: f32, scale: f32) -> Task {
    let shifted = Duration::try_days(day_delta(delta_x, scale)).and_then(|shift| {
        Some((
            task.start.checked_add_signed(shift)?,
            task.end.checked_add_signed(shift)?,
        ))
    });
    match shifted {
        Some((start, end)) => Task {
            start,
            end,
            ..task.clone()
        },
        None => task.clone(),
    }
}
