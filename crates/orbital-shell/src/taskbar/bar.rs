//! Task ordering engine

use log::{debug, warn};
use crate::config::TaskbarMetrics;
use crate::error::{ShellError, ShellResult};
use crate::window::WindowId;
use super::Task;

/// Taskbar entries in creation order, displayed by ordinal
#[derive(Clone, Debug, Default)]
pub struct TaskBar {
    tasks: Vec<Task>,
    metrics: TaskbarMetrics,
}

impl TaskBar {
    pub fn new(metrics: TaskbarMetrics) -> Self {
        Self {
            tasks: Vec::new(),
            metrics,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[inline]
    pub fn metrics(&self) -> TaskbarMetrics {
        self.metrics
    }

    /// Task indices ordered by ordinal
    pub fn tasks_by_ordinal(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by_key(|&i| self.tasks[i].ordinal);
        order
    }

    /// Task shown at an ordinal
    pub fn index_at_ordinal(&self, ordinal: usize) -> Option<usize> {
        self.tasks.iter().position(|t| t.ordinal == ordinal)
    }

    /// Task linked to a window
    pub fn task_for_window(&self, id: WindowId) -> Option<usize> {
        self.tasks.iter().position(|t| t.window_id == Some(id))
    }

    /// Ordinal under a taskbar-local x coordinate, clamped to the last slot
    pub fn slot_at(&self, local_x: f32) -> Option<usize> {
        let last = self.tasks.len().checked_sub(1)?;
        let slot = (local_x.max(0.0) / self.metrics.pitch()).floor() as usize;
        Some(slot.min(last))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Append a task at the last slot
    pub fn push(&mut self, mut task: Task) -> usize {
        task.ordinal = self.tasks.len();
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    /// Reassign dense ordinals in creation order
    pub fn normalize(&mut self) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.ordinal = i;
        }
    }

    /// Attach a window to a task
    pub fn link_window(&mut self, index: usize, id: WindowId) -> ShellResult<()> {
        let task = self.task_mut(index)?;
        task.window_id = Some(id);
        task.is_window = true;
        Ok(())
    }

    /// Detach the task's window; it becomes a plain, inactive entry
    pub fn unlink_window(&mut self, index: usize) -> ShellResult<()> {
        let task = self.task_mut(index)?;
        task.window_id = None;
        task.is_window = false;
        task.active = false;
        Ok(())
    }

    pub fn set_active(&mut self, index: usize, active: bool) -> ShellResult<()> {
        self.task_mut(index)?.active = active;
        Ok(())
    }

    pub fn set_tooltip_visible(&mut self, index: usize, visible: bool) -> ShellResult<()> {
        self.task_mut(index)?.tooltip_visible = visible;
        Ok(())
    }

    /// Hover: only the task under the pointer shows its tooltip
    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.tooltip_visible = hovered == Some(i);
        }
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    /// Move a task to another ordinal, closing the gap it leaves
    ///
    /// Tasks between the old and new slot shift one step toward the vacated
    /// slot; every other task keeps its ordinal.
    pub fn make_to_position(&mut self, index: usize, towards: usize) -> ShellResult<()> {
        let len = self.tasks.len();
        let curr = self.task(index)?.ordinal;
        if towards >= len {
            warn!("reorder: ordinal {} out of range for {} tasks", towards, len);
            return Err(ShellError::InvalidOrdinal { ordinal: towards, len });
        }
        if curr == towards {
            return Ok(());
        }

        let order = self.tasks_by_ordinal();
        self.tasks[order[curr]].ordinal = towards;
        if curr < towards {
            for i in curr + 1..=towards {
                self.tasks[order[i]].ordinal = i - 1;
            }
        } else {
            for i in towards..curr {
                self.tasks[order[i]].ordinal = i + 1;
            }
        }
        debug!("task {} moved from slot {} to {}", index, curr, towards);
        Ok(())
    }

    fn task(&self, index: usize) -> ShellResult<&Task> {
        self.tasks.get(index).ok_or(ShellError::InvalidTask(index))
    }

    fn task_mut(&mut self, index: usize) -> ShellResult<&mut Task> {
        self.tasks.get_mut(index).ok_or(ShellError::InvalidTask(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(n: usize) -> TaskBar {
        let mut bar = TaskBar::new(TaskbarMetrics::default());
        for i in 0..n {
            bar.push(Task::pinned(&format!("task {}", i), "", "/icons/apps/task.svg"));
        }
        bar
    }

    fn ordinals(bar: &TaskBar) -> Vec<usize> {
        bar.tasks().iter().map(|t| t.ordinal).collect()
    }

    #[test]
    fn test_push_assigns_dense_ordinals() {
        let bar = bar(3);
        assert_eq!(ordinals(&bar), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_right_closes_gap() {
        let mut bar = bar(3);
        bar.make_to_position(0, 2).unwrap();
        assert_eq!(ordinals(&bar), vec![2, 0, 1]);
    }

    #[test]
    fn test_move_left_closes_gap() {
        let mut bar = bar(4);
        bar.make_to_position(3, 1).unwrap();
        assert_eq!(ordinals(&bar), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_move_is_relative_to_current_ordinals() {
        let mut bar = bar(4);
        bar.make_to_position(0, 3).unwrap();
        // Task 0 is now last; bring it back to the front
        bar.make_to_position(0, 0).unwrap();
        assert_eq!(ordinals(&bar), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_same_slot_is_noop() {
        let mut bar = bar(3);
        bar.make_to_position(1, 1).unwrap();
        assert_eq!(ordinals(&bar), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_errors() {
        let mut bar = bar(3);
        assert_eq!(bar.make_to_position(5, 0), Err(ShellError::InvalidTask(5)));
        assert_eq!(
            bar.make_to_position(0, 3),
            Err(ShellError::InvalidOrdinal { ordinal: 3, len: 3 })
        );
        assert_eq!(ordinals(&bar), vec![0, 1, 2]);
    }

    #[test]
    fn test_slot_at() {
        let bar = bar(3);
        assert_eq!(bar.slot_at(0.0), Some(0));
        assert_eq!(bar.slot_at(53.9), Some(0));
        assert_eq!(bar.slot_at(54.0), Some(1));
        assert_eq!(bar.slot_at(500.0), Some(2));
        assert_eq!(bar.slot_at(-10.0), Some(0));
        assert_eq!(TaskBar::default().slot_at(10.0), None);
    }

    #[test]
    fn test_link_and_unlink_window() {
        let mut bar = bar(1);
        bar.link_window(0, 7).unwrap();
        bar.set_active(0, true).unwrap();
        assert_eq!(bar.task_for_window(7), Some(0));

        bar.unlink_window(0).unwrap();
        let task = bar.get(0).unwrap();
        assert_eq!(task.window_id, None);
        assert!(!task.is_window);
        assert!(!task.active);
        assert_eq!(bar.unlink_window(3), Err(ShellError::InvalidTask(3)));
    }

    #[test]
    fn test_normalize() {
        let mut bar = bar(3);
        bar.make_to_position(2, 0).unwrap();
        bar.normalize();
        assert_eq!(ordinals(&bar), vec![0, 1, 2]);
        assert_eq!(bar.tasks_by_ordinal(), vec![0, 1, 2]);
        assert_eq!(bar.index_at_ordinal(1), Some(1));
    }
}
