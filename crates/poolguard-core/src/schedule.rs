// ── Task schedule ──
//
// Ordered list of recurring tasks. New tasks go to the front; completion
// toggling is suppressed while the list is being configured.

use uuid::Uuid;

use crate::model::{Category, EditMode, Frequency, ScheduledTask};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSchedule {
    tasks: Vec<ScheduledTask>,
}

impl TaskSchedule {
    pub fn new(tasks: Vec<ScheduledTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Prepend a task. Blank descriptions are ignored.
    pub fn add_task(
        &mut self,
        description: &str,
        frequency: Frequency,
        category: Category,
    ) -> Option<&ScheduledTask> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }

        self.tasks.insert(
            0,
            ScheduledTask {
                id: Uuid::new_v4().to_string(),
                description: description.to_owned(),
                frequency,
                category,
                completed: false,
            },
        );
        self.tasks.first()
    }

    /// Flip a task's completion flag and return the new value.
    ///
    /// No-op in `EditMode::Configuring` or for an unknown id.
    pub fn toggle_completed(&mut self, id: &str, mode: EditMode) -> Option<bool> {
        if mode == EditMode::Configuring {
            return None;
        }
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Remove by id. Removing an absent id is a no-op.
    pub fn remove_task(&mut self, id: &str) -> Option<ScheduledTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Replace a task's id with the one the store assigned.
    pub(crate) fn reassign_id(&mut self, old: &str, new: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == old) {
            new.clone_into(&mut task.id);
        }
    }

    /// Tasks not yet done, in list order.
    pub fn pending(&self) -> Vec<&ScheduledTask> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> TaskSchedule {
        TaskSchedule::new(vec![
            ScheduledTask {
                id: "t1".into(),
                description: "Brush walls and floor".into(),
                frequency: Frequency::Weekly,
                category: Category::Cleaning,
                completed: false,
            },
            ScheduledTask {
                id: "t2".into(),
                description: "Clean pump basket".into(),
                frequency: Frequency::Weekly,
                category: Category::Mechanical,
                completed: true,
            },
        ])
    }

    #[test]
    fn add_task_prepends_trimmed() {
        let mut s = schedule();
        let added = s
            .add_task("  Backwash filter ", Frequency::Biweekly, Category::Mechanical)
            .cloned();

        let added = added.expect("task should be added");
        assert_eq!(added.description, "Backwash filter");
        assert!(!added.completed);
        assert_eq!(s.tasks()[0].id, added.id);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn blank_task_is_ignored() {
        let mut s = schedule();
        assert!(s.add_task("", Frequency::Daily, Category::Chemical).is_none());
        assert!(s.add_task("   \t", Frequency::Daily, Category::Chemical).is_none());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut s = schedule();
        assert_eq!(s.toggle_completed("t1", EditMode::Normal), Some(true));
        assert_eq!(s.toggle_completed("t1", EditMode::Normal), Some(false));
        assert_eq!(s.toggle_completed("nope", EditMode::Normal), None);
    }

    #[test]
    fn toggle_is_ignored_while_configuring() {
        let mut s = schedule();
        assert_eq!(s.toggle_completed("t1", EditMode::Configuring), None);
        assert!(s.get("t1").is_some_and(|t| !t.completed));
    }

    #[test]
    fn summary_helpers() {
        let mut s = schedule();
        assert_eq!(s.pending().len(), 1);
        assert_eq!(s.completed_count(), 1);
        assert!(s.remove_task("t2").is_some());
        assert!(s.remove_task("t2").is_none());
        assert_eq!(s.completed_count(), 0);
    }
}
