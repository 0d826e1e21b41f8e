use super::AppState;
use crate::task::{TaskCompletion, TaskInvocation, TaskResult};

impl AppState {
    pub fn take_pending_task_invocations(&mut self) -> Vec<TaskInvocation> {
        self.runtime.pending_task_invocations.drain(..).collect()
    }

    /// Hands a finished task to its form. Returns `true` when anything
    /// visible changed.
    pub fn complete_task_run(&mut self, completion: TaskCompletion) -> bool {
        let TaskCompletion {
            form,
            run_id,
            result,
        } = completion;
        let before = self.view(form).form().submission().phase();
        let was_locating = self.view(form).form().is_locating();

        let notice = match result {
            TaskResult::Submitted(result) => {
                self.view_mut(form).form_mut().on_submitted(run_id, result)
            }
            TaskResult::Located(result) => {
                self.view_mut(form).form_mut().on_located(run_id, result)
            }
        };

        let view = self.view(form).form();
        let changed = notice.is_some()
            || before != view.submission().phase()
            || was_locating != view.is_locating();
        if let Some(notice) = notice {
            self.alert = Some(notice);
        }
        changed
    }
}
