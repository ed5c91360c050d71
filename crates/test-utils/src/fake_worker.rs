use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use mdbridge::dispatch::{Worker, WorkerResult};
use mdbridge::errors::{MdbridgeError, Result};
use mdbridge::tasks::Task;

/// A fake worker that:
/// - records the id of every task it is asked to run
/// - succeeds immediately, unless the task id was marked as failing
///   (non-zero exit) or erroring (backend error).
#[derive(Debug, Clone, Default)]
pub struct FakeWorker {
    executed: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
    erroring: HashSet<String>,
}

impl FakeWorker {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            failing: HashSet::new(),
            erroring: HashSet::new(),
        }
    }

    pub fn failing(mut self, task_id: &str) -> Self {
        self.failing.insert(task_id.to_string());
        self
    }

    pub fn erroring(mut self, task_id: &str) -> Self {
        self.erroring.insert(task_id.to_string());
        self
    }
}

impl Worker for FakeWorker {
    fn run(&mut self, task: Task) -> Pin<Box<dyn Future<Output = Result<WorkerResult>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let fail = self.failing.contains(&task.id);
        let error = self.erroring.contains(&task.id);

        Box::pin(async move {
            executed.lock().unwrap().push(task.id.clone());

            if error {
                return Err(MdbridgeError::Worker(format!("{} backend unavailable", task.id)));
            }
            if fail {
                Ok(WorkerResult::failure(format!("{} failed", task.id), 1))
            } else {
                Ok(WorkerResult {
                    success: true,
                    output: format!("{} ok", task.id),
                    ..WorkerResult::default()
                })
            }
        })
    }
}
