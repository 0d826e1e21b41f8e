use crate::task::execution::{Capabilities, TaskCompletion, TaskInvocation, execute_invocation};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Runs invocations off the event loop; results are picked up with
/// [`TaskExecutor::drain_ready`].
pub struct TaskExecutor {
    capabilities: Capabilities,
    completion_tx: Sender<TaskCompletion>,
    completion_rx: Receiver<TaskCompletion>,
}

impl TaskExecutor {
    pub fn new(capabilities: Capabilities) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<TaskCompletion>();
        Self {
            capabilities,
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, invocation: TaskInvocation) {
        let completion_tx = self.completion_tx.clone();
        let capabilities = self.capabilities.clone();
        std::thread::spawn(move || {
            let completion = execute_invocation(invocation, &capabilities);
            let _ = completion_tx.send(completion);
        });
    }

    pub fn drain_ready(&self) -> Vec<TaskCompletion> {
        let mut out = Vec::<TaskCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}
