pub mod execution;
pub mod executor;
pub mod run_state;

pub use execution::{
    Capabilities, TaskCompletion, TaskInvocation, TaskKind, TaskResult, execute_invocation,
};
pub use executor::TaskExecutor;
pub use run_state::RunState;
