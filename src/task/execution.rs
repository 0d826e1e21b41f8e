use crate::core::geolocation::{Coordinates, GeolocationError, GeolocationProvider};
use crate::core::submission::FormKind;
use crate::error::TransportError;
use crate::net::{HttpResponse, Transport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    Submit {
        path: String,
        body: serde_json::Value,
    },
    Locate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskInvocation {
    pub form: FormKind,
    pub run_id: u64,
    pub kind: TaskKind,
}

impl TaskInvocation {
    pub fn submit(form: FormKind, run_id: u64, path: &str, body: serde_json::Value) -> Self {
        Self {
            form,
            run_id,
            kind: TaskKind::Submit {
                path: path.to_string(),
                body,
            },
        }
    }

    pub fn locate(form: FormKind, run_id: u64) -> Self {
        Self {
            form,
            run_id,
            kind: TaskKind::Locate,
        }
    }
}

#[derive(Debug)]
pub enum TaskResult {
    Submitted(Result<HttpResponse, TransportError>),
    Located(Result<Coordinates, GeolocationError>),
}

#[derive(Debug)]
pub struct TaskCompletion {
    pub form: FormKind,
    pub run_id: u64,
    pub result: TaskResult,
}

/// External collaborators a task may call.
#[derive(Clone)]
pub struct Capabilities {
    pub transport: Arc<dyn Transport>,
    pub geolocation: Arc<dyn GeolocationProvider>,
}

impl Capabilities {
    pub fn new(transport: Arc<dyn Transport>, geolocation: Arc<dyn GeolocationProvider>) -> Self {
        Self {
            transport,
            geolocation,
        }
    }
}

/// Runs one invocation to completion on the calling thread.
pub fn execute_invocation(invocation: TaskInvocation, capabilities: &Capabilities) -> TaskCompletion {
    let started_at = Instant::now();
    let result = match &invocation.kind {
        TaskKind::Submit { path, body } => {
            let result = capabilities.transport.post_json(path.as_str(), body);
            match &result {
                Ok(response) => info!(
                    form = %invocation.form,
                    run_id = invocation.run_id,
                    status = response.status,
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "submission answered"
                ),
                Err(err) => warn!(
                    form = %invocation.form,
                    run_id = invocation.run_id,
                    error = %err,
                    "submission failed before a response"
                ),
            }
            TaskResult::Submitted(result)
        }
        TaskKind::Locate => {
            let result = capabilities.geolocation.request_position();
            match &result {
                Ok(position) => info!(form = %invocation.form, %position, "position captured"),
                Err(err) => warn!(form = %invocation.form, error = %err, "position unavailable"),
            }
            TaskResult::Located(result)
        }
    };

    TaskCompletion {
        form: invocation.form,
        run_id: invocation.run_id,
        result,
    }
}
