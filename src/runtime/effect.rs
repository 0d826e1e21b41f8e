use crate::task::TaskInvocation;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Spawn(TaskInvocation),
    RequestRender,
}
