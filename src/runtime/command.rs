use crate::terminal::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    NextFocus,
    PrevFocus,
    NextScreen,
    Dismiss,
    InputKey(KeyEvent),
    Noop,
}
