use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::AppState;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        let mut effects = match command {
            Command::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Command::NextFocus => {
                state.focus_next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus_prev();
                vec![Effect::RequestRender]
            }
            Command::NextScreen => {
                if state.next_screen() {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::Dismiss => {
                if state.dismiss() {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::InputKey(key) => {
                if state.dispatch_key_to_focused(key).handled {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::Noop => vec![],
        };

        effects.extend(
            state
                .take_pending_task_invocations()
                .into_iter()
                .map(Effect::Spawn),
        );

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::runtime::command::Command;
    use crate::runtime::effect::Effect;
    use crate::session::MemorySessionStore;
    use crate::state::{AppState, Screen};
    use crate::task::TaskKind;
    use crate::terminal::{KeyCode, KeyEvent};
    use std::sync::Arc;

    #[test]
    fn activating_submit_spawns_task() {
        let mut state =
            AppState::new(Arc::new(MemorySessionStore::new())).with_screen(Screen::Preferences);
        for _ in 0..10 {
            Reducer::reduce(&mut state, Command::NextFocus);
        }
        let effects = Reducer::reduce(&mut state, Command::InputKey(KeyEvent::plain(KeyCode::Enter)));

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::RequestRender);
        let Effect::Spawn(invocation) = &effects[1] else {
            panic!("expected a spawned task");
        };
        assert!(matches!(&invocation.kind, TaskKind::Submit { path, .. } if path == "/preference"));
    }

    #[test]
    fn exit_sets_flag() {
        let mut state = AppState::new(Arc::new(MemorySessionStore::new()));
        Reducer::reduce(&mut state, Command::Exit);
        assert!(state.should_exit());
    }

    #[test]
    fn dismiss_without_alert_does_not_render() {
        let mut state = AppState::new(Arc::new(MemorySessionStore::new()));
        assert!(Reducer::reduce(&mut state, Command::Dismiss).is_empty());
    }
}
