/// Bookkeeping for runs of one background operation on one form.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    running: usize,
    sequence: u64,
}

impl RunState {
    pub fn running_count(&self) -> usize {
        self.running
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn on_started(&mut self) {
        self.running = self.running.saturating_add(1);
    }

    pub fn on_finished(&mut self) {
        self.running = self.running.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;

    #[test]
    fn run_ids_increase_and_count_balances() {
        let mut state = RunState::default();
        let first = state.next_run_id();
        let second = state.next_run_id();
        assert!(second > first);

        state.on_started();
        assert_eq!(state.running_count(), 1);
        state.on_finished();
        assert_eq!(state.running_count(), 0);
    }

    #[test]
    fn finishing_more_than_started_saturates() {
        let mut state = RunState::default();
        state.on_finished();
        assert_eq!(state.running_count(), 0);
    }
}
