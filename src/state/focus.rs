#[derive(Debug, Default, Clone)]
pub struct FocusState {
    targets: Vec<String>,
    index: Option<usize>,
}

impl FocusState {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = ids.into_iter().map(Into::into).collect();
        let index = if targets.is_empty() { None } else { Some(0) };
        Self { targets, index }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.targets.get(i))
            .map(String::as_str)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn set_focus_by_id(&mut self, id: &str) {
        if let Some(position) = self.targets.iter().position(|target| target == id) {
            self.index = Some(position);
        }
    }

    pub fn next(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        self.index = Some((current + 1) % self.targets.len());
    }

    pub fn prev(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        self.index = Some((current + self.targets.len() - 1) % self.targets.len());
    }
}

#[cfg(test)]
mod tests {
    use super::FocusState;

    #[test]
    fn focus_wraps_both_ways() {
        let mut focus = FocusState::from_ids(["a", "b", "c"]);
        assert_eq!(focus.current_id(), Some("a"));
        focus.prev();
        assert_eq!(focus.current_id(), Some("c"));
        focus.next();
        focus.next();
        assert_eq!(focus.current_id(), Some("b"));
    }

    #[test]
    fn unknown_id_keeps_current_focus() {
        let mut focus = FocusState::from_ids(["a", "b"]);
        focus.set_focus_by_id("b");
        focus.set_focus_by_id("zzz");
        assert_eq!(focus.current_id(), Some("b"));
    }

    #[test]
    fn empty_focus_stays_empty() {
        let mut focus = FocusState::from_ids(Vec::<String>::new());
        focus.next();
        assert_eq!(focus.current_id(), None);
    }
}
