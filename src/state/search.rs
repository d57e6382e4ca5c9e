use athletrack_api::Tournament;

/// Header search over the tournament list fetched at startup.
#[derive(Debug, Default)]
pub struct SearchState {
    pub tournaments: Vec<Tournament>,
    /// The list is fetched once per session.
    pub loaded: bool,
    pub query: String,
    pub focused: bool,
    /// Index into the current matches.
    pub highlighted: usize,
}

impl SearchState {
    pub fn load(&mut self, tournaments: Vec<Tournament>) {
        self.tournaments = tournaments;
        self.loaded = true;
        self.highlighted = 0;
    }

    pub fn matches(&self) -> Vec<&Tournament> {
        filter_tournaments(&self.tournaments, &self.query)
    }

    /// The dropdown only opens once something has been typed.
    pub fn dropdown_open(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.highlighted = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.highlighted = 0;
        self.focused = false;
    }

    pub fn highlight_next(&mut self) {
        let max = self.matches().len().saturating_sub(1);
        self.highlighted = (self.highlighted + 1).min(max);
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn highlighted_tournament(&self) -> Option<&Tournament> {
        self.matches().get(self.highlighted).copied()
    }
}

/// Case-insensitive substring match on the tournament name. A blank query
/// matches everything.
pub fn filter_tournaments<'a>(tournaments: &'a [Tournament], query: &str) -> Vec<&'a Tournament> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tournaments.iter().collect();
    }
    tournaments
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Tournament> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Tournament { id: format!("t{i}"), name: n.to_string(), ..Default::default() })
            .collect()
    }

    #[test]
    fn blank_query_matches_everything() {
        let ts = named(&["Valley Cup", "Hoops Open"]);
        assert_eq!(filter_tournaments(&ts, "").len(), 2);
        assert_eq!(filter_tournaments(&ts, "   ").len(), 2);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let ts = named(&["Valley Cup", "Hoops Open", "Open Valley Classic"]);
        let hits: Vec<_> = filter_tournaments(&ts, "VALLEY").iter().map(|t| t.id.clone()).collect();
        assert_eq!(hits, ["t0", "t2"]);
        assert!(filter_tournaments(&ts, "zzz").is_empty());
    }

    #[test]
    fn highlight_stays_within_matches() {
        let mut s = SearchState::default();
        s.load(named(&["Valley Cup", "Valley Open", "Hoops"]));
        s.push_char('v');
        s.highlight_next();
        s.highlight_next();
        s.highlight_next();
        assert_eq!(s.highlighted, 1);
        assert_eq!(s.highlighted_tournament().map(|t| t.name.as_str()), Some("Valley Open"));
        s.push_char('a');
        assert_eq!(s.highlighted, 0);
        s.highlight_prev();
        assert_eq!(s.highlighted, 0);
    }

    #[test]
    fn dropdown_opens_only_with_a_query() {
        let mut s = SearchState::default();
        assert!(!s.dropdown_open());
        s.push_char(' ');
        assert!(!s.dropdown_open());
        s.push_char('x');
        assert!(s.dropdown_open());
        s.clear();
        assert!(!s.dropdown_open());
        assert!(!s.focused);
    }
}
