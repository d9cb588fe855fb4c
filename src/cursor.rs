// src/cursor.rs
//
// The single piece of mutable navigation state. Every accepted move locks the
// cursor until the matching `Transition` is finished; requests arriving in
// between are dropped, not queued.

use crate::content::ContentStore;
use crate::i18n::Lang;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    project: usize,
    slide: usize,
    lang: Lang,
    transitioning: bool,
    seq: u64,
}

/// Proof that a transition is in flight. Hand it back to [`Cursor::finish`]
/// once the new content is on screen.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unfinished transition keeps the cursor locked"]
pub struct Transition {
    seq: u64,
}

impl Cursor {
    pub fn new(lang: Lang) -> Self {
        Self {
            project: 0,
            slide: 0,
            lang,
            transitioning: false,
            seq: 0,
        }
    }

    pub fn project(&self) -> usize {
        self.project
    }

    pub fn slide(&self) -> usize {
        self.slide
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Starting position taken from the address bar, before the first render.
    pub fn seed(&mut self, project: Option<usize>, lang: Option<Lang>, store: &ContentStore) {
        if let Some(project) = project.filter(|&p| p < store.len()) {
            self.project = project;
            self.slide = 0;
        }
        if let Some(lang) = lang {
            self.lang = lang;
        }
    }

    pub fn go_to_project(&mut self, store: &ContentStore, index: usize) -> Option<Transition> {
        if self.transitioning || index >= store.len() {
            return None;
        }
        self.project = index;
        self.slide = 0;
        Some(self.begin())
    }

    pub fn go_next(&mut self, store: &ContentStore) -> Option<Transition> {
        if self.transitioning || store.is_empty() {
            return None;
        }
        if self.slide + 1 < store.slide_count(self.project) {
            self.slide += 1;
        } else {
            self.project = (self.project + 1) % store.len();
            self.slide = 0;
        }
        Some(self.begin())
    }

    pub fn go_prev(&mut self, store: &ContentStore) -> Option<Transition> {
        if self.transitioning || store.is_empty() {
            return None;
        }
        if self.slide > 0 {
            self.slide -= 1;
        } else {
            self.project = (self.project + store.len() - 1) % store.len();
            self.slide = store.slide_count(self.project).saturating_sub(1);
        }
        Some(self.begin())
    }

    pub fn change_lang(&mut self, lang: Lang) -> Option<Transition> {
        if self.transitioning || self.lang == lang {
            return None;
        }
        self.lang = lang;
        Some(self.begin())
    }

    /// Release the lock. A stale ticket leaves the cursor untouched.
    pub fn finish(&mut self, transition: Transition) {
        if transition.seq == self.seq {
            self.transitioning = false;
        } else {
            log::warn!(
                "Ignoring stale transition {} (current {})",
                transition.seq,
                self.seq
            );
        }
    }

    fn begin(&mut self) -> Transition {
        self.seq += 1;
        self.transitioning = true;
        Transition { seq: self.seq }
    }

    fn position(&self) -> (usize, usize, Lang) {
        (self.project, self.slide, self.lang)
    }
}

/// Positions compare equal regardless of lock state and ticket history.
impl PartialEq<(usize, usize, Lang)> for Cursor {
    fn eq(&self, other: &(usize, usize, Lang)) -> bool {
        self.position() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::sample_store;
    use crate::content::ContentStore;

    fn step(cursor: &mut Cursor, t: Option<Transition>) {
        cursor.finish(t.expect("move should be accepted"));
    }

    fn next(cursor: &mut Cursor, store: &ContentStore) {
        let t = cursor.go_next(store);
        step(cursor, t);
    }

    fn prev(cursor: &mut Cursor, store: &ContentStore) {
        let t = cursor.go_prev(store);
        step(cursor, t);
    }

    #[test]
    fn test_defaults() {
        let cursor = Cursor::new(Lang::Cat);
        assert_eq!(cursor, (0, 0, Lang::Cat));
        assert!(!cursor.is_transitioning());
    }

    #[test]
    fn test_last_slide_wraps_to_first_project() {
        // about, p1 (2 slides), p2 (3 slides)
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        let t = cursor.go_to_project(&store, 2);
        step(&mut cursor, t);
        next(&mut cursor, &store);
        next(&mut cursor, &store);
        assert_eq!(cursor, (2, 2, Lang::Cat));
        next(&mut cursor, &store);
        assert_eq!(cursor, (0, 0, Lang::Cat));
    }

    #[test]
    fn test_first_slide_wraps_to_last_project() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        prev(&mut cursor, &store);
        assert_eq!(cursor, (2, 2, Lang::Cat));
        prev(&mut cursor, &store);
        assert_eq!(cursor, (2, 1, Lang::Cat));
    }

    #[test]
    fn test_full_project_walk_reaches_next_project() {
        let store = sample_store();
        for project in 0..store.len() {
            let mut cursor = Cursor::new(Lang::En);
            let t = cursor.go_to_project(&store, project);
            step(&mut cursor, t);
            for _ in 0..store.slide_count(project) {
                next(&mut cursor, &store);
            }
            assert_eq!(cursor, ((project + 1) % store.len(), 0, Lang::En));
        }
    }

    #[test]
    fn test_prev_inverts_next() {
        let store = sample_store();
        for project in 0..store.len() {
            for slide in 0..store.slide_count(project) {
                let mut cursor = Cursor::new(Lang::Cat);
                let t = cursor.go_to_project(&store, project);
                step(&mut cursor, t);
                for _ in 0..slide {
                    next(&mut cursor, &store);
                }
                let before = cursor.clone();
                next(&mut cursor, &store);
                prev(&mut cursor, &store);
                assert_eq!(cursor, before.position());

                prev(&mut cursor, &store);
                next(&mut cursor, &store);
                assert_eq!(cursor, before.position());
            }
        }
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        // deterministic pseudo-random walk
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                prev(&mut cursor, &store);
            } else {
                next(&mut cursor, &store);
            }
            assert!(cursor.project() < store.len());
            assert!(cursor.slide() < store.slide_count(cursor.project()));
        }
    }

    #[test]
    fn test_single_project_wraps_onto_itself() {
        let store = ContentStore::from_json(r#"{"solo": [{}, {}]}"#).unwrap();
        let mut cursor = Cursor::new(Lang::Cat);
        next(&mut cursor, &store);
        next(&mut cursor, &store);
        assert_eq!(cursor, (0, 0, Lang::Cat));
        prev(&mut cursor, &store);
        assert_eq!(cursor, (0, 1, Lang::Cat));
    }

    #[test]
    fn test_moves_rejected_while_transitioning() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        let pending = cursor.go_next(&store).unwrap();
        let locked = cursor.clone();

        assert!(cursor.go_next(&store).is_none());
        assert!(cursor.go_prev(&store).is_none());
        assert!(cursor.go_to_project(&store, 2).is_none());
        assert!(cursor.change_lang(Lang::En).is_none());
        assert_eq!(cursor, locked);

        cursor.finish(pending);
        assert!(!cursor.is_transitioning());
        assert!(cursor.go_next(&store).is_some());
    }

    #[test]
    fn test_stale_ticket_keeps_lock() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        let first = cursor.go_next(&store).unwrap();
        cursor.finish(first);
        let _second = cursor.go_next(&store).unwrap();
        cursor.finish(Transition { seq: 1 });
        assert!(cursor.is_transitioning());
    }

    #[test]
    fn test_change_lang() {
        let mut cursor = Cursor::new(Lang::Cat);
        assert!(cursor.change_lang(Lang::Cat).is_none());
        assert!(!cursor.is_transitioning());

        let t = cursor.change_lang(Lang::En);
        step(&mut cursor, t);
        assert_eq!(cursor, (0, 0, Lang::En));
    }

    #[test]
    fn test_go_to_project_out_of_range() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        assert!(cursor.go_to_project(&store, 3).is_none());
        assert!(!cursor.is_transitioning());
    }

    #[test]
    fn test_seed() {
        let store = sample_store();
        let mut cursor = Cursor::new(Lang::Cat);
        cursor.seed(Some(1), Some(Lang::En), &store);
        assert_eq!(cursor, (1, 0, Lang::En));

        cursor.seed(Some(42), None, &store);
        assert_eq!(cursor, (1, 0, Lang::En));
        assert!(!cursor.is_transitioning());
    }
}
