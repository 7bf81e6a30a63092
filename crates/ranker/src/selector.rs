use crate::error::SelectError;
use crate::model::{RawContact, ScoredCandidate, SelectionWindow};
use crate::name::resolve;
use crate::scorer::TitleScorer;
use crate::source::ContactSource;

/// Resolve names and rank every raw contact. Nothing is discarded here.
pub fn score_candidates(raw: &[RawContact], scorer: &TitleScorer<'_>) -> Vec<ScoredCandidate> {
    raw.iter()
        .map(|c| {
            let name = resolve(c.first_name.as_deref(), c.last_name.as_deref(), c.display_name());
            ScoredCandidate {
                id: c.id.clone(),
                first: name.first,
                last: name.last,
                full: name.full,
                title: c.title.clone().unwrap_or_default(),
                email: c.email.clone().filter(|e| !e.trim().is_empty()),
                rank: scorer.score(c.title.as_deref()),
            }
        })
        .collect()
}

/// Order ranked candidates and apply the rotation window.
///
/// Unranked candidates are dropped. The sort is stable, so candidates with
/// equal rank keep the upstream relevance order.
pub fn select_scored(
    candidates: Vec<ScoredCandidate>,
    window: SelectionWindow,
) -> Result<Vec<ScoredCandidate>, SelectError> {
    let mut ranked: Vec<ScoredCandidate> =
        candidates.into_iter().filter(|c| c.rank.is_ranked()).collect();
    if ranked.is_empty() {
        return Err(SelectError::NoRankedMatch);
    }

    ranked.sort_by_key(|c| c.rank);

    if window.skip > 0 {
        if window.skip >= ranked.len() {
            return Err(SelectError::ExhaustedBySkip {
                skip: window.skip,
                available: ranked.len(),
            });
        }
        ranked = ranked.split_off(window.skip);
    }

    ranked.truncate(window.limit);
    Ok(ranked)
}

/// Score `raw`, then sort and window the ranked candidates.
pub fn select(
    raw: &[RawContact],
    scorer: &TitleScorer<'_>,
    window: SelectionWindow,
) -> Result<Vec<ScoredCandidate>, SelectError> {
    select_scored(score_candidates(raw, scorer), window)
}

/// Fill in missing emails through the reveal collaborator.
///
/// Only candidates without an email and with a known id are looked up.
/// Revealed name data replaces the candidate's name only while its last name
/// is still empty. Failures leave the candidate untouched.
pub fn enrich<S: ContactSource + ?Sized>(candidates: &mut [ScoredCandidate], source: &S) {
    for cand in candidates.iter_mut() {
        if cand.email.is_some() {
            continue;
        }
        let Some(id) = cand.id.as_deref() else {
            continue;
        };

        let revealed = match source.reveal(id) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("reveal failed for {id}: {e}");
                continue;
            }
        };

        if let Some(email) = revealed.email.filter(|e| !e.trim().is_empty()) {
            cand.email = Some(email);
        }

        let name = resolve(
            revealed.first_name.as_deref(),
            revealed.last_name.as_deref(),
            revealed.display_name.as_deref(),
        );
        if cand.last.is_empty() && !name.last.is_empty() {
            cand.first = name.first;
            cand.last = name.last;
            cand.full = name.full;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::error::SourceError;
    use crate::model::{Rank, RevealedContact};
    use crate::taxonomy::{RolePriorityList, RoleTaxonomy};

    fn cand(id: &str, rank: Rank) -> ScoredCandidate {
        ScoredCandidate {
            id: Some(id.into()),
            first: id.to_uppercase(),
            last: String::new(),
            full: id.to_uppercase(),
            title: String::new(),
            email: None,
            rank,
        }
    }

    fn ids(out: &[ScoredCandidate]) -> Vec<&str> {
        out.iter().map(|c| c.id.as_deref().unwrap()).collect()
    }

    fn five() -> Vec<ScoredCandidate> {
        vec![
            cand("e", Rank::Ranked(4)),
            cand("a", Rank::Ranked(0)),
            cand("d", Rank::Ranked(3)),
            cand("b", Rank::Ranked(1)),
            cand("c", Rank::Ranked(2)),
        ]
    }

    #[test]
    fn skip_then_limit() {
        let out = select_scored(five(), SelectionWindow::new(2, 2)).unwrap();
        assert_eq!(ids(&out), vec!["c", "d"]);
    }

    #[test]
    fn skip_past_end_is_exhausted() {
        let err = select_scored(five(), SelectionWindow::new(10, 2)).unwrap_err();
        assert_eq!(err, SelectError::ExhaustedBySkip { skip: 10, available: 5 });
        let err = select_scored(five(), SelectionWindow::new(5, 2)).unwrap_err();
        assert_eq!(err.to_string(), "Skipped all available contacts");
    }

    #[test]
    fn skip_leaves_partial_tail() {
        let out = select_scored(five(), SelectionWindow::new(4, 3)).unwrap();
        assert_eq!(ids(&out), vec!["e"]);
    }

    #[test]
    fn unranked_never_selected() {
        let input = vec![cand("x", Rank::Unranked), cand("y", Rank::Ranked(1))];
        let out = select_scored(input, SelectionWindow::new(0, 5)).unwrap();
        assert_eq!(ids(&out), vec!["y"]);

        let input = vec![cand("x", Rank::Unranked)];
        assert_eq!(
            select_scored(input, SelectionWindow::new(0, 5)).unwrap_err(),
            SelectError::NoRankedMatch
        );
        assert_eq!(
            select_scored(Vec::new(), SelectionWindow::new(0, 5)).unwrap_err(),
            SelectError::NoRankedMatch
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            cand("late", Rank::Ranked(1)),
            cand("first", Rank::Ranked(0)),
            cand("second", Rank::Ranked(0)),
            cand("third", Rank::Ranked(0)),
        ];
        let out = select_scored(input, SelectionWindow::new(0, 10)).unwrap();
        assert_eq!(ids(&out), vec!["first", "second", "third", "late"]);
    }

    #[test]
    fn zero_limit_is_empty_not_error() {
        let out = select_scored(five(), SelectionWindow::new(0, 0)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn score_candidates_resolves_names_and_drops_blank_email() {
        let tax = RoleTaxonomy::builtin().unwrap();
        let list = RolePriorityList::new(["CEO"], &tax).unwrap();
        let scorer = TitleScorer::new(&tax, &list);
        let raw = vec![RawContact {
            id: Some("p1".into()),
            name: Some("Grace Brewster Hopper".into()),
            title: Some("CEO".into()),
            email: Some("  ".into()),
            ..Default::default()
        }];
        let out = score_candidates(&raw, &scorer);
        assert_eq!(out[0].first, "Grace Brewster");
        assert_eq!(out[0].last, "Hopper");
        assert_eq!(out[0].email, None);
        assert_eq!(out[0].rank, Rank::Ranked(0));
    }

    // ── Reveal enrichment ───────────────────────────────────────────

    struct FakeReveal {
        answers: HashMap<String, Result<RevealedContact, SourceError>>,
        calls: RefCell<Vec<String>>,
    }

    impl ContactSource for FakeReveal {
        fn search(&self, _: &str, _: &[String]) -> Result<Vec<RawContact>, SourceError> {
            Ok(Vec::new())
        }

        fn reveal(&self, id: &str) -> Result<RevealedContact, SourceError> {
            self.calls.borrow_mut().push(id.to_string());
            self.answers
                .get(id)
                .cloned()
                .unwrap_or(Err(SourceError::Http { status: 404, message: "no match".into() }))
        }
    }

    #[test]
    fn enrich_fills_email_and_backfills_missing_last_name() {
        let mut answers = HashMap::new();
        answers.insert(
            "a".to_string(),
            Ok(RevealedContact {
                email: Some("a@example.com".into()),
                first_name: Some("Alice".into()),
                last_name: Some("Archer".into()),
                display_name: None,
            }),
        );
        let source = FakeReveal { answers, calls: RefCell::new(Vec::new()) };

        let mut cands = vec![cand("a", Rank::Ranked(0))];
        enrich(&mut cands, &source);
        assert_eq!(cands[0].email.as_deref(), Some("a@example.com"));
        assert_eq!(cands[0].first, "Alice");
        assert_eq!(cands[0].last, "Archer");
        assert_eq!(cands[0].full, "Alice Archer");
    }

    #[test]
    fn enrich_backfills_from_display_name_alone() {
        let mut answers = HashMap::new();
        answers.insert(
            "l".to_string(),
            Ok(RevealedContact {
                email: Some("ann@example.com".into()),
                first_name: None,
                last_name: None,
                display_name: Some("Ann Lee".into()),
            }),
        );
        let source = FakeReveal { answers, calls: RefCell::new(Vec::new()) };

        let mut cands = vec![cand("l", Rank::Ranked(0))];
        enrich(&mut cands, &source);
        assert_eq!(cands[0].first, "Ann");
        assert_eq!(cands[0].last, "Lee");
        assert_eq!(cands[0].full, "Ann Lee");
        assert_eq!(cands[0].email.as_deref(), Some("ann@example.com"));
    }

    #[test]
    fn enrich_keeps_existing_last_name() {
        let mut answers = HashMap::new();
        answers.insert(
            "b".to_string(),
            Ok(RevealedContact {
                email: None,
                first_name: Some("Robert".into()),
                last_name: Some("Other".into()),
                display_name: None,
            }),
        );
        let source = FakeReveal { answers, calls: RefCell::new(Vec::new()) };

        let mut c = cand("b", Rank::Ranked(0));
        c.first = "Bob".into();
        c.last = "Baker".into();
        c.full = "Bob Baker".into();
        let mut cands = vec![c];
        enrich(&mut cands, &source);
        assert_eq!(cands[0].full, "Bob Baker");
        assert_eq!(cands[0].email, None);
    }

    #[test]
    fn enrich_skips_known_emails_and_survives_failures() {
        let source = FakeReveal { answers: HashMap::new(), calls: RefCell::new(Vec::new()) };

        let mut known = cand("k", Rank::Ranked(0));
        known.email = Some("k@example.com".into());
        let mut anonymous = cand("n", Rank::Ranked(0));
        anonymous.id = None;
        let failing = cand("f", Rank::Ranked(1));

        let mut cands = vec![known, anonymous, failing.clone()];
        enrich(&mut cands, &source);

        assert_eq!(*source.calls.borrow(), vec!["f".to_string()]);
        assert_eq!(cands[2], failing);
    }
}
