//! Reordering of an owner's links.
//!
//! A proposed order is a client-supplied list of link ids. It is filtered
//! down to the caller's own existing links, deduplicated keeping the first
//! occurrence, and each surviving link is given its position as its new
//! order key. Links missing from the proposal keep whatever key they had.
//!
//! Writes are applied one record at a time. A link deleted between the
//! filter pass and its write is skipped rather than failing the whole
//! reorder, so a concurrent reorder or delete can leave a mix of old and
//! new positions; the result is always a valid ordering.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::link_store::map_link_repository_error;
use crate::domain::ports::LinkRepository;
use crate::domain::{Error, LinkId, OrderKey, OwnerId, is_owned_by};

/// Summary of a reorder pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Records whose key was rewritten.
    pub applied: usize,
    /// Records that already held their target key.
    pub unchanged: usize,
    /// Ids dropped as duplicate, unknown, foreign, or deleted mid-pass.
    pub dropped: usize,
}

/// Applies proposed display orders.
#[derive(Clone)]
pub struct OrderingEngine<L> {
    repo: Arc<L>,
}

impl<L> OrderingEngine<L> {
    /// Create an engine over the given repository.
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }
}

fn dedupe_first_wins(proposed: Vec<LinkId>) -> (Vec<LinkId>, usize) {
    let mut seen = HashSet::with_capacity(proposed.len());
    let total = proposed.len();
    let unique: Vec<LinkId> = proposed
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();
    let duplicates = total - unique.len();
    (unique, duplicates)
}

impl<L> OrderingEngine<L>
where
    L: LinkRepository,
{
    /// Reorder `owner_id`'s links to follow `proposed`.
    pub async fn reorder(
        &self,
        owner_id: &OwnerId,
        proposed: Vec<LinkId>,
    ) -> Result<ReorderOutcome, Error> {
        let (unique, duplicates) = dedupe_first_wins(proposed);
        let mut outcome = ReorderOutcome {
            dropped: duplicates,
            ..ReorderOutcome::default()
        };

        let mut targets = Vec::with_capacity(unique.len());
        for id in unique {
            let found = self
                .repo
                .find_by_id(&id)
                .await
                .map_err(map_link_repository_error)?;
            match found {
                Some(record) if is_owned_by(&record, owner_id) => targets.push(record),
                Some(_) => {
                    warn!(owner_id = %owner_id, link_id = %id, "dropping foreign link from reorder");
                    outcome.dropped += 1;
                }
                None => {
                    debug!(owner_id = %owner_id, link_id = %id, "dropping unknown link from reorder");
                    outcome.dropped += 1;
                }
            }
        }

        for (position, record) in targets.iter().enumerate() {
            let key = OrderKey::index(position);
            if record.order == key {
                outcome.unchanged += 1;
                continue;
            }
            let written = self
                .repo
                .set_order(owner_id, &record.id, key)
                .await
                .map_err(map_link_repository_error)?;
            if written {
                outcome.applied += 1;
            } else {
                debug!(owner_id = %owner_id, link_id = %record.id, "link vanished during reorder");
                outcome.dropped += 1;
            }
        }

        info!(
            owner_id = %owner_id,
            applied = outcome.applied,
            unchanged = outcome.unchanged,
            dropped = outcome.dropped,
            "links reordered"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{LinkRepositoryError, MockLinkRepository};
    use crate::domain::{LinkRecord, LinkTitle, LinkUrl};
    use mockall::Sequence;
    use rstest::rstest;

    fn owner(raw: &str) -> OwnerId {
        OwnerId::new(raw).expect("valid owner id")
    }

    fn id(raw: &str) -> LinkId {
        LinkId::new(raw).expect("valid id")
    }

    fn record(raw_id: &str, owner_id: &str, order: i64) -> LinkRecord {
        LinkRecord {
            id: id(raw_id),
            owner_id: owner(owner_id),
            title: LinkTitle::new("Title").expect("valid title"),
            url: LinkUrl::new("https://example.com").expect("valid url"),
            order: OrderKey::new(order),
        }
    }

    fn repo_with(records: Vec<LinkRecord>) -> MockLinkRepository {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id().returning(move |wanted| {
            Ok(records.iter().find(|record| &record.id == wanted).cloned())
        });
        repo
    }

    #[rstest]
    fn dedupe_keeps_first_occurrence() {
        let (unique, duplicates) = dedupe_first_wins(vec![id("b"), id("a"), id("b"), id("c")]);
        assert_eq!(unique, vec![id("b"), id("a"), id("c")]);
        assert_eq!(duplicates, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_positions_in_proposed_order() {
        let mut repo = repo_with(vec![
            record("a", "u1", 100),
            record("b", "u1", 200),
            record("c", "u1", 300),
        ]);
        let mut seq = Sequence::new();
        for (expected_id, expected_key) in [("c", 0), ("a", 1), ("b", 2)] {
            repo.expect_set_order()
                .withf(move |_, link_id, key| {
                    link_id.as_ref() == expected_id && key.value() == expected_key
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| Ok(true));
        }

        let outcome = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), vec![id("c"), id("a"), id("b")])
            .await
            .expect("reorder succeeds");
        assert_eq!(outcome.applied, 3);
        assert_eq!(outcome.dropped, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn drops_unknown_and_foreign_ids_without_failing() {
        let mut repo = repo_with(vec![record("a", "u1", 100), record("x", "u2", 5)]);
        repo.expect_set_order()
            .withf(|_, link_id, key| link_id.as_ref() == "a" && key.value() == 0)
            .times(1)
            .returning(|_, _, _| Ok(true));

        let outcome = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), vec![id("deleted-id"), id("x"), id("a")])
            .await
            .expect("reorder succeeds");
        assert_eq!(
            outcome,
            ReorderOutcome {
                applied: 1,
                unchanged: 0,
                dropped: 2,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn skips_records_already_in_place() {
        let mut repo = repo_with(vec![record("a", "u1", 0), record("b", "u1", 7)]);
        repo.expect_set_order()
            .withf(|_, link_id, _| link_id.as_ref() == "b")
            .times(1)
            .returning(|_, _, _| Ok(true));

        let outcome = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), vec![id("a"), id("b")])
            .await
            .expect("reorder succeeds");
        assert_eq!(outcome.unchanged, 1);
        assert_eq!(outcome.applied, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn link_deleted_mid_pass_is_dropped() {
        let mut repo = repo_with(vec![record("a", "u1", 10), record("b", "u1", 20)]);
        repo.expect_set_order()
            .withf(|_, link_id, _| link_id.as_ref() == "a")
            .returning(|_, _, _| Ok(false));
        repo.expect_set_order()
            .withf(|_, link_id, _| link_id.as_ref() == "b")
            .returning(|_, _, _| Ok(true));

        let outcome = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), vec![id("a"), id("b")])
            .await
            .expect("reorder succeeds");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.dropped, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_proposal_writes_nothing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_set_order().never();

        let outcome = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), Vec::new())
            .await
            .expect("reorder succeeds");
        assert_eq!(outcome, ReorderOutcome::default());
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_failure_aborts_reorder() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(|_| Err(LinkRepositoryError::connection("refused")));
        repo.expect_set_order().never();

        let error = OrderingEngine::new(Arc::new(repo))
            .reorder(&owner("u1"), vec![id("a")])
            .await
            .expect_err("lookup failed");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
