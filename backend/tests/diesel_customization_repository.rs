//! `DieselCustomizationRepository` against embedded PostgreSQL.

use linkbio::domain::ports::CustomizationRepository;
use linkbio::domain::{AccentColor, OwnerId, ProfileCustomization, ProfileDescription};
use linkbio::outbound::persistence::DieselCustomizationRepository;
use rstest::{fixture, rstest};

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::PgContext;

struct CustomizationContext {
    pg: PgContext,
    repository: DieselCustomizationRepository,
}

#[fixture]
fn repo_context() -> Option<CustomizationContext> {
    let pg = PgContext::setup()?;
    let repository = DieselCustomizationRepository::new(pg.pool.clone());
    Some(CustomizationContext { pg, repository })
}

fn owner(raw: &str) -> OwnerId {
    OwnerId::new(raw).expect("valid owner id")
}

fn settings(
    owner_id: &str,
    description: Option<&str>,
    accent: Option<&str>,
) -> ProfileCustomization {
    ProfileCustomization {
        owner_id: owner(owner_id),
        description: description
            .map(|text| ProfileDescription::new(text).expect("valid description")),
        accent_color: accent.map(|hex| AccentColor::new(hex).expect("valid colour")),
    }
}

#[rstest]
fn unsaved_owner_has_no_record(repo_context: Option<CustomizationContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unsaved_owner_has_no_record skipped");
        return;
    };
    let repository = &context.repository;

    let found = context
        .pg
        .runtime
        .block_on(async { repository.find_by_owner(&owner("alice")).await })
        .expect("find");

    assert_eq!(found, None);
}

#[rstest]
fn upsert_replaces_every_field(repo_context: Option<CustomizationContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_replaces_every_field skipped");
        return;
    };
    let repository = &context.repository;
    let first = settings("alice", Some("Writer and maker"), Some("#0f172a"));
    let second = settings("alice", None, Some("#ff6600"));

    let (after_first, after_second, other) = context.pg.runtime.block_on(async {
        repository.upsert(&first).await.expect("insert");
        let after_first = repository.find_by_owner(&owner("alice")).await.expect("find");
        repository.upsert(&second).await.expect("update");
        let after_second = repository.find_by_owner(&owner("alice")).await.expect("find");
        let other = repository.find_by_owner(&owner("bob")).await.expect("find");
        (after_first, after_second, other)
    });

    assert_eq!(after_first, Some(first));
    assert_eq!(after_second, Some(second));
    assert_eq!(other, None);
}
