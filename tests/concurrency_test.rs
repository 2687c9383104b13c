//! Overlapping publish calls on one draft.

mod common;

use std::sync::Arc;

use common::*;
use draft_publish::config::PublishConfig;
use draft_publish::models::{DraftEntity, ParentId};
use draft_publish::orchestration::PublishWorkflow;

#[tokio::test]
async fn unguarded_publishes_interleave_and_double_save() {
    let timeline = Timeline::new();
    let draft = DraftEntity::new(ParentId(1));
    record_events(&draft, &timeline);

    let persistence = Arc::new(ScriptedPersistence::succeeding(&timeline).yielding());
    let workflow = PublishWorkflow::new(
        Arc::new(ScriptedResolver::new(ResolveOutcome::Ready, &timeline).yielding()),
        persistence.clone(),
    );
    let counts = CallbackCounts::with_timeline(&timeline);

    futures::join!(
        workflow.publish_with_context(&draft, Some(counting_options()), Arc::clone(&counts)),
        workflow.publish_with_context(&draft, Some(counting_options()), Arc::clone(&counts)),
    );

    let events = timeline.events();
    // The second call announces itself before the first one finishes
    assert_eq!(&events[..2], ["publishing", "publishing"]);
    assert_eq!(timeline.count("event:published"), 2);
    assert_eq!(persistence.calls(), 2);
    assert_eq!(counts.success(), 2);
    assert!(!draft.is_publish_in_flight());
}

#[tokio::test]
async fn single_flight_rejects_overlapping_publish() {
    let timeline = Timeline::new();
    let draft = DraftEntity::new(ParentId(1));
    record_events(&draft, &timeline);

    let persistence = Arc::new(ScriptedPersistence::succeeding(&timeline).yielding());
    let workflow = PublishWorkflow::with_config(
        Arc::new(ScriptedResolver::new(ResolveOutcome::Ready, &timeline).yielding()),
        persistence.clone(),
        PublishConfig {
            single_flight: true,
            ..PublishConfig::default()
        },
    );
    let counts = CallbackCounts::with_timeline(&timeline);

    futures::join!(
        workflow.publish_with_context(&draft, Some(counting_options()), Arc::clone(&counts)),
        workflow.publish_with_context(&draft, Some(counting_options()), Arc::clone(&counts)),
    );

    assert_eq!(timeline.events(), vec!["publishing", "published"]);
    assert_eq!(persistence.calls(), 1);
    assert_eq!(counts.success(), 1);
    assert_eq!(counts.error(), 1);

    // The flag is released once the winning call finishes
    assert!(!draft.is_publish_in_flight());
    workflow
        .publish_with_context(&draft, Some(counting_options()), Arc::clone(&counts))
        .await;
    assert_eq!(counts.success(), 2);
    assert_eq!(persistence.calls(), 2);
}

#[tokio::test]
async fn single_flight_releases_flag_after_failure() {
    let timeline = Timeline::new();
    let draft = DraftEntity::new(ParentId(1));

    let workflow = PublishWorkflow::with_config(
        Arc::new(ScriptedResolver::new(
            ResolveOutcome::Fail(lookup_error()),
            &timeline,
        )),
        Arc::new(ScriptedPersistence::succeeding(&timeline)),
        PublishConfig {
            single_flight: true,
            ..PublishConfig::default()
        },
    );

    workflow.publish(&draft, None).await;
    assert!(!draft.is_publish_in_flight());
    assert!(draft.try_begin_publish().is_some());
}
