mod common;

use std::sync::Arc;

use common::{FakeChatClient, GUILD, ROSTER, memory_registry};
use cumplebot_core::{
    errors::BirthdayError,
    models::{Actor, Locale, MemberId},
    roster,
};
use cumplebot_discord_bot::roster::{PublishOutcome, RosterPublisher};
use pretty_assertions::assert_eq;
use serenity::model::id::MessageId;

fn publisher(client: &Arc<FakeChatClient>) -> RosterPublisher {
    RosterPublisher::new(client.clone(), GUILD, ROSTER, Locale::Spanish)
}

#[tokio::test]
async fn first_publish_sends_and_pins() {
    let client = FakeChatClient::guild();

    let outcome = publisher(&client).publish("roster v1").await.unwrap();

    let PublishOutcome::Created(message) = outcome else {
        panic!("expected a new roster message, got {outcome:?}");
    };
    assert_eq!(client.sent_to(ROSTER), vec![(message, "roster v1".to_string())]);
    assert_eq!(client.pinned(ROSTER).len(), 1);
    assert!(client.pinned(ROSTER)[0].own);
}

#[tokio::test]
async fn later_publishes_edit_the_same_slot() {
    let client = FakeChatClient::guild();
    let publisher = publisher(&client);

    let first = publisher.publish("roster v1").await.unwrap();
    let second = publisher.publish("roster v2").await.unwrap();
    let third = publisher.publish("roster v3").await.unwrap();

    let PublishOutcome::Created(slot) = first else {
        panic!("expected a new roster message, got {first:?}");
    };
    assert_eq!(second, PublishOutcome::Edited(slot));
    assert_eq!(third, PublishOutcome::Edited(slot));
    assert_eq!(client.sent_to(ROSTER).len(), 1);
    assert_eq!(client.pinned(ROSTER).len(), 1);
    assert_eq!(
        client.edits_in(ROSTER),
        vec![
            (slot, "roster v2".to_string()),
            (slot, "roster v3".to_string())
        ]
    );
}

#[tokio::test]
async fn pins_from_other_authors_are_left_alone() {
    let client = FakeChatClient::guild();
    client.pin_foreign(ROSTER, MessageId(5));

    let outcome = publisher(&client).publish("roster").await.unwrap();

    assert!(matches!(outcome, PublishOutcome::Created(_)));
    assert!(client.edits_in(ROSTER).is_empty());
    assert_eq!(client.pinned(ROSTER).len(), 2);
}

#[tokio::test]
async fn unresolvable_channel_is_reported_without_writes() {
    let client = FakeChatClient::guild();
    client.remove_channel(ROSTER);

    let result = publisher(&client).publish("roster").await;

    assert!(matches!(result, Err(BirthdayError::ChannelUnavailable(_))));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn refresh_renders_the_registry() {
    let client = FakeChatClient::guild();
    let registry = memory_registry();
    let publisher = publisher(&client);

    publisher.refresh(&registry).await.unwrap();
    registry
        .register(&Actor::member(MemberId(1)), MemberId(1), "Ana", "15-03")
        .await
        .unwrap();
    publisher.refresh(&registry).await.unwrap();

    let sent = client.sent_to(ROSTER);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains(roster::empty_sentinel(Locale::Spanish)));

    let edits = client.edits_in(ROSTER);
    assert_eq!(edits.len(), 1);
    assert_eq!(
        edits[0].1,
        roster::render(&registry.list_all().await.unwrap(), Locale::Spanish)
    );
    assert!(edits[0].1.contains("**Marzo**\n15 Ana"));
}
