//! 関係が多いときも 1 回の判定が 100ms 以内に収まること
//!
//! task 300 件に bid / offer / agreement を 1000 件ずつ載せる。

mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rstest::rstest;
use tasklink_core::RelationshipAuthorizer;
use tasklink_core::domain::UserId;
use tasklink_core::impls::InMemoryFacts;

use support::{bid_linked_pair, large_seed, unlinked_pair};

const BUDGET: Duration = Duration::from_millis(100);

fn large_authorizer() -> (RelationshipAuthorizer<InMemoryFacts>, (UserId, UserId)) {
    let seed = large_seed();
    let linked = bid_linked_pair(&seed);
    let facts = Arc::new(InMemoryFacts::from_seed(seed));
    (RelationshipAuthorizer::new(facts), linked)
}

#[rstest]
#[case::linked(true)]
#[case::unlinked(false)]
#[tokio::test]
async fn can_message_stays_within_budget(#[case] linked: bool) {
    let (auth, linked_pair) = large_authorizer();
    let (a, b) = if linked { linked_pair } else { unlinked_pair() };

    for (sender, receiver) in [(a, b), (b, a)] {
        let started = Instant::now();
        let allowed = auth.can_message(sender, receiver).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(allowed, linked);
        assert!(
            elapsed < BUDGET,
            "can_message({sender}, {receiver}) took {elapsed:?}"
        );
    }
}

#[rstest]
#[case::customer(true)]
#[case::tasker(false)]
#[tokio::test]
async fn messageable_users_stays_within_budget(#[case] as_customer: bool) {
    let (auth, (customer, tasker)) = large_authorizer();
    let (user, expected) = if as_customer {
        (customer, tasker)
    } else {
        (tasker, customer)
    };

    let started = Instant::now();
    let reachable = auth.messageable_users(user).await.unwrap();
    let elapsed = started.elapsed();

    assert!(reachable.contains(&expected));
    assert!(!reachable.contains(&user));
    assert!(elapsed < BUDGET, "messageable_users({user}) took {elapsed:?}");
}

#[tokio::test]
async fn customers_stay_unreachable_from_each_other() {
    let (auth, _) = large_authorizer();
    let (a, b) = unlinked_pair();

    let started = Instant::now();
    let reachable = auth.messageable_users(a).await.unwrap();
    assert!(started.elapsed() < BUDGET);
    assert!(!reachable.contains(&b));
    assert!(!reachable.is_empty());
}
