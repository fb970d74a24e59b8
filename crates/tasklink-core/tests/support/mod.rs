//! 大きめの facts を決定的に作るヘルパー（scale テストと bench で共有）

use tasklink_core::domain::{
    Agreement, AgreementId, AgreementStatus, Bid, BidId, Offer, OfferId, Task, TaskId, UserId,
};
use tasklink_core::impls::FactSeed;

pub const CUSTOMERS: i64 = 100;
pub const TASKERS: i64 = 400;
pub const TASKS: i64 = 300;
pub const ROWS: i64 = 1000;

/// customer は 1..=100、tasker は 101..=500
///
/// customer 同士はどの関係でも結ばれない。
pub fn large_seed() -> FactSeed {
    let customer_of = |task: i64| UserId::new((task - 1) % CUSTOMERS + 1);
    let task_for = |row: i64| row % TASKS + 1;
    let tasker = |row: i64, stride: i64| UserId::new(CUSTOMERS + 1 + (row * stride) % TASKERS);

    let tasks = (1..=TASKS)
        .map(|i| Task::new(TaskId::new(i), customer_of(i), format!("task {i}")))
        .collect();
    let bids = (0..ROWS)
        .map(|i| {
            let mut bid = Bid::new(
                BidId::new(i + 1),
                TaskId::new(task_for(i)),
                tasker(i, 7),
                25.0,
            );
            bid.withdrawn = i % 5 == 0;
            bid
        })
        .collect();
    let offers = (0..ROWS)
        .map(|i| {
            let task = task_for(i);
            let mut offer = Offer::new(
                OfferId::new(i + 1),
                TaskId::new(task),
                customer_of(task),
                tasker(i, 11),
                30.0,
            );
            offer.accepted = i % 3 == 0;
            offer
        })
        .collect();
    let agreements = (0..ROWS)
        .map(|i| {
            let mut agreement = Agreement::new(
                AgreementId::new(i + 1),
                TaskId::new(task_for(i)),
                tasker(i, 13),
                40.0,
            );
            agreement.status = match i % 3 {
                0 => AgreementStatus::Pending,
                1 => AgreementStatus::Accepted,
                _ => AgreementStatus::Completed,
            };
            agreement
        })
        .collect();

    FactSeed {
        tasks,
        bids,
        offers,
        agreements,
    }
}

/// 取り下げられていない bid で結ばれた (customer, tasker)
pub fn bid_linked_pair(seed: &FactSeed) -> (UserId, UserId) {
    seed.bids
        .iter()
        .filter(|b| !b.withdrawn)
        .find_map(|b| {
            seed.tasks
                .iter()
                .find(|t| t.id == b.task_id)
                .map(|t| (t.customer_id, b.tasker_id))
        })
        .expect("seed has an active bid")
}

/// 2 人とも customer なので何の関係も無い
pub fn unlinked_pair() -> (UserId, UserId) {
    (UserId::new(1), UserId::new(2))
}
