//! Tests for the monthly lottery service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockall::Sequence;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ColleagueId;
use crate::domain::ports::{Bonus, MockRewardsApi, RewardsApiError};

struct FixtureClock {
    local_now: DateTime<Local>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.local_now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local_now.with_timezone(&Utc)
    }
}

fn clock_at(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
    let local_now = Local
        .with_ymd_and_hms(year, month, day, 18, 0, 0)
        .single()
        .expect("unambiguous fixture timestamp");
    Arc::new(FixtureClock { local_now })
}

fn month_end() -> Arc<dyn Clock> {
    clock_at(2024, 1, 31)
}

#[fixture]
fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(31)
}

fn colleague(username: &str, user_mode: &str) -> Colleague {
    Colleague {
        id: ColleagueId::new(format!("id-{username}")),
        display_name: username.to_uppercase(),
        username: username.to_owned(),
        email: format!("{username}@example.test"),
        giving_balance: None,
        user_mode: user_mode.to_owned(),
    }
}

fn caller(giving_balance: Option<u64>) -> Colleague {
    Colleague {
        giving_balance,
        ..colleague("me", "normal")
    }
}

fn echo(request: &BonusRequest) -> Result<Bonus, RewardsApiError> {
    Ok(Bonus {
        reason: request.reason.clone(),
    })
}

fn make_service(
    api: MockRewardsApi,
    clock: Arc<dyn Clock>,
    rules: LotteryRules,
) -> MonthlyLotteryService<MockRewardsApi> {
    MonthlyLotteryService::new(Arc::new(api), clock, rules)
}

fn completed(outcome: RunOutcome) -> RunReport {
    match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::Skipped { days_left } => panic!("run skipped with {days_left} days left"),
    }
}

#[rstest]
#[tokio::test]
async fn skips_without_calling_the_api_before_month_end(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self().times(0);
    api.expect_fetch_roster().times(0);
    api.expect_create_bonus().times(0);

    let service = make_service(api, clock_at(2024, 1, 19), LotteryRules::default());
    let outcome = service.run_with_rng(&mut rng).await.expect("skip is not an error");

    assert_eq!(outcome, RunOutcome::Skipped { days_left: 12 });
}

#[rstest]
#[tokio::test]
async fn distributes_one_hundred_points_over_three_colleagues(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .times(1)
        .return_once(|| Ok(caller(Some(100))));
    api.expect_fetch_roster().times(1).return_once(|| {
        Ok(vec![
            colleague("ada", "normal"),
            caller(None),
            colleague("grace", "normal"),
            colleague("bot", "benefits_only"),
            colleague("linus", "normal"),
        ])
    });

    let mut sequence = Sequence::new();
    for (prize, place) in [(50, "1ste"), (33, "2de"), (17, "3de")] {
        let prefix = format!("+{prize} @");
        let ordinal = format!("de {place} prijs");
        api.expect_create_bonus()
            .times(1)
            .in_sequence(&mut sequence)
            .withf(move |request| {
                request.reason.starts_with(&prefix) && request.reason.contains(&ordinal)
            })
            .returning(echo);
    }

    let service = make_service(api, month_end(), LotteryRules::default());
    let report = completed(service.run_with_rng(&mut rng).await.expect("run succeeds"));

    assert_eq!(report.initial_balance, 100);
    assert_eq!(report.total_awarded(), 100);
    assert_eq!(report.remaining_balance, 0);
    let mut winners: Vec<_> = report.awards.iter().map(|a| a.username.as_str()).collect();
    winners.sort_unstable();
    assert_eq!(winners, vec!["ada", "grace", "linus"]);
}

#[rstest]
#[tokio::test]
async fn award_messages_use_the_configured_lottery_name(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .return_once(|| Ok(caller(Some(10))));
    api.expect_fetch_roster()
        .return_once(|| Ok(vec![colleague("ada", "normal")]));
    api.expect_create_bonus()
        .times(1)
        .withf(|request| {
            request.reason == "+10 @ada omdat hij/zij de 1ste prijs won in de testloterij! #winnaar"
        })
        .returning(echo);

    let rules = LotteryRules {
        lottery_name: "de testloterij".to_owned(),
        ..LotteryRules::default()
    };
    let service = make_service(api, month_end(), rules);
    let report = completed(service.run_with_rng(&mut rng).await.expect("run succeeds"));

    assert_eq!(report.awards.len(), 1);
    assert_eq!(report.awards[0].place, 1);
}

#[rstest]
#[tokio::test]
async fn fails_when_the_caller_has_no_giving_balance(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .times(1)
        .return_once(|| Ok(caller(None)));
    api.expect_fetch_roster().times(0);
    api.expect_create_bonus().times(0);

    let service = make_service(api, month_end(), LotteryRules::default());
    let err = service
        .run_with_rng(&mut rng)
        .await
        .expect_err("missing balance must fail");

    assert_eq!(err, LotteryError::MissingGivingBalance);
}

#[rstest]
#[tokio::test]
async fn fetch_failures_abort_before_any_award(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .times(1)
        .return_once(|| Ok(caller(Some(100))));
    api.expect_fetch_roster()
        .times(1)
        .return_once(|| Err(RewardsApiError::unauthorized("status 401")));
    api.expect_create_bonus().times(0);

    let service = make_service(api, month_end(), LotteryRules::default());
    let err = service
        .run_with_rng(&mut rng)
        .await
        .expect_err("roster failure must abort");

    assert!(matches!(
        err,
        LotteryError::FetchRoster(RewardsApiError::Unauthorized { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn award_failure_stops_the_remaining_awards(mut rng: ChaCha8Rng) {
    let calls = Arc::new(AtomicUsize::new(0));
    let observed = Arc::clone(&calls);

    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .return_once(|| Ok(caller(Some(100))));
    api.expect_fetch_roster().return_once(|| {
        Ok(vec![
            colleague("ada", "normal"),
            colleague("grace", "normal"),
            colleague("linus", "normal"),
            colleague("ken", "normal"),
        ])
    });
    api.expect_create_bonus().times(2).returning(move |request| {
        if observed.fetch_add(1, Ordering::SeqCst) == 0 {
            echo(request)
        } else {
            Err(RewardsApiError::transport("connection reset"))
        }
    });

    let service = make_service(api, month_end(), LotteryRules::default());
    let err = service
        .run_with_rng(&mut rng)
        .await
        .expect_err("second award must fail");

    assert!(matches!(err, LotteryError::Award { place: 2, .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn empty_pool_keeps_the_whole_balance(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .return_once(|| Ok(caller(Some(75))));
    api.expect_fetch_roster()
        .return_once(|| Ok(vec![caller(None), colleague("bot", "observer")]));
    api.expect_create_bonus().times(0);

    let service = make_service(api, month_end(), LotteryRules::default());
    let report = completed(service.run_with_rng(&mut rng).await.expect("run succeeds"));

    assert!(report.awards.is_empty());
    assert_eq!(report.remaining_balance, 75);
}

#[rstest]
#[tokio::test]
async fn linear_decay_places_preferred_colleagues_in_the_final_tier(mut rng: ChaCha8Rng) {
    let roster: Vec<_> = ["a", "b", "c", "d", "e", "f", "g", "h", "favourite"]
        .into_iter()
        .map(|name| colleague(name, "normal"))
        .collect();

    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .return_once(|| Ok(caller(Some(1_000))));
    api.expect_fetch_roster().return_once(move || Ok(roster));
    api.expect_create_bonus().times(9).returning(echo);

    let rules = LotteryRules {
        preferred: PreferredUsernames::parse("favourite"),
        ..LotteryRules::default()
    };
    let service = make_service(api, month_end(), rules);
    let report = completed(service.run_with_rng(&mut rng).await.expect("run succeeds"));

    let favourite = report
        .awards
        .iter()
        .find(|award| award.username == "favourite")
        .expect("preferred colleague wins");
    assert!(favourite.place >= 6, "placed {}", favourite.place);
    assert!(report.total_awarded() <= 1_000);
}

#[rstest]
#[tokio::test]
async fn lottery_policy_places_preferred_colleagues_last(mut rng: ChaCha8Rng) {
    let mut api = MockRewardsApi::new();
    api.expect_fetch_self()
        .return_once(|| Ok(caller(Some(100))));
    api.expect_fetch_roster().return_once(|| {
        Ok(vec![
            colleague("unlucky", "normal"),
            colleague("ada", "normal"),
            colleague("grace", "normal"),
        ])
    });
    api.expect_create_bonus().times(3).returning(echo);

    let rules = LotteryRules {
        policy: AllocationPolicy::Lottery,
        preferred: PreferredUsernames::parse("unlucky"),
        ..LotteryRules::default()
    };
    let service = make_service(api, month_end(), rules);
    let report = completed(service.run_with_rng(&mut rng).await.expect("run succeeds"));

    let prizes: Vec<_> = report.awards.iter().map(|award| award.prize).collect();
    assert_eq!(prizes, vec![34, 22, 15]);
    assert_eq!(report.awards[2].username, "unlucky");
    assert_eq!(report.remaining_balance, 29);
}
