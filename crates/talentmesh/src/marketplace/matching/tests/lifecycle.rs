use chrono::Duration;

use super::common::{
    apply_time, build_service, candidate, employer, open_job, seed_verified_credential, snapshot,
    TestMatchingService,
};
use crate::marketplace::matching::domain::{Match, MatchStatus};
use crate::marketplace::matching::service::MatchingError;
use crate::marketplace::ActorId;

fn matched_pair() -> (TestMatchingService, Match) {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);
    let outcome = service
        .apply(&job.id, snapshot(4), apply_time())
        .expect("application matches");
    let matched = outcome.matched.expect("match created");
    (service, matched)
}

#[test]
fn employer_accepts_then_either_party_chats_and_closes() {
    let (service, matched) = matched_pair();

    let accepted = service
        .approve_match(&matched.id, &employer(), apply_time() + Duration::hours(1))
        .expect("employer accepts");
    assert_eq!(accepted.status, MatchStatus::Accepted);
    assert_eq!(
        accepted.last_activity_at,
        Some(apply_time() + Duration::hours(1))
    );

    let chatting = service
        .open_channel(&matched.id, &candidate(), apply_time() + Duration::hours(2))
        .expect("candidate opens the channel");
    assert_eq!(chatting.status, MatchStatus::Chatting);

    let closed = service
        .close_match(&matched.id, &employer(), apply_time() + Duration::hours(3))
        .expect("employer closes");
    assert_eq!(closed.status, MatchStatus::Closed);
}

#[test]
fn rejection_closes_a_pending_match() {
    let (service, matched) = matched_pair();

    let closed = service
        .reject_match(&matched.id, &employer(), apply_time())
        .expect("employer rejects");
    assert_eq!(closed.status, MatchStatus::Closed);
}

#[test]
fn closed_matches_never_move_again() {
    let (service, matched) = matched_pair();
    service
        .reject_match(&matched.id, &employer(), apply_time())
        .expect("employer rejects");

    let error = service
        .approve_match(&matched.id, &employer(), apply_time())
        .unwrap_err();
    assert!(matches!(
        error,
        MatchingError::InvalidTransition {
            from: "closed",
            to: "accepted"
        }
    ));
}

#[test]
fn chat_requires_a_prior_acceptance() {
    let (service, matched) = matched_pair();

    let error = service
        .open_channel(&matched.id, &candidate(), apply_time())
        .unwrap_err();
    assert!(matches!(error, MatchingError::InvalidTransition { .. }));
}

#[test]
fn only_the_employer_decides_a_pending_match() {
    let (service, matched) = matched_pair();

    let error = service
        .approve_match(&matched.id, &candidate(), apply_time())
        .unwrap_err();
    assert!(matches!(error, MatchingError::NotParticipant));
}

#[test]
fn outsiders_cannot_touch_a_match() {
    let (service, matched) = matched_pair();
    service
        .approve_match(&matched.id, &employer(), apply_time())
        .expect("employer accepts");

    let error = service
        .open_channel(&matched.id, &ActorId("user-mallory".to_string()), apply_time())
        .unwrap_err();
    assert!(matches!(error, MatchingError::NotParticipant));
}

#[test]
fn both_parties_see_the_match() {
    let (service, matched) = matched_pair();

    let for_employer = service.matches_for(&employer()).expect("listing works");
    let for_candidate = service.matches_for(&candidate()).expect("listing works");
    assert_eq!(for_employer, vec![matched.clone()]);
    assert_eq!(for_candidate, vec![matched]);
}
