use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use clap::Args;
use talentmesh::error::AppError;
use talentmesh::marketplace::approvals::{ReviewCriteria, ReviewDecision, ReviewForm};
use talentmesh::marketplace::credentials::{CredentialDraft, CredentialKind};
use talentmesh::marketplace::governance::{ProposalCategory, ProposalDraft, VoteChoice};
use talentmesh::marketplace::matching::{
    Availability, CandidateSnapshot, JobDraft, MatchingError, SalaryRange,
};
use talentmesh::marketplace::ActorId;

use crate::infra::build_marketplace;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo date (YYYY-MM-DD, defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the governance portion of the demo.
    #[arg(long)]
    pub(crate) skip_governance: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        skip_governance,
    } = args;

    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let now = Utc.from_utc_datetime(&today.and_hms_opt(9, 0, 0).unwrap_or_default());

    let market = build_marketplace();
    let alice = ActorId("user-alice".to_string());
    let acme = ActorId("org-acme".to_string());

    println!("Talent marketplace demo ({today})");

    println!("\nCredential registry");
    let credential = market.credentials.issue(
        CredentialDraft {
            owner_id: alice.clone(),
            kind: CredentialKind::Cert,
            title: "Certified Rust Developer".to_string(),
            issuer: Some("Rust Foundation".to_string()),
            proof_reference: "cert:rust/associate/91be22c0".to_string(),
        },
        today,
    )?;
    println!(
        "- Issued {} ({}) -> verification {}",
        credential.id.0,
        credential.title,
        credential.verification.label()
    );

    println!("\nApproval workflow");
    let request = market.approvals.submit(
        credential.id.clone(),
        alice.clone(),
        "https://proof.example/rust-cert".to_string(),
        now,
    )?;
    println!(
        "- Queued request {} (automated check {:?})",
        request.id.0, request.automated_check
    );
    let decided = market.approvals.decide(
        &request.id,
        ReviewForm {
            reviewer_id: ActorId("approver-kim".to_string()),
            decision: ReviewDecision::Approve,
            criteria: ReviewCriteria {
                authentic: true,
                relevant: true,
                up_to_date: true,
                sufficient: true,
            },
            score: 88,
            comment: Some("issuer confirmed".to_string()),
        },
        now + Duration::hours(2),
    )?;
    println!("- Reviewed {} -> {}", decided.id.0, decided.status.label());

    println!("\nMatching engine");
    let job = market.matching.create_job(
        JobDraft {
            employer_id: acme.clone(),
            title: "Senior Rust Engineer".to_string(),
            description: "Own the settlement pipeline end to end.".to_string(),
            required_skills: skills(&["Rust", "Anchor"]),
            min_years: Some(2),
            min_verified_credentials: Some(1),
            salary: Some(SalaryRange {
                min: 120_000,
                max: 180_000,
            }),
            publish: true,
        },
        today,
    )?;
    println!("- Posted {} ({})", job.id.0, job.title);

    let outcome = market.matching.apply(
        &job.id,
        CandidateSnapshot {
            candidate_id: alice.clone(),
            skills: skills(&["Rust", "Solidity"]),
            years_experience: 4,
            availability: Availability::TwoWeeks,
        },
        now + Duration::hours(3),
    )?;
    println!(
        "- Application {} -> {}",
        outcome.application.id.0,
        outcome.application.status.label()
    );
    println!("  Score breakdown (total {}):", outcome.report.score);
    for component in &outcome.report.components {
        println!(
            "    - {:?}: ratio {:.2} x weight {:.2} ({})",
            component.factor, component.ratio, component.weight, component.notes
        );
    }

    if let Some(matched) = outcome.matched {
        let accepted = market
            .matching
            .approve_match(&matched.id, &acme, now + Duration::hours(4))?;
        println!("- Employer accepted match {} ", accepted.id.0);
        let chatting = market
            .matching
            .open_channel(&matched.id, &alice, now + Duration::hours(5))?;
        println!("- Channel open, match now {}", chatting.status.label());
    }

    let rejected = market.matching.apply(
        &job.id,
        CandidateSnapshot {
            candidate_id: ActorId("user-bob".to_string()),
            skills: skills(&["Rust"]),
            years_experience: 1,
            availability: Availability::Immediate,
        },
        now + Duration::hours(6),
    );
    if let Err(MatchingError::NotEligible { failures }) = rejected {
        println!("- Second applicant held at the gate:");
        for failure in failures {
            println!("    - {failure:?}");
        }
    }

    if skip_governance {
        return Ok(());
    }

    println!("\nGovernance");
    let proposal = market.governance.create_proposal(
        ProposalDraft {
            proposer_id: ActorId("member-dana".to_string()),
            title: "Lower the listing fee".to_string(),
            description: "Cut the employer listing fee from 5% to 3%.".to_string(),
            category: ProposalCategory::Economics,
            voting_period_days: 3,
        },
        now,
    )?;
    println!(
        "- Opened {} ({}), voting closes {}",
        proposal.id.0, proposal.title, proposal.closes_at
    );

    for (name, choice) in [
        ("ada", VoteChoice::For),
        ("bryn", VoteChoice::For),
        ("caro", VoteChoice::Against),
    ] {
        let tallied = market.governance.cast_vote(
            &proposal.id,
            ActorId(format!("member-{name}")),
            choice,
            now + Duration::hours(8),
        )?;
        println!(
            "- member-{name} voted; tally {} for / {} against",
            tallied.votes_for, tallied.votes_against
        );
    }

    let settled = market
        .governance
        .finalize(&proposal.id, now + Duration::days(3))?;
    println!("- Settled {} -> {}", settled.id.0, settled.status.label());

    Ok(())
}

fn skills(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
