use crate::infra::{load_seed, seeded_service};
use clap::Args;
use peer_match::config::AppConfig;
use peer_match::error::AppError;
use peer_match::matching::{MatchReport, StudentRecord};
use std::path::PathBuf;

const SAMPLE_COHORT: &str = include_str!("../demos/cohort.json");

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON array of stored student profiles
    #[arg(long)]
    pub(crate) profiles: PathBuf,
    /// Id of the student to rank matches for
    #[arg(long)]
    pub(crate) user: String,
    /// Print the raw JSON report instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Student from the sample cohort to rank for (defaults to every student in turn)
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Also score this cohort member against the selected student
    #[arg(long, requires = "user")]
    pub(crate) compare: Option<String>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        profiles,
        user,
        json,
    } = args;

    let config = AppConfig::load()?;
    let records = load_seed(&profiles)?;
    let service = seeded_service(config.matching, records)?;
    let report = service.find_matches(Some(user.as_str()))?;

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Report unavailable: {err}"),
        }
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { user, compare } = args;

    let records: Vec<StudentRecord> = serde_json::from_str(SAMPLE_COHORT)
        .map_err(|source| AppError::seed("demos/cohort.json", source))?;
    let requesters: Vec<String> = match user {
        Some(user) => vec![user],
        None => records
            .iter()
            .filter(|record| record.is_student())
            .map(|record| record.id.0.clone())
            .collect(),
    };

    let service = seeded_service(Default::default(), records)?;
    let ranking = service.ranking();

    println!("Peer matching demo");
    println!(
        "Cutoff: score > {} | at most {} matches per student",
        ranking.min_score, ranking.max_results
    );

    for requester in &requesters {
        match service.find_matches(Some(requester.as_str())) {
            Ok(report) => render_report(&report),
            Err(err) => println!("\n{requester}: {err}"),
        }
    }

    if let (Some(requester), Some(candidate)) = (requesters.first(), compare) {
        println!("\nPairwise view");
        match service.score_pair(requester, &candidate) {
            Ok(entry) => println!(
                "- {} -> {}: score {} (basic {}, interests {}, diversity {})",
                requester,
                entry.user.id,
                entry.score,
                entry.breakdown.basic_compatibility,
                entry.breakdown.interest_alignment,
                entry.breakdown.diversity_balance
            ),
            Err(err) => println!("- unavailable: {err}"),
        }
    }

    Ok(())
}

fn render_report(report: &MatchReport) {
    println!(
        "\nMatches for {} ({} of {} candidates qualified)",
        report.requester_id, report.qualified_matches, report.total_potential
    );

    if report.matches.is_empty() {
        println!("- no candidates cleared the cutoff");
        return;
    }

    for (rank, entry) in report.matches.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:<24} year {:<2} score {:>3} | basic {:>3} interests {:>3} diversity {:>3}",
            rank + 1,
            entry.user.name,
            entry.user.major,
            entry.user.year,
            entry.score,
            entry.breakdown.basic_compatibility,
            entry.breakdown.interest_alignment,
            entry.breakdown.diversity_balance
        );
    }
}
