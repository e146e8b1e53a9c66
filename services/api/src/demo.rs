use crate::infra::{load_catalog, Inbox, Marketplace};
use clap::Args;
use parttime::config::AppConfig;
use parttime::error::AppError;
use parttime::workflows::applications::MatchScorer;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Job description and title text
    #[arg(long)]
    pub(crate) job_text: String,
    /// Seeker skills and education text
    #[arg(long)]
    pub(crate) seeker_text: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Optional catalog CSV with jobs and seeker profiles. Defaults to the bundled seed.
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Status the employer assigns after reviewing the application.
    #[arg(long, default_value = "Reviewed")]
    pub(crate) status: String,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let scorer = MatchScorer::new(config.matching);
    let outcome = scorer.explain(&args.job_text, &args.seeker_text);

    println!("Match score: {}", outcome.score);
    println!("- matched keywords: {}", join_or_none(&outcome.matched));
    println!("- missing keywords: {}", join_or_none(&outcome.missing));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog_csv,
        status,
    } = args;

    let config = AppConfig::load()?;
    let snapshot = load_catalog(catalog_csv.or(config.catalog_csv).as_deref())?;
    let (job, seeker) = match (snapshot.jobs.first(), snapshot.seekers.first()) {
        (Some(job), Some(seeker)) => (job.clone(), seeker.clone()),
        _ => {
            println!("Catalog needs at least one job and one seeker profile");
            return Ok(());
        }
    };
    let marketplace = Marketplace::new(snapshot, config.matching);

    println!("Application lifecycle demo");
    println!(
        "- {} ({}) applies for {} at {}",
        seeker.full_name, seeker.user, job.title, job.company_name
    );

    let record = match marketplace.applications.apply(&seeker.user, &job.id) {
        Ok(record) => record,
        Err(err) => {
            println!("  Application rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "  Application {} -> status {} (match score {})",
        record.id, record.status, record.match_score
    );

    match marketplace.applications.apply(&seeker.user, &job.id) {
        Ok(_) => println!("  Duplicate application unexpectedly accepted"),
        Err(err) => println!("  Second attempt: {}", err),
    }

    match marketplace
        .applications
        .update_status(&job.employer, &record.id, &status)
    {
        Ok(updated) => println!("- Employer marks application as {}", updated.status),
        Err(err) => println!("- Employer update rejected: {}", err),
    }

    match marketplace.applications.withdraw(&seeker.user, &record.id) {
        Ok(_) => println!("- Seeker withdraws the application"),
        Err(err) => println!("- Withdrawal refused: {}", err),
    }

    print_inbox(&marketplace.notifications, &job.employer, "Employer");
    print_inbox(&marketplace.notifications, &seeker.user, "Seeker");
    Ok(())
}

fn print_inbox(inbox: &Inbox, user: &parttime::identity::UserId, label: &str) {
    match inbox.inbox(user) {
        Ok(entries) if entries.is_empty() => println!("{label} inbox: empty"),
        Ok(entries) => {
            println!("{label} inbox:");
            for entry in entries.iter().rev() {
                println!("  - [{}] {}", entry.title, entry.message);
            }
        }
        Err(err) => println!("{label} inbox unavailable: {}", err),
    }
}

fn join_or_none(words: &[String]) -> String {
    if words.is_empty() {
        "none".to_string()
    } else {
        words.join(", ")
    }
}
