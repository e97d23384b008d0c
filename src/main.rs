use color_eyre::eyre::WrapErr;
use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use log::{info, warn};
use scheduler::team::by_reputation_desc;
use scheduler::{CompetitionTier, SeasonScheduler, Team, TimeEstimation};
use std::env;

const DEFAULT_SEASON: i32 = 2025;
const CHAMPIONS_LEAGUE_TEAMS: usize = 32;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let season = match env::var("SEASON") {
        Ok(value) => value.parse::<i32>().wrap_err_with(|| format!("SEASON must be a year, got {}", value))?,
        Err(_) => DEFAULT_SEASON,
    };

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    let data = DatabaseGenerator::generate(&database)?;

    let mut settings = data.settings.clone();
    if let Ok(seed) = env::var("SCHEDULER_SEED") {
        settings.seed = Some(seed.parse::<u64>().wrap_err("SCHEDULER_SEED must be an unsigned integer")?);
    }

    let mut scheduler = SeasonScheduler::new(season, settings);
    let mut total = 0;

    for league in &data.leagues {
        let schedule = scheduler.league_schedule(league.id, &league.team_ids)?;
        let fixtures = schedule.fixtures().count();

        info!("{}: {} weeks, {} fixtures", league.name, schedule.tours.len(), fixtures);
        total += fixtures;
    }

    for country in &data.countries {
        let teams = data.country_teams(country.id);

        let drawn = scheduler
            .cup_entry_stage(country.id, &teams)
            .and_then(|stage| Ok((stage, scheduler.cup_round(country.id, stage, &teams, &[])?)));

        match drawn {
            Ok((stage, fixtures)) => {
                info!("{} cup {}: {} fixtures", country.name, stage, fixtures.len());
                total += fixtures.len();
            }
            Err(error) => warn!("{} cup not drawn: {}", country.name, error),
        }
    }

    let mut entrants: Vec<Team> = data.teams.clone();
    entrants.sort_by(by_reputation_desc);
    entrants.truncate(CHAMPIONS_LEAGUE_TEAMS);

    let phase = scheduler.league_phase(CompetitionTier::ChampionsLeague, &entrants, &data.coefficients);
    if phase.degraded {
        warn!("champions league phase is degraded after {} attempts", phase.attempts);
    }
    total += phase.fixtures.len();

    info!(
        "✅ season {}/{} scheduled: {} fixtures (seed {})",
        season,
        season + 1,
        total,
        scheduler.seed()
    );

    Ok(())
}
