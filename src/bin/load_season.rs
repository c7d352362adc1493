use chrono::NaiveDate;
use dotenvy::dotenv;
use log::{error, info};

use prode_f1::models::NewRace;
use prode_f1::modules::helpers::logging::setup_logging;
use prode_f1::modules::models::general::establish_connection;
use prode_f1::modules::models::race::{Race, RaceStatus};

/// the 2026 calendar as published. (country, circuit, race day, sprint)
const CALENDAR: [(&str, &str, &str, bool); 24] = [
    ("Australia", "Albert Park", "2026-03-08", false),
    ("China", "Shanghai International Circuit", "2026-03-22", true),
    ("Japan", "Suzuka Circuit", "2026-04-05", false),
    ("Bahrain", "Sakhir International Circuit", "2026-04-19", true),
    ("Saudi Arabia", "Jeddah Corniche Circuit", "2026-05-03", false),
    ("Emilia Romagna", "Imola", "2026-05-17", false),
    ("Monaco", "Circuit de Monaco", "2026-05-24", false),
    ("Spain", "Circuit de Barcelona-Catalunya", "2026-06-07", true),
    ("Canada", "Gilles Villeneuve", "2026-06-14", false),
    ("Austria", "Red Bull Ring", "2026-06-28", true),
    ("United Kingdom", "Silverstone", "2026-07-05", false),
    ("Hungary", "Hungaroring", "2026-07-19", false),
    ("Belgium", "Spa-Francorchamps", "2026-07-26", true),
    ("Netherlands", "Zandvoort", "2026-08-23", false),
    ("Italy", "Monza", "2026-08-30", false),
    ("Azerbaijan", "Baku City Circuit", "2026-09-13", true),
    ("Singapore", "Marina Bay", "2026-09-20", false),
    ("United States", "Circuit of The Americas", "2026-10-04", true),
    ("Mexico", "Autodromo Hermanos Rodriguez", "2026-10-11", false),
    ("Brazil", "Interlagos", "2026-10-25", true),
    ("Las Vegas", "Las Vegas Street Circuit", "2026-11-15", false),
    ("Qatar", "Losail International Circuit", "2026-11-22", true),
    ("Abu Dhabi", "Yas Marina", "2026-12-06", false),
    ("South Africa", "Kyalami Circuit", "2026-12-20", true),
];

fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let calendar: Vec<NewRace> = CALENDAR
        .iter()
        .map(|(country, circuit, race_date, has_sprint)| NewRace {
            country: country.to_string(),
            circuit: circuit.to_string(),
            race_date: NaiveDate::parse_from_str(race_date, "%Y-%m-%d").ok(),
            has_sprint: *has_sprint,
            prediction_deadline: None,
            status: RaceStatus::Upcoming.as_str().to_string(),
        })
        .collect();

    let conn = &mut establish_connection();
    match Race::replace_calendar(conn, &calendar) {
        Ok(loaded) => {
            info!(target:"load_season", "loaded {} races into the calendar", loaded);
        }
        Err(error) => {
            error!(target:"load_season", "failed loading the calendar. (error: {})", error);
        }
    }
}
