use dotenvy::dotenv;
use log::{error, info};

use prode_f1::errors::Error;
use prode_f1::modules::helpers::logging::setup_logging;
use prode_f1::modules::models::general::establish_connection;
use prode_f1::modules::models::race::Race;
use prode_f1::modules::scoring::rescore_race;

/// walks the whole season and rescores every completed race. handy after a
/// results correction or a restore from backup.
fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let conn = &mut establish_connection();

    let races = match Race::get_all_chronologicaly(conn) {
        Ok(races) => races,
        Err(error) => {
            error!(target:"rescore_all", "failed loading races. (error: {})", error);
            return;
        }
    };

    for race in races.iter().filter(|race| race.is_completed()) {
        match rescore_race(conn, race.id) {
            Ok(scored) => {
                info!(target:"rescore_all", "rescored {} ({}): {} predictions", race.country, race.id, scored);
            }
            Err(Error::NoResultError { .. }) => {
                info!(target:"rescore_all", "skipping {} ({}): no official result", race.country, race.id);
            }
            Err(error) => {
                error!(target:"rescore_all", "failed rescoring {} ({}). (error: {})", race.country, race.id, error);
            }
        }
    }
}
