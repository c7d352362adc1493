use dotenvy::dotenv;
use log::{error, info};

use prode_f1::models::NewDriver;
use prode_f1::modules::helpers::logging::setup_logging;
use prode_f1::modules::models::driver::Driver;
use prode_f1::modules::models::general::establish_connection;

/// the 2026 lineup. (name, team, number)
const LINEUP: [(&str, &str, i32); 20] = [
    ("Max Verstappen", "Red Bull", 1),
    ("Yuki Tsunoda", "Red Bull", 22),
    ("Lewis Hamilton", "Ferrari", 44),
    ("Charles Leclerc", "Ferrari", 16),
    ("Lando Norris", "McLaren", 4),
    ("Oscar Piastri", "McLaren", 81),
    ("George Russell", "Mercedes", 63),
    ("Andrea Kimi Antonelli", "Mercedes", 12),
    ("Fernando Alonso", "Aston Martin", 14),
    ("Lance Stroll", "Aston Martin", 18),
    ("Esteban Ocon", "Haas", 31),
    ("Oliver Bearman", "Haas", 87),
    ("Alexander Albon", "Williams", 23),
    ("Franco Colapinto", "Williams", 43),
    ("Pierre Gasly", "Alpine", 10),
    ("Jack Doohan", "Alpine", 7),
    ("Sergio Pérez", "RB", 11),
    ("Isack Hadjar", "RB", 6),
    ("Guanyu Zhou", "Sauber", 24),
    ("Valtteri Bottas", "Sauber", 77),
];

fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let conn = &mut establish_connection();

    for (name, team, number) in LINEUP {
        let new_driver = NewDriver {
            name: name.to_string(),
            team: team.to_string(),
            number,
        };

        match Driver::ensure_exists(conn, &new_driver) {
            Ok(driver) => {
                info!(target:"load_drivers", "driver on the grid: {} ({})", driver.name, driver.team);
            }
            Err(error) => {
                error!(target:"load_drivers", "failed loading driver {}. (error: {})", name, error);
            }
        }
    }
}
