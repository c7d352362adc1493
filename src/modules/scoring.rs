use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::info;

use crate::errors::{CustomResult, Error};
use crate::modules::models::prediction::Prediction;
use crate::modules::models::race::Race;
use crate::modules::models::race_result::RaceResult;

pub const POLE_POINTS: i32 = 2;
pub const SPRINT_POINTS: i32 = 2;
pub const PODIUM_EXACT_POINTS: i32 = 3;
pub const PODIUM_MEMBER_POINTS: i32 = 1;

/// the best possible card: pole, sprint and all three podium slots exact.
pub const MAX_POINTS: i32 = POLE_POINTS + SPRINT_POINTS + 3 * PODIUM_EXACT_POINTS;

/// # score a prediction against the official result
/// the rules are applied independently and summed:
/// * pole correct: +2
/// * sprint winner correct: +2, only on sprint weekends with a recorded winner
/// * podium slot exact: +3, on the podium but in the wrong slot: +1
///
/// a slot never earns exact and member credit at the same time, and two empty
/// sprint fields are not a match.
pub fn score(prediction: &Prediction, result: &RaceResult, has_sprint: bool) -> i32 {
    let mut points = 0;

    if prediction.pole == result.pole {
        points += POLE_POINTS;
    }

    if has_sprint {
        if let (Some(predicted), Some(actual)) = (&prediction.sprint_winner, &result.sprint_winner)
        {
            if predicted == actual {
                points += SPRINT_POINTS;
            }
        }
    }

    let actual_podium = result.podium();
    for (slot, predicted) in prediction.podium().into_iter().enumerate() {
        if predicted == actual_podium[slot] {
            points += PODIUM_EXACT_POINTS;
        } else if actual_podium.contains(&predicted) {
            points += PODIUM_MEMBER_POINTS;
        }
    }

    points
}

/// # reject podiums that name a driver twice
/// called wherever a podium is written (predictions and results), so the
/// scoring rules can take distinct drivers for granted.
pub fn validate_podium(p1: &str, p2: &str, p3: &str) -> CustomResult<()> {
    if p1 == p2 || p1 == p3 {
        return Err(Error::DuplicatePodiumError {
            driver: p1.to_string(),
        });
    }
    if p2 == p3 {
        return Err(Error::DuplicatePodiumError {
            driver: p2.to_string(),
        });
    }

    Ok(())
}

/// # rescore every prediction of a race
/// fetches the official result and all predictions for the race, scores each
/// prediction and overwrites its stored total. all updates happen in one
/// transaction, so an interrupted run never leaves a race half scored.
///
/// ## Arguments
/// * `conn` - the database connection
/// * `race_id` - the race to rescore
///
/// ## Returns
/// * `usize` - the amount of predictions scored
pub fn rescore_race(conn: &mut PgConnection, race_id: i32) -> CustomResult<usize> {
    let race = match Race::get_by_id(conn, race_id) {
        Ok(race) => race,
        Err(diesel::result::Error::NotFound) => {
            return Err(Error::RaceNotFoundError { race_id })
        }
        Err(source) => return Err(Error::DatabaseError { source }),
    };

    let result = match RaceResult::get_by_race(conn, race_id)? {
        Some(result) => result,
        // nothing to score yet, the race simply has not finished
        None => return Err(Error::NoResultError { race_id }),
    };

    let predictions = Prediction::for_race(conn, race_id)?;

    let scored = conn.transaction(|conn| {
        for prediction in &predictions {
            let total = score(prediction, &result, race.has_sprint);
            prediction.set_points(conn, total)?;
        }

        QueryResult::Ok(predictions.len())
    })?;

    info!(
        target:"scoring",
        "rescored race {} ({}): {} predictions",
        race.id, race.country, scored
    );

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prediction(pole: &str, sprint: Option<&str>, podium: [&str; 3]) -> Prediction {
        Prediction {
            id: 1,
            user_id: 1,
            race_id: 1,
            pole: pole.to_string(),
            sprint_winner: sprint.map(|s| s.to_string()),
            p1: podium[0].to_string(),
            p2: podium[1].to_string(),
            p3: podium[2].to_string(),
            submitted_at: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            points: None,
        }
    }

    fn result(pole: &str, sprint: Option<&str>, podium: [&str; 3]) -> RaceResult {
        RaceResult {
            id: 1,
            race_id: 1,
            pole: pole.to_string(),
            sprint_winner: sprint.map(|s| s.to_string()),
            p1: podium[0].to_string(),
            p2: podium[1].to_string(),
            p3: podium[2].to_string(),
        }
    }

    #[test]
    fn a_perfect_card_scores_the_maximum() {
        let p = prediction("Verstappen", Some("Norris"), ["Verstappen", "Norris", "Leclerc"]);
        let r = result("Verstappen", Some("Norris"), ["Verstappen", "Norris", "Leclerc"]);

        assert_eq!(score(&p, &r, true), MAX_POINTS);
        assert_eq!(MAX_POINTS, 13);
    }

    #[test]
    fn the_worked_example_from_the_rules_sheet() {
        // pole +2, sprint +2, p1 on podium +1, p2 exact +3, p3 on podium +1
        let p = prediction("A", Some("B"), ["C", "B", "A"]);
        let r = result("A", Some("B"), ["A", "B", "C"]);

        assert_eq!(score(&p, &r, true), 9);
    }

    #[test]
    fn swapping_two_correct_slots_drops_exactly_four_points() {
        let r = result("A", None, ["A", "B", "C"]);

        let exact = prediction("X", None, ["A", "B", "C"]);
        let swapped = prediction("X", None, ["B", "A", "C"]);

        assert_eq!(score(&exact, &r, false), 9);
        assert_eq!(score(&swapped, &r, false), 5);
    }

    #[test]
    fn a_disjoint_podium_earns_no_podium_points() {
        let p = prediction("A", None, ["D", "E", "F"]);
        let r = result("A", None, ["A", "B", "C"]);

        // only the pole counts
        assert_eq!(score(&p, &r, false), POLE_POINTS);
    }

    #[test]
    fn no_sprint_points_on_a_weekend_without_a_sprint() {
        let p = prediction("A", Some("B"), ["A", "B", "C"]);
        let r = result("A", Some("B"), ["A", "B", "C"]);

        assert_eq!(score(&p, &r, false), MAX_POINTS - SPRINT_POINTS);
    }

    #[test]
    fn two_empty_sprint_fields_are_not_a_match() {
        let p = prediction("X", None, ["D", "E", "F"]);
        let r = result("Y", None, ["A", "B", "C"]);

        assert_eq!(score(&p, &r, true), 0);
    }

    #[test]
    fn a_recorded_sprint_winner_against_an_empty_prediction_scores_nothing() {
        let p = prediction("X", None, ["D", "E", "F"]);
        let r = result("Y", Some("B"), ["A", "B", "C"]);

        assert_eq!(score(&p, &r, true), 0);
    }

    #[test]
    fn totals_stay_within_the_advertised_bound() {
        let drivers = ["A", "B", "C", "D"];

        for pole in drivers {
            for pod1 in drivers {
                for pod2 in drivers {
                    for pod3 in drivers {
                        if pod1 == pod2 || pod1 == pod3 || pod2 == pod3 {
                            continue;
                        }
                        let p = prediction(pole, Some("A"), [pod1, pod2, pod3]);
                        let r = result("A", Some("A"), ["A", "B", "C"]);

                        let total = score(&p, &r, true);
                        assert!((0..=MAX_POINTS).contains(&total));
                    }
                }
            }
        }
    }

    #[test]
    fn duplicate_podiums_are_rejected_in_every_slot_pair() {
        assert!(validate_podium("A", "A", "B").is_err());
        assert!(validate_podium("A", "B", "A").is_err());
        assert!(validate_podium("B", "A", "A").is_err());
        assert!(validate_podium("A", "B", "C").is_ok());
    }
}
