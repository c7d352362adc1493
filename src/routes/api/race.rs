use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{error, info, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::models::NewRace;
use crate::modules::helpers::claims::Claims;
use crate::modules::models::general::establish_connection;
use crate::modules::models::prediction::{Prediction, ScoreboardRow};
use crate::modules::models::race::{Race, RaceStatus};
use crate::modules::models::race_result::RaceResult;
use crate::modules::scoring::rescore_race;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # the season calendar
#[get("/races/all")]
pub fn get_all() -> Result<Json<Vec<Race>>, Status> {
    let conn = &mut establish_connection();

    let races = db_handle_get_error_http!(
        Race::get_all_chronologicaly(conn),
        "routes/race:get_all",
        "races"
    );

    Ok(Json(races))
}

/// # a single race with its result and gate state
#[get("/races/<race_id>")]
pub fn get_one(race_id: i32) -> Result<Json<ApiRace>, Status> {
    let conn = &mut establish_connection();

    let race = db_handle_get_error_http!(
        Race::get_by_id(conn, race_id),
        "routes/race:get_one",
        "race"
    );
    let result = db_handle_get_error_http!(
        RaceResult::get_by_race(conn, race_id),
        "routes/race:get_one",
        "race result"
    );

    Ok(Json(ApiRace::new(race, result)))
}

/// # the landing page data
/// the next race still open for predictions, the most recent completed race
/// with its scoreboard, and the races after that.
#[get("/races/dashboard")]
pub fn dashboard() -> Result<Json<ApiDashboard>, Status> {
    let conn = &mut establish_connection();

    let mut upcoming = db_handle_get_error_http!(
        Race::get_upcoming(conn, 5),
        "routes/race:dashboard",
        "upcoming races"
    );

    let active = if upcoming.is_empty() {
        None
    } else {
        let race = upcoming.remove(0);
        let result = db_handle_get_error_http!(
            RaceResult::get_by_race(conn, race.id),
            "routes/race:dashboard",
            "race result"
        );
        Some(ApiRace::new(race, result))
    };

    let previous = db_handle_get_error_http!(
        Race::get_last_completed(conn),
        "routes/race:dashboard",
        "last completed race"
    );
    let previous = match previous {
        Some(race) => {
            let scoreboard = db_handle_get_error_http!(
                Prediction::scoreboard_for_race(conn, race.id),
                "routes/race:dashboard",
                "scoreboard"
            );
            Some(ApiPreviousRace { race, scoreboard })
        }
        None => None,
    };

    Ok(Json(ApiDashboard {
        active,
        previous,
        upcoming,
    }))
}

/***** ADMIN *****/

/// # create a race
#[post("/races/new", format = "json", data = "<form>")]
pub fn save_one(form: Json<NewRaceFormData>, claims: Claims) -> Result<Json<Race>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let form = form.into_inner();
    let new_race = NewRace {
        country: form.country,
        circuit: form.circuit,
        race_date: form.race_date,
        has_sprint: form.has_sprint,
        prediction_deadline: form.prediction_deadline,
        status: RaceStatus::Upcoming.as_str().to_string(),
    };

    let conn = &mut establish_connection();
    match Race::new(conn, &new_race) {
        Ok(race) => Ok(Json(race)),
        Err(error) => {
            error!(target:"routes/race:save_one", "Error saving race. (error: {})", error);
            Err(Status::InternalServerError)
        }
    }
}

/// # update deadline and lifecycle status of a race
/// `clear_deadline` drops an explicit deadline so the midday fallback applies
/// again; an absent deadline field leaves it untouched. moving a race to
/// `completed` scores every prediction tied to it, exactly like re-entering
/// the official result would.
#[post("/races/<race_id>", format = "json", data = "<form>")]
pub fn update_one(
    race_id: i32,
    form: Json<RaceUpdateFormData>,
    claims: Claims,
) -> Result<Json<ApiRaceUpdate>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let mut race = db_handle_get_error_http!(
        Race::get_by_id(conn, race_id),
        "routes/race:update_one",
        "race"
    );

    let form = form.into_inner();

    if form.clear_deadline {
        race = db_handle_get_error_http!(
            race.set_deadline(conn, None),
            "routes/race:update_one",
            "race deadline"
        );
    } else if let Some(deadline) = form.prediction_deadline {
        race = db_handle_get_error_http!(
            race.set_deadline(conn, Some(deadline)),
            "routes/race:update_one",
            "race deadline"
        );
    }

    let mut scored = None;
    if let Some(status_in) = form.status {
        let new_status = match RaceStatus::parse(&status_in) {
            Some(status) => status,
            None => return Err(Status::UnprocessableEntity),
        };

        let was_completed = race.is_completed();
        race = db_handle_get_error_http!(
            race.set_status(conn, new_status),
            "routes/race:update_one",
            "race status"
        );

        if new_status == RaceStatus::Completed && !was_completed {
            match rescore_race(conn, race_id) {
                Ok(count) => {
                    info!(target:"routes/race:update_one", "race {} completed, scored {} predictions", race_id, count);
                    scored = Some(count);
                }
                Err(Error::NoResultError { .. }) => {
                    warn!(target:"routes/race:update_one", "race {} completed without an official result, nothing scored", race_id);
                }
                Err(error) => {
                    error!(target:"routes/race:update_one", "Error rescoring race {}. (error: {})", race_id, error);
                    return Err(Status::InternalServerError);
                }
            }
        }
    }

    Ok(Json(ApiRaceUpdate { race, scored }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct NewRaceFormData {
    pub country: String,
    pub circuit: String,
    pub race_date: Option<NaiveDate>,
    pub has_sprint: bool,
    pub prediction_deadline: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct RaceUpdateFormData {
    pub prediction_deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub clear_deadline: bool,
    pub status: Option<String>,
}

/// # a race as shown to users
#[derive(Serialize, Deserialize)]
pub struct ApiRace {
    pub race: Race,
    pub result: Option<RaceResult>,
    pub open: bool,
    pub hours_remaining: Option<i64>,
}

impl ApiRace {
    pub fn new(race: Race, result: Option<RaceResult>) -> ApiRace {
        let now = Local::now().naive_local();
        let open = race.is_open(now);
        let hours_remaining = race
            .prediction_cutoff()
            .map(|cutoff| (cutoff - now).num_hours().max(0));

        ApiRace {
            race,
            result,
            open,
            hours_remaining,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiPreviousRace {
    pub race: Race,
    pub scoreboard: Vec<ScoreboardRow>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiDashboard {
    pub active: Option<ApiRace>,
    pub previous: Option<ApiPreviousRace>,
    pub upcoming: Vec<Race>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiRaceUpdate {
    pub race: Race,
    pub scored: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_form_distinguishes_clearing_from_leaving_the_deadline_alone() {
        let untouched: RaceUpdateFormData =
            serde_json::from_str(r#"{"status":"locked"}"#).unwrap();
        assert!(!untouched.clear_deadline);
        assert_eq!(untouched.prediction_deadline, None);

        let cleared: RaceUpdateFormData =
            serde_json::from_str(r#"{"clear_deadline":true}"#).unwrap();
        assert!(cleared.clear_deadline);
        assert_eq!(cleared.prediction_deadline, None);

        let moved: RaceUpdateFormData =
            serde_json::from_str(r#"{"prediction_deadline":"2026-03-07T14:00:00"}"#).unwrap();
        assert!(!moved.clear_deadline);
        assert_eq!(
            moved.prediction_deadline,
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap().and_hms_opt(14, 0, 0)
        );
    }
}
