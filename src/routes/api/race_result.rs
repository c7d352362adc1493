use log::{error, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::models::NewRaceResult;
use crate::modules::helpers::claims::Claims;
use crate::modules::models::driver::sanitize_name;
use crate::modules::models::general::establish_connection;
use crate::modules::models::race::Race;
use crate::modules::models::race_result::RaceResult;
use crate::modules::scoring::rescore_race;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[get("/results/<race_id>")]
pub fn get_one(race_id: i32) -> Result<Json<Option<RaceResult>>, Status> {
    let conn = &mut establish_connection();

    let result = db_handle_get_error_http!(
        RaceResult::get_by_race(conn, race_id),
        "routes/race_result:get_one",
        "race result"
    );

    Ok(Json(result))
}

/// # enter or correct the official result of a race
/// saving the result immediately rescores every prediction for the race, so
/// a corrected result replaces all point totals instead of stacking on top.
#[post("/results/<race_id>", format = "json", data = "<form>")]
pub fn save_one(
    race_id: i32,
    form: Json<ResultFormData>,
    claims: Claims,
) -> Result<Json<ApiRescore>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let form = form.into_inner();
    if !form.is_sanitized() {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();

    // make sure the race exists before attaching a result to it
    let race = db_handle_get_error_http!(
        Race::get_by_id(conn, race_id),
        "routes/race_result:save_one",
        "race"
    );

    let sprint_winner = if race.has_sprint { form.sprint_winner } else { None };

    let new_result = NewRaceResult {
        race_id,
        pole: form.pole,
        sprint_winner,
        p1: form.p1,
        p2: form.p2,
        p3: form.p3,
    };

    match RaceResult::upsert(conn, &new_result) {
        Ok(_) => {}
        Err(Error::DuplicatePodiumError { driver }) => {
            warn!(target:"routes/race_result:save_one", "rejected result podium naming {} twice (race: {})", driver, race_id);
            return Err(Status::UnprocessableEntity);
        }
        Err(error) => {
            error!(target:"routes/race_result:save_one", "Error saving result. (error: {})", error);
            return Err(Status::InternalServerError);
        }
    }

    match rescore_race(conn, race_id) {
        Ok(scored) => Ok(Json(ApiRescore { race_id, scored })),
        Err(error) => {
            error!(target:"routes/race_result:save_one", "Error rescoring race {}. (error: {})", race_id, error);
            Err(Status::InternalServerError)
        }
    }
}

/// # rescore a race on demand
/// recomputes every prediction of the race against the stored result.
/// answers 400 while the race has no official result yet.
#[post("/results/<race_id>/rescore")]
pub fn rescore(race_id: i32, claims: Claims) -> Result<Json<ApiRescore>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();

    match rescore_race(conn, race_id) {
        Ok(scored) => Ok(Json(ApiRescore { race_id, scored })),
        Err(Error::RaceNotFoundError { .. }) => Err(Status::NotFound),
        Err(Error::NoResultError { .. }) => {
            warn!(target:"routes/race_result:rescore", "race {} has no official result yet, nothing to score", race_id);
            Err(Status::BadRequest)
        }
        Err(error) => {
            error!(target:"routes/race_result:rescore", "Error rescoring race {}. (error: {})", race_id, error);
            Err(Status::InternalServerError)
        }
    }
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct ResultFormData {
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
}

impl ResultFormData {
    pub fn is_sanitized(&self) -> bool {
        let mut names = vec![&self.pole, &self.p1, &self.p2, &self.p3];
        if let Some(sprint) = &self.sprint_winner {
            names.push(sprint);
        }

        names.iter().all(|name| sanitize_name(name) == **name)
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiRescore {
    pub race_id: i32,
    pub scored: usize,
}
