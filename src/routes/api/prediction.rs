use std::collections::HashMap;

use chrono::Local;
use log::{error, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::models::NewPrediction;
use crate::modules::helpers::claims::Claims;
use crate::modules::models::driver::sanitize_name;
use crate::modules::models::general::establish_connection;
use crate::modules::models::prediction::{Prediction, PredictionOverview, ScoreboardRow};
use crate::modules::models::race::Race;
use crate::modules::models::user::User;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # submit or change a prediction
/// only while the race still takes predictions: locked and completed races
/// refuse outright, upcoming ones follow the deadline gate. the same user
/// submitting twice replaces their earlier pick.
#[post("/predictions/<race_id>", format = "json", data = "<form>")]
pub fn save_one(
    race_id: i32,
    form: Json<PredictionFormData>,
    claims: Claims,
) -> Result<Json<Prediction>, Status> {
    let form = form.into_inner();
    if !form.is_sanitized() {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();

    let race = db_handle_get_error_http!(
        Race::get_by_id(conn, race_id),
        "routes/prediction:save_one",
        "race"
    );

    if !race.accepts_predictions(Local::now().naive_local()) {
        return Err(Status::Forbidden);
    }

    // a sprint pick on a weekend without a sprint is meaningless, drop it
    let sprint_winner = if race.has_sprint { form.sprint_winner } else { None };

    let new_prediction = NewPrediction {
        user_id: claims.user_id,
        race_id,
        pole: form.pole,
        sprint_winner,
        p1: form.p1,
        p2: form.p2,
        p3: form.p3,
        submitted_at: Local::now().naive_local(),
    };

    match Prediction::upsert(conn, &new_prediction) {
        Ok(prediction) => Ok(Json(prediction)),
        Err(Error::DuplicatePodiumError { driver }) => {
            warn!(target:"routes/prediction:save_one", "rejected podium naming {} twice (user: {})", driver, claims.user_id);
            Err(Status::UnprocessableEntity)
        }
        Err(error) => {
            error!(target:"routes/prediction:save_one", "Error saving prediction. (error: {})", error);
            Err(Status::InternalServerError)
        }
    }
}

/// # the caller's prediction history
#[get("/predictions/mine")]
pub fn get_mine(claims: Claims) -> Result<Json<Vec<PredictionOverview>>, Status> {
    let conn = &mut establish_connection();

    let overview = db_handle_get_error_http!(
        Prediction::overview_for_user(conn, claims.user_id),
        "routes/prediction:get_mine",
        "predictions"
    );

    Ok(Json(overview))
}

/// # everyone's prediction for one race
#[get("/predictions/race/<race_id>")]
pub fn for_race(race_id: i32) -> Result<Json<Vec<ScoreboardRow>>, Status> {
    let conn = &mut establish_connection();

    let scoreboard = db_handle_get_error_http!(
        Prediction::scoreboard_for_race(conn, race_id),
        "routes/prediction:for_race",
        "scoreboard"
    );

    Ok(Json(scoreboard))
}

/// # completeness matrix
/// which user has a prediction in for which race. admin view to chase
/// stragglers before a deadline.
#[get("/predictions/matrix")]
pub fn matrix(claims: Claims) -> Result<Json<ApiMatrix>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();

    let users = db_handle_get_error_http!(
        User::get_all(conn),
        "routes/prediction:matrix",
        "users"
    );
    let races = db_handle_get_error_http!(
        Race::get_all_chronologicaly(conn),
        "routes/prediction:matrix",
        "races"
    );
    let entries = db_handle_get_error_http!(
        Prediction::matrix_entries(conn),
        "routes/prediction:matrix",
        "predictions"
    );

    let mut filled: HashMap<i32, Vec<i32>> = HashMap::new();
    for (user_id, race_id) in entries {
        filled.entry(user_id).or_default().push(race_id);
    }

    Ok(Json(ApiMatrix {
        users: users
            .into_iter()
            .map(|user| ApiMatrixUser {
                id: user.id,
                name: user.name,
            })
            .collect(),
        races,
        filled,
    }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct PredictionFormData {
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
}

impl PredictionFormData {
    pub fn is_sanitized(&self) -> bool {
        let mut names = vec![&self.pole, &self.p1, &self.p2, &self.p3];
        if let Some(sprint) = &self.sprint_winner {
            names.push(sprint);
        }

        names.iter().all(|name| sanitize_name(name) == **name)
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiMatrixUser {
    pub id: i32,
    pub name: String,
}

/// # Struct representing the admin completeness matrix
#[derive(Serialize, Deserialize)]
pub struct ApiMatrix {
    pub users: Vec<ApiMatrixUser>,
    pub races: Vec<Race>,
    pub filled: HashMap<i32, Vec<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(json: &str) -> PredictionFormData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn form_without_a_sprint_pick_parses_to_none() {
        let form = form(r#"{"pole":"Verstappen","p1":"Norris","p2":"Piastri","p3":"Leclerc"}"#);

        assert_eq!(form.sprint_winner, None);
        assert!(form.is_sanitized());
    }

    #[test]
    fn form_with_markup_in_a_name_is_not_sanitized() {
        let form = form(
            r#"{"pole":"<b>Verstappen</b>","sprint_winner":"Norris","p1":"Norris","p2":"Piastri","p3":"Leclerc"}"#,
        );

        assert!(!form.is_sanitized());
    }

    #[test]
    fn form_with_markup_in_the_sprint_pick_is_not_sanitized() {
        let form = form(
            r#"{"pole":"Verstappen","sprint_winner":"Norris<script>","p1":"Norris","p2":"Piastri","p3":"Leclerc"}"#,
        );

        assert!(!form.is_sanitized());
    }
}
