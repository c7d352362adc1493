use log::error;
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::models::general::establish_connection;
use crate::modules::models::user::{StandingsRow, User};

/// # the season ranking
/// every user ordered by their summed prediction points.
#[get("/standings")]
pub fn get_standings() -> Result<Json<Vec<StandingsRow>>, Status> {
    let conn = &mut establish_connection();

    let standings = db_handle_get_error_http!(
        User::get_standings(conn),
        "routes/standings:get_standings",
        "standings"
    );

    Ok(Json(standings))
}
