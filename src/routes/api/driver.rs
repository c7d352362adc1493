use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::models::NewDriver;
use crate::modules::helpers::claims::Claims;
use crate::modules::models::driver::{sanitize_name, Driver};
use crate::modules::models::general::establish_connection;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # the current grid
#[get("/drivers/all")]
pub fn get_all() -> Result<Json<Vec<Driver>>, Status> {
    let conn = &mut establish_connection();

    let drivers = db_handle_get_error_http!(
        Driver::get_all(conn),
        "routes/driver:get_all",
        "drivers"
    );

    Ok(Json(drivers))
}

/// # add a driver to the grid
#[post("/drivers/new", format = "json", data = "<form>")]
pub fn save_one(form: Json<DriverFormData>, claims: Claims) -> Result<Json<Driver>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let form = form.into_inner();
    if sanitize_name(&form.name) != form.name {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let new_driver = NewDriver {
        name: form.name,
        team: form.team,
        number: form.number,
    };

    match Driver::new(conn, &new_driver) {
        Ok(driver) => Ok(Json(driver)),
        Err(error) => {
            error!(target:"routes/driver:save_one", "Error saving driver. (error: {})", error);
            Err(Status::InternalServerError)
        }
    }
}

/// # edit a driver
/// mid-season seat swaps and number changes.
#[post("/drivers/<driver_id>", format = "json", data = "<form>")]
pub fn update_one(
    driver_id: i32,
    form: Json<DriverFormData>,
    claims: Claims,
) -> Result<Json<Driver>, Status> {
    if !claims.is_admin {
        return Err(Status::Forbidden);
    }

    let form = form.into_inner();
    if sanitize_name(&form.name) != form.name {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let driver = db_handle_get_error_http!(
        Driver::get_by_id(conn, driver_id),
        "routes/driver:update_one",
        "driver"
    );

    match driver.update(conn, &form.name, &form.team, form.number) {
        Ok(driver) => Ok(Json(driver)),
        Err(error) => {
            error!(target:"routes/driver:update_one", "Error updating driver. (error: {})", error);
            Err(Status::InternalServerError)
        }
    }
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct DriverFormData {
    pub name: String,
    pub team: String,
    pub number: i32,
}
