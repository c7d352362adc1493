use rocket::{launch, routes, Build, Rocket};

use prode_f1::cron_jobs::register_cron_jobs;
use prode_f1::modules::helpers::fairings::cors::CORS;
use prode_f1::modules::helpers::logging::setup_logging;
use prode_f1::modules::models::general::{establish_connection, run_migrations};
use prode_f1::routes::api;

#[launch]
async fn rocket() -> Rocket<Build> {
    setup_logging().expect("Failed to setup logging");

    // bring the schema up to date before serving anything
    let conn = &mut establish_connection();
    run_migrations(conn).expect("Failed to run migrations");

    // register cron jobs that need to run.
    register_cron_jobs().await;

    // start the webserver
    rocket::build()
        .attach(CORS)
        .mount(
            "/api",
            routes![
                // races
                api::race::get_all,
                api::race::get_one,
                api::race::dashboard,
                api::race::save_one,
                api::race::update_one,
                // predictions
                api::prediction::save_one,
                api::prediction::get_mine,
                api::prediction::for_race,
                api::prediction::matrix,
                // results
                api::race_result::get_one,
                api::race_result::save_one,
                api::race_result::rescore,
                // drivers
                api::driver::get_all,
                api::driver::save_one,
                api::driver::update_one,
                // standings
                api::standings::get_standings,
            ],
        )
}
