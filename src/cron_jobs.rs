use std::time::Duration;

use chrono::Local;
use log::{info, warn};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::modules::models::general::establish_connection;
use crate::modules::models::race::Race;

/// # lock races whose prediction window closed
/// the gate itself already answers "closed" the moment the deadline passes;
/// this sweep only makes the state visible in the calendar.
pub async fn lock_closed_races() {
    let conn = &mut establish_connection();

    match Race::lock_expired(conn, Local::now().naive_local()) {
        Ok(0) => {}
        Ok(locked) => {
            info!(target:"cron_jobs", "locked {} races whose prediction window closed", locked);
        }
        Err(error) => {
            warn!(target:"cron_jobs", "failed locking expired races. (error: {})", error);
        }
    }
}

pub async fn register_cron_jobs() {
    let scheduler = JobScheduler::new().await.unwrap();

    // run every 5 minutes
    let job = Job::new_repeated_async(Duration::from_secs(300), |_uuid, _l| {
        Box::pin(async {
            lock_closed_races().await;
        })
    })
    .unwrap();

    scheduler.add(job).await.unwrap();
    scheduler.start().await.unwrap();
}
