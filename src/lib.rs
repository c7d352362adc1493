pub mod models;

pub mod schema;
pub mod errors;
pub mod modules;
pub mod cron_jobs;

pub mod macros {
    pub mod database_error_handeler;
}

pub mod routes {
    pub mod api {
        pub mod driver;
        pub mod prediction;
        pub mod race;
        pub mod race_result;
        pub mod standings;
    }
}
