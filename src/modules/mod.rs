pub mod scoring;

pub mod models {
    pub mod driver;
    pub mod prediction;
    pub mod race;
    pub mod race_result;
    pub mod user;

    pub mod general;
}

pub mod helpers {
    pub mod claims;
    pub mod logging;

    pub mod fairings {
        pub mod cors;
    }
}
