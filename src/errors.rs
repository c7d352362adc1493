use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("race {} not found", race_id))]
    RaceNotFoundError { race_id: i32 },

    #[snafu(display("no official result recorded for race {}", race_id))]
    NoResultError { race_id: i32 },

    #[snafu(display("podium contains '{}' more than once", driver))]
    DuplicatePodiumError { driver: String },

    #[snafu(display("predictions for race {} are closed", race_id))]
    PredictionsClosedError { race_id: i32 },

    #[snafu(display("invalid driver name: {}", name))]
    InvalidNameError { name: String },

    #[snafu(display("failed to apply migrations: {}", message))]
    MigrationError { message: String },

    #[snafu(context(false), display("database error: {}", source))]
    DatabaseError { source: diesel::result::Error },
}
