use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::CustomResult;
use crate::models::NewRaceResult;
use crate::modules::scoring::validate_podium;
use crate::schema::race_results;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct RaceResult {
    pub id: i32,
    pub race_id: i32,
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
}

impl RaceResult {
    /// # store or replace the official result of a race
    /// a race has at most one result; entering it again replaces the previous
    /// one. the podium is validated before anything is written.
    pub fn upsert(conn: &mut PgConnection, new: &NewRaceResult) -> CustomResult<RaceResult> {
        validate_podium(&new.p1, &new.p2, &new.p3)?;

        let existing = RaceResult::get_by_race(conn, new.race_id)?;

        let result = match existing {
            Some(result) => {
                use crate::schema::race_results::dsl::*;
                diesel::update(&result)
                    .set((
                        pole.eq(&new.pole),
                        sprint_winner.eq(new.sprint_winner.clone()),
                        p1.eq(&new.p1),
                        p2.eq(&new.p2),
                        p3.eq(&new.p3),
                    ))
                    .get_result(conn)?
            }
            None => diesel::insert_into(race_results::table)
                .values(new)
                .get_result(conn)?,
        };

        Ok(result)
    }

    pub fn get_by_race(
        conn: &mut PgConnection,
        race_id_in: i32,
    ) -> QueryResult<Option<RaceResult>> {
        use crate::schema::race_results::dsl::*;
        race_results
            .filter(race_id.eq(race_id_in))
            .first::<RaceResult>(conn)
            .optional()
    }

    pub fn podium(&self) -> [&str; 3] {
        [self.p1.as_str(), self.p2.as_str(), self.p3.as_str()]
    }
}
