use chrono::{NaiveDate, NaiveDateTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Date, Integer, Nullable, VarChar};
use serde::{Deserialize, Serialize};

use crate::errors::CustomResult;
use crate::models::NewPrediction;
use crate::modules::scoring::validate_podium;
use crate::schema::predictions;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: i32,
    pub user_id: i32,
    pub race_id: i32,
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub submitted_at: NaiveDateTime,
    pub points: Option<i32>,
}

impl Prediction {
    /// # create or update a prediction
    /// a user holds at most one prediction per race, so a second submission
    /// overwrites the first. the podium is validated before anything is
    /// written; the scoring engine relies on it being duplicate free.
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `new` - the submitted prediction
    ///
    /// ## Returns
    /// * `Prediction` - the stored prediction
    pub fn upsert(conn: &mut PgConnection, new: &NewPrediction) -> CustomResult<Prediction> {
        validate_podium(&new.p1, &new.p2, &new.p3)?;

        let existing = Prediction::get_by_user_and_race(conn, new.user_id, new.race_id)?;

        let prediction = match existing {
            Some(prediction) => {
                use crate::schema::predictions::dsl::*;
                diesel::update(&prediction)
                    .set((
                        pole.eq(&new.pole),
                        sprint_winner.eq(new.sprint_winner.clone()),
                        p1.eq(&new.p1),
                        p2.eq(&new.p2),
                        p3.eq(&new.p3),
                        submitted_at.eq(new.submitted_at),
                    ))
                    .get_result(conn)?
            }
            None => diesel::insert_into(predictions::table)
                .values(new)
                .get_result(conn)?,
        };

        Ok(prediction)
    }

    pub fn get_by_user_and_race(
        conn: &mut PgConnection,
        user_id_in: i32,
        race_id_in: i32,
    ) -> QueryResult<Option<Prediction>> {
        use crate::schema::predictions::dsl::*;
        predictions
            .filter(user_id.eq(user_id_in))
            .filter(race_id.eq(race_id_in))
            .first::<Prediction>(conn)
            .optional()
    }

    /// # get all predictions for a race
    pub fn for_race(conn: &mut PgConnection, race_id_in: i32) -> QueryResult<Vec<Prediction>> {
        use crate::schema::predictions::dsl::*;
        predictions
            .filter(race_id.eq(race_id_in))
            .load::<Prediction>(conn)
    }

    /// # overwrite the stored point total
    /// rescoring calls this for every prediction of a race, so re-entering a
    /// result replaces totals instead of accumulating them.
    pub fn set_points(&self, conn: &mut PgConnection, points_in: i32) -> QueryResult<usize> {
        use crate::schema::predictions::dsl::*;
        diesel::update(self).set(points.eq(points_in)).execute(conn)
    }

    /// # a user's prediction history
    /// every prediction of the user next to the official result of its race,
    /// oldest race first. result columns are null while the race has no
    /// official result yet.
    pub fn overview_for_user(
        conn: &mut PgConnection,
        user_id_in: i32,
    ) -> QueryResult<Vec<PredictionOverview>> {
        sql_query(
            "
        select
            c.id as race_id,
            c.country,
            c.race_date,
            p.pole as predicted_pole,
            p.sprint_winner as predicted_sprint,
            p.p1 as predicted_p1,
            p.p2 as predicted_p2,
            p.p3 as predicted_p3,
            r.pole as actual_pole,
            r.sprint_winner as actual_sprint,
            r.p1 as actual_p1,
            r.p2 as actual_p2,
            r.p3 as actual_p3,
            p.points
        from predictions p
        join races c on c.id = p.race_id
        left join race_results r on r.race_id = c.id
        where p.user_id = $1
        order by c.race_date asc
        ",
        )
        .bind::<Integer, _>(user_id_in)
        .load::<PredictionOverview>(conn)
    }

    /// # the scoreboard of a single race
    /// every user's prediction and point total for the race, best first.
    pub fn scoreboard_for_race(
        conn: &mut PgConnection,
        race_id_in: i32,
    ) -> QueryResult<Vec<ScoreboardRow>> {
        sql_query(
            "
        select
            u.name as user_name,
            p.pole,
            p.sprint_winner,
            p.p1,
            p.p2,
            p.p3,
            p.points
        from predictions p
        join users u on u.id = p.user_id
        where p.race_id = $1
        order by p.points desc nulls last, u.name asc
        ",
        )
        .bind::<Integer, _>(race_id_in)
        .load::<ScoreboardRow>(conn)
    }

    pub fn podium(&self) -> [&str; 3] {
        [self.p1.as_str(), self.p2.as_str(), self.p3.as_str()]
    }

    /// # which user predicted which race
    /// the raw (user, race) pairs behind the admin completeness matrix.
    pub fn matrix_entries(conn: &mut PgConnection) -> QueryResult<Vec<(i32, i32)>> {
        use crate::schema::predictions::dsl::*;
        predictions
            .select((user_id, race_id))
            .load::<(i32, i32)>(conn)
    }
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct PredictionOverview {
    #[diesel(sql_type = Integer)]
    pub race_id: i32,
    #[diesel(sql_type = VarChar)]
    pub country: String,
    #[diesel(sql_type = Nullable<Date>)]
    pub race_date: Option<NaiveDate>,
    #[diesel(sql_type = VarChar)]
    pub predicted_pole: String,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub predicted_sprint: Option<String>,
    #[diesel(sql_type = VarChar)]
    pub predicted_p1: String,
    #[diesel(sql_type = VarChar)]
    pub predicted_p2: String,
    #[diesel(sql_type = VarChar)]
    pub predicted_p3: String,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub actual_pole: Option<String>,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub actual_sprint: Option<String>,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub actual_p1: Option<String>,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub actual_p2: Option<String>,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub actual_p3: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub points: Option<i32>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct ScoreboardRow {
    #[diesel(sql_type = VarChar)]
    pub user_name: String,
    #[diesel(sql_type = VarChar)]
    pub pole: String,
    #[diesel(sql_type = Nullable<VarChar>)]
    pub sprint_winner: Option<String>,
    #[diesel(sql_type = VarChar)]
    pub p1: String,
    #[diesel(sql_type = VarChar)]
    pub p2: String,
    #[diesel(sql_type = VarChar)]
    pub p3: String,
    #[diesel(sql_type = Nullable<Integer>)]
    pub points: Option<i32>,
}
