use chrono::NaiveDateTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, VarChar};
use serde::{Deserialize, Serialize};

use crate::models::NewUser;
use crate::schema::users;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn new(conn: &mut PgConnection, new_user: &NewUser) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(new_user)
            .get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<User> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(id_in)).first::<User>(conn)
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        users.order(name.asc()).load::<User>(conn)
    }

    /// # season standings
    /// every user with the sum of their scored predictions, best first.
    /// users without a single scored prediction show up with zero points.
    pub fn get_standings(conn: &mut PgConnection) -> QueryResult<Vec<StandingsRow>> {
        sql_query(
            "
        select
            u.id as user_id,
            u.name,
            CAST(coalesce(sum(p.points), 0) AS INT) as total_points,
            CAST(count(p.points) AS INT) as scored_predictions
        from users u
        left join predictions p on p.user_id = u.id
        group by u.id, u.name
        order by total_points desc, u.name asc
        ",
        )
        .load::<StandingsRow>(conn)
    }
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct StandingsRow {
    #[diesel(sql_type = Integer)]
    pub user_id: i32,
    #[diesel(sql_type = VarChar)]
    pub name: String,
    #[diesel(sql_type = Integer)]
    pub total_points: i32,
    #[diesel(sql_type = Integer)]
    pub scored_predictions: i32,
}
