use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use crate::schema::*;


#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = drivers)]
pub struct NewDriver {
    pub name: String,
    pub team: String,
    pub number: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = races)]
pub struct NewRace {
    pub country: String,
    pub circuit: String,
    pub race_date: Option<chrono::NaiveDate>,
    pub has_sprint: bool,
    pub status: String,
    pub prediction_deadline: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = predictions)]
pub struct NewPrediction {
    pub user_id: i32,
    pub race_id: i32,
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub submitted_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = race_results)]
pub struct NewRaceResult {
    pub race_id: i32,
    pub pole: String,
    pub sprint_winner: Option<String>,
    pub p1: String,
    pub p2: String,
    pub p3: String,
}
