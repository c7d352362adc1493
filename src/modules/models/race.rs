use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::{Identifiable, PgConnection, Queryable};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::NewRace;
use crate::schema::races;

/// hour of the race day used as the cutoff when no explicit deadline is set.
pub const IMPLICIT_CUTOFF_HOUR: u32 = 12;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RaceStatus {
    Upcoming,
    Locked,
    Completed,
}

impl RaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceStatus::Upcoming => "upcoming",
            RaceStatus::Locked => "locked",
            RaceStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<RaceStatus> {
        match value {
            "upcoming" => Some(RaceStatus::Upcoming),
            "locked" => Some(RaceStatus::Locked),
            "completed" => Some(RaceStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Race {
    pub id: i32,
    pub country: String,
    pub circuit: String,
    pub race_date: Option<NaiveDate>,
    pub has_sprint: bool,
    pub status: String,
    pub prediction_deadline: Option<NaiveDateTime>,
}

impl Race {
    /// # create race
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `new_race` - the race to insert
    ///
    /// ## Returns
    /// * `Race` - the created race
    pub fn new(conn: &mut PgConnection, new_race: &NewRace) -> QueryResult<Race> {
        diesel::insert_into(races::table)
            .values(new_race)
            .get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Race> {
        use crate::schema::races::dsl::*;
        races.filter(id.eq(id_in)).first::<Race>(conn)
    }

    /// # get all races sorted by date
    /// the full season calendar, earliest race first.
    pub fn get_all_chronologicaly(conn: &mut PgConnection) -> QueryResult<Vec<Race>> {
        use crate::schema::races::dsl::*;
        races.order(race_date.asc()).load::<Race>(conn)
    }

    /// # get upcoming races
    /// the next races still open for predictions, earliest first.
    pub fn get_upcoming(conn: &mut PgConnection, limit: i64) -> QueryResult<Vec<Race>> {
        use crate::schema::races::dsl::*;
        races
            .filter(status.eq(RaceStatus::Upcoming.as_str()))
            .order(race_date.asc())
            .limit(limit)
            .load::<Race>(conn)
    }

    /// # get the most recent completed race
    pub fn get_last_completed(conn: &mut PgConnection) -> QueryResult<Option<Race>> {
        use crate::schema::races::dsl::*;
        races
            .filter(status.eq(RaceStatus::Completed.as_str()))
            .order(race_date.desc())
            .first::<Race>(conn)
            .optional()
    }

    pub fn set_status(&self, conn: &mut PgConnection, new_status: RaceStatus) -> QueryResult<Race> {
        use crate::schema::races::dsl::*;
        diesel::update(self)
            .set(status.eq(new_status.as_str()))
            .get_result(conn)
    }

    pub fn set_deadline(
        &self,
        conn: &mut PgConnection,
        deadline: Option<NaiveDateTime>,
    ) -> QueryResult<Race> {
        use crate::schema::races::dsl::*;
        diesel::update(self)
            .set(prediction_deadline.eq(deadline))
            .get_result(conn)
    }

    /// # replace the season calendar
    /// wipes the races table and loads the given calendar in one transaction.
    /// used by the `load_season` binary.
    pub fn replace_calendar(conn: &mut PgConnection, calendar: &[NewRace]) -> QueryResult<usize> {
        conn.transaction(|conn| {
            diesel::delete(races::table).execute(conn)?;
            diesel::insert_into(races::table)
                .values(calendar)
                .execute(conn)
        })
    }

    /// # lock races whose gate has closed
    /// flips every `upcoming` race that is no longer open to `locked`.
    /// ran periodically from the cron jobs.
    ///
    /// ## Returns
    /// * `usize` - the amount of races locked
    pub fn lock_expired(conn: &mut PgConnection, now: NaiveDateTime) -> QueryResult<usize> {
        use crate::schema::races::dsl::*;

        let open_races = races
            .filter(status.eq(RaceStatus::Upcoming.as_str()))
            .load::<Race>(conn)?;

        let mut locked = 0;
        for race in open_races {
            if !race.is_open(now) {
                race.set_status(conn, RaceStatus::Locked)?;
                locked += 1;
            }
        }

        Ok(locked)
    }

    pub fn race_status(&self) -> Option<RaceStatus> {
        RaceStatus::parse(&self.status)
    }

    pub fn is_completed(&self) -> bool {
        self.race_status() == Some(RaceStatus::Completed)
    }

    /// # the moment predictions close
    /// the explicit deadline when the admin set one, otherwise midday of the
    /// race day. `None` when the race carries neither.
    pub fn prediction_cutoff(&self) -> Option<NaiveDateTime> {
        if let Some(deadline) = self.prediction_deadline {
            return Some(deadline);
        }

        self.race_date
            .and_then(|date| date.and_hms_opt(IMPLICIT_CUTOFF_HOUR, 0, 0))
    }

    /// # does the race take new predictions
    /// closed for good once the race is locked or completed, no matter the
    /// clock. while it is upcoming the deadline gate decides.
    pub fn accepts_predictions(&self, now: NaiveDateTime) -> bool {
        match self.race_status() {
            Some(RaceStatus::Locked) | Some(RaceStatus::Completed) => false,
            _ => self.is_open(now),
        }
    }

    /// # is the prediction window open
    /// open strictly before the cutoff, closed from the cutoff onwards.
    /// a race without any cutoff information stays open and gets flagged in
    /// the log so an operator can fix the calendar data.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        match self.prediction_cutoff() {
            Some(cutoff) => now < cutoff,
            None => {
                warn!(
                    target:"models/race",
                    "race {} ({}) has no deadline and no date, predictions stay open",
                    self.id, self.country
                );
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race(
        race_date: Option<NaiveDate>,
        prediction_deadline: Option<NaiveDateTime>,
    ) -> Race {
        Race {
            id: 1,
            country: "Australia".to_string(),
            circuit: "Albert Park".to_string(),
            race_date,
            has_sprint: false,
            status: "upcoming".to_string(),
            prediction_deadline,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn explicit_deadline_closes_at_the_exact_instant() {
        let deadline = date(2026, 3, 7).and_hms_opt(14, 0, 0).unwrap();
        let race = race(Some(date(2026, 3, 8)), Some(deadline));

        let just_before = date(2026, 3, 7).and_hms_opt(13, 59, 59).unwrap();
        let just_after = date(2026, 3, 7).and_hms_opt(14, 0, 1).unwrap();

        assert!(race.is_open(just_before));
        assert!(!race.is_open(deadline));
        assert!(!race.is_open(just_after));
    }

    #[test]
    fn falls_back_to_midday_of_the_race_day() {
        let race = race(Some(date(2026, 3, 8)), None);

        let morning = date(2026, 3, 8).and_hms_opt(11, 59, 59).unwrap();
        let midday = date(2026, 3, 8).and_hms_opt(12, 0, 0).unwrap();

        assert!(race.is_open(morning));
        assert!(!race.is_open(midday));
    }

    #[test]
    fn explicit_deadline_wins_over_the_race_day_fallback() {
        // deadline a day before the race, gate must ignore the race date
        let deadline = date(2026, 3, 7).and_hms_opt(10, 0, 0).unwrap();
        let race = race(Some(date(2026, 3, 8)), Some(deadline));

        let race_day_morning = date(2026, 3, 8).and_hms_opt(9, 0, 0).unwrap();
        assert!(!race.is_open(race_day_morning));
    }

    #[test]
    fn stays_open_without_any_cutoff_information() {
        let race = race(None, None);
        let whenever = date(2099, 12, 31).and_hms_opt(23, 59, 59).unwrap();

        assert!(race.is_open(whenever));
    }

    #[test]
    fn a_locked_race_refuses_predictions_even_before_the_deadline() {
        let deadline = date(2026, 3, 7).and_hms_opt(14, 0, 0).unwrap();
        let mut race = race(Some(date(2026, 3, 8)), Some(deadline));
        race.status = RaceStatus::Locked.as_str().to_string();

        let well_before = date(2026, 3, 1).and_hms_opt(10, 0, 0).unwrap();
        // the clock alone would leave the gate open
        assert!(race.is_open(well_before));
        assert!(!race.accepts_predictions(well_before));

        race.status = RaceStatus::Completed.as_str().to_string();
        assert!(!race.accepts_predictions(well_before));
    }

    #[test]
    fn an_upcoming_race_follows_the_deadline_gate() {
        let deadline = date(2026, 3, 7).and_hms_opt(14, 0, 0).unwrap();
        let race = race(Some(date(2026, 3, 8)), Some(deadline));

        let before = date(2026, 3, 7).and_hms_opt(13, 0, 0).unwrap();
        let after = date(2026, 3, 7).and_hms_opt(15, 0, 0).unwrap();

        assert!(race.accepts_predictions(before));
        assert!(!race.accepts_predictions(after));
    }

    #[test]
    fn status_round_trips_through_its_string_form() {
        for status in [RaceStatus::Upcoming, RaceStatus::Locked, RaceStatus::Completed] {
            assert_eq!(RaceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RaceStatus::parse("corrida"), None);
    }
}
