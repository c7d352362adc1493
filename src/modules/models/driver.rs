use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::NewDriver;
use crate::schema::drivers;

/// # sanitize a driver name
/// strips everything that is not a letter, digit, space, dot, apostrophe or
/// dash. routes compare the sanitized name against the input and reject the
/// request when they differ.
pub fn sanitize_name(name: &str) -> String {
    let re = Regex::new(r"[^\p{L}0-9 .'\-]").unwrap();
    re.replace_all(name, "").to_string()
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub team: String,
    pub number: i32,
}

impl Driver {
    pub fn new(conn: &mut PgConnection, new_driver: &NewDriver) -> QueryResult<Driver> {
        diesel::insert_into(drivers::table)
            .values(new_driver)
            .get_result(conn)
    }

    pub fn exists(conn: &mut PgConnection, name_in: &str) -> QueryResult<bool> {
        use crate::schema::drivers::dsl::*;
        select(exists(drivers.filter(name.eq(name_in)))).get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Driver> {
        use crate::schema::drivers::dsl::*;
        drivers.filter(id.eq(id_in)).first::<Driver>(conn)
    }

    pub fn get_by_name(conn: &mut PgConnection, name_in: &str) -> QueryResult<Driver> {
        use crate::schema::drivers::dsl::*;
        drivers.filter(name.eq(name_in)).first::<Driver>(conn)
    }

    /// # get all drivers
    /// the full grid, ordered by car number like the original lineup sheet.
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Driver>> {
        use crate::schema::drivers::dsl::*;
        drivers.order(number.asc()).load::<Driver>(conn)
    }

    /// # ensure a driver exists
    /// inserts the driver unless a driver with the same name is already on
    /// the grid. used by the `load_drivers` seed binary.
    pub fn ensure_exists(conn: &mut PgConnection, new_driver: &NewDriver) -> QueryResult<Driver> {
        if Driver::exists(conn, &new_driver.name)? {
            Driver::get_by_name(conn, &new_driver.name)
        } else {
            Driver::new(conn, new_driver)
        }
    }

    pub fn update(
        &self,
        conn: &mut PgConnection,
        name_in: &str,
        team_in: &str,
        number_in: i32,
    ) -> QueryResult<Driver> {
        use crate::schema::drivers::dsl::*;
        diesel::update(self)
            .set((name.eq(name_in), team.eq(team_in), number.eq(number_in)))
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_name;

    #[test]
    fn keeps_accented_names_intact() {
        assert_eq!(sanitize_name("Sergio Pérez"), "Sergio Pérez");
    }

    #[test]
    fn strips_markup_characters() {
        assert_eq!(sanitize_name("<b>Max</b>"), "bMaxb");
        assert_eq!(sanitize_name("Lando; drop table"), "Lando drop table");
    }
}
