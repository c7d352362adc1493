use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use crate::modules::models::general::establish_connection;
use crate::modules::models::user::User;

/// # identity of the caller
/// handlers take the caller's identity as an explicit guard argument instead
/// of reading ambient session state. the admin flag always comes from the
/// users table, never from the request.
#[derive(Debug, Clone, Copy)]
pub struct Claims {
    pub user_id: i32,
    pub is_admin: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Claims {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = match request.headers().get_one("x-user-id") {
            Some(header) => header,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let user_id: i32 = match header.parse() {
            Ok(user_id) => user_id,
            Err(_) => return Outcome::Error((Status::Unauthorized, ())),
        };

        let conn = &mut establish_connection();
        match User::get_by_id(conn, user_id) {
            Ok(user) => Outcome::Success(Claims {
                user_id: user.id,
                is_admin: user.is_admin,
            }),
            Err(_) => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
