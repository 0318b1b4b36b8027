use rocket::{
    self,
    http::Status,
    request::{FromRequest, Outcome, Request},
};

use crate::core::prelude::*;

/// Identity of the user that has been authenticated upstream.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug)]
pub struct Account(UserId);

impl Account {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user_id = request
            .headers()
            .get_one(USER_ID_HEADER)
            .map(str::trim)
            .filter(|id| !id.is_empty());
        match user_id {
            Some(id) => Outcome::Success(Account(id.into())),
            None => {
                debug!("Missing {USER_ID_HEADER} header");
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

#[derive(Debug)]
pub struct Version(pub &'static str);
