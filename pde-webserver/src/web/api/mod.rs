use std::{fmt::Display, result};

use pde_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, delete, get,
    http::Status,
    post, put,
    response::{self, status::Created, Responder},
    routes, FromForm, Route, State,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{prelude::*, usecases},
    web::{sqlite, tantivy, Cfg},
};
use pde_application::prelude as flows;
use pde_core::usecases::Error as ParameterError;

mod communities;
mod error;
mod map;
mod tips;
mod util;

pub use self::error::Error as ApiError;

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type CreatedResult<T> = result::Result<Created<Json<T>>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   tips   --- //
        tips::get_tips,
        tips::get_tip,
        tips::post_tip,
        tips::put_tip,
        tips::delete_tip,
        tips::post_tip_like,
        tips::post_tip_dislike,
        tips::post_tip_comment,
        // ---   communities   --- //
        communities::get_communities,
        communities::get_intersecting_communities,
        communities::get_community,
        communities::post_community,
        communities::put_community,
        communities::delete_community,
        communities::post_community_membership,
        communities::delete_community_membership,
        // ---   map   --- //
        map::get_pins_in_bbox,
        // ---   server   --- //
        util::get_version,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

fn created<T>(uri: String, body: T) -> Created<Json<T>> {
    Created::new(uri).body(Json(body))
}
