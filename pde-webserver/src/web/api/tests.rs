use super::*;

pub mod prelude {

    use crate::web::{self, api, sqlite, tantivy};

    pub use crate::web::tests::prelude::{LocalResponse as Response, *};

    pub fn setup() -> (Client, sqlite::Connections, tantivy::SearchEngine) {
        web::tests::rocket_test_setup(vec![("/", api::routes())])
    }

    pub fn user(id: &'static str) -> Header<'static> {
        Header::new(crate::web::guards::USER_ID_HEADER, id)
    }

    pub fn test_json(r: &Response) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }

    pub fn create_community(client: &Client, name: &str, lng: f64, lat: f64, radius: f64) -> String {
        let res = client
            .post("/communities")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": name,
                    "location": {
                        "point": { "type": "Point", "coordinates": [lng, lat] },
                        "radius": radius
                    }
                })
                .to_string(),
            )
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let body = res.into_json::<Value>().unwrap();
        body["id"].as_str().unwrap().to_owned()
    }

    pub fn create_pin(client: &Client, community_id: &str, title: &str, lng: f64, lat: f64) -> String {
        let res = client
            .post("/tips")
            .header(ContentType::JSON)
            .header(user("alice"))
            .body(
                json!({
                    "type": "pin",
                    "communityId": community_id,
                    "title": title,
                    "address": "Alameda 100",
                    "location": {
                        "point": { "type": "Point", "coordinates": [lng, lat] }
                    }
                })
                .to_string(),
            )
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let body = res.into_json::<Value>().unwrap();
        body["id"].as_str().unwrap().to_owned()
    }
}

use self::prelude::*;

#[test]
fn create_and_get_a_community() {
    let (client, _, _) = setup();
    let id = create_community(&client, "Providencia", -70.6, -33.43, 2_000.0);

    let res = client.get(format!("/communities/{id}")).dispatch();
    assert_eq!(res.status(), Status::Ok);
    test_json(&res);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["name"], "Providencia");
    assert_eq!(body["memberCount"], 0);
    assert_eq!(body["location"]["point"]["coordinates"], json!([-70.6, -33.43]));
}

#[test]
fn created_resources_have_a_location_header() {
    let (client, _, _) = setup();
    let res = client
        .post("/communities")
        .header(ContentType::JSON)
        .body(r#"{"name":"Ñuñoa","location":{"point":{"type":"Point","coordinates":[-70.6,-33.45]},"radius":500}}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Created);
    let location = res.headers().get_one("Location").unwrap().to_owned();
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(location, format!("/api/communities/{}", body["id"].as_str().unwrap()));
}

#[test]
fn find_communities_around_a_point() {
    let (client, _, _) = setup();
    let inside = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    create_community(&client, "Lejos", -71.6, -33.04, 1_000.0);

    let res = client
        .get("/communities?longitude=-70.65&latitude=-33.44")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Vec<Value>>().unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], inside.as_str());

    let res = client.get("/communities").dispatch();
    assert_eq!(res.into_json::<Vec<Value>>().unwrap().len(), 2);
}

#[test]
fn find_intersecting_communities() {
    let (client, _, _) = setup();
    create_community(&client, "Centro", -70.65, -33.44, 1_000.0);

    let res = client
        .get("/communities/intersecting?longitude=-70.66&latitude=-33.44&radius=500")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.into_json::<Vec<Value>>().unwrap().len(), 1);

    let res = client
        .get("/communities/intersecting?longitude=-70.66&latitude=-33.44")
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    test_json(&res);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["http_status"], 400);
}

#[test]
fn reject_malformed_query_numbers() {
    let (client, _, _) = setup();
    let res = client
        .get("/communities?longitude=west&latitude=-33.44")
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    let res = client.get("/communities?longitude=-70.65").dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn creating_a_tip_requires_a_user() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let res = client
        .post("/tips")
        .header(ContentType::JSON)
        .body(
            json!({ "type": "text", "communityId": community_id, "title": "Feria libre" })
                .to_string(),
        )
        .dispatch();
    assert_eq!(res.status(), Status::Unauthorized);

    let res = client
        .post("/tips")
        .header(ContentType::JSON)
        .header(user("  "))
        .body(
            json!({ "type": "text", "communityId": community_id, "title": "Feria libre" })
                .to_string(),
        )
        .dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
}

#[test]
fn pin_without_location_is_rejected() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let res = client
        .post("/tips")
        .header(ContentType::JSON)
        .header(user("alice"))
        .body(
            json!({
                "type": "pin",
                "communityId": community_id,
                "title": "Farmacia",
                "address": "Alameda 100"
            })
            .to_string(),
        )
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    test_json(&res);
}

#[test]
fn tip_for_unknown_community_is_not_found() {
    let (client, _, _) = setup();
    let res = client
        .post("/tips")
        .header(ContentType::JSON)
        .header(user("alice"))
        .body(json!({ "type": "text", "communityId": "nope", "title": "Feria" }).to_string())
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn malformed_json_is_unprocessable() {
    let (client, _, _) = setup();
    let res = client
        .post("/communities")
        .header(ContentType::JSON)
        .body(r#"{"name":"Centro","location":"#)
        .dispatch();
    assert_eq!(res.status(), Status::UnprocessableEntity);
    test_json(&res);
}

#[test]
fn search_tips_with_a_misspelled_word() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let pin = create_pin(&client, &community_id, "Farmacia popular", -70.65, -33.44);
    create_pin(&client, &community_id, "Panadería", -70.65, -33.44);

    let res = client
        .get("/tips?search=farmasia&longitude=-70.65&latitude=-33.44")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    test_json(&res);
    let body = res.into_json::<Value>().unwrap();
    let pins = body["pins"].as_array().unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0]["id"], pin.as_str());
    assert_eq!(pins[0]["type"], "pin");
    assert!(body["texts"].as_array().unwrap().is_empty());
}

#[test]
fn search_outside_of_any_community_is_empty() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);

    let res = client
        .get("/tips?search=farmacia&longitude=-71.6&latitude=-33.04")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Value>().unwrap();
    assert!(body["pins"].as_array().unwrap().is_empty());
    assert!(body["texts"].as_array().unwrap().is_empty());
}

#[test]
fn search_rejects_an_invalid_timestamp() {
    let (client, _, _) = setup();
    let res = client.get("/tips?updatedAt=yesterday").dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn get_an_unknown_tip() {
    let (client, _, _) = setup();
    let res = client.get("/tips/does-not-exist").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    test_json(&res);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["http_status"], 404);
}

#[test]
fn update_a_tip() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let id = create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);

    let res = client
        .put(format!("/tips/{id}"))
        .header(ContentType::JSON)
        .body(json!({ "title": "Botillería" }).to_string())
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["title"], "Botillería");

    let res = client
        .get("/tips?search=botilleria&longitude=-70.65&latitude=-33.44")
        .dispatch();
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["pins"].as_array().unwrap().len(), 1);
}

#[test]
fn delete_a_tip() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let id = create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);

    let res = client.delete(format!("/tips/{id}")).dispatch();
    assert_eq!(res.status(), Status::NoContent);
    let res = client.get(format!("/tips/{id}")).dispatch();
    assert_eq!(res.status(), Status::NotFound);
    let res = client.delete(format!("/tips/{id}")).dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn like_and_dislike_a_tip() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let id = create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);

    let res = client
        .post(format!("/tips/{id}/like"))
        .header(user("bob"))
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["likedBy"], json!(["bob"]));

    let res = client
        .post(format!("/tips/{id}/dislike"))
        .header(user("bob"))
        .dispatch();
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["likedBy"], json!([]));
    assert_eq!(body["dislikedBy"], json!(["bob"]));

    let res = client.post(format!("/tips/{id}/like")).dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
}

#[test]
fn comment_on_a_tip() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let id = create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);

    let res = client
        .post(format!("/tips/{id}/comments"))
        .header(ContentType::JSON)
        .body(r#"{"messageId":"m1"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["comments"], json!(["m1"]));
}

#[test]
fn join_a_community_twice() {
    let (client, _, _) = setup();
    let id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);

    for _ in 0..2 {
        let res = client
            .post(format!("/communities/{id}/join"))
            .header(user("carla"))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_json::<Value>().unwrap();
        assert_eq!(body["memberCount"], 1);
    }

    let res = client
        .delete(format!("/communities/{id}/join"))
        .header(user("carla"))
        .dispatch();
    let body = res.into_json::<Value>().unwrap();
    assert_eq!(body["memberCount"], 0);
}

#[test]
fn delete_a_community() {
    let (client, _, _) = setup();
    let id = create_community(&client, "Centro", -70.65, -33.44, 1_000.0);
    let res = client.delete(format!("/communities/{id}")).dispatch();
    assert_eq!(res.status(), Status::NoContent);
    let res = client.get(format!("/communities/{id}")).dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn pins_in_a_bounding_box() {
    let (client, _, _) = setup();
    let community_id = create_community(&client, "Centro", -70.65, -33.44, 50_000.0);
    let inside = create_pin(&client, &community_id, "Farmacia", -70.65, -33.44);
    create_pin(&client, &community_id, "Mercado", -70.2, -33.1);

    let res = client
        .get("/map?southwest=-70.7,-33.5&northeast=-70.6,-33.4")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_json::<Vec<Value>>().unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], inside.as_str());
}

#[test]
fn reject_an_inverted_bounding_box() {
    let (client, _, _) = setup();
    let res = client
        .get("/map?southwest=-70.6,-33.4&northeast=-70.7,-33.5")
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    let res = client.get("/map?southwest=-70.6,-33.4").dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn get_the_server_version() {
    let (client, _, _) = setup();
    let res = client.get("/server/version").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.into_string().unwrap(), DUMMY_VERSION);
}
