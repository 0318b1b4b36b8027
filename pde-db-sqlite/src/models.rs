#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = community, treat_none_as_null = true)]
pub struct NewCommunity<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub lng: f64,
    pub lat: f64,
    pub radius: f64,
    pub colour: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct Community {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub description: String,
    pub lng: f64,
    pub lat: f64,
    pub radius: f64,
    pub colour: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = community_tag)]
pub struct NewCommunityTag<'a> {
    pub parent_rowid: i64,
    pub tag: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = community_member)]
pub struct NewCommunityMember<'a> {
    pub parent_rowid: i64,
    pub user_id: &'a str,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = tip, treat_none_as_null = true)]
pub struct NewTip<'a> {
    pub id: &'a str,
    pub kind: &'a str,
    pub community_id: &'a str,
    pub author_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub background_image: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub radius: Option<f64>,
    pub address: Option<&'a str>,
    pub subtype: Option<&'a str>,
    pub picture: Option<&'a str>,
    pub colour: Option<&'a str>,
    pub start_date: Option<i64>,
    pub duration_ms: Option<i64>,
}

#[derive(Queryable)]
pub struct Tip {
    pub rowid: i64,
    pub id: String,
    pub kind: String,
    pub community_id: String,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub background_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub radius: Option<f64>,
    pub address: Option<String>,
    pub subtype: Option<String>,
    pub picture: Option<String>,
    pub colour: Option<String>,
    pub start_date: Option<i64>,
    pub duration_ms: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = tip_tag)]
pub struct NewTipTag<'a> {
    pub parent_rowid: i64,
    pub tag: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = tip_comment)]
pub struct NewTipComment<'a> {
    pub parent_rowid: i64,
    pub message_id: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = tip_rating)]
pub struct NewTipRating<'a> {
    pub parent_rowid: i64,
    pub user_id: &'a str,
    pub direction: i16,
}
