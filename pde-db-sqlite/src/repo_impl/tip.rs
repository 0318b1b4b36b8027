use super::*;

// Far below SQLite's limit of 32766 bind parameters,
// leaving room for the community ids of the query.
const MAX_BOUND_IDS_PER_QUERY: usize = 500;

const RATING_DIRECTION_LIKE: i16 = 0;
const RATING_DIRECTION_DISLIKE: i16 = 1;

const fn rating_direction_primitive(direction: RatingDirection) -> i16 {
    match direction {
        RatingDirection::Like => RATING_DIRECTION_LIKE,
        RatingDirection::Dislike => RATING_DIRECTION_DISLIKE,
    }
}

macro_rules! impl_tip_repo_read {
    () => {
        fn get_tip(&self, id: &str) -> Result<Tip> {
            get_tip(&mut self.0.conn(), id)
        }
        fn query_tips(&self, query: &TipQuery) -> Result<Vec<Tip>> {
            query_tips(&mut self.0.conn(), query)
        }
        fn pins_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Tip>> {
            pins_in_bbox(&mut self.0.conn(), bbox)
        }
    };
}

macro_rules! impl_tip_repo_write {
    () => {
        fn create_tip(&self, tip: &Tip) -> Result<()> {
            create_tip(&mut self.0.conn(), tip)
        }
        fn update_tip(&self, tip: &Tip) -> Result<()> {
            update_tip(&mut self.0.conn(), tip)
        }
        fn delete_tip(&self, id: &str) -> Result<()> {
            delete_tip(&mut self.0.conn(), id)
        }
        fn rate_tip(
            &self,
            id: &str,
            user_id: &UserId,
            direction: RatingDirection,
            at: Timestamp,
        ) -> Result<()> {
            rate_tip(&mut self.0.conn(), id, user_id, direction, at)
        }
        fn add_tip_comment(&self, id: &str, message_id: &MessageId, at: Timestamp) -> Result<()> {
            add_tip_comment(&mut self.0.conn(), id, message_id, at)
        }
    };
}

impl TipRepo for DbReadOnly<'_> {
    impl_tip_repo_read!();

    fn create_tip(&self, _tip: &Tip) -> Result<()> {
        Err(read_only_violation())
    }
    fn update_tip(&self, _tip: &Tip) -> Result<()> {
        Err(read_only_violation())
    }
    fn delete_tip(&self, _id: &str) -> Result<()> {
        Err(read_only_violation())
    }
    fn rate_tip(
        &self,
        _id: &str,
        _user_id: &UserId,
        _direction: RatingDirection,
        _at: Timestamp,
    ) -> Result<()> {
        Err(read_only_violation())
    }
    fn add_tip_comment(&self, _id: &str, _message_id: &MessageId, _at: Timestamp) -> Result<()> {
        Err(read_only_violation())
    }
}

impl TipRepo for DbReadWrite<'_> {
    impl_tip_repo_read!();
    impl_tip_repo_write!();
}

fn resolve_tip_rowid(conn: &mut SqliteConnection, id: &str) -> QueryResult<i64> {
    use schema::tip::dsl;
    dsl::tip.select(dsl::rowid).filter(dsl::id.eq(id)).first(conn)
}

fn touch_tip(conn: &mut SqliteConnection, rowid: i64, at: Timestamp) -> QueryResult<usize> {
    use schema::tip::dsl;
    diesel::update(dsl::tip.filter(dsl::rowid.eq(rowid)))
        .set(dsl::updated_at.eq(at.as_millis()))
        .execute(conn)
}

fn new_tip_row(tip: &Tip) -> models::NewTip<'_> {
    let Tip {
        id,
        author_id,
        community_id,
        title,
        description,
        background_image,
        created_at,
        updated_at,
        content,
        ..
    } = tip;
    let pin = content.pin();
    models::NewTip {
        id: id.as_str(),
        kind: content.kind().into(),
        community_id: community_id.as_str(),
        author_id: author_id.as_str(),
        title,
        description,
        background_image: background_image.as_deref(),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
        lng: pin.map(|p| p.location.center.lng()),
        lat: pin.map(|p| p.location.center.lat()),
        radius: pin.map(|p| p.location.radius.to_meters()),
        address: pin.map(|p| p.address.as_str()),
        subtype: pin.and_then(|p| p.subtype.as_deref()),
        picture: pin.and_then(|p| p.picture.as_deref()),
        colour: pin.and_then(|p| p.colour.as_deref()),
        start_date: pin.and_then(|p| p.start_date).map(Timestamp::as_millis),
        duration_ms: pin
            .and_then(|p| p.duration_ms)
            .map(|d| i64::try_from(d).unwrap_or(i64::MAX)),
    }
}

fn insert_tip_tags(conn: &mut SqliteConnection, rowid: i64, tags: &[String]) -> QueryResult<usize> {
    let tags: Vec<_> = tags
        .iter()
        .map(|tag| models::NewTipTag {
            parent_rowid: rowid,
            tag,
        })
        .collect();
    diesel::insert_or_ignore_into(schema::tip_tag::table)
        .values(&tags)
        .execute(conn)
}

fn load_tip_ratings(
    conn: &mut SqliteConnection,
    rowid: i64,
    direction: RatingDirection,
) -> Result<Vec<UserId>> {
    use schema::tip_rating::dsl;
    Ok(dsl::tip_rating
        .select(dsl::user_id)
        .filter(dsl::parent_rowid.eq(rowid))
        .filter(dsl::direction.eq(rating_direction_primitive(direction)))
        .load::<String>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(UserId::from)
        .collect())
}

fn load_tip(conn: &mut SqliteConnection, row: models::Tip) -> Result<Tip> {
    let models::Tip {
        rowid,
        id,
        kind,
        community_id,
        author_id,
        title,
        description,
        background_image,
        created_at,
        updated_at,
        lng,
        lat,
        radius,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    } = row;
    let content = match kind.parse::<TipKind>() {
        Ok(TipKind::Pin) => {
            let (Some(lng), Some(lat)) = (lng, lat) else {
                return Err(anyhow!("Pin {id} has no location").into());
            };
            TipContent::Pin(PinDetails {
                location: load_circle(lng, lat, radius.unwrap_or_default())?,
                address: address.unwrap_or_default(),
                subtype,
                picture,
                colour,
                start_date: start_date.map(Timestamp::from_millis),
                duration_ms: duration_ms.map(i64::unsigned_abs),
            })
        }
        Ok(TipKind::Text) => TipContent::Text,
        Err(_) => {
            return Err(anyhow!("Tip {id} has an invalid kind '{kind}'").into());
        }
    };
    let tags = {
        use schema::tip_tag::dsl;
        dsl::tip_tag
            .select(dsl::tag)
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<String>(conn)
            .map_err(from_diesel_err)?
    };
    let comments = {
        use schema::tip_comment::dsl;
        dsl::tip_comment
            .select(dsl::message_id)
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<String>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .map(MessageId::from)
            .collect()
    };
    let liked_by = load_tip_ratings(conn, rowid, RatingDirection::Like)?;
    let disliked_by = load_tip_ratings(conn, rowid, RatingDirection::Dislike)?;
    Ok(Tip {
        id: id.into(),
        author_id: author_id.into(),
        community_id: community_id.into(),
        title,
        description,
        tags,
        background_image,
        comments,
        liked_by,
        disliked_by,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
        content,
    })
}

fn load_tips(conn: &mut SqliteConnection, rows: Vec<models::Tip>) -> Result<Vec<Tip>> {
    rows.into_iter().map(|row| load_tip(conn, row)).collect()
}

fn create_tip(conn: &mut SqliteConnection, tip: &Tip) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        diesel::insert_into(schema::tip::table)
            .values(&new_tip_row(tip))
            .execute(conn)?;
        let rowid = resolve_tip_rowid(conn, tip.id.as_str())?;
        insert_tip_tags(conn, rowid, &tip.tags)?;
        let comments: Vec<_> = tip
            .comments
            .iter()
            .map(|message_id| models::NewTipComment {
                parent_rowid: rowid,
                message_id: message_id.as_str(),
            })
            .collect();
        diesel::insert_or_ignore_into(schema::tip_comment::table)
            .values(&comments)
            .execute(conn)?;
        let likes = tip
            .liked_by
            .iter()
            .map(|user_id| (user_id, RatingDirection::Like));
        let dislikes = tip
            .disliked_by
            .iter()
            .map(|user_id| (user_id, RatingDirection::Dislike));
        let ratings: Vec<_> = likes
            .chain(dislikes)
            .map(|(user_id, direction)| models::NewTipRating {
                parent_rowid: rowid,
                user_id: user_id.as_str(),
                direction: rating_direction_primitive(direction),
            })
            .collect();
        diesel::insert_or_ignore_into(schema::tip_rating::table)
            .values(&ratings)
            .execute(conn)?;
        Ok(())
    })
    .map_err(from_diesel_err)
}

fn update_tip(conn: &mut SqliteConnection, tip: &Tip) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        use schema::{tip::dsl as t_dsl, tip_tag::dsl as tt_dsl};
        let rowid = resolve_tip_rowid(conn, tip.id.as_str())?;
        diesel::update(t_dsl::tip.filter(t_dsl::rowid.eq(rowid)))
            .set(&new_tip_row(tip))
            .execute(conn)?;
        diesel::delete(tt_dsl::tip_tag.filter(tt_dsl::parent_rowid.eq(rowid))).execute(conn)?;
        insert_tip_tags(conn, rowid, &tip.tags)?;
        Ok(())
    })
    .map_err(from_diesel_err)
}

fn get_tip(conn: &mut SqliteConnection, id: &str) -> Result<Tip> {
    use schema::tip::dsl;
    let row = dsl::tip
        .filter(dsl::id.eq(id))
        .first::<models::Tip>(conn)
        .map_err(from_diesel_err)?;
    load_tip(conn, row)
}

fn query_tips(conn: &mut SqliteConnection, query: &TipQuery) -> Result<Vec<Tip>> {
    let TipQuery {
        ids, community_ids, ..
    } = query;
    if ids.as_ref().is_some_and(Vec::is_empty)
        || community_ids.as_ref().is_some_and(Vec::is_empty)
    {
        return Ok(vec![]);
    }
    let Some(ids) = ids else {
        let rows = query_tip_rows(conn, query, None)?;
        return load_tips(conn, rows);
    };
    // Search results may contain more ids than SQLite
    // accepts as bind parameters in a single statement.
    let mut rows = Vec::new();
    for chunk in ids.chunks(MAX_BOUND_IDS_PER_QUERY) {
        rows.extend(query_tip_rows(conn, query, Some(chunk))?);
    }
    rows.sort_unstable_by_key(|row| row.rowid);
    rows.dedup_by_key(|row| row.rowid);
    load_tips(conn, rows)
}

fn query_tip_rows(
    conn: &mut SqliteConnection,
    query: &TipQuery,
    ids: Option<&[Id]>,
) -> Result<Vec<models::Tip>> {
    use schema::tip::dsl;
    let TipQuery {
        community_ids,
        updated_since,
        kind,
        ..
    } = query;
    let mut q = dsl::tip.into_boxed();
    if let Some(ids) = ids {
        let ids: Vec<_> = ids.iter().map(Id::as_str).collect();
        q = q.filter(dsl::id.eq_any(ids));
    }
    if let Some(community_ids) = community_ids {
        let community_ids: Vec<_> = community_ids.iter().map(Id::as_str).collect();
        q = q.filter(dsl::community_id.eq_any(community_ids));
    }
    if let Some(updated_since) = updated_since {
        q = q.filter(dsl::updated_at.ge(updated_since.as_millis()));
    }
    if let Some(kind) = kind {
        let kind: &'static str = (*kind).into();
        q = q.filter(dsl::kind.eq(kind));
    }
    q.order_by(dsl::rowid)
        .load::<models::Tip>(conn)
        .map_err(from_diesel_err)
}

fn pins_in_bbox(conn: &mut SqliteConnection, bbox: &MapBbox) -> Result<Vec<Tip>> {
    use schema::tip::dsl;
    let sw = bbox.south_west();
    let ne = bbox.north_east();
    let pin_kind: &'static str = TipKind::Pin.into();
    let mut q = dsl::tip
        .filter(dsl::kind.eq(pin_kind))
        .filter(dsl::lat.between(sw.lat(), ne.lat()))
        .into_boxed();
    if bbox.is_inverse() {
        q = q.filter(dsl::lng.ge(sw.lng()).or(dsl::lng.le(ne.lng())));
    } else {
        q = q.filter(dsl::lng.between(sw.lng(), ne.lng()));
    }
    let rows = q
        .order_by(dsl::rowid)
        .load::<models::Tip>(conn)
        .map_err(from_diesel_err)?;
    load_tips(conn, rows)
}

fn delete_tip(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::tip::dsl;
    // Tags, comments and ratings are deleted by cascade
    let deleted = diesel::delete(dsl::tip.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if deleted == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn rate_tip(
    conn: &mut SqliteConnection,
    id: &str,
    user_id: &UserId,
    direction: RatingDirection,
    at: Timestamp,
) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        use schema::tip_rating::dsl;
        let rowid = resolve_tip_rowid(conn, id)?;
        let direction = rating_direction_primitive(direction);
        let previous = dsl::tip_rating
            .select(dsl::direction)
            .filter(dsl::parent_rowid.eq(rowid))
            .filter(dsl::user_id.eq(user_id.as_str()))
            .first::<i16>(conn)
            .optional()?;
        if previous == Some(direction) {
            return Ok(());
        }
        // Replacing the single rating row of the user
        // removes the opposite rating.
        diesel::replace_into(schema::tip_rating::table)
            .values(&models::NewTipRating {
                parent_rowid: rowid,
                user_id: user_id.as_str(),
                direction,
            })
            .execute(conn)?;
        touch_tip(conn, rowid, at)?;
        Ok(())
    })
    .map_err(from_diesel_err)
}

fn add_tip_comment(
    conn: &mut SqliteConnection,
    id: &str,
    message_id: &MessageId,
    at: Timestamp,
) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        let rowid = resolve_tip_rowid(conn, id)?;
        let inserted = diesel::insert_or_ignore_into(schema::tip_comment::table)
            .values(&models::NewTipComment {
                parent_rowid: rowid,
                message_id: message_id.as_str(),
            })
            .execute(conn)?;
        if inserted > 0 {
            touch_tip(conn, rowid, at)?;
        }
        Ok(())
    })
    .map_err(from_diesel_err)
}
