use super::*;

macro_rules! impl_community_repo_read {
    () => {
        fn get_community(&self, id: &str) -> Result<Community> {
            get_community(&mut self.0.conn(), id)
        }
        fn all_communities(&self) -> Result<Vec<Community>> {
            all_communities(&mut self.0.conn())
        }
        fn communities_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Community>> {
            communities_in_bbox(&mut self.0.conn(), bbox)
        }
        fn max_community_radius(&self) -> Result<Option<Distance>> {
            max_community_radius(&mut self.0.conn())
        }
    };
}

macro_rules! impl_community_repo_write {
    () => {
        fn create_community(&self, community: &Community) -> Result<()> {
            create_community(&mut self.0.conn(), community)
        }
        fn update_community(&self, community: &Community) -> Result<()> {
            update_community(&mut self.0.conn(), community)
        }
        fn delete_community(&self, id: &str) -> Result<()> {
            delete_community(&mut self.0.conn(), id)
        }
        fn add_community_member(&self, id: &str, user_id: &UserId, at: Timestamp) -> Result<usize> {
            add_community_member(&mut self.0.conn(), id, user_id, at)
        }
        fn remove_community_member(
            &self,
            id: &str,
            user_id: &UserId,
            at: Timestamp,
        ) -> Result<usize> {
            remove_community_member(&mut self.0.conn(), id, user_id, at)
        }
    };
}

impl CommunityRepo for DbReadOnly<'_> {
    impl_community_repo_read!();

    fn create_community(&self, _community: &Community) -> Result<()> {
        Err(read_only_violation())
    }
    fn update_community(&self, _community: &Community) -> Result<()> {
        Err(read_only_violation())
    }
    fn delete_community(&self, _id: &str) -> Result<()> {
        Err(read_only_violation())
    }
    fn add_community_member(&self, _id: &str, _user_id: &UserId, _at: Timestamp) -> Result<usize> {
        Err(read_only_violation())
    }
    fn remove_community_member(
        &self,
        _id: &str,
        _user_id: &UserId,
        _at: Timestamp,
    ) -> Result<usize> {
        Err(read_only_violation())
    }
}

impl CommunityRepo for DbReadWrite<'_> {
    impl_community_repo_read!();
    impl_community_repo_write!();
}

fn resolve_community_rowid(conn: &mut SqliteConnection, id: &str) -> QueryResult<i64> {
    use schema::community::dsl;
    dsl::community
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first(conn)
}

fn count_members(conn: &mut SqliteConnection, rowid: i64) -> QueryResult<i64> {
    use schema::community_member::dsl;
    dsl::community_member
        .filter(dsl::parent_rowid.eq(rowid))
        .count()
        .get_result(conn)
}

fn insert_community_tags(
    conn: &mut SqliteConnection,
    rowid: i64,
    tags: &[String],
) -> QueryResult<usize> {
    let tags: Vec<_> = tags
        .iter()
        .map(|tag| models::NewCommunityTag {
            parent_rowid: rowid,
            tag,
        })
        .collect();
    diesel::insert_or_ignore_into(schema::community_tag::table)
        .values(&tags)
        .execute(conn)
}

fn new_community_row(community: &Community) -> models::NewCommunity<'_> {
    let Community {
        id,
        name,
        description,
        region,
        colour,
        created_at,
        updated_at,
        ..
    } = community;
    models::NewCommunity {
        id: id.as_str(),
        name,
        description,
        lng: region.center.lng(),
        lat: region.center.lat(),
        radius: region.radius.to_meters(),
        colour: colour.as_deref(),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    }
}

fn load_community(conn: &mut SqliteConnection, row: models::Community) -> Result<Community> {
    let models::Community {
        rowid,
        id,
        name,
        description,
        lng,
        lat,
        radius,
        colour,
        created_at,
        updated_at,
    } = row;
    let tags = {
        use schema::community_tag::dsl;
        dsl::community_tag
            .select(dsl::tag)
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<String>(conn)
            .map_err(from_diesel_err)?
    };
    let members = {
        use schema::community_member::dsl;
        dsl::community_member
            .select(dsl::user_id)
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<String>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .map(UserId::from)
            .collect()
    };
    Ok(Community {
        id: id.into(),
        name,
        description,
        region: load_circle(lng, lat, radius)?,
        tags,
        members,
        colour,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_communities(
    conn: &mut SqliteConnection,
    rows: Vec<models::Community>,
) -> Result<Vec<Community>> {
    rows.into_iter()
        .map(|row| load_community(conn, row))
        .collect()
}

fn create_community(conn: &mut SqliteConnection, community: &Community) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        diesel::insert_into(schema::community::table)
            .values(&new_community_row(community))
            .execute(conn)?;
        let rowid = resolve_community_rowid(conn, community.id.as_str())?;
        insert_community_tags(conn, rowid, &community.tags)?;
        let members: Vec<_> = community
            .members
            .iter()
            .map(|user_id| models::NewCommunityMember {
                parent_rowid: rowid,
                user_id: user_id.as_str(),
            })
            .collect();
        diesel::insert_or_ignore_into(schema::community_member::table)
            .values(&members)
            .execute(conn)?;
        Ok(())
    })
    .map_err(from_diesel_err)
}

fn update_community(conn: &mut SqliteConnection, community: &Community) -> Result<()> {
    conn.transaction::<_, DieselError, _>(|conn| {
        use schema::{community::dsl as c_dsl, community_tag::dsl as t_dsl};
        let rowid = resolve_community_rowid(conn, community.id.as_str())?;
        diesel::update(c_dsl::community.filter(c_dsl::rowid.eq(rowid)))
            .set(&new_community_row(community))
            .execute(conn)?;
        diesel::delete(t_dsl::community_tag.filter(t_dsl::parent_rowid.eq(rowid)))
            .execute(conn)?;
        insert_community_tags(conn, rowid, &community.tags)?;
        Ok(())
    })
    .map_err(from_diesel_err)
}

fn get_community(conn: &mut SqliteConnection, id: &str) -> Result<Community> {
    use schema::community::dsl;
    let row = dsl::community
        .filter(dsl::id.eq(id))
        .first::<models::Community>(conn)
        .map_err(from_diesel_err)?;
    load_community(conn, row)
}

fn all_communities(conn: &mut SqliteConnection) -> Result<Vec<Community>> {
    use schema::community::dsl;
    let rows = dsl::community
        .order_by(dsl::rowid)
        .load::<models::Community>(conn)
        .map_err(from_diesel_err)?;
    load_communities(conn, rows)
}

fn communities_in_bbox(conn: &mut SqliteConnection, bbox: &MapBbox) -> Result<Vec<Community>> {
    use schema::community::dsl;
    let sw = bbox.south_west();
    let ne = bbox.north_east();
    let mut query = dsl::community
        .filter(dsl::lat.between(sw.lat(), ne.lat()))
        .into_boxed();
    if bbox.is_inverse() {
        query = query.filter(dsl::lng.ge(sw.lng()).or(dsl::lng.le(ne.lng())));
    } else {
        query = query.filter(dsl::lng.between(sw.lng(), ne.lng()));
    }
    let rows = query
        .order_by(dsl::rowid)
        .load::<models::Community>(conn)
        .map_err(from_diesel_err)?;
    load_communities(conn, rows)
}

fn max_community_radius(conn: &mut SqliteConnection) -> Result<Option<Distance>> {
    use schema::community::dsl;
    let max_radius = dsl::community
        .select(diesel::dsl::max(dsl::radius))
        .first::<Option<f64>>(conn)
        .map_err(from_diesel_err)?;
    Ok(max_radius.map(Distance::from_meters))
}

fn delete_community(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::community::dsl;
    // Tags and members are deleted by cascade
    let deleted = diesel::delete(dsl::community.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if deleted == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn touch_community(conn: &mut SqliteConnection, rowid: i64, at: Timestamp) -> QueryResult<usize> {
    use schema::community::dsl;
    diesel::update(dsl::community.filter(dsl::rowid.eq(rowid)))
        .set(dsl::updated_at.eq(at.as_millis()))
        .execute(conn)
}

fn add_community_member(
    conn: &mut SqliteConnection,
    id: &str,
    user_id: &UserId,
    at: Timestamp,
) -> Result<usize> {
    let count = conn
        .transaction::<_, DieselError, _>(|conn| {
            let rowid = resolve_community_rowid(conn, id)?;
            let inserted = diesel::insert_or_ignore_into(schema::community_member::table)
                .values(&models::NewCommunityMember {
                    parent_rowid: rowid,
                    user_id: user_id.as_str(),
                })
                .execute(conn)?;
            if inserted > 0 {
                touch_community(conn, rowid, at)?;
            }
            count_members(conn, rowid)
        })
        .map_err(from_diesel_err)?;
    Ok(count_to_usize(count))
}

fn remove_community_member(
    conn: &mut SqliteConnection,
    id: &str,
    user_id: &UserId,
    at: Timestamp,
) -> Result<usize> {
    let count = conn
        .transaction::<_, DieselError, _>(|conn| {
            use schema::community_member::dsl;
            let rowid = resolve_community_rowid(conn, id)?;
            let deleted = diesel::delete(
                dsl::community_member
                    .filter(dsl::parent_rowid.eq(rowid))
                    .filter(dsl::user_id.eq(user_id.as_str())),
            )
            .execute(conn)?;
            if deleted > 0 {
                touch_community(conn, rowid, at)?;
            }
            count_members(conn, rowid)
        })
        .map_err(from_diesel_err)?;
    Ok(count_to_usize(count))
}

#[cfg(test)]
mod tests {
    use super::super::tests::init_connections;
    use super::*;
    use pde_entities::builders::*;

    fn pt(lng: f64, lat: f64) -> GeoPoint {
        GeoPoint::from_lng_lat_deg(lng, lat)
    }

    #[test]
    fn create_and_load_community() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        let community = Community::build()
            .id("c")
            .name("Barrio Italia")
            .region(pt(-70.62, -33.44), 750.0)
            .tags(vec!["barrio"])
            .finish();
        db.create_community(&community).unwrap();
        assert!(matches!(
            db.create_community(&community),
            Err(repo::Error::AlreadyExists)
        ));
        let loaded = db.get_community("c").unwrap();
        assert_eq!(community, loaded);
        assert!(matches!(
            db.get_community("x"),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn update_keeps_members() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        let community = Community::build()
            .id("c")
            .name("c")
            .tags(vec!["a", "b"])
            .finish();
        db.create_community(&community).unwrap();
        db.add_community_member("c", &"u".into(), Timestamp::from_millis(1))
            .unwrap();
        let updated = Community {
            name: "d".into(),
            tags: vec!["b".into()],
            members: vec![],
            colour: Some("#00ff00".into()),
            ..community
        };
        db.update_community(&updated).unwrap();
        let loaded = db.get_community("c").unwrap();
        assert_eq!("d", loaded.name);
        assert_eq!(vec!["b".to_string()], loaded.tags);
        assert_eq!(vec![UserId::from("u")], loaded.members);
        assert_eq!(Some("#00ff00"), loaded.colour.as_deref());
    }

    #[test]
    fn join_and_leave() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        db.create_community(&Community::build().id("c").name("c").finish())
            .unwrap();
        let t = Timestamp::from_millis(42);
        assert_eq!(1, db.add_community_member("c", &"u1".into(), t).unwrap());
        assert_eq!(1, db.add_community_member("c", &"u1".into(), t).unwrap());
        assert_eq!(2, db.add_community_member("c", &"u2".into(), t).unwrap());
        assert_eq!(1, db.remove_community_member("c", &"u1".into(), t).unwrap());
        assert_eq!(1, db.remove_community_member("c", &"u1".into(), t).unwrap());
        assert_eq!(t, db.get_community("c").unwrap().updated_at);
        assert!(matches!(
            db.add_community_member("x", &"u1".into(), t),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn coarse_selection_by_bbox() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        assert!(db.max_community_radius().unwrap().is_none());
        for (id, lng, radius) in [("a", 10.0, 100.0), ("b", 179.5, 5_000.0), ("c", -179.5, 200.0)] {
            db.create_community(
                &Community::build()
                    .id(id)
                    .name(id)
                    .region(pt(lng, 0.0), radius)
                    .finish(),
            )
            .unwrap();
        }
        assert_eq!(
            Some(5_000.0),
            db.max_community_radius().unwrap().map(Distance::to_meters)
        );
        let bbox = MapBbox::new(pt(9.0, -1.0), pt(11.0, 1.0));
        let found = db.communities_in_bbox(&bbox).unwrap();
        assert_eq!(1, found.len());
        assert_eq!("a", found[0].id.as_str());
        // Wraps around the antimeridian
        let bbox = MapBbox::new(pt(179.0, -1.0), pt(-179.0, 1.0));
        let found = db.communities_in_bbox(&bbox).unwrap();
        let ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["b", "c"], ids);
    }

    #[test]
    fn delete_community() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        db.create_community(
            &Community::build()
                .id("c")
                .name("c")
                .tags(vec!["x"])
                .members(vec!["u"])
                .finish(),
        )
        .unwrap();
        db.delete_community("c").unwrap();
        assert!(matches!(
            db.delete_community("c"),
            Err(repo::Error::NotFound)
        ));
        assert!(db.all_communities().unwrap().is_empty());
        let mut pooled = db.0.conn();
        let conn: &mut SqliteConnection = &mut pooled;
        let tags: i64 = schema::community_tag::table
            .count()
            .get_result(conn)
            .unwrap();
        let members: i64 = schema::community_member::table
            .count()
            .get_result(conn)
            .unwrap();
        assert_eq!((0, 0), (tags, members));
    }

    #[test]
    fn tips_outlive_their_community() {
        let connections = init_connections();
        let db = connections.exclusive().unwrap();
        db.create_community(&Community::build().id("c").name("c").finish())
            .unwrap();
        db.create_tip(&Tip::build().id("t").community("c").text().finish())
            .unwrap();
        db.delete_community("c").unwrap();
        assert!(db.get_tip("t").is_ok());
    }

    #[test]
    fn read_only_connection_rejects_writes() {
        let connections = init_connections();
        let db = connections.shared().unwrap();
        assert!(db
            .create_community(&Community::build().id("c").name("c").finish())
            .is_err());
    }
}
