
pub mod prelude {
    use std::cell::RefCell;

    pub use pde_core::{
        db::*,
        entities::*,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub mod tantivy {
        pub use pde_db_tantivy::SearchEngine;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
        prelude::RetryPolicy,
    };

    pub fn new_community(name: &str, lng: f64, lat: f64, radius: f64) -> usecases::NewCommunity {
        usecases::NewCommunity {
            name: name.into(),
            longitude: lng,
            latitude: lat,
            radius,
            ..Default::default()
        }
    }

    pub fn new_pin(community_id: &str, title: &str, lng: f64, lat: f64) -> usecases::NewTip {
        usecases::NewTip {
            kind: "pin".into(),
            community_id: community_id.into(),
            title: title.into(),
            location: Some(usecases::NewLocation {
                longitude: lng,
                latitude: lat,
                radius: 0.0,
            }),
            address: Some("Alameda 100".into()),
            ..Default::default()
        }
    }

    pub fn new_text(community_id: &str, title: &str) -> usecases::NewTip {
        usecases::NewTip {
            kind: "text".into(),
            community_id: community_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub search_engine: RefCell<tantivy::SearchEngine>,
        pub retry: RetryPolicy,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            pde_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            let search_engine = tantivy::SearchEngine::init_in_ram().unwrap();
            Self {
                db_connections,
                search_engine: RefCell::new(search_engine),
                retry: RetryPolicy::never(),
            }
        }

        pub fn create_community(&self, new_community: usecases::NewCommunity) -> Community {
            flows::create_community(&self.db_connections, new_community).unwrap()
        }

        pub fn create_tip(&self, new_tip: usecases::NewTip) -> Tip {
            self.try_create_tip(new_tip).unwrap()
        }

        pub fn try_create_tip(&self, new_tip: usecases::NewTip) -> crate::Result<Tip> {
            flows::create_tip(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                new_tip,
                "author".into(),
            )
        }

        pub fn try_get_tip(&self, id: &str) -> Option<Tip> {
            match self.db_connections.shared().unwrap().get_tip(id) {
                Ok(tip) => Some(tip),
                Err(RepoError::NotFound) => None,
                x => x.map(|_| None).unwrap(),
            }
        }

        pub fn search(&self, text: Option<&str>, position: Option<GeoPoint>) -> usecases::SearchResult {
            self.search_with(usecases::SearchRequest {
                text,
                position,
                ..Default::default()
            })
        }

        pub fn search_with(&self, req: usecases::SearchRequest) -> usecases::SearchResult {
            flows::search_tips(
                &self.db_connections,
                &*self.search_engine.borrow(),
                &self.retry,
                req,
            )
            .unwrap()
        }

        pub fn query_tip_ids(&self, text: &str) -> Vec<Id> {
            let query = TipIndexQuery {
                text: text.into(),
                community_ids: None,
            };
            self.search_engine.borrow().query_tip_ids(&query).unwrap()
        }
    }
}
