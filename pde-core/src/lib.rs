pub mod db;
pub mod repositories;
pub mod text;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use pde_entities::{community::*, geo::*, id::*, time::*, tip::*};
}

pub use repositories::Error as RepoError;
