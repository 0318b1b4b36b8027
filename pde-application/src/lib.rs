#[macro_use]
extern crate log;

mod communities;
mod indexing;
mod retry;
mod search;
mod tips;

pub mod prelude {
    pub use super::{communities::*, indexing::*, retry::*, search::*, tips::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use pde_core::{db::*, entities::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use pde_db_sqlite::Connections;
}
