pub use pde_core::{db, repositories};

pub mod entities {
    pub use pde_core::entities::*;
}

pub mod usecases {
    pub use pde_core::usecases::*;
}

pub mod prelude {
    pub use pde_application::error::*;

    pub use super::{db::*, entities::*, repositories::*};
}
