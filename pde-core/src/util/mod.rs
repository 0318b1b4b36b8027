pub mod dedup;
pub mod stamp;
pub mod validate;
