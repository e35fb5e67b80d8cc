pub mod actor;
pub mod movie;
pub mod name;
pub mod tv_show;
