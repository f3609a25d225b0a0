pub mod birthday;
pub mod user;
