// Module layout (Clean Architecture style)
// - bootstrap: configuration and dependency wiring
// - infrastructure: Postgres and in-memory user storage
// - presentation: HTTP handlers and routing
// - application: repository port and use cases
// - domain: user model and age rule

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
