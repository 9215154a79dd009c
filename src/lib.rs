pub mod app;
pub mod config;
pub mod controller;
pub mod host;
pub mod markup;
pub mod route;
pub mod strip;
pub mod trail;
