pub mod controller;
pub mod form;
pub mod handler;
pub mod state;
