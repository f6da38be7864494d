//! Seat availability server for Bangladesh Railway trains.
//!
//! Answers: "between which stations of this train can I still buy a seat,
//! and in which class?" by querying the Shohoz booking API for every
//! forward station pair, and pushes an alert for each one with seats left.

pub mod cache;
pub mod checker;
pub mod config;
pub mod domain;
pub mod matrix;
pub mod notify;
pub mod shohoz;
pub mod web;
