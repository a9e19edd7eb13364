//! Simulated dashboards served over websocket frames.

pub mod apps;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod frame;
pub mod ids;
pub mod model;
pub mod panels;
pub mod parking;
pub mod router;
pub mod routes;
pub mod sim;
pub mod state;
pub mod store;
pub mod ticker;
