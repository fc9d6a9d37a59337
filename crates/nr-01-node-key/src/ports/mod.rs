//! Ports module for the Node Key registry

pub mod inbound;

pub use inbound::NodeKeyApi;
