//! Vivint cloud service integration
//!
//! Config flow for the Vivint Sky cloud service. The cloud API client is
//! external; the flow only drives it through [`config_flow::CloudSession`].

pub mod config_flow;

pub use config_flow::{CloudError, CloudSession, VivintConfigFlow};

pub const DOMAIN: &str = "vivint";
