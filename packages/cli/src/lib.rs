#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal client for radon canvassing.
//!
//! [`nav`] holds the route table and the dropdown menu state machine,
//! [`screens`] renders each route's view and drives it through prompts,
//! [`interactive`] is the menu shell and [`commands`] the one-shot
//! subcommands of the `radon_canvas` binary.

pub mod commands;
pub mod interactive;
pub mod nav;
pub mod screens;
