//! Core library for the `advisor` CLI.
//!
//! This crate defines:
//! - The observation model, its validation and the dew point helper
//! - The umbrella predictor, UV advisor and clothing advisor
//! - Configuration of every threshold and piece of wording they use
//! - Adapters from provider payloads into observations
//!
//! Every advisor is a pure function of a [`WeatherSnapshot`] and its config
//! section, so they can run in any order or in parallel.

pub mod clothing;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod report;
pub mod umbrella;
pub mod uv;

pub use clothing::ClothingRecommendation;
pub use config::Config;
pub use error::{AdvisorError, Result};
pub use model::{ConditionGroup, Observation, WeatherSnapshot, dew_point};
pub use provider::{ProviderId, ProviderPayload};
pub use report::{Assessment, assess};
pub use umbrella::UmbrellaRecommendation;
pub use uv::UvRecommendation;
