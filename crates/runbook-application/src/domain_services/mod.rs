//! Domain Service Facade
//!
//! Thin re-export layer so callers outside this crate (`runbook-server`)
//! can depend on `runbook_application::domain_services::*` without caring
//! whether a given interface lives under `ports` or is defined here
//! directly. Mirrors the separation the use cases live behind: `ports`
//! defines the contract, `use_cases` implements it, this module is the
//! stable import surface.

pub use crate::ports::services::{
    FeedbackServiceInterface, RunbookServiceInterface, SearchServiceInterface,
    SourcesServiceInterface,
};
