//! Client-side orchestration for a remote construction-document extraction
//! service.
//!
//! The library owns selection state, endpoint routing, the multipart upload
//! lifecycle, error normalization, result storage, and the dependent
//! question-answering exchange. Presentation (CLI, UI) is a consumer of
//! [`session::ParserSession`] snapshots and owns nothing else.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod routing;
pub mod services;
pub mod session;
