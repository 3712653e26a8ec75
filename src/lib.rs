//! Core library for the ledger-reformat command line application.
//!
//! The library turns loosely formatted trial balance exports into the fixed
//! five-column layout expected by the downstream accounting import. Reading and
//! writing workbooks lives under [`ledger::reformat::io`], table representations
//! inside [`ledger::reformat::model`], and the batch sequencing of load,
//! validate, reconcile and project steps under [`ledger::reformat::pipeline`].

pub mod ledger;

pub use ledger::reformat::{
    Result, ToolError, error, io, load, logging, model, pipeline, project, reconcile, schema,
    validate,
};
