//! Controller Docs - a machine-readable description of every operation a Rust
//! web service exposes.
//!
//! For every controller operation the generator reports its HTTP method,
//! effective route, parameters with their inferred binding source, and the
//! structural shape of its return and parameter types.
//!
//! # Architecture
//!
//! 1. [`source`] - turns host introspection (a Rust source tree via
//!    [`scanner`] and [`parser`], or a manifest file) into normalized
//!    [`descriptor`]s and a type [`catalog`]
//! 2. [`generator`] - discovers eligible controllers and operations and
//!    assembles one record per (operation, HTTP method) pair
//! 3. [`route`] - composes controller and operation route templates
//! 4. [`binding`] - classifies where each parameter is bound from
//! 5. [`shape`] and [`naming`] - recursive type shapes and friendly type names
//! 6. [`serializer`] and [`endpoint`] - JSON/YAML output and a `/docs` handler
//!
//! # Example Usage
//!
//! ```no_run
//! use controller_docs::{
//!     generator::DocsGenerator,
//!     serializer::serialize_json,
//!     source::RustSource,
//! };
//! use std::path::PathBuf;
//!
//! let source = RustSource::new(PathBuf::from("./my-service"));
//! let records = DocsGenerator::default().generate(&source).unwrap();
//! println!("{}", serialize_json(&records).unwrap());
//! ```

pub mod binding;
pub mod catalog;
pub mod cli;
pub mod descriptor;
pub mod endpoint;
pub mod error;
pub mod generator;
pub mod naming;
pub mod parser;
pub mod route;
pub mod scanner;
pub mod serializer;
pub mod shape;
pub mod source;
