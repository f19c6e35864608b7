//! Destination schema preparation
//!
//! Splitting and qualifying DDL scripts, running them with per-statement
//! failure isolation, managing schema-owning principals, and copying tables
//! between schemas.

pub mod copier;
pub mod ddl;
pub mod executor;
pub mod manager;
pub mod privileges;
pub mod resolver;
pub mod rewriter;
pub mod splitter;

pub use copier::{CopyReport, SchemaCopier};
pub use executor::{ExecutionMode, ExecutionReport, SchemaExecutor};
pub use manager::{CreateReport, SchemaManager, TableInfo};
pub use privileges::{EnsureReport, PrivilegeManager, RestrictReport};
