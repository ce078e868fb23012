//! Benchmark harness: dimension matrix, trial generators and CSV reporting.

pub mod dims;
pub mod report;
pub mod suite;

pub use dims::{default_matrix, matrix_from_args, parse_dims, Dims};
pub use report::{Record, Reporter, HEADER};
pub use suite::{Suite, SuiteConfig};
