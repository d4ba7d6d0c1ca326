pub mod response_models;
pub mod vector_parser;

pub use response_models::{PromResponse, QueryData};
pub use vector_parser::parse_vector;
