pub mod query_result;
pub mod vector_record;
