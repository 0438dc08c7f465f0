pub mod search;
pub mod snippet;
