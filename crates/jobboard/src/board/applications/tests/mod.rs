mod common;
mod query;
mod review;
