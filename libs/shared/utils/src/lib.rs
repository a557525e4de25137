pub mod sanitize;
pub mod test_utils;
