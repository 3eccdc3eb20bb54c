pub mod bin_error;
pub mod conversions;
pub mod le;
