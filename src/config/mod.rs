pub(crate) mod cache;
pub(crate) mod request;
pub(crate) mod resolved;
