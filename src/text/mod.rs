pub(crate) mod cache;
pub(crate) mod fit;
pub(crate) mod font;
pub(crate) mod source;
