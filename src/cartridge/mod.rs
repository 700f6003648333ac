pub(crate) mod assembler;
pub(crate) mod encode;
pub(crate) mod renderer;
pub(crate) mod request;
