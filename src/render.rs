pub(crate) mod animate;
pub(crate) mod backend;
pub(crate) mod cpu;
