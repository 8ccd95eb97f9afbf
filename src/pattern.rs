pub(crate) mod direction;
pub(crate) mod model;
pub(crate) mod source;
pub(crate) mod step;
