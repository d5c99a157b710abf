pub(crate) mod motion;
pub(crate) mod scheduler;
pub(crate) mod style;
