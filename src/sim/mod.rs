pub(crate) mod body;
pub(crate) mod initial_parameters;
pub(crate) mod projection;
pub(crate) mod system;
pub(crate) mod units;
