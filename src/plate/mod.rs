pub(crate) mod circle;
pub(crate) mod mask;
pub(crate) mod packing;
