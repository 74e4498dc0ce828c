pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod rotation;
pub(crate) mod synth;
