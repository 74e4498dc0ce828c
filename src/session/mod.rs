pub(crate) mod export;
