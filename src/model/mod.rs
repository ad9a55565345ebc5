/// Model layer: artifact discovery on disk and the regressor it contains.
pub mod artifact;
pub mod regressor;
