#[cfg(feature = "linfa")]
pub mod logistic;

pub mod classifier_trait;
pub mod registry;

pub use classifier_trait::ClassifierModel;
pub use registry::ModelRegistry;
