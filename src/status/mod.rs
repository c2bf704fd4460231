pub mod classifier;
pub mod reducer;
pub mod state;

pub use classifier::{Classifier, MarkerClassifier};
pub use reducer::StatusReducer;
pub use state::{ActiveIncident, ItemStatus, ServiceState, Snapshot};
