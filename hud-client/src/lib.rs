pub mod detector;
pub mod driver;
pub mod sink;

pub use detector::{LandmarkDetector, ReplayDetector, SyntheticDetector};
pub use driver::{Driver, DriverConfig, RunSummary};
pub use sink::RendererSink;
