pub mod layout;
pub mod material;
pub mod rng;
pub mod store;
pub mod vessel;

pub use material::{MatterState, ShapeKind};
pub use store::{SimulationStore, VesselSlot};
pub use vessel::{Rect, VesselBounds, VesselDescriptor, VesselId};
