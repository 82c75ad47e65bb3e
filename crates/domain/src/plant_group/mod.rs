mod change;
mod entity;
mod repository;

pub use change::PlantGroupChange;
pub use entity::{PlantGroup, PlantGroupStub};
pub use repository::PlantGroupRepository;
