mod change;
mod entity;
mod repository;

pub use change::PlantChange;
pub use entity::{Plant, PlantStub, PlantsFilter};
pub use repository::PlantRepository;
