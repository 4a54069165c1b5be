pub mod atmosphere;
pub mod aerodynamics;

pub use aerodynamics::drag_force;
pub use atmosphere::AtmosphereModel;
