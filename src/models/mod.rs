pub mod design;
pub mod labour;
pub mod materials;
pub mod product;
pub mod selections;

pub use design::{ArrayDesign, Illumination};
pub use labour::{OperatorProfile, ProcessStep, StepTiming};
pub use materials::{Catalog, Currency};
pub use product::Product;
pub use selections::Selections;
