pub mod material;
pub mod material_type;
pub mod part;
pub mod project;
pub mod project_tag;
pub mod step;
pub mod tag;

pub use material::Entity as Material;
pub use material_type::Entity as MaterialType;
pub use part::Entity as Part;
pub use project::Entity as Project;
pub use project_tag::Entity as ProjectTag;
pub use step::Entity as Step;
pub use tag::Entity as Tag;
