pub mod companies;
pub mod organization_units;
