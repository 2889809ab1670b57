pub mod company_service;
pub mod organization_unit_service;

pub use company_service::{CompanyError, CompanyService, CreateCompany, UpdateCompany};
pub use organization_unit_service::{
    CreateOrganizationUnit, OrgUnitError, OrganizationUnitService, UpdateOrganizationUnit,
};
