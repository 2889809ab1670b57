use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::company::Company;

#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Company not found: {0}")]
    NotFound(Uuid),

    #[error("Company name already exists: {0}")]
    AlreadyExists(String),

    #[error("Company {0} still has organization units attached")]
    InUse(Uuid),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Manager(#[from] DatabaseError),
}

#[derive(Debug, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

const COMPANY_COLUMNS: &str = "id, name, description, logo_url, website, phone_number, email, \
                               address, postal_code, city, country, created_at, updated_at";

/// Sequential CRUD over the `company` table; no hierarchy here
pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub async fn new() -> Result<Self, CompanyError> {
        let pool = DatabaseManager::main_pool().await?;
        Ok(Self { pool })
    }

    pub async fn list(&self) -> Result<Vec<Company>, CompanyError> {
        let companies = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM company ORDER BY created_at",
            COMPANY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn get(&self, id: Uuid) -> Result<Company, CompanyError> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM company WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CompanyError::NotFound(id))
    }

    pub async fn create(&self, req: CreateCompany) -> Result<Company, CompanyError> {
        info!("Creating a new company");
        validate_company_name(&req.name)?;

        if self.name_exists(&req.name).await? {
            return Err(CompanyError::AlreadyExists(req.name));
        }

        let now = Utc::now();
        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO company \
             (id, name, description, website, phone_number, email, address, postal_code, city, country, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) \
             RETURNING {}",
            COMPANY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.website)
        .bind(&req.phone_number)
        .bind(&req.email)
        .bind(&req.address)
        .bind(&req.postal_code)
        .bind(&req.city)
        .bind(&req.country)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn update(&self, id: Uuid, changes: UpdateCompany) -> Result<Company, CompanyError> {
        info!("Updating company {}", id);
        let mut company = self.get(id).await?;

        if let Some(name) = changes.name {
            validate_company_name(&name)?;
            if name != company.name && self.name_exists(&name).await? {
                return Err(CompanyError::AlreadyExists(name));
            }
            company.name = name;
        }
        if let Some(v) = changes.description {
            company.description = Some(v);
        }
        if let Some(v) = changes.website {
            company.website = Some(v);
        }
        if let Some(v) = changes.phone_number {
            company.phone_number = Some(v);
        }
        if let Some(v) = changes.email {
            company.email = Some(v);
        }
        if let Some(v) = changes.address {
            company.address = Some(v);
        }
        if let Some(v) = changes.postal_code {
            company.postal_code = Some(v);
        }
        if let Some(v) = changes.city {
            company.city = Some(v);
        }
        if let Some(v) = changes.country {
            company.country = Some(v);
        }
        company.updated_at = Utc::now();

        sqlx::query(
            "UPDATE company \
             SET name = $2, description = $3, website = $4, phone_number = $5, email = $6, \
                 address = $7, postal_code = $8, city = $9, country = $10, updated_at = $11 \
             WHERE id = $1",
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.phone_number)
        .bind(&company.email)
        .bind(&company.address)
        .bind(&company.postal_code)
        .bind(&company.city)
        .bind(&company.country)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(company)
    }

    /// Delete a company. Fails with `InUse` while organization units still
    /// reference it (FK is NO ACTION, not cascade).
    pub async fn delete(&self, id: Uuid) -> Result<(), CompanyError> {
        info!("Deleting company {}", id);
        self.get(id).await?;

        let result = sqlx::query("DELETE FROM company WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(CompanyError::InUse(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn name_exists(&self, name: &str) -> Result<bool, CompanyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM company WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }
}

fn validate_company_name(name: &str) -> Result<(), CompanyError> {
    let len = name.chars().count();
    if len == 0 || len > 100 {
        return Err(CompanyError::Validation {
            field: "name",
            message: "Name must be between 1 and 100 characters.".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_company_name_length() {
        assert!(validate_company_name("Acme").is_ok());
        assert!(validate_company_name("").is_err());
        assert!(validate_company_name(&"x".repeat(101)).is_err());
    }
}
