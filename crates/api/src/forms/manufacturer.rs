use serde::Deserialize;
use taxi_core::form::{char_field, FormErrors};
use taxi_db::models::manufacturer::{CreateManufacturer, UpdateManufacturer};
use validator::Validate;

/// Fields: `name`, `country`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ManufacturerForm {
    #[validate(custom(function = "char_field"))]
    pub name: String,
    #[validate(custom(function = "char_field"))]
    pub country: String,
}

impl ManufacturerForm {
    pub fn clean_create(self) -> Result<CreateManufacturer, FormErrors> {
        let (name, country) = self.cleaned()?;
        Ok(CreateManufacturer { name, country })
    }

    pub fn clean_update(self) -> Result<UpdateManufacturer, FormErrors> {
        let (name, country) = self.cleaned()?;
        Ok(UpdateManufacturer { name, country })
    }

    fn cleaned(self) -> Result<(String, String), FormErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
        };
        form.validate()?;
        Ok((form.name, form.country))
    }
}
