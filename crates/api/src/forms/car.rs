use serde::{Deserialize, Deserializer};
use taxi_core::form::{char_field, FormErrors, REQUIRED_MESSAGE};
use taxi_core::types::DbId;
use taxi_db::models::car::{CreateCar, UpdateCar};
use validator::Validate;

/// Fields: `model`, `manufacturer_id`, `drivers` (may be empty, `null` or
/// absent).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CarForm {
    #[validate(custom(function = "char_field"))]
    pub model: String,
    #[validate(required(message = "This field is required."))]
    pub manufacturer_id: Option<DbId>,
    #[serde(deserialize_with = "null_as_empty")]
    pub drivers: Vec<DbId>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DbId>>::deserialize(deserializer)?.unwrap_or_default())
}

struct CleanCar {
    model: String,
    manufacturer_id: DbId,
    driver_ids: Vec<DbId>,
}

impl CarForm {
    pub fn clean_create(self) -> Result<CreateCar, FormErrors> {
        let car = self.cleaned()?;
        Ok(CreateCar {
            model: car.model,
            manufacturer_id: car.manufacturer_id,
            driver_ids: car.driver_ids,
        })
    }

    pub fn clean_update(self) -> Result<UpdateCar, FormErrors> {
        let car = self.cleaned()?;
        Ok(UpdateCar {
            model: car.model,
            manufacturer_id: car.manufacturer_id,
            driver_ids: car.driver_ids,
        })
    }

    fn cleaned(self) -> Result<CleanCar, FormErrors> {
        let mut driver_ids = self.drivers;
        driver_ids.sort_unstable();
        driver_ids.dedup();

        let form = Self {
            model: self.model.trim().to_string(),
            manufacturer_id: self.manufacturer_id,
            drivers: Vec::new(),
        };
        form.validate()?;

        let manufacturer_id = form
            .manufacturer_id
            .ok_or_else(|| FormErrors::single("manufacturer_id", REQUIRED_MESSAGE))?;

        Ok(CleanCar {
            model: form.model,
            manufacturer_id,
            driver_ids,
        })
    }
}
