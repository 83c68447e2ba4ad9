use thiserror::Error;

use crate::Coordinate;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("Field {0} is required")]
    MissingField(&'static str),
    #[error("Field {field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Please enter valid coordinates (longitude: -180 to 180, latitude: -90 to 90)")]
    InvalidCoordinate { lon: f64, lat: f64 },
}

/// Raw contents of the "add location" form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LocationForm {
    pub name: String,
    pub longitude: String,
    pub latitude: String,
}

/// A validated form submission, ready for `WaypointStore::add`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub coord: Coordinate,
}

impl LocationForm {
    pub fn validate(&self) -> Result<NewLocation, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        let lon = parse_number(&self.longitude, "longitude")?;
        let lat = parse_number(&self.latitude, "latitude")?;
        let coord = Coordinate { lon, lat };
        if !coord.is_valid() {
            return Err(FormError::InvalidCoordinate { lon, lat });
        }
        Ok(NewLocation {
            name: name.to_string(),
            coord,
        })
    }

    /// Validates and clears the form. On error the fields are kept as typed.
    pub fn submit(&mut self) -> Result<NewLocation, FormError> {
        let location = self.validate()?;
        *self = Self::default();
        Ok(location)
    }
}

fn parse_number(raw: &str, field: &'static str) -> Result<f64, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, lon: &str, lat: &str) -> LocationForm {
        LocationForm {
            name: name.into(),
            longitude: lon.into(),
            latitude: lat.into(),
        }
    }

    #[test]
    fn test_submit_valid_trims_name_and_resets() {
        let mut form = form("  Lyon ", "4.8357", "45.7640");
        let location = form.submit().unwrap();
        assert_eq!(location.name, "Lyon");
        assert_eq!(location.coord, Coordinate::new(4.8357, 45.764));
        assert_eq!(form, LocationForm::default());
    }

    #[test]
    fn test_submit_out_of_range_keeps_fields() {
        let mut original = form("Nowhere", "181", "0");
        let err = original.submit().unwrap_err();
        assert!(matches!(err, FormError::InvalidCoordinate { .. }));
        assert_eq!(
            err.to_string(),
            "Please enter valid coordinates (longitude: -180 to 180, latitude: -90 to 90)"
        );
        assert_eq!(original.longitude, "181");
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = form("Pole", "0", "-90.5").validate().unwrap_err();
        assert!(matches!(err, FormError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(form("Corner", "-180", "90").validate().is_ok());
        assert!(form("Corner", "180", "-90").validate().is_ok());
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = form("X", "abc", "1").validate().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidNumber {
                field: "longitude",
                value: "abc".into()
            }
        );
    }

    #[test]
    fn test_nan_rejected_as_invalid_coordinate() {
        let err = form("X", "NaN", "1").validate().unwrap_err();
        assert!(matches!(err, FormError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            form("   ", "1", "1").validate().unwrap_err(),
            FormError::MissingField("name")
        );
        assert_eq!(
            form("A", "1", "").validate().unwrap_err(),
            FormError::MissingField("latitude")
        );
    }
}
