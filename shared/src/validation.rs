//! Validation utilities for the PlantCare platform

use crate::models::WateringBenchmark;

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength (minimum length only)
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a city name as sent to the weather provider
pub fn validate_city(city: &str) -> Result<(), &'static str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err("City cannot be empty");
    }
    if trimmed.len() > 255 {
        return Err("City cannot exceed 255 characters");
    }
    Ok(())
}

/// Validate a watering benchmark as stored on a plant.
///
/// Only shape is checked here; the scheduler tolerates any content and falls
/// back to defaults, so an unusual unit is not an error.
pub fn validate_benchmark(benchmark: &WateringBenchmark) -> Result<(), &'static str> {
    if benchmark.value.trim().is_empty() {
        return Err("Benchmark value cannot be empty");
    }
    if benchmark.unit.trim().is_empty() {
        return Err("Benchmark unit cannot be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("bad").is_err());
        assert!(validate_email("no-at.example.com").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_city_validation() {
        assert!(validate_city("Paris").is_ok());
        assert!(validate_city("   ").is_err());
    }

    #[test]
    fn test_benchmark_validation() {
        assert!(validate_benchmark(&WateringBenchmark::new("7", "days")).is_ok());
        assert!(validate_benchmark(&WateringBenchmark::new("", "days")).is_err());
        assert!(validate_benchmark(&WateringBenchmark::new("7", " ")).is_err());
        // Unusual units are interpretable downstream via defaults, not errors
        assert!(validate_benchmark(&WateringBenchmark::new("2", "weeks")).is_ok());
    }
}
