use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Identifier of a deployable capability as published in the parameter store, e.g. `lambda`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Service(String);

impl Service {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("service name cannot be empty".to_string());
        }
        if trimmed.contains('/') {
            return Err(format!("invalid service name: {trimmed}"));
        }
        Ok(Self::new(trimmed))
    }
}

impl From<&str> for Service {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Service {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Service {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Service {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_identifier() {
        let service: Service = "lambda".parse().unwrap();
        assert_eq!(service, Service::from("lambda"));
    }

    #[test]
    fn parse_rejects_paths() {
        let err = "regions/lambda".parse::<Service>().unwrap_err();
        assert_eq!(err, "invalid service name: regions/lambda");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!("".parse::<Service>().is_err());
    }
}
