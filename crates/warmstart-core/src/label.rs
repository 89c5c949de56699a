use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Label {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl Label {
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.qualifier, self.organization, self.application
        )
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(
        "Identifier {0} was not in the correct format. Identifiers should be formatted as '{{qualifier}}.{{organization}}.{{application}}'."
    )]
    InvalidIdentifier(String),
}

impl FromStr for Label {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split('.').collect();
        match parts.as_slice() {
            [qualifier, organization, application]
                if parts.iter().all(|part| !part.is_empty()) =>
            {
                Ok(Label {
                    qualifier: (*qualifier).to_owned(),
                    organization: (*organization).to_owned(),
                    application: (*application).to_owned(),
                })
            }
            _ => Err(ParseError::InvalidIdentifier(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "./label_test.rs"]
mod label_test;
