use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Key of a stored document. Assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentId;
    use std::str::FromStr;

    #[test]
    fn document_id_parses_its_display_form() {
        let id = DocumentId::generate();
        let parsed = DocumentId::from_str(&id.to_string()).expect("parse id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn document_id_rejects_garbage() {
        assert!(DocumentId::from_str("not-a-uuid").is_err());
    }
}
