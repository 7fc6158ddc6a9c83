use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated ids.
const ID_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque, immutable identifier of a note.
///
/// Generated ids are 9 lowercase base-36 characters, but any string read
/// back from storage is accepted as-is.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(s: impl Into<String>) -> Self {
        NoteId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Draw a random base-36 id. Uniqueness against a collection is the
    /// caller's job (see `NoteStore::fresh_id`).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let s = (0..ID_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        NoteId(s)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        NoteId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_ids_are_base36() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = NoteId::generate(&mut rng);
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = NoteId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc123""#);
        let back: NoteId = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(back, id);
    }
}
