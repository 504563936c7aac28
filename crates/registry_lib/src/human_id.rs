//! The generation of the human-readable IDs of the categories and the events.
//!
//! A human-ID is made of a prefix letter, 2 random uppercase letters, a dash and 4 random digits,
//! like `CAB-1234` for a category or `EXQ-0042` for an event. This is the ID used by the clients
//! to refer to a category or an event, the internal ID of the database rows is only used to
//! link them.

use rand::Rng;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter as _};

use crate::error::RegistryResult;

/// The letters a human-ID is made of. The `I` letter is left out to not be confused with a `1`.
const LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// The maximum amount of generated IDs that are checked for collision before inserting a row.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// The kind of entity a human-ID is generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanIdKind {
    /// A category, with the `C` prefix.
    Category,
    /// An event, with the `E` prefix.
    Event,
}

impl HumanIdKind {
    /// Returns the first letter of the human-IDs of this kind.
    pub fn prefix(self) -> char {
        match self {
            Self::Category => 'C',
            Self::Event => 'E',
        }
    }
}

/// Generates a human-ID of the provided kind with the thread-local random generator.
pub fn generate(kind: HumanIdKind) -> String {
    generate_with(&mut rand::rng(), kind)
}

/// Generates a human-ID of the provided kind with the provided random generator.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, kind: HumanIdKind) -> String {
    let mut out = String::with_capacity(8);
    out.push(kind.prefix());
    out.extend((0..2).map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char));
    out.push('-');
    out.extend((0..4).map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char));
    out
}

/// Returns whether the provided string has the format of a human-ID of the provided kind.
pub fn is_human_id(kind: HumanIdKind, s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 8
        && bytes[0] == kind.prefix() as u8
        && bytes[1..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3] == b'-'
        && bytes[4..].iter().all(u8::is_ascii_digit)
}

/// Generates a human-ID that isn't used yet by a row of the provided entity.
///
/// After a few collisions, the last generated ID is returned anyway, and the unique constraint
/// of the column rejects the insertion if it's still taken.
pub(crate) async fn generate_unused<C, E>(
    conn: &C,
    kind: HumanIdKind,
    column: E::Column,
) -> RegistryResult<String>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut id = generate(kind);

    for _ in 1..MAX_GENERATION_ATTEMPTS {
        let taken = E::find().filter(column.eq(id.as_str())).one(conn).await?.is_some();
        if !taken {
            break;
        }
        tracing::debug!("Generated human-ID {id} is already taken, generating another one");
        id = generate(kind);
    }

    Ok(id)
}
